use aft_common_lambda::adapters::dynamodb::DynamoDbEventStore;
use aft_common_lambda::adapters::parameters::SsmParameterStore;
use aft_common_lambda::config::RuntimeConfig;
use aft_common_lambda::handlers::event_logger::{handle_controltower_event, EventLogOutcome};
use aft_common_lambda::logging::init_logging;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

struct Dependencies {
    parameters: SsmParameterStore,
    store: DynamoDbEventStore,
}

async fn handle_request(
    dependencies: &Dependencies,
    event: LambdaEvent<Value>,
) -> Result<EventLogOutcome, Error> {
    handle_controltower_event(&event.payload, &dependencies.parameters, &dependencies.store)
        .map_err(Error::from)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let runtime_config = RuntimeConfig::load()?;
    init_logging(&runtime_config.logging());

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let dependencies = Dependencies {
        parameters: SsmParameterStore::from_config(&aws_config),
        store: DynamoDbEventStore::new(aws_sdk_dynamodb::Client::new(&aws_config)),
    };

    lambda_runtime::run(service_fn(|event| handle_request(&dependencies, event))).await
}
