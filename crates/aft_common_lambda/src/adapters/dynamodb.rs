use std::collections::HashMap;

use aft_common_core::error::{AftError, AftResult};
use aft_common_core::pagination::Page;
use aft_common_core::providers::RegistryProvider;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Map, Number, Value};

use super::block_on;

const COMPONENT: &str = "dynamodb";
const ID_ATTRIBUTE: &str = "id";

pub type Item = HashMap<String, AttributeValue>;

/// Writes one JSON document as an item into a named table.
pub trait EventStore {
    fn put_event(&self, table_name: &str, event: &Value) -> AftResult<()>;
}

/// Reads the account ids AFT manages from the request metadata table.
#[derive(Debug, Clone)]
pub struct DynamoDbRegistry {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoDbRegistry {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

impl RegistryProvider for DynamoDbRegistry {
    fn scan_account_ids(&self, continuation_key: Option<&str>) -> AftResult<Page<String>> {
        let start_key = continuation_key.map(|key| {
            HashMap::from([(ID_ATTRIBUTE.to_string(), AttributeValue::S(key.to_string()))])
        });

        let output = block_on(
            self.client
                .scan()
                .table_name(&self.table_name)
                .projection_expression(ID_ATTRIBUTE)
                .consistent_read(true)
                .set_exclusive_start_key(start_key)
                .send(),
        )
        .map_err(|error| AftError::remote(COMPONENT, "Scan", DisplayErrorContext(error)))?;

        let items = output
            .items()
            .iter()
            .filter_map(|item| string_attribute(item, ID_ATTRIBUTE))
            .collect();
        let next_token = self::continuation_key(output.last_evaluated_key())?;

        Ok(Page { items, next_token })
    }
}

#[derive(Debug, Clone)]
pub struct DynamoDbEventStore {
    client: aws_sdk_dynamodb::Client,
}

impl DynamoDbEventStore {
    pub fn new(client: aws_sdk_dynamodb::Client) -> Self {
        Self { client }
    }
}

impl EventStore for DynamoDbEventStore {
    fn put_event(&self, table_name: &str, event: &Value) -> AftResult<()> {
        let item = json_to_item(event)?;

        block_on(
            self.client
                .put_item()
                .table_name(table_name)
                .set_item(Some(item))
                .send(),
        )
        .map_err(|error| AftError::remote(COMPONENT, "PutItem", DisplayErrorContext(error)))?;

        tracing::info!(component = COMPONENT, table = table_name, "item written");
        Ok(())
    }
}

fn string_attribute(item: &Item, name: &str) -> Option<String> {
    item.get(name)
        .and_then(|value| value.as_s().ok())
        .cloned()
}

/// Scan continuation from `LastEvaluatedKey`. A key that is present but
/// carries no string `id` cannot resume the scan, so it fails instead of
/// ending the listing early.
fn continuation_key(last_evaluated_key: Option<&Item>) -> AftResult<Option<String>> {
    let Some(key) = last_evaluated_key else {
        return Ok(None);
    };
    string_attribute(key, ID_ATTRIBUTE).map(Some).ok_or_else(|| {
        AftError::remote(
            COMPONENT,
            "Scan",
            format!("last evaluated key has no string '{ID_ATTRIBUTE}' attribute"),
        )
    })
}

/// Converts a JSON object into a DynamoDB item. Top-level values other than
/// objects cannot be stored.
pub fn json_to_item(value: &Value) -> AftResult<Item> {
    let Value::Object(fields) = value else {
        return Err(AftError::serialization(
            "DynamoDB items must be JSON objects",
        ));
    };

    Ok(fields
        .iter()
        .map(|(name, field)| (name.clone(), json_to_attribute(field)))
        .collect())
}

fn json_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(flag) => AttributeValue::Bool(*flag),
        Value::Number(number) => AttributeValue::N(number.to_string()),
        Value::String(text) => AttributeValue::S(text.clone()),
        Value::Array(values) => AttributeValue::L(values.iter().map(json_to_attribute).collect()),
        Value::Object(fields) => AttributeValue::M(
            fields
                .iter()
                .map(|(name, field)| (name.clone(), json_to_attribute(field)))
                .collect(),
        ),
    }
}

pub fn item_to_json(item: &Item) -> AftResult<Value> {
    let mut fields = Map::new();
    for (name, attribute) in item {
        fields.insert(name.clone(), attribute_to_json(attribute)?);
    }
    Ok(Value::Object(fields))
}

fn attribute_to_json(attribute: &AttributeValue) -> AftResult<Value> {
    match attribute {
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::Bool(flag) => Ok(Value::Bool(*flag)),
        AttributeValue::N(text) => parse_number(text).map(Value::Number),
        AttributeValue::S(text) => Ok(Value::String(text.clone())),
        AttributeValue::Ss(values) => Ok(Value::Array(
            values.iter().cloned().map(Value::String).collect(),
        )),
        AttributeValue::Ns(values) => values
            .iter()
            .map(|text| parse_number(text).map(Value::Number))
            .collect::<AftResult<Vec<_>>>()
            .map(Value::Array),
        AttributeValue::L(values) => values
            .iter()
            .map(attribute_to_json)
            .collect::<AftResult<Vec<_>>>()
            .map(Value::Array),
        AttributeValue::M(fields) => item_to_json(fields),
        other => Err(AftError::serialization(format!(
            "unsupported DynamoDB attribute: {other:?}"
        ))),
    }
}

fn parse_number(text: &str) -> AftResult<Number> {
    if let Ok(integer) = text.parse::<i64>() {
        return Ok(Number::from(integer));
    }
    text.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| AftError::serialization(format!("invalid DynamoDB number '{text}'")))
}
