use aft_common_core::error::AftResult;
use aft_common_core::events::is_offline_probe;
use aft_common_core::params;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::adapters::dynamodb::EventStore;
use crate::adapters::parameters::ParameterStore;

const COMPONENT: &str = "controltower_event_logger";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EventLogOutcome {
    /// Warm-up ping; nothing was written.
    Offline,
    Stored { table: String },
}

/// Persists a raw Control Tower lifecycle event into the events table.
pub fn handle_controltower_event(
    event: &Value,
    parameters: &dyn ParameterStore,
    store: &dyn EventStore,
) -> AftResult<EventLogOutcome> {
    tracing::info!(component = COMPONENT, event = %event, "received event");

    if is_offline_probe(event) {
        tracing::info!(component = COMPONENT, "offline probe, skipping");
        return Ok(EventLogOutcome::Offline);
    }

    let table = parameters
        .parameter(params::AFT_EVENTS_TABLE, false)
        .and_then(|table| store.put_event(&table, event).map(|()| table))
        .inspect_err(|error| {
            tracing::error!(
                component = COMPONENT,
                kind = error.kind(),
                operation = error.operation().unwrap_or_default(),
                error = %error,
                "failed to log Control Tower event"
            )
        })?;

    Ok(EventLogOutcome::Stored { table })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use aft_common_core::error::AftError;
    use serde_json::json;

    use super::*;

    const EVENTS_TABLE: &str = "aft-controltower-events";

    struct StaticParameters {
        failing: bool,
        requested: Mutex<Vec<String>>,
    }

    impl StaticParameters {
        fn new() -> Self {
            Self {
                failing: false,
                requested: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                failing: true,
                ..Self::new()
            }
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().expect("poisoned mutex").clone()
        }
    }

    impl ParameterStore for StaticParameters {
        fn parameter(&self, name: &str, _decrypt: bool) -> AftResult<String> {
            self.requested
                .lock()
                .expect("poisoned mutex")
                .push(name.to_string());
            if self.failing {
                return Err(AftError::remote("ssm", "GetParameter", "ParameterNotFound"));
            }
            Ok(EVENTS_TABLE.to_string())
        }
    }

    struct RecordingStore {
        failing: bool,
        writes: Mutex<Vec<(String, Value)>>,
    }

    impl RecordingStore {
        fn new() -> Self {
            Self {
                failing: false,
                writes: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                failing: true,
                ..Self::new()
            }
        }

        fn writes(&self) -> Vec<(String, Value)> {
            self.writes.lock().expect("poisoned mutex").clone()
        }
    }

    impl EventStore for RecordingStore {
        fn put_event(&self, table_name: &str, event: &Value) -> AftResult<()> {
            if self.failing {
                return Err(AftError::remote("dynamodb", "PutItem", "throttled"));
            }
            self.writes
                .lock()
                .expect("poisoned mutex")
                .push((table_name.to_string(), event.clone()));
            Ok(())
        }
    }

    fn create_managed_account_event() -> Value {
        json!({
            "source": "aws.controltower",
            "detail-type": "AWS Service Event via CloudTrail",
            "detail": {
                "eventName": "CreateManagedAccount",
                "serviceEventDetails": {
                    "createManagedAccountStatus": {
                        "account": {"accountId": "111111111111", "accountName": "dev"},
                        "state": "SUCCEEDED"
                    }
                }
            }
        })
    }

    #[test]
    fn stores_event_in_events_table() {
        let parameters = StaticParameters::new();
        let store = RecordingStore::new();
        let event = create_managed_account_event();

        let outcome =
            handle_controltower_event(&event, &parameters, &store).expect("event should store");

        assert_eq!(
            outcome,
            EventLogOutcome::Stored {
                table: EVENTS_TABLE.to_string()
            }
        );
        assert_eq!(parameters.requested(), vec![params::AFT_EVENTS_TABLE]);
        assert_eq!(store.writes(), vec![(EVENTS_TABLE.to_string(), event)]);
    }

    #[test]
    fn offline_probe_touches_nothing() {
        let parameters = StaticParameters::new();
        let store = RecordingStore::new();

        let outcome = handle_controltower_event(&json!({"offline": true}), &parameters, &store)
            .expect("probe should succeed");

        assert_eq!(outcome, EventLogOutcome::Offline);
        assert!(parameters.requested().is_empty());
        assert!(store.writes().is_empty());
    }

    #[test]
    fn falsy_offline_flag_is_stored() {
        let parameters = StaticParameters::new();
        let store = RecordingStore::new();
        let event = json!({"offline": false, "detail": {}});

        handle_controltower_event(&event, &parameters, &store).expect("event should store");

        assert_eq!(store.writes().len(), 1);
    }

    #[test]
    fn parameter_failure_skips_write() {
        let parameters = StaticParameters::failing();
        let store = RecordingStore::new();

        let error = handle_controltower_event(&create_managed_account_event(), &parameters, &store)
            .expect_err("missing parameter should fail");

        assert_eq!(error.operation(), Some("GetParameter"));
        assert!(store.writes().is_empty());
    }

    #[test]
    fn store_failure_propagates() {
        let parameters = StaticParameters::new();
        let store = RecordingStore::failing();

        let error = handle_controltower_event(&create_managed_account_event(), &parameters, &store)
            .expect_err("write failure should propagate");

        assert_eq!(error.operation(), Some("PutItem"));
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        assert_eq!(
            serde_json::to_value(EventLogOutcome::Stored {
                table: EVENTS_TABLE.to_string()
            })
            .expect("outcome should serialize"),
            json!({"status": "stored", "table": EVENTS_TABLE})
        );
        assert_eq!(
            serde_json::to_value(EventLogOutcome::Offline).expect("outcome should serialize"),
            json!({"status": "offline"})
        );
    }
}
