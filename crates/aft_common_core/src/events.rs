//! Classification of incoming lifecycle events.

use serde_json::Value;

use crate::error::{AftError, AftResult};

pub const CONTROLTOWER_EVENT_SOURCE: &str = "aws.controltower";
pub const SUPPORTED_CONTROLTOWER_EVENTS: [&str; 2] =
    ["CreateManagedAccount", "UpdateManagedAccount"];

/// A truthy `offline` field marks a warm-up ping that must not be persisted.
pub fn is_offline_probe(event: &Value) -> bool {
    match event.get("offline") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|value| value != 0.0),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(fields)) => !fields.is_empty(),
    }
}

pub fn is_controltower_event(event: &Value) -> bool {
    let is_controltower = event
        .get("source")
        .and_then(Value::as_str)
        .is_some_and(|source| source == CONTROLTOWER_EVENT_SOURCE);

    if is_controltower {
        tracing::info!("event is a Control Tower event");
    } else {
        tracing::info!("event is not a Control Tower event");
    }
    is_controltower
}

/// Whether `detail.eventName` is one the pipeline acts on.
pub fn is_supported_controltower_event(event: &Value) -> AftResult<bool> {
    let event_name = event
        .get("detail")
        .and_then(|detail| detail.get("eventName"))
        .and_then(Value::as_str)
        .ok_or_else(|| AftError::invalid_event("detail.eventName is missing"))?;

    let supported = SUPPORTED_CONTROLTOWER_EVENTS.contains(&event_name);
    tracing::info!(event_name, supported, "checked Control Tower event support");
    Ok(supported)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn offline_flag_follows_truthiness() {
        assert!(is_offline_probe(&json!({"offline": true})));
        assert!(is_offline_probe(&json!({"offline": "yes"})));
        assert!(is_offline_probe(&json!({"offline": 1})));
        assert!(!is_offline_probe(&json!({"offline": false})));
        assert!(!is_offline_probe(&json!({"offline": 0})));
        assert!(!is_offline_probe(&json!({"offline": ""})));
        assert!(!is_offline_probe(&json!({"source": "aws.controltower"})));
    }

    #[test]
    fn detects_controltower_source() {
        assert!(is_controltower_event(&json!({"source": "aws.controltower"})));
        assert!(!is_controltower_event(&json!({"source": "aws.organizations"})));
        assert!(!is_controltower_event(&json!({"detail": {}})));
    }

    #[test]
    fn supports_create_and_update_only() {
        let create = json!({"detail": {"eventName": "CreateManagedAccount"}});
        let update = json!({"detail": {"eventName": "UpdateManagedAccount"}});
        let setup = json!({"detail": {"eventName": "SetupLandingZone"}});

        assert!(is_supported_controltower_event(&create).expect("create should classify"));
        assert!(is_supported_controltower_event(&update).expect("update should classify"));
        assert!(!is_supported_controltower_event(&setup).expect("setup should classify"));
    }

    #[test]
    fn missing_event_name_is_invalid() {
        let error = is_supported_controltower_event(&json!({"detail": {}}))
            .expect_err("missing event name should fail");
        assert_eq!(error.kind(), "invalid_event");
    }
}
