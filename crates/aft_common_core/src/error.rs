use thiserror::Error;

pub type AftResult<T> = Result<T, AftError>;

/// Failures surfaced by the provisioning utilities.
///
/// Not-found outcomes (an OU name that does not resolve, no account matching a
/// tag filter) are never errors; they are represented as empty results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AftError {
    /// The organization does not look the way the pipeline assumes. Fatal.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// A directory, tag, registry, or messaging call failed.
    #[error("{component} {operation} failed: {message}")]
    Remote {
        component: String,
        operation: String,
        message: String,
    },

    #[error("access denied: {message}")]
    AccessDenied { message: String },

    #[error("invalid event: {message}")]
    InvalidEvent { message: String },

    #[error("serialization error: {message}")]
    Serialization { message: String },
}

impl AftError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn remote(
        component: impl Into<String>,
        operation: impl Into<String>,
        message: impl std::fmt::Display,
    ) -> Self {
        Self::Remote {
            component: component.into(),
            operation: operation.into(),
            message: message.to_string(),
        }
    }

    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::AccessDenied {
            message: message.into(),
        }
    }

    pub fn invalid_event(message: impl Into<String>) -> Self {
        Self::InvalidEvent {
            message: message.into(),
        }
    }

    pub fn serialization(message: impl std::fmt::Display) -> Self {
        Self::Serialization {
            message: message.to_string(),
        }
    }

    /// Short machine-readable kind, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "configuration",
            Self::Remote { .. } => "remote",
            Self::AccessDenied { .. } => "access_denied",
            Self::InvalidEvent { .. } => "invalid_event",
            Self::Serialization { .. } => "serialization",
        }
    }

    pub fn operation(&self) -> Option<&str> {
        match self {
            Self::Remote { operation, .. } => Some(operation),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AftError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error)
    }
}

/// Logs a failure with the component that observed it and hands it back
/// unchanged, for use with `Result::inspect_err`.
pub(crate) fn log_failure(component: &'static str) -> impl Fn(&AftError) {
    move |error| {
        tracing::error!(
            component,
            kind = error.kind(),
            operation = error.operation().unwrap_or_default(),
            error = %error,
            "operation failed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_names_component_and_operation() {
        let error = AftError::remote("organizations", "ListRoots", "throttled");
        assert_eq!(error.to_string(), "organizations ListRoots failed: throttled");
        assert_eq!(error.operation(), Some("ListRoots"));
        assert_eq!(error.kind(), "remote");
    }

    #[test]
    fn json_errors_become_serialization_errors() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{").expect_err("invalid json");
        let error = AftError::from(parse_error);
        assert_eq!(error.kind(), "serialization");
    }
}
