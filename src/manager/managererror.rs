use serde::Deserialize;

/// Failures while loading named objects from JSON configuration.
#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
    #[error("cannot read configuration: {0}")]
    IOError(#[from] std::io::Error),

    #[error("invalid configuration json: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("key '{0}' not found")]
    NameNotFoundError(String),

    #[error("invalid {kind} rule: {detail}")]
    InvalidRuleError {
        kind: &'static str,
        detail: String
    }
}

impl ManagerError {
    pub fn from_json_or_json_parse_error<T>(json_value: serde_json::Value) -> Result<T, Self>
        where T: for<'a> Deserialize<'a> {
        serde_json::from_value(json_value).map_err(ManagerError::JsonParseError)
    }

    pub fn map_elem_not_found(name: &str) -> ManagerError {
        ManagerError::NameNotFoundError(name.to_owned())
    }

    pub fn invalid_rule(kind: &'static str, detail: impl Into<String>) -> ManagerError {
        ManagerError::InvalidRuleError { kind, detail: detail.into() }
    }
}
