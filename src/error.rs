use thiserror::Error;

/// Failures while loading or validating [`crate::Settings`]
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl SettingsError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SettingsError::Invalid {
            field,
            reason: reason.into(),
        }
    }

    /// Whether falling back to default settings is a sensible response
    pub fn is_recoverable(&self) -> bool {
        match self {
            SettingsError::Io(_) => true,
            SettingsError::Parse(_) => true,
            SettingsError::Invalid { .. } => false,
        }
    }
}
