//! Domain error types.

use crate::domain::universe::UniverseError;

/// Top-level error type for factorlab.
#[derive(Debug, thiserror::Error)]
pub enum FactorlabError {
    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("unknown strategy: {name}")]
    UnknownStrategy { name: String },

    #[error(transparent)]
    Universe(#[from] UniverseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&FactorlabError> for std::process::ExitCode {
    fn from(err: &FactorlabError) -> Self {
        let code: u8 = match err {
            FactorlabError::Io(_) => 1,
            FactorlabError::ConfigParse { .. }
            | FactorlabError::ConfigMissing { .. }
            | FactorlabError::ConfigInvalid { .. }
            | FactorlabError::Universe(_) => 2,
            FactorlabError::Data { .. } => 3,
            FactorlabError::UnknownStrategy { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
