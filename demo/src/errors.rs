use registry_core::RegistryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("CONFIG ERROR: {code} - {message}")]
    Config { code: String, message: String },

    #[error("DECODE ERROR: {code} - {message}")]
    Decode { code: String, message: String },

    #[error("API ERROR: status {status} for {method} {path}")]
    Status {
        status: u16,
        method: String,
        path: String,
    },

    #[error("SWIPE ERROR: no profiles left to swipe")]
    EmptyDeck,

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl DemoError {
    pub fn config(code: &str, message: impl Into<String>) -> Self {
        DemoError::Config {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn decode(code: &str, message: impl Into<String>) -> Self {
        DemoError::Decode {
            code: code.to_string(),
            message: message.into(),
        }
    }
}
