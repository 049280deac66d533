use thiserror::Error;

use crate::registry::types::ServiceKey;

/// Error code reported when no registration answers a key anywhere in the parent chain.
pub const SERVICE_NOT_REGISTERED: &str = "REGISTRY_RESOLUTION_SERVICE_NOT_REGISTERED";
pub const CIRCULAR_DEPENDENCY: &str = "REGISTRY_RESOLUTION_CIRCULAR_DEPENDENCY";
pub const DEPTH_EXCEEDED: &str = "REGISTRY_RESOLUTION_DEPTH_EXCEEDED";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("RESOLUTION ERROR: {code} - {message}")]
    Unregistered { code: String, message: String },

    #[error("RESOLUTION ERROR: {code} - {message}")]
    Circular { code: String, message: String },

    #[error("RESOLUTION ERROR: {code} - {message}")]
    DepthExceeded { code: String, message: String },
}

impl RegistryError {
    /// **BUILD AN UNREGISTERED-SERVICE ERROR**
    pub fn unregistered(service: &str, name: Option<&str>) -> Self {
        let message = match name {
            Some(name) => format!("Service '{service}' named '{name}' not registered"),
            None => format!("Service '{service}' not registered"),
        };
        RegistryError::Unregistered {
            code: SERVICE_NOT_REGISTERED.to_string(),
            message,
        }
    }

    /// `path` lists the keys under construction, outermost first.
    pub fn circular(path: &str) -> Self {
        RegistryError::Circular {
            code: CIRCULAR_DEPENDENCY.to_string(),
            message: format!("Circular dependency: {path}"),
        }
    }

    pub fn depth_exceeded(key: &ServiceKey, limit: usize) -> Self {
        RegistryError::DepthExceeded {
            code: DEPTH_EXCEEDED.to_string(),
            message: format!("Resolving {key} nests deeper than {limit} factories"),
        }
    }
}
