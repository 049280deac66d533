use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::DemoError;
use crate::models::SwipeDirection;
use crate::swipe::DEFAULT_PAGE_SIZE;

/// **DEMO CONFIGURATION**
///
/// **SOURCE**: optional JSON file, then command line overrides
/// **DEFAULTS**: every field may be omitted
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    pub profile_count: usize,
    pub swipe_pattern: Vec<SwipeDirection>,
    pub log_level: Option<String>,
    /// Profiles fixture; the bundled one when unset.
    pub fixture: Option<PathBuf>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            profile_count: DEFAULT_PAGE_SIZE,
            swipe_pattern: vec![SwipeDirection::Left, SwipeDirection::Right],
            log_level: None,
            fixture: None,
        }
    }
}

impl DemoConfig {
    pub fn from_json(raw: &str) -> Result<Self, DemoError> {
        let config: DemoConfig = serde_json::from_str(raw)
            .map_err(|e| DemoError::config("DEMO_CONFIG_INVALID_JSON", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, DemoError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            DemoError::config(
                "DEMO_CONFIG_UNREADABLE",
                format!("{}: {}", path.display(), e),
            )
        })?;
        Self::from_json(&raw)
    }

    pub fn validate(&self) -> Result<(), DemoError> {
        if self.profile_count == 0 {
            return Err(DemoError::config(
                "DEMO_CONFIG_PROFILE_COUNT_ZERO",
                "profile_count must be at least 1",
            ));
        }
        if self.swipe_pattern.is_empty() {
            return Err(DemoError::config(
                "DEMO_CONFIG_EMPTY_SWIPE_PATTERN",
                "swipe_pattern needs at least one direction",
            ));
        }
        Ok(())
    }

    /// Fixture JSON to serve, read from `fixture` when set.
    pub fn fixture_json(&self) -> Result<String, DemoError> {
        match &self.fixture {
            Some(path) => fs::read_to_string(path).map_err(|e| {
                DemoError::config(
                    "DEMO_FIXTURE_UNREADABLE",
                    format!("{}: {}", path.display(), e),
                )
            }),
            None => Ok(crate::api::DEFAULT_FIXTURE.to_string()),
        }
    }
}
