use std::sync::Arc;

use log::debug;
use serde_json::json;

use crate::api::{Api, ApiRequest};
use crate::errors::DemoError;
use crate::models::{DogProfile, ProfilesPage, SwipeDirection, SwipeRecord};

/// What the swipe screen needs from the backend.
pub trait FetchesDogs: Send + Sync {
    fn get_dog_profiles(&self, count: usize) -> Result<Vec<DogProfile>, DemoError>;

    fn post_swipe(&self, direction: SwipeDirection, profile_id: &str) -> Result<bool, DemoError>;
}

pub struct DogFetcher {
    api: Arc<dyn Api>,
}

impl DogFetcher {
    pub fn new(api: Arc<dyn Api>) -> Self {
        Self { api }
    }
}

impl FetchesDogs for DogFetcher {
    fn get_dog_profiles(&self, count: usize) -> Result<Vec<DogProfile>, DemoError> {
        let request = ApiRequest::get("/me/dogs").with_query("count", count);
        let body = self.api.send(&request)?;
        // Only a body that is not an object fails; bad profile fields default
        let page: ProfilesPage = serde_json::from_value(body)
            .map_err(|e| DemoError::decode("DEMO_PROFILES_DECODE_FAILED", e.to_string()))?;
        debug!("Fetched {} dog profiles", page.profiles.len());
        Ok(page.profiles)
    }

    fn post_swipe(&self, direction: SwipeDirection, profile_id: &str) -> Result<bool, DemoError> {
        let record = SwipeRecord {
            direction,
            profile_id: profile_id.to_string(),
        };
        let body = serde_json::to_value(&record)
            .map_err(|e| DemoError::decode("DEMO_SWIPE_ENCODE_FAILED", e.to_string()))?;
        self.api.send(&ApiRequest::post("/me/swipe", body))?;
        Ok(true)
    }
}
