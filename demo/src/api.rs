use log::{debug, warn};
use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::errors::DemoError;
use crate::models::{DogProfile, ProfilesPage, SwipeRecord};

/// Profiles served by [`FixtureApi::from_default_fixture`].
pub const DEFAULT_FIXTURE: &str = include_str!("../fixtures/dogs.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Request as the fetcher builds it. Headers are fixed to JSON both ways.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: &str) -> Self {
        Self {
            method: Method::Get,
            path: path.to_string(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(path: &str, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.to_string(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn with_query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

/// Sends a request and hands back the decoded JSON body of a 200 response.
pub trait Api: Send + Sync {
    fn send(&self, request: &ApiRequest) -> Result<Value, DemoError>;
}

/// **IN-MEMORY API**
///
/// **ROUTES**: `GET /me/dogs?count=N`, `POST /me/swipe`
/// **STATE**: a fixed deck of profiles plus every swipe received
pub struct FixtureApi {
    profiles: Vec<DogProfile>,
    swipes: Mutex<Vec<SwipeRecord>>,
}

impl FixtureApi {
    pub fn new(profiles: Vec<DogProfile>) -> Self {
        Self {
            profiles,
            swipes: Mutex::new(Vec::new()),
        }
    }

    pub fn from_json(fixture: &str) -> Result<Self, DemoError> {
        let page: ProfilesPage = serde_json::from_str(fixture)
            .map_err(|e| DemoError::decode("DEMO_FIXTURE_INVALID_JSON", e.to_string()))?;
        Ok(Self::new(page.profiles))
    }

    pub fn from_default_fixture() -> Result<Self, DemoError> {
        Self::from_json(DEFAULT_FIXTURE)
    }

    pub fn swipes(&self) -> Vec<SwipeRecord> {
        self.swipes.lock().clone()
    }

    fn list_profiles(&self, request: &ApiRequest) -> Result<Value, DemoError> {
        let count = match request.query_param("count") {
            Some(raw) => raw.parse::<usize>().map_err(|_| self.status(400, request))?,
            None => self.profiles.len(),
        };
        let profiles: Vec<&DogProfile> = self.profiles.iter().take(count).collect();
        Ok(json!({ "profiles": profiles }))
    }

    fn record_swipe(&self, request: &ApiRequest) -> Result<Value, DemoError> {
        let body = request.body.clone().ok_or_else(|| self.status(400, request))?;
        let record: SwipeRecord =
            serde_json::from_value(body).map_err(|_| self.status(400, request))?;
        debug!(
            "Fixture API: swipe {} on profile {}",
            record.direction.as_str(),
            record.profile_id
        );
        self.swipes.lock().push(record);
        Ok(json!({ "ok": true }))
    }

    fn status(&self, status: u16, request: &ApiRequest) -> DemoError {
        warn!(
            "Fixture API: {} {} -> {}",
            request.method.as_str(),
            request.path,
            status
        );
        DemoError::Status {
            status,
            method: request.method.as_str().to_string(),
            path: request.path.clone(),
        }
    }
}

impl Api for FixtureApi {
    fn send(&self, request: &ApiRequest) -> Result<Value, DemoError> {
        match (request.method, request.path.as_str()) {
            (Method::Get, "/me/dogs") => self.list_profiles(request),
            (Method::Post, "/me/swipe") => self.record_swipe(request),
            _ => Err(self.status(404, request)),
        }
    }
}
