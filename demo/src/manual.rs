use std::sync::Arc;

use log::info;

use crate::api::FixtureApi;
use crate::config::DemoConfig;
use crate::errors::DemoError;
use crate::fetcher::DogFetcher;
use crate::swipe::SwipeController;

/// Everything the swipe screen needs, built by hand.
pub struct ManualWiring {
    pub api: Arc<FixtureApi>,
    pub controller: SwipeController,
}

/// Wires the demo without a container: each collaborator constructs the next.
pub fn build_without_container(config: &DemoConfig) -> Result<ManualWiring, DemoError> {
    let api = Arc::new(FixtureApi::from_json(&config.fixture_json()?)?);
    let fetcher = DogFetcher::new(api.clone());
    let controller = SwipeController::with_page_size(Arc::new(fetcher), config.profile_count);
    info!("Wired swipe controller by hand");
    Ok(ManualWiring { api, controller })
}
