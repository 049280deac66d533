use parking_lot::Mutex;
use registry_core::{Assembly, Registrar, RegistrarExt};
use registry_demo::api::FixtureApi;
use registry_demo::manual::build_without_container;
use registry_demo::{
    run_session, DemoConfig, DemoError, DogAssembler, DogProfile, FetchesDogs, SwipeController,
    SwipeDirection,
};
use std::sync::Arc;

/// Records every call and serves a canned deck.
#[derive(Default)]
struct MockDogFetcher {
    deck: Vec<DogProfile>,
    requested_counts: Mutex<Vec<usize>>,
    swipes: Mutex<Vec<(SwipeDirection, String)>>,
}

impl MockDogFetcher {
    fn with_ids(ids: &[&str]) -> Self {
        Self {
            deck: ids.iter().map(|id| DogProfile::with_id(*id)).collect(),
            ..Self::default()
        }
    }

    fn last_swipe(&self) -> Option<(SwipeDirection, String)> {
        self.swipes.lock().last().cloned()
    }
}

impl FetchesDogs for MockDogFetcher {
    fn get_dog_profiles(&self, count: usize) -> Result<Vec<DogProfile>, DemoError> {
        self.requested_counts.lock().push(count);
        Ok(self.deck.iter().take(count).cloned().collect())
    }

    fn post_swipe(&self, direction: SwipeDirection, profile_id: &str) -> Result<bool, DemoError> {
        self.swipes.lock().push((direction, profile_id.to_string()));
        Ok(true)
    }
}

struct MockFetcherAssembly {
    fetcher: Arc<MockDogFetcher>,
}

impl Assembly for MockFetcherAssembly {
    fn assemble(&self, registrar: &dyn Registrar) {
        let fetcher: Arc<dyn FetchesDogs> = self.fetcher.clone();
        registrar.register::<dyn FetchesDogs>(move |_| Arc::clone(&fetcher));
    }
}

// **CONTROLLER TESTS (NO CONTAINER)**
#[test]
fn test_load_fills_deck() {
    let fetcher = Arc::new(MockDogFetcher::with_ids(&["1"]));
    let controller = SwipeController::new(fetcher.clone());

    assert_eq!(controller.load().unwrap(), 1);
    assert_eq!(controller.profiles().len(), 1);
    assert_eq!(controller.profiles()[0].id, "1");
    assert_eq!(*fetcher.requested_counts.lock(), vec![10]);
}

#[test]
fn test_swipe_left_posts_left() {
    let fetcher = Arc::new(MockDogFetcher::with_ids(&["1"]));
    let controller = SwipeController::new(fetcher.clone());
    controller.load().unwrap();

    controller.swipe_left().unwrap();
    assert_eq!(
        fetcher.last_swipe(),
        Some((SwipeDirection::Left, "1".to_string()))
    );
    assert_eq!(controller.remaining(), 0);
}

#[test]
fn test_swipe_right_posts_right() {
    let fetcher = Arc::new(MockDogFetcher::with_ids(&["1"]));
    let controller = SwipeController::new(fetcher.clone());
    controller.load().unwrap();

    controller.swipe_right().unwrap();
    assert_eq!(
        fetcher.last_swipe(),
        Some((SwipeDirection::Right, "1".to_string()))
    );
}

#[test]
fn test_swipe_on_empty_deck_is_error() {
    let fetcher = Arc::new(MockDogFetcher::default());
    let controller = SwipeController::new(fetcher.clone());
    controller.load().unwrap();

    assert!(matches!(controller.swipe_left(), Err(DemoError::EmptyDeck)));
    assert!(fetcher.swipes.lock().is_empty());
}

// **CONTAINER WIRING TESTS**
#[test]
fn test_assembler_wires_fixture_api() {
    let config = DemoConfig {
        profile_count: 3,
        ..DemoConfig::default()
    };
    let assembler = DogAssembler::new(config).unwrap();
    let controller = assembler.swipe_controller().unwrap();

    assert_eq!(controller.load().unwrap(), 3);
    controller.swipe_right().unwrap();

    let api = assembler.resolve::<FixtureApi>().unwrap();
    assert_eq!(api.swipes().len(), 1);
    assert_eq!(api.swipes()[0].profile_id, "1");
}

#[test]
fn test_override_assembly_replaces_fetcher() {
    let fetcher = Arc::new(MockDogFetcher::with_ids(&["mock-1", "mock-2"]));
    let assembler = DogAssembler::with_overrides(
        DemoConfig::default(),
        &[&MockFetcherAssembly {
            fetcher: fetcher.clone(),
        }],
    )
    .unwrap();

    let controller = assembler.swipe_controller().unwrap();
    controller.load().unwrap();
    controller.swipe_left().unwrap();

    assert_eq!(
        fetcher.last_swipe(),
        Some((SwipeDirection::Left, "mock-1".to_string()))
    );
    let api = assembler.resolve::<FixtureApi>().unwrap();
    assert!(api.swipes().is_empty());
}

#[test]
fn test_override_after_construction() {
    let assembler = DogAssembler::new(DemoConfig::default()).unwrap();
    let before = assembler.swipe_controller().unwrap();

    let fetcher = Arc::new(MockDogFetcher::with_ids(&["late"]));
    assembler.apply(&MockFetcherAssembly {
        fetcher: fetcher.clone(),
    });
    let after = assembler.swipe_controller().unwrap();

    assert_eq!(after.load().unwrap(), 1);
    assert_eq!(before.load().unwrap(), 4);
}

#[test]
fn test_both_wirings_agree() {
    let config = DemoConfig {
        profile_count: 4,
        swipe_pattern: vec![SwipeDirection::Right, SwipeDirection::Left],
        ..DemoConfig::default()
    };

    let assembler = DogAssembler::new(config.clone()).unwrap();
    let with_container =
        run_session(&assembler.swipe_controller().unwrap(), &config.swipe_pattern).unwrap();

    let wiring = build_without_container(&config).unwrap();
    let without_container = run_session(&wiring.controller, &config.swipe_pattern).unwrap();

    assert_eq!(with_container, without_container);
    assert_eq!(with_container.approved, vec!["1", "3"]);
    assert_eq!(with_container.rejected, vec!["2", "4"]);
    assert_eq!(
        wiring.api.swipes(),
        assembler.resolve::<FixtureApi>().unwrap().swipes()
    );
}

#[test]
fn test_missing_fixture_file_fails_construction() {
    let config = DemoConfig {
        fixture: Some("/nonexistent/dogs.json".into()),
        ..DemoConfig::default()
    };
    assert!(matches!(
        DogAssembler::new(config),
        Err(DemoError::Config { .. })
    ));
}
