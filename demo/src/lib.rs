//! # REGISTRY DEMO
//!
//! **DOG SWIPING, WIRED TWO WAYS**
//!
//! **WITH CONTAINER**: `DogAssembler` is the composition root; collaborators
//! are resolved from its registry
//! **WITHOUT CONTAINER**: `manual::build_without_container` constructs the
//! same object graph by hand

pub mod api;
pub mod assembly;
pub mod config;
pub mod errors;
pub mod fetcher;
pub mod manual;
pub mod models;
pub mod session;
pub mod swipe;

pub use assembly::{ApiAssembly, ConfigAssembly, DogAssembler, DogAssembly};
pub use config::DemoConfig;
pub use errors::DemoError;
pub use fetcher::{DogFetcher, FetchesDogs};
pub use models::{DogProfile, SwipeDirection};
pub use session::{run_session, SessionSummary};
pub use swipe::SwipeController;
