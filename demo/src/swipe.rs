use std::collections::VecDeque;
use std::sync::Arc;

use log::{debug, info};
use parking_lot::Mutex;

use crate::errors::DemoError;
use crate::fetcher::FetchesDogs;
use crate::models::{DogProfile, SwipeDirection};

/// Default number of profiles requested on load.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// **SWIPE CONTROLLER**
///
/// **PURPOSE**: screen logic of the swipe deck, minus any rendering
/// **FLOW**: `load` fills the deck, each swipe consumes the front profile
pub struct SwipeController {
    dog_fetcher: Arc<dyn FetchesDogs>,
    page_size: usize,
    deck: Mutex<VecDeque<DogProfile>>,
}

impl SwipeController {
    pub fn new(dog_fetcher: Arc<dyn FetchesDogs>) -> Self {
        Self::with_page_size(dog_fetcher, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(dog_fetcher: Arc<dyn FetchesDogs>, page_size: usize) -> Self {
        Self {
            dog_fetcher,
            page_size,
            deck: Mutex::new(VecDeque::new()),
        }
    }

    /// Replaces the deck with a fresh page. Returns the number of profiles.
    pub fn load(&self) -> Result<usize, DemoError> {
        let profiles = self.dog_fetcher.get_dog_profiles(self.page_size)?;
        let count = profiles.len();
        *self.deck.lock() = profiles.into();
        info!("Loaded {} profiles", count);
        Ok(count)
    }

    pub fn profiles(&self) -> Vec<DogProfile> {
        self.deck.lock().iter().cloned().collect()
    }

    pub fn remaining(&self) -> usize {
        self.deck.lock().len()
    }

    pub fn current(&self) -> Option<DogProfile> {
        self.deck.lock().front().cloned()
    }

    /// Reject
    pub fn swipe_left(&self) -> Result<DogProfile, DemoError> {
        self.swipe(SwipeDirection::Left)
    }

    /// Approve
    pub fn swipe_right(&self) -> Result<DogProfile, DemoError> {
        self.swipe(SwipeDirection::Right)
    }

    pub fn swipe(&self, direction: SwipeDirection) -> Result<DogProfile, DemoError> {
        let profile = self.deck.lock().pop_front().ok_or(DemoError::EmptyDeck)?;
        debug!("Swiping {} on {}", direction.as_str(), profile.id);
        self.dog_fetcher.post_swipe(direction, &profile.id)?;
        Ok(profile)
    }
}
