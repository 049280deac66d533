use log::info;
use serde::Serialize;

use crate::errors::DemoError;
use crate::models::SwipeDirection;
use crate::swipe::SwipeController;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub loaded: usize,
    pub approved: Vec<String>,
    pub rejected: Vec<String>,
}

/// Loads the deck, then swipes through it cycling over `pattern`.
pub fn run_session(
    controller: &SwipeController,
    pattern: &[SwipeDirection],
) -> Result<SessionSummary, DemoError> {
    let mut summary = SessionSummary {
        loaded: controller.load()?,
        ..SessionSummary::default()
    };
    if pattern.is_empty() {
        return Ok(summary);
    }

    for direction in pattern.iter().cycle() {
        if controller.remaining() == 0 {
            break;
        }
        let profile = controller.swipe(*direction)?;
        match direction {
            SwipeDirection::Left => summary.rejected.push(profile.id),
            SwipeDirection::Right => summary.approved.push(profile.id),
        }
    }

    info!(
        "Session done: {} approved, {} rejected",
        summary.approved.len(),
        summary.rejected.len()
    );
    Ok(summary)
}
