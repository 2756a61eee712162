//! Headless navigator
//!
//! Keeps the current location in memory and records every replace and
//! redirect so callers (the CLI, tests) can act on or assert them.

use parking_lot::Mutex;
use reelview_core::Navigator;
use tracing::{debug, info};

#[derive(Debug, Default)]
struct NavigationLog {
    location: String,
    replaced: Vec<String>,
    redirects: Vec<String>,
}

/// [`Navigator`] backed by memory instead of a browser history
#[derive(Debug, Default)]
pub struct InMemoryNavigator {
    log: Mutex<NavigationLog>,
}

impl InMemoryNavigator {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            log: Mutex::new(NavigationLog { location: location.into(), ..Default::default() }),
        }
    }

    /// Simulate the user arriving at `location` (e.g. an OAuth redirect-back)
    pub fn set_location(&self, location: impl Into<String>) {
        self.log.lock().location = location.into();
    }

    /// Every location passed to `replace_location`, oldest first
    pub fn replaced(&self) -> Vec<String> {
        self.log.lock().replaced.clone()
    }

    /// Every location passed to `redirect`, oldest first
    pub fn redirects(&self) -> Vec<String> {
        self.log.lock().redirects.clone()
    }
}

impl Navigator for InMemoryNavigator {
    fn current_location(&self) -> String {
        self.log.lock().location.clone()
    }

    fn replace_location(&self, location: &str) {
        debug!(location, "replacing location");
        let mut log = self.log.lock();
        log.location = location.to_string();
        log.replaced.push(location.to_string());
    }

    fn redirect(&self, location: &str) {
        info!(location, "redirecting");
        let mut log = self.log.lock();
        log.location = location.to_string();
        log.redirects.push(location.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_replace_and_redirect() {
        let navigator = InMemoryNavigator::new("/?access=T1");

        navigator.replace_location("/");
        navigator.redirect("/login");

        assert_eq!(navigator.current_location(), "/login");
        assert_eq!(navigator.replaced(), vec!["/".to_string()]);
        assert_eq!(navigator.redirects(), vec!["/login".to_string()]);
    }

    #[test]
    fn set_location_does_not_record() {
        let navigator = InMemoryNavigator::default();
        navigator.set_location("/movies");

        assert_eq!(navigator.current_location(), "/movies");
        assert!(navigator.replaced().is_empty());
        assert!(navigator.redirects().is_empty());
    }
}
