//! Application state management
//!
//! Author: hephaex@gmail.com

use ner_core::config::AppConfig;
use ner_extractor::NerService;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Application state shared across handlers
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Entity extraction service
    pub ner: NerService,
    /// Server start time
    pub start_time: Instant,
    /// Request counter
    pub request_count: AtomicU64,
}

impl AppState {
    pub fn new(config: AppConfig, ner: NerService) -> Self {
        Self {
            config,
            ner,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
        }
    }

    /// Increment request counter
    pub fn increment_requests(&self) -> u64 {
        self.request_count.fetch_add(1, Ordering::SeqCst)
    }

    /// Get total request count
    pub fn get_request_count(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_counter() {
        let state = AppState::new(AppConfig::default(), NerService::rule_based());
        assert_eq!(state.get_request_count(), 0);
        state.increment_requests();
        state.increment_requests();
        assert_eq!(state.get_request_count(), 2);
    }
}
