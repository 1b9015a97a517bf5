use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::ports::BatchApi;
use crate::application::services::DashboardService;
use crate::presentation::config::Settings;

/// Source of "now" for job derivation and session defaults.
pub type Clock = fn() -> DateTime<Utc>;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<DashboardService<dyn BatchApi>>,
    pub settings: Settings,
    pub clock: Clock,
}

impl AppState {
    pub fn new(dashboard: Arc<DashboardService<dyn BatchApi>>, settings: Settings) -> Self {
        Self {
            dashboard,
            settings,
            clock: Utc::now,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}
