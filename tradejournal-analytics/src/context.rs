//! Explicit inputs shared by every metric: the reference clock and settings.

use tradejournal_core::ReferenceClock;

use crate::config::{AnalyticsConfig, MetricsSettings};

/// Everything a metrics computation reads besides the trades themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsContext {
    pub clock: ReferenceClock,
    pub config: AnalyticsConfig,
}

impl MetricsContext {
    pub fn new(clock: ReferenceClock, config: AnalyticsConfig) -> Self {
        Self { clock, config }
    }

    /// System clock, default settings.
    pub fn system() -> Self {
        Self::new(ReferenceClock::system(), AnalyticsConfig::default())
    }

    pub fn with_config(mut self, config: AnalyticsConfig) -> Self {
        self.config = config;
        self
    }

    pub fn settings(&self) -> &MetricsSettings {
        &self.config.metrics
    }
}
