//! Configuration types shared across the orchestrator and the core.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Parameters of a single rolling-window SIP computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingConfig {
    /// Fixed amount invested on every month-grid date of a window.
    pub contribution_amount: f64,
    /// First seed tried by the XIRR solver before the fixed seed grid.
    pub initial_guess: f64,
}

impl RollingConfig {
    /// Default monthly contribution.
    pub const DEFAULT_CONTRIBUTION: f64 = 10_000.0;
    /// Default first seed of the XIRR solver.
    pub const DEFAULT_GUESS: f64 = 0.1;
}

impl Default for RollingConfig {
    fn default() -> Self {
        Self {
            contribution_amount: Self::DEFAULT_CONTRIBUTION,
            initial_guess: Self::DEFAULT_GUESS,
        }
    }
}

/// How the orchestrator treats the calendar's notion of "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CalendarPolicy {
    /// "Today" is fixed when the calendar is first built and never refreshed.
    #[default]
    Pinned,
    /// A fresh calendar is built at the start of a request once the local date
    /// has moved past the pinned one. In-flight jobs keep the old calendar.
    RefreshDaily,
}

/// Configuration for the memoizing price-history middleware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached price histories.
    pub max_capacity: u64,
    /// Optional time-to-live; `None` keeps entries until evicted by capacity.
    pub ttl: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 256,
            ttl: None,
        }
    }
}

/// Global configuration for the `Rollfolio` orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollfolioConfig {
    /// Contribution and solver parameters applied to every job.
    pub rolling: RollingConfig,
    /// Refresh policy for the shared calendar index.
    pub calendar_policy: CalendarPolicy,
    /// Timeout for individual provider requests.
    pub provider_timeout: Duration,
}

impl Default for RollfolioConfig {
    fn default() -> Self {
        Self {
            rolling: RollingConfig::default(),
            calendar_policy: CalendarPolicy::default(),
            provider_timeout: Duration::from_secs(30),
        }
    }
}
