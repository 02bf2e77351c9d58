use serde::{Deserialize, Serialize};

/// Smallest retention window a job may request, in days.
pub const DEFAULT_MIN_DAYS: i64 = 60;
/// Smallest batch size a job may request, in rows.
pub const DEFAULT_MIN_LIMIT: i64 = 100;

/// Raise `value` to `minimum` when it falls below it.
pub fn clamp(value: i64, minimum: i64) -> i64 {
    value.max(minimum)
}

/// Configured safety floors. Doubles as the `[retention]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Minimum retention window in days (default: 60)
    #[serde(default = "default_min_days")]
    pub min_days: i64,
    /// Minimum rows deleted per run (default: 100)
    #[serde(default = "default_min_limit")]
    pub min_limit: i64,
}

fn default_min_days() -> i64 {
    DEFAULT_MIN_DAYS
}

fn default_min_limit() -> i64 {
    DEFAULT_MIN_LIMIT
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_days: DEFAULT_MIN_DAYS,
            min_limit: DEFAULT_MIN_LIMIT,
        }
    }
}

/// A requested value next to the value actually applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clamped {
    pub requested: Option<i64>,
    pub applied: i64,
}

impl Clamped {
    pub fn was_raised(&self) -> bool {
        self.requested != Some(self.applied)
    }
}

impl Thresholds {
    /// Batch limit; an absent limit falls back to the minimum.
    pub fn limit(&self, requested: Option<i64>) -> Clamped {
        Clamped {
            requested,
            applied: requested.map_or(self.min_limit, |value| clamp(value, self.min_limit)),
        }
    }

    pub fn days(&self, requested: i64) -> Clamped {
        Clamped {
            requested: Some(requested),
            applied: clamp(requested, self.min_days),
        }
    }
}
