// Configuration for cadence lapse detection

use crate::error::{DetectError, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// How a gap between two events is compared to the threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// Flag when the gap is strictly longer than the threshold
    #[default]
    Exact,
    /// Floor both gap and threshold to whole days before comparing
    /// (a gap of 7 days 23 hours counts as 7)
    ///
    /// A zero threshold still flags every non-zero gap, including
    /// sub-day ones.
    WholeDays,
}

impl Granularity {
    /// Whether a gap (`gap >= 0`) exceeds the threshold
    pub fn exceeds(self, gap: Duration, threshold: Duration) -> bool {
        match self {
            Granularity::Exact => gap > threshold,
            Granularity::WholeDays if threshold == Duration::zero() => gap > Duration::zero(),
            Granularity::WholeDays => gap.num_days() > threshold.num_days(),
        }
    }
}

/// Configuration for the cadence detector
///
/// # Example
/// ```
/// use lapsewatch::detector::DetectorConfig;
///
/// let config = DetectorConfig::default();
/// assert_eq!(config.threshold_days, 7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Maximum tolerated gap, in days, between two adjacent events
    ///
    /// A gap must strictly exceed this value to flag. Zero flags any
    /// non-zero gap.
    pub threshold_days: i64,

    /// How gaps are measured
    pub granularity: Granularity,

    /// Scan identities on the rayon thread pool
    ///
    /// Results are identical either way; this only pays off for large
    /// event volumes.
    pub parallel: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold_days: 7, // weekly cadence
            granularity: Granularity::Exact,
            parallel: false,
        }
    }
}

impl DetectorConfig {
    /// Daily cadence, measured exactly
    pub fn strict() -> Self {
        Self {
            threshold_days: 1,
            granularity: Granularity::Exact,
            parallel: false,
        }
    }

    /// Monthly cadence, measured in whole days
    pub fn lenient() -> Self {
        Self {
            threshold_days: 30,
            granularity: Granularity::WholeDays,
            parallel: false,
        }
    }

    /// Threshold as a duration
    ///
    /// # Errors
    /// `InvalidArgument` if the threshold is negative or does not fit
    /// in a duration.
    pub fn threshold(&self) -> Result<Duration> {
        if self.threshold_days < 0 {
            return Err(DetectError::InvalidArgument(format!(
                "threshold_days must be non-negative, got {}",
                self.threshold_days
            )));
        }

        Duration::try_days(self.threshold_days).ok_or_else(|| {
            DetectError::InvalidArgument(format!(
                "threshold_days is out of range, got {}",
                self.threshold_days
            ))
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.threshold().map(|_| ())
    }
}

/// Reject negative thresholds
pub(crate) fn validate_threshold(threshold: Duration) -> Result<Duration> {
    if threshold < Duration::zero() {
        return Err(DetectError::InvalidArgument(format!(
            "threshold must be non-negative, got {} seconds",
            threshold.num_seconds()
        )));
    }
    Ok(threshold)
}
