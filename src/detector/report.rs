// Configurable detector producing a detailed lapse report
//
// `detect` answers "who is flagged". `Detector::analyze` answers the same
// question and also records why each identity was flagged, which identities
// have events but are not on the roster, and the counts behind the verdict.

use crate::detector::config::{DetectorConfig, Granularity};
use crate::detector::gap::{group_timelines, lapse, Event, Gap};
use crate::error::Result;
use chrono::{DateTime, Duration, Utc};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Why an identity was flagged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagReason {
    /// On the roster, but no events at all
    Absent,

    /// Two adjacent events are further apart than the threshold
    GapExceeded {
        /// Widest measured gap
        widest_gap: Duration,
        /// Earlier event bounding the widest gap
        from: DateTime<Utc>,
        /// Later event bounding the widest gap
        to: DateTime<Utc>,
    },
}

impl From<Gap> for FlagReason {
    fn from(gap: Gap) -> Self {
        FlagReason::GapExceeded {
            widest_gap: gap.width,
            from: gap.from,
            to: gap.to,
        }
    }
}

/// A flagged identity and the rule that flagged it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding<I> {
    pub identity: I,
    pub reason: FlagReason,
}

/// Detailed result of one detection run
#[derive(Debug, Clone)]
pub struct DetectionReport<I> {
    /// Flagged identities (the same set `detect` returns)
    pub flagged: HashSet<I>,

    /// One finding per flagged identity, sorted by identity
    pub findings: Vec<Finding<I>>,

    /// Identities with events that are not on the roster, sorted
    pub unexpected: Vec<I>,

    /// Threshold the scan ran with
    pub threshold: Duration,

    /// Gap measurement used
    pub granularity: Granularity,

    /// Number of distinct rostered identities
    pub roster_size: usize,

    /// Number of input events
    pub event_count: usize,

    /// Number of distinct identities with at least one event
    pub active_identities: usize,
}

impl<I> DetectionReport<I> {
    /// Whether nobody was flagged
    pub fn is_clean(&self) -> bool {
        self.flagged.is_empty()
    }

    /// Number of identities flagged as absent
    pub fn absent_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.reason == FlagReason::Absent)
            .count()
    }
}

impl<I: Display> DetectionReport<I> {
    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        if self.findings.is_empty() {
            report.push_str("✅ NO LAPSES DETECTED\n\n");
        } else {
            report.push_str(&format!(
                "❌ LAPSED CADENCE DETECTED ({} identities)\n\n",
                self.findings.len()
            ));
        }

        report.push_str(&format!(
            "Threshold: {} ({})\n",
            format_gap(self.threshold),
            match self.granularity {
                Granularity::WholeDays => "whole days",
                Granularity::Exact => "exact",
            }
        ));
        report.push_str(&format!(
            "Roster: {}, events: {}, active identities: {}\n",
            self.roster_size, self.event_count, self.active_identities
        ));

        if !self.findings.is_empty() {
            report.push_str("\n📊 Findings:\n");
            for finding in &self.findings {
                match finding.reason {
                    FlagReason::Absent => {
                        report.push_str(&format!("  {} (no events)\n", finding.identity));
                    }
                    FlagReason::GapExceeded {
                        widest_gap,
                        from,
                        to,
                    } => {
                        report.push_str(&format!(
                            "  {} (gap of {} between {} and {})\n",
                            finding.identity,
                            format_gap(widest_gap),
                            from.format("%Y-%m-%d"),
                            to.format("%Y-%m-%d")
                        ));
                    }
                }
            }
        }

        if !self.unexpected.is_empty() {
            report.push_str(&format!(
                "\n🔇 Not on roster ({}):\n",
                self.unexpected.len()
            ));
            for identity in &self.unexpected {
                report.push_str(&format!("  - {}\n", identity));
            }
        }

        report
    }
}

/// Format a duration as days, with leftover hours when not a whole day
pub fn format_gap(gap: Duration) -> String {
    let days = gap.num_days();
    let hours = (gap - Duration::days(days)).num_hours();
    if hours == 0 {
        format!("{}d", days)
    } else {
        format!("{}d {}h", days, hours)
    }
}

/// Cadence detector with a validated configuration
#[derive(Debug, Clone)]
pub struct Detector {
    config: DetectorConfig,
    threshold: Duration,
}

impl Detector {
    /// Create a detector, validating the configuration up front
    ///
    /// # Errors
    /// `InvalidArgument` for a negative or out-of-range threshold.
    pub fn new(config: DetectorConfig) -> Result<Self> {
        let threshold = config.threshold()?;
        Ok(Self { config, threshold })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    /// Flagged identities only
    pub fn detect<I>(&self, roster: &HashSet<I>, events: &[Event<I>]) -> HashSet<I>
    where
        I: Eq + Hash + Clone + Ord + Debug + Send + Sync,
    {
        self.analyze(roster, events).flagged
    }

    /// Run the scan and build a detailed report
    ///
    /// # Example
    /// ```
    /// use lapsewatch::detector::{Detector, DetectorConfig, Event, FlagReason};
    /// use std::collections::HashSet;
    ///
    /// let detector = Detector::new(DetectorConfig::default()).unwrap();
    /// let roster: HashSet<String> = ["eve".to_string()].into_iter().collect();
    ///
    /// let report = detector.analyze(&roster, &[] as &[Event<String>]);
    /// assert_eq!(report.findings[0].reason, FlagReason::Absent);
    /// ```
    pub fn analyze<I>(&self, roster: &HashSet<I>, events: &[Event<I>]) -> DetectionReport<I>
    where
        I: Eq + Hash + Clone + Ord + Debug + Send + Sync,
    {
        let threshold = self.threshold;
        let granularity = self.config.granularity;
        let timelines = group_timelines(events);

        let mut findings: Vec<Finding<I>> = if self.config.parallel {
            timelines
                .par_iter()
                .filter_map(|(identity, timeline)| {
                    lapse(timeline, threshold, granularity).map(|gap| Finding {
                        identity: (*identity).clone(),
                        reason: gap.into(),
                    })
                })
                .collect()
        } else {
            timelines
                .iter()
                .filter_map(|(identity, timeline)| {
                    lapse(timeline, threshold, granularity).map(|gap| Finding {
                        identity: (*identity).clone(),
                        reason: gap.into(),
                    })
                })
                .collect()
        };

        findings.extend(
            roster
                .iter()
                .filter(|identity| !timelines.contains_key(identity))
                .map(|identity| Finding {
                    identity: identity.clone(),
                    reason: FlagReason::Absent,
                }),
        );
        findings.sort_by(|a, b| a.identity.cmp(&b.identity));

        for finding in &findings {
            tracing::trace!(identity = ?finding.identity, reason = ?finding.reason, "identity flagged");
        }

        let mut unexpected: Vec<I> = timelines
            .keys()
            .filter(|identity| !roster.contains(**identity))
            .map(|identity| (*identity).clone())
            .collect();
        unexpected.sort();

        if !unexpected.is_empty() {
            tracing::warn!(
                count = unexpected.len(),
                "events attributed to identities outside the roster"
            );
        }

        let flagged: HashSet<I> = findings.iter().map(|f| f.identity.clone()).collect();

        tracing::debug!(
            roster = roster.len(),
            events = events.len(),
            flagged = flagged.len(),
            parallel = self.config.parallel,
            "cadence analysis complete"
        );

        DetectionReport {
            flagged,
            findings,
            unexpected,
            threshold,
            granularity,
            roster_size: roster.len(),
            event_count: events.len(),
            active_identities: timelines.len(),
        }
    }
}
