// Per-identity gap scan
//
// Step 1: partition events by identity and sort each timeline ascending.
// Step 2: scan adjacent pairs of each timeline for a gap above threshold.
// Step 3: flag rostered identities with no timeline at all.

use crate::detector::config::{validate_threshold, Granularity};
use crate::error::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// A timestamped occurrence attributed to an identity (e.g. a commit)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event<I> {
    pub identity: I,
    pub timestamp: DateTime<Utc>,
}

impl<I> Event<I> {
    pub fn new(identity: I, timestamp: DateTime<Utc>) -> Self {
        Self {
            identity,
            timestamp,
        }
    }
}

/// Gap between two temporally adjacent events of one identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    /// Elapsed time between the two events
    pub width: Duration,
    /// Earlier event
    pub from: DateTime<Utc>,
    /// Later event
    pub to: DateTime<Utc>,
}

/// Group events by identity, each timeline sorted ascending
pub(crate) fn group_timelines<I>(events: &[Event<I>]) -> HashMap<&I, Vec<DateTime<Utc>>>
where
    I: Eq + Hash,
{
    let mut timelines: HashMap<&I, Vec<DateTime<Utc>>> = HashMap::new();
    for event in events {
        timelines
            .entry(&event.identity)
            .or_default()
            .push(event.timestamp);
    }

    for timeline in timelines.values_mut() {
        timeline.sort_unstable();
    }

    timelines
}

/// Widest gap in a sorted timeline
///
/// Returns `None` for timelines with fewer than two events. Duplicate
/// timestamps produce a zero-width gap.
pub(crate) fn widest_gap(timeline: &[DateTime<Utc>]) -> Option<Gap> {
    timeline
        .windows(2)
        .map(|pair| Gap {
            width: pair[1] - pair[0],
            from: pair[0],
            to: pair[1],
        })
        .max_by_key(|gap| gap.width)
}

/// Widest gap if it exceeds the threshold under `granularity`
///
/// Both granularities are monotonic in the gap, so checking the widest
/// gap is the same as checking every adjacent pair.
pub(crate) fn lapse(
    timeline: &[DateTime<Utc>],
    threshold: Duration,
    granularity: Granularity,
) -> Option<Gap> {
    widest_gap(timeline).filter(|gap| granularity.exceeds(gap.width, threshold))
}

/// Detect irregular identities
///
/// An identity is flagged when it is on the roster but has no events, or
/// when any two of its temporally adjacent events are strictly more than
/// `threshold` apart. Gaps are compared as exact durations, so a zero
/// threshold flags any non-zero gap and sub-day thresholds behave as
/// written. Identities outside the roster are subject to the gap rule only.
///
/// Use [`Detector`](crate::detector::Detector) with
/// [`Granularity::WholeDays`] for day-floored comparison.
///
/// # Errors
/// `InvalidArgument` if `threshold` is negative. Nothing else is validated;
/// empty inputs, unknown identities and duplicate timestamps are all valid.
///
/// # Example
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use lapsewatch::detector::{detect, Event};
/// use std::collections::HashSet;
///
/// let day = |d| Utc.with_ymd_and_hms(2026, 1, d, 0, 0, 0).unwrap();
/// let roster: HashSet<&str> = ["alice", "bob"].into_iter().collect();
/// let events = vec![Event::new("alice", day(1)), Event::new("alice", day(12))];
///
/// let flagged = detect(&roster, &events, Duration::days(7)).unwrap();
/// assert!(flagged.contains("alice")); // 11-day gap
/// assert!(flagged.contains("bob")); // no events
/// ```
pub fn detect<I>(roster: &HashSet<I>, events: &[Event<I>], threshold: Duration) -> Result<HashSet<I>>
where
    I: Eq + Hash + Clone,
{
    let threshold = validate_threshold(threshold)?;
    let timelines = group_timelines(events);

    let mut flagged: HashSet<I> = timelines
        .iter()
        .filter(|(_, timeline)| lapse(timeline, threshold, Granularity::Exact).is_some())
        .map(|(identity, _)| (*identity).clone())
        .collect();

    flagged.extend(
        roster
            .iter()
            .filter(|identity| !timelines.contains_key(identity))
            .cloned(),
    );

    tracing::debug!(
        roster = roster.len(),
        events = events.len(),
        flagged = flagged.len(),
        "cadence scan complete"
    );

    Ok(flagged)
}
