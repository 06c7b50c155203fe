// Cadence Lapse Detection
//
// Flags contributors whose gap between two chronologically adjacent events
// exceeds a threshold, and rostered contributors with no events at all.
//
// Events arrive unordered, so every scan is group-then-sort-then-scan:
// each identity's timestamps are collected and sorted on their own before
// adjacent pairs are compared. A gap is never measured against another
// identity's timestamp.

mod config;
mod gap;
mod report;

pub use config::{DetectorConfig, Granularity};
pub use gap::{detect, Event, Gap};
pub use report::{DetectionReport, Detector, FlagReason, Finding};
