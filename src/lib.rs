//! Lapsewatch - flag contributors whose commit cadence has lapsed
//!
//! Given a roster of expected contributors and an unordered history of
//! timestamped events, the detector flags every rostered contributor with no
//! events and every contributor whose gap between two chronologically
//! adjacent events exceeds a threshold.

pub mod cli;
pub mod config;
pub mod csv_output;
pub mod detector;
pub mod error;
pub mod json_output;
pub mod source;

pub use detector::{detect, Detector, DetectorConfig, Event};
pub use error::{DetectError, Result};
