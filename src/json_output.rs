//! JSON output format for detection reports

use crate::detector::{DetectionReport, FlagReason, Granularity};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A flagged identity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonFinding {
    pub identity: String,
    /// "absent" or "gap_exceeded"
    pub reason: String,
    /// Widest gap in days (fractional for sub-day remainders)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widest_gap_days: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

/// Complete JSON report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub threshold_days: f64,
    pub granularity: Granularity,
    pub roster_size: usize,
    pub event_count: usize,
    pub active_identities: usize,
    /// Flagged identities, sorted
    pub flagged: Vec<String>,
    pub findings: Vec<JsonFinding>,
    pub unexpected: Vec<String>,
}

fn duration_days(duration: chrono::Duration) -> f64 {
    duration.num_seconds() as f64 / 86_400.0
}

impl JsonReport {
    pub fn from_report<I: Display>(report: &DetectionReport<I>) -> Self {
        let findings: Vec<JsonFinding> = report
            .findings
            .iter()
            .map(|finding| match finding.reason {
                FlagReason::Absent => JsonFinding {
                    identity: finding.identity.to_string(),
                    reason: "absent".to_string(),
                    widest_gap_days: None,
                    from: None,
                    to: None,
                },
                FlagReason::GapExceeded {
                    widest_gap,
                    from,
                    to,
                } => JsonFinding {
                    identity: finding.identity.to_string(),
                    reason: "gap_exceeded".to_string(),
                    widest_gap_days: Some(duration_days(widest_gap)),
                    from: Some(from.to_rfc3339()),
                    to: Some(to.to_rfc3339()),
                },
            })
            .collect();

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            threshold_days: duration_days(report.threshold),
            granularity: report.granularity,
            roster_size: report.roster_size,
            event_count: report.event_count,
            active_identities: report.active_identities,
            flagged: findings.iter().map(|f| f.identity.clone()).collect(),
            findings,
            unexpected: report.unexpected.iter().map(|i| i.to_string()).collect(),
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::{Detector, DetectorConfig, Event};
    use chrono::{TimeZone, Utc};
    use std::collections::HashSet;

    fn sample_report() -> DetectionReport<String> {
        let day = |d| Utc.with_ymd_and_hms(2026, 4, d, 0, 0, 0).unwrap();
        let roster: HashSet<String> = ["ann", "eve"].iter().map(|s| s.to_string()).collect();
        let events = vec![
            Event::new("ann".to_string(), day(1)),
            Event::new("ann".to_string(), day(10)),
            Event::new("kim".to_string(), day(3)),
        ];
        Detector::new(DetectorConfig::default())
            .unwrap()
            .analyze(&roster, &events)
    }

    #[test]
    fn test_json_report_fields() {
        let json = JsonReport::from_report(&sample_report());
        assert_eq!(json.flagged, vec!["ann", "eve"]);
        assert_eq!(json.threshold_days, 7.0);
        assert_eq!(json.granularity, Granularity::Exact);
        assert_eq!(json.unexpected, vec!["kim"]);

        assert_eq!(json.findings[0].reason, "gap_exceeded");
        assert_eq!(json.findings[0].widest_gap_days, Some(9.0));
        assert_eq!(json.findings[1].reason, "absent");
        assert!(json.findings[1].from.is_none());
    }

    #[test]
    fn test_json_absent_omits_gap_fields() {
        let text = JsonReport::from_report(&sample_report()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        let absent = &value["findings"][1];
        assert_eq!(absent["identity"], "eve");
        assert!(absent.get("widest_gap_days").is_none());
        assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(value["granularity"], "exact");
    }

    #[test]
    fn test_json_granularity_uses_serde_name() {
        let mut report = sample_report();
        report.granularity = Granularity::WholeDays;

        let text = JsonReport::from_report(&report).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["granularity"], "whole_days");

        let parsed: JsonReport = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.granularity, Granularity::WholeDays);
    }
}
