//! CSV output format for detection reports

use crate::detector::{DetectionReport, FlagReason};
use std::fmt::Display;

/// CSV header row
pub const CSV_HEADER: &str = "identity,reason,widest_gap_days,from,to";

/// Escape CSV field (handle commas, quotes, newlines)
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Generate CSV output, one row per flagged identity
pub fn to_csv<I: Display>(report: &DetectionReport<I>) -> String {
    let mut output = String::new();
    output.push_str(CSV_HEADER);
    output.push('\n');

    for finding in &report.findings {
        let identity = escape_field(&finding.identity.to_string());
        match finding.reason {
            FlagReason::Absent => {
                output.push_str(&format!("{},absent,,,\n", identity));
            }
            FlagReason::GapExceeded {
                widest_gap,
                from,
                to,
            } => {
                output.push_str(&format!(
                    "{},gap_exceeded,{},{},{}\n",
                    identity,
                    widest_gap.num_days(),
                    from.to_rfc3339(),
                    to.to_rfc3339()
                ));
            }
        }
    }

    output
}
