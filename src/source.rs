//! Roster and event loading
//!
//! Rosters are plain text, one identity per line. Event files are either a
//! JSON array of `{"identity": .., "timestamp": ..}` objects (`.json`) or
//! line-based `identity,timestamp` text. Timestamps accept RFC 3339 or a
//! bare `YYYY-MM-DD` date (midnight UTC).

use crate::detector::Event;
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Load a roster file, skipping blank lines and `#` comments
pub fn load_roster<P: AsRef<Path>>(path: P) -> Result<HashSet<String>> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read roster file: {}", path.as_ref().display()))?;

    Ok(parse_roster(&content))
}

/// Parse roster text; duplicate names collapse
pub fn parse_roster(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Load an event file, choosing the format by extension
pub fn load_events<P: AsRef<Path>>(path: P) -> Result<Vec<Event<String>>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read events file: {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let events = if is_json {
        parse_json_events(&content)
    } else {
        parse_line_events(&content)
    }
    .with_context(|| format!("Invalid events file: {}", path.display()))?;

    tracing::debug!(path = %path.display(), count = events.len(), "loaded events");
    Ok(events)
}

#[derive(Deserialize)]
struct RawEvent {
    identity: String,
    timestamp: String,
}

/// Parse a JSON array of events
pub fn parse_json_events(content: &str) -> Result<Vec<Event<String>>> {
    let raw: Vec<RawEvent> =
        serde_json::from_str(content).context("Failed to parse JSON event list")?;

    raw.into_iter()
        .enumerate()
        .map(|(index, event)| {
            let timestamp = parse_timestamp(&event.timestamp)
                .with_context(|| format!("event #{}", index + 1))?;
            Ok(Event::new(event.identity, timestamp))
        })
        .collect()
}

/// Parse line-based `identity,timestamp` events
pub fn parse_line_events(content: &str) -> Result<Vec<Event<String>>> {
    let mut events = Vec::new();
    for (index, line) in content.lines().enumerate() {
        if let Some(event) =
            parse_event_line(line).with_context(|| format!("line {}", index + 1))?
        {
            events.push(event);
        }
    }
    Ok(events)
}

/// Parse one `identity,timestamp` line
///
/// Returns `Ok(None)` for blank lines and `#` comments.
pub fn parse_event_line(line: &str) -> Result<Option<Event<String>>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let Some((identity, timestamp)) = line.rsplit_once(',') else {
        bail!("Expected 'identity,timestamp', got '{}'", line);
    };

    let identity = identity.trim();
    if identity.is_empty() {
        bail!("Missing identity in '{}'", line);
    }

    let timestamp = parse_timestamp(timestamp.trim())?;
    Ok(Some(Event::new(identity.to_string(), timestamp)))
}

/// Parse an RFC 3339 timestamp or a `YYYY-MM-DD` date
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid timestamp '{}' (expected RFC 3339 or YYYY-MM-DD)", value))?;

    Ok(date.and_time(chrono::NaiveTime::MIN).and_utc())
}

/// Reference roster and commit history, placed relative to `now`
///
/// Every contributor keeps a weekly cadence, so a seven-day threshold flags
/// nobody.
pub fn demo_dataset(now: DateTime<Utc>) -> (HashSet<String>, Vec<Event<String>>) {
    let roster = ["Alice", "Bob", "Charlie", "David"]
        .into_iter()
        .map(str::to_string)
        .collect();

    let commits: [(&str, i64); 8] = [
        ("Alice", 3),
        ("Alice", 10),
        ("Bob", 5),
        ("Bob", 12),
        ("Charlie", 2),
        ("Charlie", 7),
        ("Charlie", 14),
        ("David", 1),
    ];

    let events = commits
        .into_iter()
        .map(|(name, days)| Event::new(name.to_string(), now - Duration::days(days)))
        .collect();

    (roster, events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;

    #[test]
    fn test_parse_roster_skips_comments_and_duplicates() {
        let roster = parse_roster("# team\nAlice\n\n  Bob  \nAlice\n");
        assert_eq!(roster.len(), 2);
        assert!(roster.contains("Alice"));
        assert!(roster.contains("Bob"));
    }

    #[test]
    fn test_parse_timestamp_date_only() {
        let ts = parse_timestamp("2026-02-03").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2026, 2, 3, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_rfc3339_offset() {
        let ts = parse_timestamp("2026-02-03T10:00:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2026, 2, 3, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        assert!(parse_timestamp("yesterday").is_err());
        assert!(parse_timestamp("2026-13-40").is_err());
    }

    #[test]
    fn test_parse_event_line() {
        let event = parse_event_line("Ada Lovelace, 2026-01-05").unwrap().unwrap();
        assert_eq!(event.identity, "Ada Lovelace");
        assert_eq!(
            event.timestamp,
            Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_event_line_blank_and_comment() {
        assert!(parse_event_line("   ").unwrap().is_none());
        assert!(parse_event_line("# header").unwrap().is_none());
    }

    #[test]
    fn test_parse_event_line_errors() {
        assert!(parse_event_line("no-separator").is_err());
        assert!(parse_event_line(",2026-01-01").is_err());
        assert!(parse_event_line("bob,not-a-date").is_err());
    }

    #[test]
    fn test_parse_line_events_reports_line_number() {
        let err = parse_line_events("a,2026-01-01\nb,oops\n").unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
    }

    #[test]
    fn test_parse_json_events() {
        let events = parse_json_events(
            r#"[{"identity": "x", "timestamp": "2026-01-01"},
                {"identity": "y", "timestamp": "2026-01-02T12:00:00Z"}]"#,
        )
        .unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].identity, "y");
    }

    #[test]
    fn test_parse_json_events_bad_timestamp() {
        let err = parse_json_events(r#"[{"identity": "x", "timestamp": "soon"}]"#).unwrap_err();
        assert!(format!("{:#}", err).contains("event #1"));
    }

    #[test]
    fn test_load_events_by_extension() {
        let dir = tempfile::TempDir::new().unwrap();

        let json_path = dir.path().join("events.json");
        fs::write(&json_path, r#"[{"identity": "a", "timestamp": "2026-01-01"}]"#).unwrap();
        assert_eq!(load_events(&json_path).unwrap().len(), 1);

        let text_path = dir.path().join("events.csv");
        let mut file = fs::File::create(&text_path).unwrap();
        writeln!(file, "a,2026-01-01\nb,2026-01-02").unwrap();
        assert_eq!(load_events(&text_path).unwrap().len(), 2);
    }

    #[test]
    fn test_demo_dataset_shape() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap();
        let (roster, events) = demo_dataset(now);
        assert_eq!(roster.len(), 4);
        assert_eq!(events.len(), 8);
        assert!(events.iter().all(|e| e.timestamp < now));
    }
}
