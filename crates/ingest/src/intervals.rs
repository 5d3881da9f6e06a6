use std::io;
use std::path::Path;

use timelog_core::{CanonicalEvent, Interval, is_session_end};

use crate::canonical::canonicalize;
use crate::parser::events_from_str;
use crate::types::{Result, TrackError};

/// Converts the canonical event sequence into bounded intervals: each event
/// starts an interval that the next event's timestamp ends. The final event
/// has no known end and is dropped. Session-end intervals are excluded here,
/// after their timestamp has bounded the predecessor.
pub fn reconstruct(events: &[CanonicalEvent]) -> Vec<Interval> {
    events
        .windows(2)
        .filter_map(|pair| {
            let (current, next) = (&pair[0], &pair[1]);
            if is_session_end(&current.task_text) {
                return None;
            }
            Some(Interval {
                start: current.timestamp,
                end: next.timestamp,
                task_text: current.task_text.clone(),
                page: current.page.clone(),
                tags: current.tags.clone(),
            })
        })
        .collect()
}

/// Full read pipeline: parse, canonicalize, reconstruct.
pub fn intervals_from_str(contents: &str) -> Vec<Interval> {
    reconstruct(&canonicalize(&events_from_str(contents)))
}

/// Reads the whole log and reconstructs its intervals. A missing file is an
/// empty log, not an error.
pub fn intervals_from_path(path: &Path) -> Result<Vec<Interval>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(TrackError::ReadFailed(err)),
    };
    Ok(intervals_from_str(&contents))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, TimeDelta};
    use std::collections::BTreeSet;
    use timelog_core::{END_SESSION_SENTINEL, TIMESTAMP_FORMAT};

    fn event(ts: &str, task_text: &str) -> CanonicalEvent {
        CanonicalEvent {
            timestamp: NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).expect("timestamp"),
            task_text: task_text.to_string(),
            page: "ProjectA".to_string(),
            tags: BTreeSet::new(),
        }
    }

    #[test]
    fn n_events_produce_n_minus_one_intervals() {
        let events = vec![
            event("2024-01-01 09:00:00", "a"),
            event("2024-01-01 09:10:00", "b"),
            event("2024-01-01 09:25:00", "c"),
        ];
        let intervals = reconstruct(&events);
        assert_eq!(intervals.len(), 2);
        assert_eq!(intervals[0].end, intervals[1].start);
        assert_eq!(intervals[0].duration(), TimeDelta::minutes(10));
        assert_eq!(intervals[1].duration(), TimeDelta::minutes(15));
    }

    #[test]
    fn single_event_produces_no_interval() {
        assert!(reconstruct(&[event("2024-01-01 09:00:00", "a")]).is_empty());
        assert!(reconstruct(&[]).is_empty());
    }

    #[test]
    fn sentinel_bounds_predecessor_but_is_never_emitted() {
        let events = vec![
            event("2024-01-01 09:00:00", "Write report"),
            event("2024-01-01 09:30:00", END_SESSION_SENTINEL),
            event("2024-01-01 10:00:00", "Write report"),
            event("2024-01-01 10:45:00", "Review"),
        ];
        let intervals = reconstruct(&events);
        assert_eq!(intervals.len(), 2);
        assert!(intervals.iter().all(|i| i.task_text == "Write report"));
        assert_eq!(intervals[0].duration(), TimeDelta::minutes(30));
        assert_eq!(intervals[1].duration(), TimeDelta::minutes(45));
    }

    #[test]
    fn missing_file_is_an_empty_log() {
        let dir = tempfile::tempdir().expect("tempdir");
        let intervals = intervals_from_path(&dir.path().join("absent.txt")).expect("read");
        assert!(intervals.is_empty());
    }

    #[test]
    fn pipeline_tolerates_mixed_formats_and_garbage() {
        let contents = "::2023-06-15 08:00:00:: Old style task\n\
            not a log line\n\
            ::2023-06-15 08:30:00:: Write report :: ProjectA\n\
            ::2023-06-15 09:00:00:: Write report :: ProjectA\n\
            ::2023-06-15 09:15:00:: Review @urgent :: ProjectA\n";
        let intervals = intervals_from_str(contents);
        // duplicate collapses, final event has no successor
        assert_eq!(intervals.len(), 2);
        assert_eq!(intervals[0].task_text, "Old style task");
        assert_eq!(intervals[0].page, "");
        assert_eq!(intervals[1].task_text, "Write report");
        assert_eq!(intervals[1].duration(), TimeDelta::minutes(45));
    }
}
