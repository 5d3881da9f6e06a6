use std::collections::BTreeSet;

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Reserved task text marking a deliberate tracking pause. Never reported;
/// only bounds the preceding interval.
pub const END_SESSION_SENTINEL: &str = "__________END_SESSION___________";

/// Timestamp format used on every log line: second precision, no timezone.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn is_session_end(task_text: &str) -> bool {
    task_text == END_SESSION_SENTINEL
}

/// One log line as written: timestamp, raw description, originating page.
/// `page` is empty for lines written before the page field existed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    pub timestamp: NaiveDateTime,
    pub description: String,
    pub page: String,
}

/// A deduplicated task-selection record with inline tags separated out.
/// Tags keep their leading `@`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalEvent {
    pub timestamp: NaiveDateTime,
    pub task_text: String,
    pub page: String,
    pub tags: BTreeSet<String>,
}

/// A reconstructed span of time attributed to one task, bounded by two
/// consecutive log timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub task_text: String,
    pub page: String,
    pub tags: BTreeSet<String>,
}

impl Interval {
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}

/// The grouped, summed view of all intervals sharing one task description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskAggregate {
    pub task_text: String,
    #[serde(rename = "total_duration_secs", with = "duration_secs")]
    pub total_duration: TimeDelta,
    pub earliest_start: NaiveDateTime,
    pub latest_end: NaiveDateTime,
    pub merged_tags: BTreeSet<String>,
    pub merged_pages: BTreeSet<String>,
    pub child_intervals: Vec<Interval>,
    pub percent_of_total: f64,
}

/// A full report: per-task aggregates sorted by total duration descending.
/// `total_task_count` counts intervals contributing to the report, not
/// distinct tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub tasks: Vec<TaskAggregate>,
    pub total_task_count: usize,
    #[serde(rename = "total_duration_secs", with = "duration_secs")]
    pub total_duration: TimeDelta,
}

impl Report {
    pub fn summary(&self) -> String {
        format!(
            "Total time: {}  Tasks: {}",
            format_duration(self.total_duration),
            self.total_task_count
        )
    }
}

/// Renders a duration as `H:MM:SS` with unbounded hours.
pub fn format_duration(duration: TimeDelta) -> String {
    let total = duration.num_seconds().max(0);
    format!("{}:{:02}:{:02}", total / 3600, total % 3600 / 60, total % 60)
}

/// Serde adapter storing a `TimeDelta` as whole seconds.
pub mod duration_secs {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(value: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.num_seconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeDelta, D::Error> {
        let secs = i64::deserialize(deserializer)?;
        TimeDelta::try_seconds(secs)
            .ok_or_else(|| de::Error::custom(format!("duration out of range: {secs}s")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_sub_hour_durations() {
        assert_eq!(format_duration(TimeDelta::seconds(0)), "0:00:00");
        assert_eq!(format_duration(TimeDelta::seconds(75 * 60)), "1:15:00");
        assert_eq!(format_duration(TimeDelta::seconds(59)), "0:00:59");
    }

    #[test]
    fn formats_multi_day_durations_as_hours() {
        assert_eq!(format_duration(TimeDelta::seconds(26 * 3600 + 600)), "26:10:00");
    }

    #[test]
    fn negative_durations_clamp_to_zero() {
        assert_eq!(format_duration(TimeDelta::seconds(-5)), "0:00:00");
    }

    #[test]
    fn recognizes_session_end_sentinel() {
        assert!(is_session_end("__________END_SESSION___________"));
        assert!(!is_session_end("Write report"));
    }

    #[test]
    fn report_summary_line() {
        let report = Report {
            tasks: Vec::new(),
            total_task_count: 2,
            total_duration: TimeDelta::seconds(75 * 60),
        };
        assert_eq!(report.summary(), "Total time: 1:15:00  Tasks: 2");
    }

    #[test]
    fn duration_round_trips_as_seconds() {
        let report = Report {
            tasks: Vec::new(),
            total_task_count: 0,
            total_duration: TimeDelta::seconds(4500),
        };
        let json = serde_json::to_string(&report).expect("serialize");
        assert!(json.contains("\"total_duration_secs\":4500"));
        let back: Report = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.total_duration, report.total_duration);
    }
}
