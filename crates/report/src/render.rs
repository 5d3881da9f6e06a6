use std::fmt::Write;

use chrono::NaiveDateTime;
use timelog_core::{Report, format_duration};

/// Timestamp format used for display, matching the filter input dates.
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

fn display(ts: NaiveDateTime) -> String {
    ts.format(DISPLAY_FORMAT).to_string()
}

fn join(set: &std::collections::BTreeSet<String>) -> String {
    set.iter().map(String::as_str).collect::<Vec<_>>().join(" ")
}

/// Renders the two-level task hierarchy as plain text: one parent row per
/// task, its intervals indented beneath, and the summary line last.
pub fn render_report(report: &Report) -> String {
    let mut out = String::new();
    for task in &report.tasks {
        let mut label = task.task_text.clone();
        if !task.merged_tags.is_empty() {
            let _ = write!(&mut label, " [{}]", join(&task.merged_tags));
        }
        let _ = writeln!(
            &mut out,
            "{}  {}  {:.1}%  {}  {}  {}",
            label,
            format_duration(task.total_duration),
            task.percent_of_total,
            display(task.earliest_start),
            display(task.latest_end),
            join(&task.merged_pages),
        );
        for interval in &task.child_intervals {
            let _ = writeln!(
                &mut out,
                "    {}  {}  {}  {}",
                format_duration(interval.duration()),
                display(interval.start),
                display(interval.end),
                interval.page,
            );
        }
    }
    out.push_str(&report.summary());
    out.push('\n');
    out
}
