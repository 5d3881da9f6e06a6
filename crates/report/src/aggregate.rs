use std::cmp::Reverse;
use std::collections::HashMap;

use chrono::TimeDelta;
use timelog_core::{Interval, Report, TaskAggregate};

/// Groups intervals by task text and computes per-task statistics. Pass 1
/// accumulates durations, bounds, and merged sets in first-appearance
/// order; pass 2 derives each task's share once the grand total is known.
/// Presentation order is total duration descending with a stable tie-break
/// by first appearance.
pub fn aggregate(intervals: Vec<Interval>) -> Report {
    let mut groups: Vec<TaskAggregate> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for interval in intervals {
        let slot = match index.get(&interval.task_text) {
            Some(&slot) => slot,
            None => {
                index.insert(interval.task_text.clone(), groups.len());
                groups.push(TaskAggregate {
                    task_text: interval.task_text.clone(),
                    total_duration: TimeDelta::zero(),
                    earliest_start: interval.start,
                    latest_end: interval.end,
                    merged_tags: Default::default(),
                    merged_pages: Default::default(),
                    child_intervals: Vec::new(),
                    percent_of_total: 0.0,
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[slot];
        group.total_duration = group.total_duration + interval.duration();
        group.earliest_start = group.earliest_start.min(interval.start);
        group.latest_end = group.latest_end.max(interval.end);
        group.merged_tags.extend(interval.tags.iter().cloned());
        if !interval.page.is_empty() {
            group.merged_pages.insert(interval.page.clone());
        }
        group.child_intervals.push(interval);
    }

    let total_task_count = groups.iter().map(|g| g.child_intervals.len()).sum();
    let total_duration = groups
        .iter()
        .fold(TimeDelta::zero(), |acc, g| acc + g.total_duration);

    let grand_secs = total_duration.num_seconds();
    for group in &mut groups {
        group.percent_of_total = if grand_secs > 0 {
            100.0 * group.total_duration.num_seconds() as f64 / grand_secs as f64
        } else {
            0.0
        };
    }

    groups.sort_by_key(|g| Reverse(g.total_duration));

    Report {
        tasks: groups,
        total_task_count,
        total_duration,
    }
}
