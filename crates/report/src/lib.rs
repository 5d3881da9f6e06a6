use std::path::Path;

use timelog_core::{Interval, Report};
use timelog_ingest::intervals_from_path;

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod render;

pub use aggregate::aggregate as aggregate_intervals;
pub use error::{ReportError, Result};
pub use filter::{ReportParams, filter_intervals, resolve_bounds};
pub use render::render_report;

/// Builds a report from reconstructed intervals: resolve the filter
/// parameters, filter, aggregate. Fails atomically; no partial report.
pub fn build_report(intervals: Vec<Interval>, params: &ReportParams) -> Result<Report> {
    let (from, to) = resolve_bounds(params)?;
    let filtered = filter_intervals(intervals, from, to, params.search.as_deref());
    log::debug!("report over {} filtered intervals", filtered.len());
    Ok(aggregate::aggregate(filtered))
}

/// Rebuilds the report in full from the log file. A missing log is an
/// empty report, the first-run case.
pub fn report_from_path(path: &Path, params: &ReportParams) -> Result<Report> {
    let intervals = intervals_from_path(path)?;
    build_report(intervals, params)
}
