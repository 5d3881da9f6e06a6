use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use timelog_core::Interval;

use crate::error::{ReportError, Result};

/// Date format the host delivers filter bounds in.
pub const INPUT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Raw report-request parameters as delivered by the host: `dd/mm/yyyy`
/// dates and a free-text search string. Empty strings mean absent.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ReportParams {
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub search: Option<String>,
}

fn parse_day(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, INPUT_DATE_FORMAT).map_err(|_| {
        ReportError::InvalidFilterInput(format!("invalid date {text:?}, expected dd/mm/yyyy"))
    })
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(|text| text.trim()).filter(|text| !text.is_empty())
}

/// Resolves the textual date bounds into inclusive instants: `from` starts
/// at 00:00:00 and `to` ends at 23:59:59 of the given calendar day; either
/// may be absent (unbounded). Malformed input is an error, never ignored.
pub fn resolve_bounds(
    params: &ReportParams,
) -> Result<(Option<NaiveDateTime>, Option<NaiveDateTime>)> {
    let from = match present(params.from_date.as_ref()) {
        Some(text) => Some(parse_day(text)?.and_time(NaiveTime::MIN)),
        None => None,
    };
    let to = match present(params.to_date.as_ref()) {
        Some(text) => Some(
            parse_day(text)?
                .and_hms_opt(23, 59, 59)
                .ok_or_else(|| ReportError::InvalidFilterInput(format!("invalid date {text:?}")))?,
        ),
        None => None,
    };
    Ok((from, to))
}

struct Token<'a> {
    text: &'a str,
    negated: bool,
}

/// Whitespace-separated search tokens; a `-` prefix negates. Tokens that
/// reduce to nothing after stripping the prefix are ignored.
fn tokens(search: &str) -> Vec<Token<'_>> {
    search
        .split_whitespace()
        .filter_map(|raw| {
            let (negated, text) = match raw.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, raw),
            };
            if text.is_empty() {
                None
            } else {
                Some(Token { text, negated })
            }
        })
        .collect()
}

/// Case-sensitive substring containment against the task text or the
/// space-joined tag set.
fn matches_token(interval: &Interval, text: &str) -> bool {
    if interval.task_text.contains(text) {
        return true;
    }
    let joined = interval
        .tags
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    joined.contains(text)
}

fn retained(interval: &Interval, tokens: &[Token<'_>]) -> bool {
    let mut any_positive = false;
    let mut positive_hit = false;
    for token in tokens {
        let hit = matches_token(interval, token.text);
        if token.negated {
            if hit {
                return false;
            }
        } else {
            any_positive = true;
            positive_hit = positive_hit || hit;
        }
    }
    !any_positive || positive_hit
}

/// Applies date and text filters. Date bounds are inclusive and evaluated
/// against each interval's start only.
pub fn filter_intervals(
    intervals: Vec<Interval>,
    from: Option<NaiveDateTime>,
    to: Option<NaiveDateTime>,
    search: Option<&str>,
) -> Vec<Interval> {
    let tokens = search.map(tokens).unwrap_or_default();
    intervals
        .into_iter()
        .filter(|interval| {
            if let Some(from) = from
                && interval.start < from
            {
                return false;
            }
            if let Some(to) = to
                && interval.start > to
            {
                return false;
            }
            retained(interval, &tokens)
        })
        .collect()
}
