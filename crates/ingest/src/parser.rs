use chrono::NaiveDateTime;
use timelog_core::{RawEvent, TIMESTAMP_FORMAT};

const PAGE_SEPARATOR: &str = " :: ";

/// Strict `YYYY-MM-DD HH:MM:SS`: exact length, zero-padded, no timezone.
fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let bytes = text.as_bytes();
    if bytes.len() != 19 {
        return None;
    }
    for (i, byte) in bytes.iter().enumerate() {
        let ok = match i {
            4 | 7 => *byte == b'-',
            10 => *byte == b' ',
            13 | 16 => *byte == b':',
            _ => byte.is_ascii_digit(),
        };
        if !ok {
            return None;
        }
    }
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).ok()
}

/// Splits `::<ts>:: <rest>` into the timestamp and the remainder.
fn split_timestamp(line: &str) -> Option<(NaiveDateTime, &str)> {
    let rest = line.strip_prefix("::")?;
    let timestamp = parse_timestamp(rest.get(..19)?)?;
    let rest = rest.get(19..)?.strip_prefix(":: ")?;
    Some((timestamp, rest))
}

/// New format: `::<ts>:: <description> :: <page>`. The description is
/// bounded by the last ` :: ` separator, so a description containing the
/// literal separator loses its tail to the page field.
pub fn parse_new_format(line: &str) -> Option<RawEvent> {
    let (timestamp, rest) = split_timestamp(line)?;
    let split = rest.rfind(PAGE_SEPARATOR)?;
    Some(RawEvent {
        timestamp,
        description: rest[..split].to_string(),
        page: rest[split + PAGE_SEPARATOR.len()..].to_string(),
    })
}

/// Old format, before the page field existed: `::<ts>:: <description>`.
/// Stays parseable indefinitely; such lines carry an empty page.
pub fn parse_old_format(line: &str) -> Option<RawEvent> {
    let (timestamp, rest) = split_timestamp(line)?;
    Some(RawEvent {
        timestamp,
        description: rest.to_string(),
        page: String::new(),
    })
}

pub fn parse_line(line: &str) -> Option<RawEvent> {
    parse_new_format(line).or_else(|| parse_old_format(line))
}

/// Parses the full log. Lines matching neither grammar are skipped:
/// blank lines, corruption, and manual edits never block reporting.
pub fn events_from_str(contents: &str) -> Vec<RawEvent> {
    contents
        .lines()
        .filter_map(|line| {
            let event = parse_line(line);
            if event.is_none() && !line.trim().is_empty() {
                log::debug!("skipping unrecognized log line: {line:?}");
            }
            event
        })
        .collect()
}
