use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDateTime;
use timelog_core::{END_SESSION_SENTINEL, TIMESTAMP_FORMAT};

use crate::types::{Result, TrackError};

/// Removes markup tags and decodes character references, leaving only the
/// visible text of a task description. Tags strip first so a decoded
/// `&lt;b&gt;` stays literal text.
pub fn strip_markup(raw: &str) -> String {
    decode_references(&strip_tags(raw))
}

fn strip_tags(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    loop {
        match rest.find('<') {
            Some(open) => {
                out.push_str(&rest[..open]);
                let tail = &rest[open..];
                match tag_end(tail) {
                    Some(end) => rest = &tail[end..],
                    None => {
                        // unterminated tag, keep it as text
                        out.push_str(tail);
                        break;
                    }
                }
            }
            None => {
                out.push_str(rest);
                break;
            }
        }
    }
    out
}

/// Byte offset just past the `>` matching the `<` that `tail` starts with.
/// Counts depth so tags nested inside a tag's own brackets are consumed.
fn tag_end(tail: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, ch) in tail.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

fn decode_references(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    loop {
        match rest.find('&') {
            Some(amp) => {
                out.push_str(&rest[..amp]);
                let tail = &rest[amp..];
                match tail.find(';').and_then(|semi| {
                    decode_reference(&tail[1..semi]).map(|ch| (ch, semi))
                }) {
                    Some((ch, semi)) => {
                        out.push(ch);
                        rest = &tail[semi + 1..];
                    }
                    None => {
                        // bare ampersand or unknown reference, keep it as text
                        out.push('&');
                        rest = &tail[1..];
                    }
                }
            }
            None => {
                out.push_str(rest);
                break;
            }
        }
    }
    out
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let digits = name.strip_prefix('#')?;
            let value = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse::<u32>().ok()?,
            };
            char::from_u32(value)
        }
    }
}

/// One durable log line: `::YYYY-MM-DD HH:MM:SS:: {text}\n`.
pub fn encode_line(text: &str, now: NaiveDateTime) -> String {
    format!("::{}:: {}\n", now.format(TIMESTAMP_FORMAT), text)
}

fn append_line(path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(TrackError::WriteFailed)?;
    file.write_all(line.as_bytes())
        .and_then(|_| file.flush())
        .map_err(TrackError::WriteFailed)
}

/// Appends a task-selection entry: `{description} :: {page}`, with markup
/// stripped from the description. The write is flushed before returning.
pub fn append_entry(path: &Path, description: &str, page: &str, now: NaiveDateTime) -> Result<()> {
    let text = format!("{} :: {}", strip_markup(description), page);
    append_line(path, &encode_line(&text, now))
}

/// Appends the session-end sentinel, with no page suffix.
pub fn append_session_end(path: &Path, now: NaiveDateTime) -> Result<()> {
    append_line(path, &encode_line(END_SESSION_SENTINEL, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(strip_markup("Write report"), "Write report");
    }

    #[test]
    fn strips_simple_and_nested_tags() {
        assert_eq!(strip_markup("<b>Write</b> report"), "Write report");
        assert_eq!(strip_markup("<b><i>Write</i> report</b>"), "Write report");
    }

    #[test]
    fn strips_overlapping_tags() {
        assert_eq!(strip_markup("<b>a<i>b</b>c</i>d"), "abcd");
    }

    #[test]
    fn strips_tags_nested_in_brackets() {
        assert_eq!(strip_markup("<a <b>>text"), "text");
    }

    #[test]
    fn unterminated_tag_stays_as_text() {
        assert_eq!(strip_markup("a<b"), "a<b");
    }

    #[test]
    fn decodes_named_references() {
        assert_eq!(strip_markup("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(strip_markup("&quot;x&quot; &apos;y&apos;"), "\"x\" 'y'");
    }

    #[test]
    fn decoded_brackets_are_not_restripped() {
        assert_eq!(strip_markup("&lt;b&gt;"), "<b>");
    }

    #[test]
    fn decodes_numeric_references() {
        assert_eq!(strip_markup("&#65;&#x42;"), "AB");
    }

    #[test]
    fn bare_ampersand_and_unknown_reference_stay() {
        assert_eq!(strip_markup("a & b"), "a & b");
        assert_eq!(strip_markup("&foo; bar"), "&foo; bar");
    }

    #[test]
    fn encodes_timestamped_line() {
        assert_eq!(
            encode_line("Write report :: ProjectA", at(9, 0, 0)),
            "::2024-01-01 09:00:00:: Write report :: ProjectA\n"
        );
    }

    #[test]
    fn appends_entries_and_sentinel() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("timelog.txt");
        append_entry(&path, "<b>Write</b> report", "ProjectA", at(9, 0, 0)).expect("append");
        append_session_end(&path, at(9, 30, 0)).expect("append sentinel");
        let contents = std::fs::read_to_string(&path).expect("read log");
        assert_eq!(
            contents,
            "::2024-01-01 09:00:00:: Write report :: ProjectA\n\
             ::2024-01-01 09:30:00:: __________END_SESSION___________\n"
        );
    }

    #[test]
    fn append_to_directory_reports_write_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = append_entry(dir.path(), "x", "p", at(9, 0, 0)).expect_err("should fail");
        assert!(matches!(err, TrackError::WriteFailed(_)));
    }
}
