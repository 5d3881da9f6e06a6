use std::collections::BTreeSet;

use timelog_core::{CanonicalEvent, RawEvent};

/// Pulls every `@word` token out of a description. Tags keep their leading
/// `@`; the remaining text keeps its inner whitespace and is trimmed at the
/// ends. A bare `@` is not a tag.
pub fn extract_tags(description: &str) -> (String, BTreeSet<String>) {
    let mut tags = BTreeSet::new();
    let mut text = String::with_capacity(description.len());
    let mut chars = description.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '@' {
            text.push(ch);
            continue;
        }
        let mut tag = String::from('@');
        while let Some(&next) = chars.peek() {
            if next.is_alphanumeric() || next == '_' {
                tag.push(next);
                chars.next();
            } else {
                break;
            }
        }
        if tag.len() > 1 {
            tags.insert(tag);
        } else {
            text.push('@');
        }
    }
    (text.trim().to_string(), tags)
}

/// Collapses consecutive raw events with an identical `(description, page)`
/// pair into one transition, then separates inline tags from the text.
pub fn canonicalize(events: &[RawEvent]) -> Vec<CanonicalEvent> {
    let mut out = Vec::with_capacity(events.len());
    let mut prev: Option<(&str, &str)> = None;
    for event in events {
        let key = (event.description.as_str(), event.page.as_str());
        if prev == Some(key) {
            continue;
        }
        prev = Some(key);
        let (task_text, tags) = extract_tags(&event.description);
        out.push(CanonicalEvent {
            timestamp: event.timestamp,
            task_text,
            page: event.page.clone(),
            tags,
        });
    }
    out
}
