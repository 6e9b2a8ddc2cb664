//! Terminal rendering: message entries, todo lines, and placeholder states.
//!
//! The views own *what* is on screen (an ordered entry list); this module
//! owns how a single entry looks. There is no redraw; the terminal is an
//! append-only projection of the list, so "scroll to bottom" from the
//! original design reduces to flushing stdout.

use chrono::{DateTime, Local, NaiveDateTime};
use colored::*;

use crate::api::{Message, Todo};

/// Column where right-side (our participant's) messages start.
const RIGHT_MARGIN: usize = 40;

// -- Entries ----------------------------------------------------------------

/// Which side of the conversation a message lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A message already shaped for display.
#[derive(Debug, Clone)]
pub struct Entry {
    pub id: i64,
    pub side: Side,
    pub text: String,
    pub time_label: String,
}

/// Side selection: the configured right-side participant gets the right
/// column, everyone else (including messages missing a sender) the left.
pub fn side_for(user_id: Option<i64>, right_user: i64) -> Side {
    if user_id == Some(right_user) {
        Side::Right
    } else {
        Side::Left
    }
}

/// Build the display entry for a message. Caller has already established
/// the message carries an id.
pub fn entry_for(message: &Message, id: i64, right_user: i64) -> Entry {
    Entry {
        id,
        side: side_for(message.user_id, right_user),
        text: message.text.clone().unwrap_or_default(),
        time_label: format_time(message.created_at.as_deref()),
    }
}

// -- Time labels ------------------------------------------------------------

/// Format a `created_at` timestamp as an `HH:MM` label. The API sends ISO
/// 8601, sometimes without an offset; both forms parse. Absent or
/// unparseable timestamps degrade to the current local time rather than an
/// error, so a message never fails to render over its clock.
pub fn format_time(created_at: Option<&str>) -> String {
    match created_at {
        Some(raw) => parse_timestamp(raw)
            .unwrap_or_else(|| Local::now().format("%H:%M").to_string()),
        None => Local::now().format("%H:%M").to_string(),
    }
}

fn parse_timestamp(raw: &str) -> Option<String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.format("%H:%M").to_string());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.format("%H:%M").to_string());
    }
    None
}

// -- Printing ---------------------------------------------------------------

/// Lay out one entry as a terminal line. The right-side indent is built
/// before any color is applied, so escape codes never shift the column.
pub fn format_entry_line(entry: &Entry) -> String {
    let time = entry.time_label.dimmed();
    match entry.side {
        Side::Left => format!("{} {}", time, entry.text),
        Side::Right => format!(
            "{}{} {}",
            " ".repeat(RIGHT_MARGIN),
            entry.text.cyan(),
            time
        ),
    }
}

pub fn print_entry(entry: &Entry) {
    println!("{}", format_entry_line(entry));
}

pub fn print_placeholder(text: &str) {
    println!("  {}", text.dimmed().italic());
}

pub fn print_todo(todo: &Todo) {
    let mut line = format!("[ ] {} (due {})", todo.title.bold(), todo.due_date);
    if let Some(desc) = &todo.description {
        line.push_str(&format!("  {}", desc.dimmed()));
    }
    println!("{line}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_for_right_user() {
        assert_eq!(side_for(Some(2), 2), Side::Right);
    }

    #[test]
    fn test_side_for_other_user() {
        assert_eq!(side_for(Some(1), 2), Side::Left);
    }

    #[test]
    fn test_side_for_missing_sender_defaults_left() {
        assert_eq!(side_for(None, 2), Side::Left);
    }

    #[test]
    fn test_format_time_rfc3339() {
        assert_eq!(format_time(Some("2026-01-05T09:30:00+00:00")), "09:30");
    }

    #[test]
    fn test_format_time_naive_iso() {
        assert_eq!(format_time(Some("2026-01-05T21:07:12")), "21:07");
        assert_eq!(format_time(Some("2026-01-05T21:07:12.482910")), "21:07");
    }

    #[test]
    fn test_format_time_unparseable_falls_back_to_now() {
        // Can't pin the clock, but the fallback must still be a HH:MM label.
        let label = format_time(Some("yesterday-ish"));
        assert_eq!(label.len(), 5);
        assert_eq!(label.as_bytes()[2], b':');
    }

    #[test]
    fn test_format_time_absent_falls_back_to_now() {
        let label = format_time(None);
        assert_eq!(label.len(), 5);
        assert_eq!(label.as_bytes()[2], b':');
    }

    #[test]
    fn test_entry_for_uses_raw_text() {
        let msg = Message {
            id: Some(1),
            user_id: Some(2),
            text: Some("<b>hi</b>".to_string()),
            created_at: Some("2026-01-05T09:30:00".to_string()),
            conversation_id: Some(1),
        };
        let entry = entry_for(&msg, 1, 2);
        // No markup interpretation: text passes through untouched.
        assert_eq!(entry.text, "<b>hi</b>");
        assert_eq!(entry.side, Side::Right);
        assert_eq!(entry.time_label, "09:30");
    }

    #[test]
    fn test_right_entries_start_at_fixed_column() {
        let entry = Entry {
            id: 1,
            side: Side::Right,
            text: "héllo wörld".to_string(),
            time_label: "09:30".to_string(),
        };
        let line = format_entry_line(&entry);
        let indent = " ".repeat(RIGHT_MARGIN);
        assert!(line.starts_with(&indent));
        // The column holds regardless of byte length or escape codes.
        assert!(line.trim_start().contains("héllo wörld"));
    }

    #[test]
    fn test_left_entries_not_indented() {
        let entry = Entry {
            id: 1,
            side: Side::Left,
            text: "hi".to_string(),
            time_label: "09:30".to_string(),
        };
        assert!(!format_entry_line(&entry).starts_with(' '));
    }

    #[test]
    fn test_entry_for_missing_text_is_empty() {
        let msg = Message {
            id: Some(1),
            user_id: None,
            text: None,
            created_at: None,
            conversation_id: None,
        };
        let entry = entry_for(&msg, 1, 2);
        assert_eq!(entry.text, "");
        assert_eq!(entry.side, Side::Left);
    }
}
