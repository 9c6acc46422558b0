//! # Rendering
//!
//! Turns library values into terminal text. Every `render_*` function returns
//! a `String` so layout can be tested without a terminal; `print_messages`
//! is the only function here that writes.
//!
//! ## History Layout
//!
//! ```text
//! Thu May 02 2024
//!   [14:30] ⏰ Call Alice                                   1714653000000
//!   [09:00] •  Buy milk                                     1714640400000
//! ```
//!
//! The text column is truncated with `…` so each row fits [`LINE_WIDTH`]
//! display columns.

use super::styles::STYLES;
use chrono::{DateTime, TimeZone, Utc};
use colored::Colorize;
use minddumpapp::api::{CmdMessage, MessageLevel};
use minddumpapp::history::DateGroup;
use minddumpapp::model::{Entry, EntryKind};
use minddumpapp::notify::spool::ScheduledReminder;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
const INDENT: &str = "  ";
const TIME_COL: usize = 8; // "[HH:MM] "
const MARKER_COL: usize = 3;
const THOUGHT_MARKER: &str = "•";
const TASK_MARKER: &str = "⏰";

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

pub fn render_history<Tz: TimeZone>(groups: &[DateGroup], tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    if groups.is_empty() {
        return format!(
            "{}\n",
            STYLES
                .empty
                .apply_to("Nothing here yet. Try: minddump add <text>")
        );
    }

    let mut out = String::new();
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{}\n", STYLES.date_header.apply_to(&group.label)));
        for entry in &group.entries {
            out.push_str(&render_entry_row(entry, tz));
            out.push('\n');
        }
    }
    out
}

fn render_entry_row<Tz: TimeZone>(entry: &Entry, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let time = format!(
        "[{}]",
        entry.timestamp().with_timezone(tz).format("%H:%M")
    );
    let id = entry.id();

    let fixed = INDENT.width() + TIME_COL + MARKER_COL + 2 + id.width();
    let available = LINE_WIDTH.saturating_sub(fixed);
    let text = truncate_to_width(entry.text(), available);
    let padding = available.saturating_sub(text.width());

    let (marker, text) = match entry.kind() {
        EntryKind::Task => (
            STYLES.task_marker.apply_to(pad_to_width(TASK_MARKER, MARKER_COL)),
            STYLES.task.apply_to(text),
        ),
        EntryKind::Thought => (
            STYLES.thought.apply_to(pad_to_width(THOUGHT_MARKER, MARKER_COL)),
            STYLES.thought.apply_to(text),
        ),
    };

    format!(
        "{}{} {}{}{}  {}",
        INDENT,
        STYLES.time.apply_to(time),
        marker,
        text,
        " ".repeat(padding),
        STYLES.id.apply_to(id)
    )
}

/// Reminders that just fell due, with how long ago each one did.
pub fn render_due(reminders: &[ScheduledReminder], now: DateTime<Utc>) -> String {
    if reminders.is_empty() {
        return format!("{}\n", STYLES.empty.apply_to("No reminders due."));
    }

    let formatter = Formatter::new();
    let mut out = String::new();
    for reminder in reminders {
        let late = now
            .signed_duration_since(reminder.at)
            .to_std()
            .unwrap_or_default();
        out.push_str(&format!(
            "{}: {} {}\n",
            reminder.title.bold(),
            reminder.body,
            format!("({})", formatter.convert(late)).dimmed()
        ));
    }
    out
}

/// Reminders still waiting, soonest first, in local wall-clock time.
pub fn render_pending<Tz: TimeZone>(reminders: &[ScheduledReminder], tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    if reminders.is_empty() {
        return format!("{}\n", STYLES.empty.apply_to("No pending reminders."));
    }

    let mut out = String::new();
    for reminder in reminders {
        let at = reminder.at.with_timezone(tz).format("%Y-%m-%d %H:%M");
        out.push_str(&format!(
            "{}{}  {}\n",
            INDENT,
            STYLES.time.apply_to(at),
            truncate_to_width(&reminder.body, LINE_WIDTH.saturating_sub(20))
        ));
    }
    out
}

fn pad_to_width(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use minddumpapp::history::group_by_date;
    use minddumpapp::notify::ReminderHandle;

    fn plain() {
        console::set_colors_enabled(false);
        colored::control::set_override(false);
    }

    fn entry(kind: EntryKind, id: &str, text: &str, ts: &str) -> Entry {
        Entry::new(kind, id.into(), text.into(), ts.parse().unwrap())
    }

    fn reminder(body: &str, at: &str) -> ScheduledReminder {
        ScheduledReminder {
            handle: ReminderHandle(format!("rem-{}", body)),
            title: "⏰ Task Reminder".into(),
            body: body.into(),
            at: at.parse().unwrap(),
        }
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
    }

    #[test]
    fn truncate_respects_display_width() {
        let out = truncate_to_width("日本語のテキスト", 7);
        assert!(out.ends_with('…'));
        assert!(out.width() <= 7);
    }

    #[test]
    fn history_lists_groups_with_rows() {
        plain();
        let entries = vec![
            entry(EntryKind::Thought, "1", "Buy milk", "2024-05-01T09:00:00Z"),
            entry(EntryKind::Task, "2", "Call Alice", "2024-05-02T14:30:00Z"),
        ];
        let out = render_history(&group_by_date(&entries, &Utc), &Utc);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "Thu May 02 2024");
        assert!(lines[1].contains("[14:30] ⏰"));
        assert!(lines[1].contains("Call Alice"));
        assert!(lines[1].trim_end().ends_with('2'));
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "Wed May 01 2024");
        assert!(lines[4].contains("[09:00] •"));
    }

    #[test]
    fn long_rows_fit_the_line() {
        plain();
        let long = "word ".repeat(60);
        let entries = vec![entry(EntryKind::Thought, "1714640400000", &long, "2024-05-01T09:00:00Z")];
        let out = render_history(&group_by_date(&entries, &Utc), &Utc);
        let row = out.lines().nth(1).unwrap();
        assert!(row.contains('…'));
        assert!(row.width() <= LINE_WIDTH);
    }

    #[test]
    fn empty_history_has_a_hint() {
        plain();
        assert!(render_history(&[], &Utc).contains("minddump add"));
    }

    #[test]
    fn due_shows_how_late() {
        plain();
        let now: DateTime<Utc> = "2024-05-02T16:30:00Z".parse().unwrap();
        let out = render_due(&[reminder("Call Alice", "2024-05-02T14:30:00Z")], now);
        assert!(out.contains("⏰ Task Reminder: Call Alice"));
        assert!(out.contains("2 hours ago"));
    }

    #[test]
    fn pending_uses_wall_clock_time() {
        plain();
        let out = render_pending(&[reminder("Call Alice", "2024-05-02T14:30:00Z")], &Utc);
        assert!(out.contains("2024-05-02 14:30  Call Alice"));
        assert!(render_pending(&[], &Utc).contains("No pending reminders."));
    }
}
