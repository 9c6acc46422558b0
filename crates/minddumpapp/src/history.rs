//! Grouped history projection.
//!
//! Entries are bucketed by the calendar date of their timestamp in a given
//! time zone. Buckets come newest date first; inside a bucket, entries come
//! newest timestamp first, and equal timestamps keep snapshot order.

use crate::model::Entry;
use chrono::{NaiveDate, TimeZone};
use std::collections::BTreeMap;

/// Header format for a date bucket, e.g. `Wed May 01 2024`.
pub const DATE_LABEL_FORMAT: &str = "%a %b %d %Y";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateGroup {
    pub date: NaiveDate,
    pub label: String,
    pub entries: Vec<Entry>,
}

pub fn date_label(date: NaiveDate) -> String {
    date.format(DATE_LABEL_FORMAT).to_string()
}

pub fn group_by_date<Tz: TimeZone>(entries: &[Entry], tz: &Tz) -> Vec<DateGroup> {
    let mut buckets: BTreeMap<NaiveDate, Vec<Entry>> = BTreeMap::new();
    for entry in entries {
        let date = entry.timestamp().with_timezone(tz).date_naive();
        buckets.entry(date).or_default().push(entry.clone());
    }

    buckets
        .into_iter()
        .rev()
        .map(|(date, mut entries)| {
            entries.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
            DateGroup {
                date,
                label: date_label(date),
                entries,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntryKind;
    use chrono::{DateTime, FixedOffset, Utc};

    fn entry(id: &str, ts: &str) -> Entry {
        let ts: DateTime<Utc> = ts.parse().unwrap();
        Entry::new(EntryKind::Thought, id.into(), format!("text {}", id), ts)
    }

    fn ids(group: &DateGroup) -> Vec<&str> {
        group.entries.iter().map(|e| e.id()).collect()
    }

    #[test]
    fn empty_snapshot_has_no_groups() {
        assert!(group_by_date(&[], &Utc).is_empty());
    }

    #[test]
    fn splits_across_midnight_newest_date_first() {
        let entries = vec![
            entry("late", "2024-05-01T23:59:00Z"),
            entry("early", "2024-05-02T00:05:00Z"),
        ];
        let groups = group_by_date(&entries, &Utc);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].date, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        assert_eq!(ids(&groups[0]), vec!["early"]);
        assert_eq!(ids(&groups[1]), vec!["late"]);
    }

    #[test]
    fn orders_by_timestamp_not_insertion_within_a_day() {
        // Snapshot order is insertion order: a task scheduled for the evening
        // was inserted before a morning thought.
        let entries = vec![
            entry("morning", "2024-05-01T08:00:00Z"),
            entry("evening", "2024-05-01T20:00:00Z"),
            entry("noon", "2024-05-01T12:00:00Z"),
        ];
        let groups = group_by_date(&entries, &Utc);
        assert_eq!(groups.len(), 1);
        assert_eq!(ids(&groups[0]), vec!["evening", "noon", "morning"]);
    }

    #[test]
    fn equal_timestamps_keep_snapshot_order() {
        let entries = vec![
            entry("b", "2024-05-01T08:00:00Z"),
            entry("a", "2024-05-01T08:00:00Z"),
        ];
        let groups = group_by_date(&entries, &Utc);
        assert_eq!(ids(&groups[0]), vec!["b", "a"]);
    }

    #[test]
    fn uses_the_given_zone_for_calendar_dates() {
        let entries = vec![
            entry("a", "2024-05-01T23:59:00Z"),
            entry("b", "2024-05-02T00:05:00Z"),
        ];
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let groups = group_by_date(&entries, &plus_two);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].date, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        assert_eq!(ids(&groups[0]), vec!["b", "a"]);
    }

    #[test]
    fn labels_read_like_a_date_string() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(date_label(date), "Wed May 01 2024");
    }
}
