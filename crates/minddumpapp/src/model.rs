//! # Data Model
//!
//! An [`Entry`] is either a [`Entry::Thought`] (stamped with the instant it was
//! captured) or a [`Entry::Task`] (stamped with the reminder instant the user
//! picked). Entries are immutable once created.
//!
//! The persisted form is a JSON array of [`EntryRecord`]s:
//!
//! ```text
//! [{"id":"1714554000000","text":"Buy milk","timestamp":"2024-05-01T09:00:00Z","type":"thought"}]
//! ```
//!
//! Decoding is lenient per element: a record that is missing a field, carries
//! an unknown `type`, has blank text, or repeats an id seen earlier in the
//! array is dropped, and the rest of the blob survives. Only a blob that is not
//! a JSON array at all is rejected as a whole.

use crate::error::{MindDumpError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Thought,
    Task,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Thought => "thought",
            EntryKind::Task => "task",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Thought {
        id: String,
        text: String,
        timestamp: DateTime<Utc>,
    },
    Task {
        id: String,
        text: String,
        timestamp: DateTime<Utc>,
    },
}

impl Entry {
    pub fn new(kind: EntryKind, id: String, text: String, timestamp: DateTime<Utc>) -> Self {
        match kind {
            EntryKind::Thought => Entry::Thought {
                id,
                text,
                timestamp,
            },
            EntryKind::Task => Entry::Task {
                id,
                text,
                timestamp,
            },
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Entry::Thought { id, .. } | Entry::Task { id, .. } => id,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Entry::Thought { text, .. } | Entry::Task { text, .. } => text,
        }
    }

    /// Creation instant for thoughts, reminder instant for tasks.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Entry::Thought { timestamp, .. } | Entry::Task { timestamp, .. } => *timestamp,
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::Thought { .. } => EntryKind::Thought,
            Entry::Task { .. } => EntryKind::Task,
        }
    }

    pub fn is_task(&self) -> bool {
        matches!(self, Entry::Task { .. })
    }
}

/// Trims user input. Returns `None` when nothing but whitespace was typed.
pub fn normalize_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Wire shape of a single persisted entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub id: String,
    pub text: String,
    #[serde(with = "rfc3339")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl From<&Entry> for EntryRecord {
    fn from(entry: &Entry) -> Self {
        Self {
            id: entry.id().to_string(),
            text: entry.text().to_string(),
            timestamp: entry.timestamp(),
            kind: entry.kind(),
        }
    }
}

impl From<EntryRecord> for Entry {
    fn from(record: EntryRecord) -> Self {
        Entry::new(record.kind, record.id, record.text, record.timestamp)
    }
}

/// Serializes entries into the persisted blob.
pub fn encode_entries(entries: &[Entry]) -> Result<String> {
    let records: Vec<EntryRecord> = entries.iter().map(EntryRecord::from).collect();
    serde_json::to_string(&records).map_err(MindDumpError::Serialization)
}

/// Decodes a persisted blob, dropping individual records that are unusable.
///
/// Returns `Err` only when the blob is not a JSON array.
pub fn decode_entries(blob: &str) -> Result<Vec<Entry>> {
    let value: serde_json::Value = serde_json::from_str(blob)?;
    let items = match value {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(MindDumpError::Store(format!(
                "expected an array of entries, found {}",
                json_type_name(&other)
            )))
        }
    };

    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(items.len());

    for (position, item) in items.into_iter().enumerate() {
        let record: EntryRecord = match serde_json::from_value(item) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("discarding persisted entry #{}: {}", position, e);
                continue;
            }
        };

        let Some(text) = normalize_text(&record.text) else {
            log::warn!("discarding persisted entry {}: blank text", record.id);
            continue;
        };

        if !seen.insert(record.id.clone()) {
            log::warn!("discarding persisted entry {}: duplicate id", record.id);
            continue;
        }

        entries.push(Entry::new(record.kind, record.id, text, record.timestamp));
    }

    Ok(entries)
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// RFC 3339 with a `Z` suffix on write; any offset accepted on read.
pub(crate) mod rfc3339 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
