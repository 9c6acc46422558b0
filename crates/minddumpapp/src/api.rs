//! # API Facade
//!
//! The single entry point for UI clients. It owns the [`EntryStore`] and the
//! [`ReminderCoordinator`] and maps each UI intent onto them:
//!
//! | Intent | Method |
//! |---|---|
//! | startup | [`MindDumpApi::bootstrap`] |
//! | add-thought | [`MindDumpApi::add_thought`] |
//! | confirm-task | [`MindDumpApi::confirm_task`] |
//! | delete | [`MindDumpApi::delete`] |
//! | clear-all | [`MindDumpApi::clear_all`] |
//!
//! Mutating intents return a [`CmdResult`] carrying the affected entries and
//! leveled messages; the UI decides how to render them. None of them fail:
//! blank text and unknown ids are reported as `info` messages.
//!
//! ## Generic Over Adapters
//!
//! `MindDumpApi<K, N, C>` is generic over persistence, notifier and clock:
//! - Production: `MindDumpApi<FsKv, SpoolNotifier>`
//! - Testing: `MindDumpApi<MemKv, MemNotifier, FixedClock>`

use crate::clock::{Clock, SystemClock};
use crate::history::DateGroup;
use crate::kv::KvBackend;
use crate::model::Entry;
use crate::notify::Notifier;
use crate::reminder::ReminderCoordinator;
use crate::store::EntryStore;
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct CmdResult {
    pub affected_entries: Vec<Entry>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    fn with_message(message: CmdMessage) -> Self {
        Self {
            affected_entries: Vec::new(),
            messages: vec![message],
        }
    }
}

pub struct MindDumpApi<K: KvBackend, N: Notifier, C: Clock = SystemClock> {
    store: EntryStore<K, C>,
    reminders: ReminderCoordinator<N>,
    loaded: bool,
}

impl<K: KvBackend, N: Notifier> MindDumpApi<K, N, SystemClock> {
    pub fn new(backend: K, notifier: N) -> Self {
        Self::with_store(EntryStore::new(backend), notifier)
    }
}

impl<K: KvBackend, N: Notifier, C: Clock> MindDumpApi<K, N, C> {
    pub fn with_store(store: EntryStore<K, C>, notifier: N) -> Self {
        Self {
            store,
            reminders: ReminderCoordinator::new(notifier),
            loaded: false,
        }
    }

    pub fn store(&self) -> &EntryStore<K, C> {
        &self.store
    }

    /// Mutable access, e.g. for subscribing listeners.
    pub fn store_mut(&mut self) -> &mut EntryStore<K, C> {
        &mut self.store
    }

    pub fn reminders(&self) -> &ReminderCoordinator<N> {
        &self.reminders
    }

    /// Startup: loads persisted entries and resolves notification permission.
    /// Only the first call does either; later calls return an empty result
    /// and leave the in-memory list alone.
    pub fn bootstrap(&mut self) -> CmdResult {
        if !self.loaded {
            self.store.load();
            self.loaded = true;
        }
        let mut result = CmdResult::default();
        if let Some(advisory) = self.reminders.bootstrap() {
            result.add_message(CmdMessage::warning(advisory));
        }
        result
    }

    pub fn add_thought(&mut self, raw_text: &str) -> CmdResult {
        match self.store.add_thought(raw_text) {
            Some(entry) => {
                let mut result = CmdResult::with_message(CmdMessage::success("Thought saved"));
                result.affected_entries.push(entry);
                result
            }
            None => CmdResult::with_message(CmdMessage::info("Nothing to save: text is empty")),
        }
    }

    /// Confirms a task for a local date and time on this device.
    pub fn confirm_task(&mut self, raw_text: &str, date: NaiveDate, time: NaiveTime) -> CmdResult {
        self.confirm_task_in(raw_text, date, time, &Local)
    }

    pub fn confirm_task_in<Tz: TimeZone>(
        &mut self,
        raw_text: &str,
        date: NaiveDate,
        time: NaiveTime,
        tz: &Tz,
    ) -> CmdResult {
        let outcome = self
            .reminders
            .confirm_task_in(&mut self.store, raw_text, date, time, tz);
        task_result(outcome.map(|o| o.entry))
    }

    pub fn confirm_task_at(&mut self, raw_text: &str, at: DateTime<Utc>) -> CmdResult {
        let outcome = self.reminders.confirm_task_at(&mut self.store, raw_text, at);
        task_result(outcome.map(|o| o.entry))
    }

    /// Deletes each id in turn. Unknown ids are reported, not errors.
    pub fn delete<I: AsRef<str>>(&mut self, ids: &[I]) -> CmdResult {
        let mut result = CmdResult::default();
        for id in ids {
            let id = id.as_ref();
            match self.store.delete(id) {
                Some(entry) => {
                    result.add_message(CmdMessage::success(format!(
                        "Deleted {} {}",
                        entry.kind(),
                        entry.id()
                    )));
                    result.affected_entries.push(entry);
                }
                None => result.add_message(CmdMessage::info(format!("No entry with id {}", id))),
            }
        }
        result
    }

    pub fn clear_all(&mut self) -> CmdResult {
        let removed = self.store.snapshot().to_vec();
        self.store.clear_all();
        if removed.is_empty() {
            return CmdResult::with_message(CmdMessage::info("Nothing to clear"));
        }
        let mut result = CmdResult::with_message(CmdMessage::success(format!(
            "Cleared {} {}",
            removed.len(),
            if removed.len() == 1 { "entry" } else { "entries" }
        )));
        result.affected_entries = removed;
        result
    }

    pub fn snapshot(&self) -> &[Entry] {
        self.store.snapshot()
    }

    pub fn history(&self) -> Vec<DateGroup> {
        self.store.grouped()
    }

    pub fn history_in<Tz: TimeZone>(&self, tz: &Tz) -> Vec<DateGroup> {
        self.store.grouped_in(tz)
    }
}

fn task_result(entry: Option<Entry>) -> CmdResult {
    match entry {
        Some(entry) => {
            let mut result = CmdResult::with_message(CmdMessage::success("Task saved"));
            result.affected_entries.push(entry);
            result
        }
        None => CmdResult::with_message(CmdMessage::info("Nothing to save: text is empty")),
    }
}
