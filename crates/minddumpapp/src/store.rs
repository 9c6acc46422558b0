//! # Entry Store
//!
//! The single owner of the entry list. Every mutation goes through here and
//! is mirrored to the [`KvBackend`] under [`STORAGE_KEY`] before the call
//! returns, so persisted writes happen in mutation order.
//!
//! ## Guarantees
//!
//! - Text is trimmed; blank input is a no-op.
//! - New entries are prepended: `snapshot()[0]` is always the most recently
//!   inserted entry. The list is never re-sorted.
//! - Ids are unique across the list.
//! - Mutations never fail. Persistence errors are logged and dropped; the
//!   next successful write supersedes them.
//! - A blob that cannot be decoded yields an empty store and is overwritten
//!   by the next mutation.
//!
//! ## Subscriptions
//!
//! UI clients register listeners with [`EntryStore::subscribe`]. Listeners
//! receive the snapshot after `load` and after every mutation that changed
//! the list.

use crate::clock::{Clock, IdGenerator, SystemClock};
use crate::history::{group_by_date, DateGroup};
use crate::kv::{KvBackend, STORAGE_KEY};
use crate::model::{decode_entries, encode_entries, normalize_text, Entry, EntryKind};
use chrono::{DateTime, Local, TimeZone, Utc};

pub type SubscriptionId = usize;

type Listener = Box<dyn FnMut(&[Entry])>;

pub struct EntryStore<K: KvBackend, C: Clock = SystemClock> {
    entries: Vec<Entry>,
    backend: K,
    clock: C,
    ids: IdGenerator,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
}

impl<K: KvBackend> EntryStore<K, SystemClock> {
    pub fn new(backend: K) -> Self {
        Self::with_clock(backend, SystemClock)
    }
}

impl<K: KvBackend, C: Clock> EntryStore<K, C> {
    pub fn with_clock(backend: K, clock: C) -> Self {
        Self {
            entries: Vec::new(),
            backend,
            clock,
            ids: IdGenerator::new(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn backend(&self) -> &K {
        &self.backend
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Replaces the in-memory list with the persisted one.
    ///
    /// Absent, unreadable or undecodable blobs all yield an empty list.
    pub fn load(&mut self) {
        self.entries = match self.backend.read(STORAGE_KEY) {
            Ok(Some(blob)) => match decode_entries(&blob) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!("persisted entries are corrupt, starting empty: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("reading persisted entries failed, starting empty: {}", e);
                Vec::new()
            }
        };
        log::debug!("loaded {} entries", self.entries.len());
        self.notify();
    }

    /// Captures a thought stamped with the current instant.
    /// Returns `None` (and changes nothing) for blank text.
    pub fn add_thought(&mut self, raw_text: &str) -> Option<Entry> {
        let now = self.clock.now();
        self.insert(EntryKind::Thought, raw_text, now)
    }

    /// Captures a task whose timestamp is the reminder instant `at`.
    /// Past instants are accepted. Returns `None` for blank text.
    pub fn add_task(&mut self, raw_text: &str, at: DateTime<Utc>) -> Option<Entry> {
        self.insert(EntryKind::Task, raw_text, at)
    }

    /// Removes the entry with `id`. Unknown ids are a no-op.
    pub fn delete(&mut self, id: &str) -> Option<Entry> {
        let position = self.entries.iter().position(|e| e.id() == id)?;
        let removed = self.entries.remove(position);
        log::debug!("deleted entry {}", id);
        self.persist();
        self.notify();
        Some(removed)
    }

    /// Empties the list and drops the persisted key.
    pub fn clear_all(&mut self) {
        let had_entries = !self.entries.is_empty();
        self.entries.clear();
        if let Err(e) = self.backend.remove(STORAGE_KEY) {
            log::warn!("removing persisted entries failed: {}", e);
        }
        if had_entries {
            log::debug!("cleared all entries");
            self.notify();
        }
    }

    /// Newest-inserted first.
    pub fn snapshot(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// History grouped by calendar date on this device.
    pub fn grouped(&self) -> Vec<DateGroup> {
        self.grouped_in(&Local)
    }

    pub fn grouped_in<Tz: TimeZone>(&self, tz: &Tz) -> Vec<DateGroup> {
        group_by_date(&self.entries, tz)
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&[Entry]) + 'static,
    {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn insert(&mut self, kind: EntryKind, raw_text: &str, timestamp: DateTime<Utc>) -> Option<Entry> {
        let text = normalize_text(raw_text)?;
        let id = self.mint_id();
        let entry = Entry::new(kind, id, text, timestamp);
        self.entries.insert(0, entry.clone());
        log::debug!("added {} {}", kind, entry.id());
        self.persist();
        self.notify();
        Some(entry)
    }

    fn mint_id(&mut self) -> String {
        loop {
            let candidate = self.ids.next_id(self.clock.now());
            if self.get(&candidate).is_none() {
                return candidate;
            }
        }
    }

    fn persist(&self) {
        let blob = match encode_entries(&self.entries) {
            Ok(blob) => blob,
            Err(e) => {
                log::warn!("encoding entries failed: {}", e);
                return;
            }
        };
        if let Err(e) = self.backend.write(STORAGE_KEY, &blob) {
            log::warn!("persisting entries failed: {}", e);
        }
    }

    fn notify(&mut self) {
        let entries = &self.entries;
        for (_, listener) in self.listeners.iter_mut() {
            listener(entries);
        }
    }
}
