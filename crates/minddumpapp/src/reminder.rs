//! # Reminder Coordinator
//!
//! Bridges task creation to the host notifier.
//!
//! Confirming a task:
//! 1. composes the reminder instant from the picked date and the picked
//!    hour/minute, in the device's zone;
//! 2. adds the task to the [`EntryStore`] (which persists it);
//! 3. issues exactly one `schedule` request for it.
//!
//! A failed or refused `schedule` never rolls back step 2; the task simply
//! won't fire. There is no retry and no cancellation: deleting a task leaves
//! any reminder already handed to the host in place.

use crate::clock::Clock;
use crate::kv::KvBackend;
use crate::model::Entry;
use crate::notify::{
    ensure_permission, Notifier, Permission, PermissionCheck, ReminderRequest,
    PERMISSION_ADVISORY,
};
use crate::store::EntryStore;
use chrono::{
    DateTime, Duration, Local, LocalResult, NaiveDate, NaiveTime, TimeZone, Timelike, Utc,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
    pub entry: Entry,
    /// The notifier accepted the reminder.
    pub scheduled: bool,
}

pub struct ReminderCoordinator<N: Notifier> {
    notifier: N,
    permission: Option<PermissionCheck>,
}

impl<N: Notifier> ReminderCoordinator<N> {
    pub fn new(notifier: N) -> Self {
        Self {
            notifier,
            permission: None,
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Resolved permission, once `bootstrap` has run.
    pub fn permission(&self) -> Option<Permission> {
        self.permission.map(|check| check.status)
    }

    /// Resolves notification permission. Only the first call in a session
    /// talks to the notifier; it returns the advisory text when the user
    /// should be told notifications are off. Later calls return `None`.
    pub fn bootstrap(&mut self) -> Option<&'static str> {
        if self.permission.is_some() {
            return None;
        }
        let check = ensure_permission(&self.notifier);
        log::debug!(
            "notification permission: {:?} (prompted: {})",
            check.status,
            check.prompted
        );
        self.permission = Some(check);
        check.show_advisory.then_some(PERMISSION_ADVISORY)
    }

    /// Confirms a task picked as a local date and time on this device.
    pub fn confirm_task<K: KvBackend, C: Clock>(
        &mut self,
        store: &mut EntryStore<K, C>,
        raw_text: &str,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Option<TaskOutcome> {
        self.confirm_task_in(store, raw_text, date, time, &Local)
    }

    pub fn confirm_task_in<K: KvBackend, C: Clock, Tz: TimeZone>(
        &mut self,
        store: &mut EntryStore<K, C>,
        raw_text: &str,
        date: NaiveDate,
        time: NaiveTime,
        tz: &Tz,
    ) -> Option<TaskOutcome> {
        let at = compose_instant(date, time, tz);
        self.confirm_task_at(store, raw_text, at)
    }

    /// Adds the task, then requests its reminder. Returns `None` for blank
    /// text, in which case nothing is stored or scheduled.
    pub fn confirm_task_at<K: KvBackend, C: Clock>(
        &mut self,
        store: &mut EntryStore<K, C>,
        raw_text: &str,
        at: DateTime<Utc>,
    ) -> Option<TaskOutcome> {
        let entry = store.add_task(raw_text, at)?;

        let request = ReminderRequest::task(entry.text(), at);
        let scheduled = match self.notifier.schedule(&request) {
            Ok(handle) => {
                log::debug!("scheduled reminder {} for task {}", handle, entry.id());
                true
            }
            Err(e) => {
                log::warn!("scheduling reminder for task {} failed: {}", entry.id(), e);
                false
            }
        };

        Some(TaskOutcome { entry, scheduled })
    }
}

/// Reminder instant for `date` at the hour and minute of `time` in `tz`.
///
/// Seconds are zeroed. An ambiguous local time resolves to the earlier
/// instant; a local time skipped by a DST jump moves forward one hour.
pub fn compose_instant<Tz: TimeZone>(date: NaiveDate, time: NaiveTime, tz: &Tz) -> DateTime<Utc> {
    let time = time
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time);
    let naive = date.and_time(time);

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(at) => at.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .map(|at| at.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::kv::mem_backend::MemKv;
    use crate::kv::STORAGE_KEY;
    use crate::model::{decode_entries, EntryKind};
    use crate::notify::mem::MemNotifier;
    use chrono::FixedOffset;
    use chrono_tz::America::New_York;

    fn store() -> EntryStore<MemKv, FixedClock> {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let mut store = EntryStore::with_clock(MemKv::new(), FixedClock::new(now));
        store.load();
        store
    }

    fn may(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn compose_overlays_hour_and_minute_and_zeroes_seconds() {
        let time = NaiveTime::from_hms_milli_opt(14, 30, 59, 999).unwrap();
        let at = compose_instant(may(2), time, &Utc);
        assert_eq!(at, Utc.with_ymd_and_hms(2024, 5, 2, 14, 30, 0).unwrap());
    }

    #[test]
    fn compose_interprets_in_the_given_zone() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let at = compose_instant(may(2), hm(1, 15), &plus_two);
        assert_eq!(at, Utc.with_ymd_and_hms(2024, 5, 1, 23, 15, 0).unwrap());
    }

    #[test]
    fn compose_moves_a_spring_forward_gap_ahead_one_hour() {
        // 02:30 does not exist in New York on 2024-03-10; 03:30 EDT does.
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let at = compose_instant(date, hm(2, 30), &New_York);
        assert_eq!(at, Utc.with_ymd_and_hms(2024, 3, 10, 7, 30, 0).unwrap());
    }

    #[test]
    fn compose_takes_the_earlier_instant_on_fall_back() {
        // 01:30 happens twice in New York on 2024-11-03; EDT comes first.
        let date = NaiveDate::from_ymd_opt(2024, 11, 3).unwrap();
        let at = compose_instant(date, hm(1, 30), &New_York);
        assert_eq!(at, Utc.with_ymd_and_hms(2024, 11, 3, 5, 30, 0).unwrap());
    }

    #[test]
    fn granted_task_is_stored_then_scheduled_once() {
        let mut store = store();
        let mut coordinator = ReminderCoordinator::new(MemNotifier::granted());
        assert_eq!(coordinator.bootstrap(), None);

        let outcome = coordinator
            .confirm_task_in(&mut store, "Call Alice", may(2), hm(14, 30), &Utc)
            .unwrap();

        let at = Utc.with_ymd_and_hms(2024, 5, 2, 14, 30, 0).unwrap();
        assert!(outcome.scheduled);
        assert_eq!(outcome.entry.kind(), EntryKind::Task);
        assert_eq!(store.snapshot()[0].kind(), EntryKind::Task);
        assert_eq!(store.snapshot()[0].timestamp(), at);

        let requests = coordinator.notifier().requests();
        assert_eq!(requests, vec![ReminderRequest::task("Call Alice", at)]);
        assert_eq!(requests[0].title, "⏰ Task Reminder");
    }

    #[test]
    fn entry_is_durable_before_scheduling() {
        let mut store = store();
        let mut coordinator = ReminderCoordinator::new(MemNotifier::granted());
        let at = Utc.with_ymd_and_hms(2024, 5, 2, 14, 30, 0).unwrap();
        coordinator.confirm_task_at(&mut store, "X", at);

        let blob = store.backend().value(STORAGE_KEY).unwrap();
        let persisted = decode_entries(&blob).unwrap();
        assert_eq!(persisted.len(), 1);
        assert!(persisted[0].is_task());
    }

    #[test]
    fn denied_permission_keeps_task_and_advises_once() {
        let mut store = store();
        let mut coordinator = ReminderCoordinator::new(MemNotifier::denied());

        assert_eq!(coordinator.bootstrap(), Some(PERMISSION_ADVISORY));
        assert_eq!(coordinator.permission(), Some(Permission::Denied));

        let at = Utc.with_ymd_and_hms(2024, 5, 2, 14, 30, 0).unwrap();
        let outcome = coordinator.confirm_task_at(&mut store, "X", at).unwrap();
        assert!(!outcome.scheduled);
        assert_eq!(store.snapshot()[0].text(), "X");
        assert_eq!(coordinator.notifier().requests().len(), 1);

        assert_eq!(coordinator.bootstrap(), None);
        assert_eq!(coordinator.notifier().prompt_count(), 1);
    }

    #[test]
    fn schedule_failure_does_not_roll_back() {
        let mut store = store();
        let notifier = MemNotifier::granted();
        notifier.set_simulate_schedule_error(true);
        let mut coordinator = ReminderCoordinator::new(notifier);

        let at = Utc.with_ymd_and_hms(2024, 5, 2, 14, 30, 0).unwrap();
        let outcome = coordinator.confirm_task_at(&mut store, "Still here", at).unwrap();
        assert!(!outcome.scheduled);
        assert_eq!(store.len(), 1);
        assert_eq!(store.snapshot()[0].text(), "Still here");
    }

    #[test]
    fn each_task_gets_exactly_one_request() {
        let mut store = store();
        let mut coordinator = ReminderCoordinator::new(MemNotifier::granted());
        coordinator.bootstrap();
        for i in 0..5 {
            let at = Utc.with_ymd_and_hms(2024, 5, 2, 10 + i, 0, 0).unwrap();
            coordinator.confirm_task_at(&mut store, &format!("task {}", i), at);
        }
        store.add_thought("not a task");

        let requests = coordinator.notifier().requests();
        assert_eq!(requests.len(), 5);
        for task in store.snapshot().iter().filter(|e| e.is_task()) {
            let count = requests
                .iter()
                .filter(|r| r.body == task.text() && r.at == task.timestamp())
                .count();
            assert_eq!(count, 1);
        }
    }

    #[test]
    fn blank_task_is_neither_stored_nor_scheduled() {
        let mut store = store();
        let mut coordinator = ReminderCoordinator::new(MemNotifier::granted());
        let at = Utc.with_ymd_and_hms(2024, 5, 2, 14, 30, 0).unwrap();
        assert!(coordinator.confirm_task_at(&mut store, "  ", at).is_none());
        assert!(store.is_empty());
        assert!(coordinator.notifier().requests().is_empty());
    }

    #[test]
    fn past_instants_are_accepted() {
        let mut store = store();
        let mut coordinator = ReminderCoordinator::new(MemNotifier::granted());
        let outcome = coordinator
            .confirm_task_in(&mut store, "yesterday", may(1) - Duration::days(1), hm(8, 0), &Utc)
            .unwrap();
        assert!(outcome.scheduled);
        assert_eq!(store.len(), 1);
    }
}
