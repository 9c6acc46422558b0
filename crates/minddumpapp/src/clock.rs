use chrono::{DateTime, Duration, Utc};
use std::cell::Cell;

/// Source of "now" for entry stamping and id minting.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to. Used by tests.
#[derive(Debug)]
pub struct FixedClock {
    now: Cell<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Mints entry ids from millisecond wall-clock time.
///
/// Ids minted within the same millisecond, or after the clock stepped
/// backwards, get a `-N` suffix so they stay distinct.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last_millis: Option<i64>,
    counter: u32,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, now: DateTime<Utc>) -> String {
        let millis = now.timestamp_millis();
        match self.last_millis {
            Some(last) if millis <= last => {
                self.counter += 1;
                format!("{}-{}", last, self.counter)
            }
            _ => {
                self.last_millis = Some(millis);
                self.counter = 0;
                millis.to_string()
            }
        }
    }
}
