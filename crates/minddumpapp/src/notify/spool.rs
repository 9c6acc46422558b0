//! Terminal host for task reminders.
//!
//! A terminal has no notification center that can wake up at a given time,
//! so scheduling appends the request to `reminders.json` in the data
//! directory. The shell delivers whatever has fallen due each time it runs
//! `take_due`. Permission is the `notifications` configuration switch.

use super::{Notifier, Permission, ReminderHandle, ReminderRequest};
use crate::error::{MindDumpError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const SPOOL_FILENAME: &str = "reminders.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledReminder {
    pub handle: ReminderHandle,
    pub title: String,
    pub body: String,
    #[serde(with = "crate::model::rfc3339")]
    pub at: DateTime<Utc>,
}

pub struct SpoolNotifier {
    dir: PathBuf,
    enabled: bool,
}

impl SpoolNotifier {
    pub fn new(dir: PathBuf, enabled: bool) -> Self {
        Self { dir, enabled }
    }

    pub fn spool_path(&self) -> PathBuf {
        self.dir.join(SPOOL_FILENAME)
    }

    /// All reminders not yet delivered, soonest first.
    pub fn pending(&self) -> Result<Vec<ScheduledReminder>> {
        let mut reminders = self.load()?;
        reminders.sort_by_key(|r| r.at);
        Ok(reminders)
    }

    /// Removes and returns every reminder due at or before `now`, soonest first.
    pub fn take_due(&self, now: DateTime<Utc>) -> Result<Vec<ScheduledReminder>> {
        let reminders = self.load()?;
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            reminders.into_iter().partition(|r| r.at <= now);
        if due.is_empty() {
            return Ok(due);
        }
        self.save(&waiting)?;
        due.sort_by_key(|r| r.at);
        Ok(due)
    }

    fn load(&self) -> Result<Vec<ScheduledReminder>> {
        let content = match fs::read_to_string(self.spool_path()) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(MindDumpError::Io(e)),
        };
        serde_json::from_str(&content).map_err(MindDumpError::Serialization)
    }

    fn save(&self, reminders: &[ScheduledReminder]) -> Result<()> {
        ensure_dir(&self.dir)?;
        let content =
            serde_json::to_string_pretty(reminders).map_err(MindDumpError::Serialization)?;

        // Atomic write
        let tmp = self
            .dir
            .join(format!(".reminders-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, content).map_err(MindDumpError::Io)?;
        fs::rename(&tmp, self.spool_path()).map_err(MindDumpError::Io)?;
        Ok(())
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(MindDumpError::Io)?;
    }
    Ok(())
}

impl Notifier for SpoolNotifier {
    fn is_device(&self) -> bool {
        ensure_dir(&self.dir).is_ok()
    }

    fn permission(&self) -> Result<Permission> {
        Ok(if self.enabled {
            Permission::Granted
        } else {
            Permission::Denied
        })
    }

    // The configuration switch is the user's standing answer.
    fn request_permission(&self) -> Result<Permission> {
        self.permission()
    }

    fn schedule(&self, request: &ReminderRequest) -> Result<ReminderHandle> {
        if !self.enabled {
            return Err(MindDumpError::PermissionDenied);
        }

        let mut reminders = match self.load() {
            Ok(reminders) => reminders,
            Err(MindDumpError::Serialization(e)) => {
                log::warn!("reminder spool is unreadable, starting a new one: {}", e);
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let handle = ReminderHandle(format!("rem-{}", Uuid::new_v4()));
        reminders.push(ScheduledReminder {
            handle: handle.clone(),
            title: request.title.clone(),
            body: request.body.clone(),
            at: request.at,
        });
        self.save(&reminders)?;
        Ok(handle)
    }
}
