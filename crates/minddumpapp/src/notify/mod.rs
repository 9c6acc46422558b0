//! # Notification Layer
//!
//! Task entries ask the host to fire a one-shot local notification at the
//! reminder instant. [`Notifier`] is the seam to the host's notification
//! subsystem:
//!
//! - [`spool::SpoolNotifier`]: terminal host. Scheduled reminders are kept in
//!   a spool file and delivered by the shell (`minddump due`).
//! - [`mem::MemNotifier`]: records every request for tests, with switches for
//!   permission answers, device availability and failures.
//!
//! Everything here is best-effort. Callers log failures and move on; a task
//! entry never depends on its reminder having been accepted.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod mem;
pub mod spool;

/// Title of every task reminder.
pub const REMINDER_TITLE: &str = "⏰ Task Reminder";

/// Shown once per session when the user has not granted permission.
pub const PERMISSION_ADVISORY: &str = "Enable notifications to receive task alerts.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Granted,
    Denied,
    /// The user has not been asked yet.
    Undetermined,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderRequest {
    pub title: String,
    pub body: String,
    #[serde(with = "crate::model::rfc3339")]
    pub at: DateTime<Utc>,
}

impl ReminderRequest {
    /// A task reminder for `body` at `at`.
    pub fn task(body: &str, at: DateTime<Utc>) -> Self {
        Self {
            title: REMINDER_TITLE.to_string(),
            body: body.to_string(),
            at,
        }
    }
}

/// Opaque identifier the host hands back for a scheduled notification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReminderHandle(pub String);

impl fmt::Display for ReminderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Abstract interface to the host notification subsystem.
pub trait Notifier {
    /// Whether the host can deliver notifications at all
    /// (simulators, headless sessions and the like cannot).
    fn is_device(&self) -> bool;

    /// Current permission status, without prompting.
    fn permission(&self) -> Result<Permission>;

    /// Asks the user for permission and returns their answer.
    fn request_permission(&self) -> Result<Permission>;

    /// Requests a one-shot notification at `request.at`.
    fn schedule(&self, request: &ReminderRequest) -> Result<ReminderHandle>;
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn is_device(&self) -> bool {
        (**self).is_device()
    }

    fn permission(&self) -> Result<Permission> {
        (**self).permission()
    }

    fn request_permission(&self) -> Result<Permission> {
        (**self).request_permission()
    }

    fn schedule(&self, request: &ReminderRequest) -> Result<ReminderHandle> {
        (**self).schedule(request)
    }
}

/// Outcome of the startup permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionCheck {
    /// Always `Granted` or `Denied`.
    pub status: Permission,
    /// The user was prompted during this check.
    pub prompted: bool,
    /// The user should be told notifications are off.
    pub show_advisory: bool,
}

/// Resolves notification permission, prompting if it was not granted yet.
///
/// Never fails: host errors count as `Denied`. Hosts that are not a real
/// device are denied silently.
pub fn ensure_permission<N: Notifier + ?Sized>(notifier: &N) -> PermissionCheck {
    if !notifier.is_device() {
        log::debug!("notifications unavailable: not a device");
        return PermissionCheck {
            status: Permission::Denied,
            prompted: false,
            show_advisory: false,
        };
    }

    let existing = notifier.permission().unwrap_or_else(|e| {
        log::warn!("reading notification permission failed: {}", e);
        Permission::Undetermined
    });
    if existing == Permission::Granted {
        return PermissionCheck {
            status: Permission::Granted,
            prompted: false,
            show_advisory: false,
        };
    }

    let answer = notifier.request_permission().unwrap_or_else(|e| {
        log::warn!("requesting notification permission failed: {}", e);
        Permission::Denied
    });
    let granted = answer == Permission::Granted;
    PermissionCheck {
        status: if granted {
            Permission::Granted
        } else {
            Permission::Denied
        },
        prompted: true,
        show_advisory: !granted,
    }
}
