use super::{Notifier, Permission, ReminderHandle, ReminderRequest};
use crate::error::{MindDumpError, Result};
use std::cell::{Cell, RefCell};

/// In-memory notifier for testing. Records every `schedule` call, including
/// the ones it refuses.
pub struct MemNotifier {
    is_device: Cell<bool>,
    permission: Cell<Permission>,
    prompt_answer: Cell<Permission>,
    prompts: Cell<usize>,
    simulate_schedule_error: Cell<bool>,
    requests: RefCell<Vec<ReminderRequest>>,
}

impl Default for MemNotifier {
    fn default() -> Self {
        Self {
            is_device: Cell::new(true),
            permission: Cell::new(Permission::Undetermined),
            prompt_answer: Cell::new(Permission::Denied),
            prompts: Cell::new(0),
            simulate_schedule_error: Cell::new(false),
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl MemNotifier {
    /// A device where the user has not been asked yet and will refuse.
    pub fn new() -> Self {
        Self::default()
    }

    /// Permission already granted.
    pub fn granted() -> Self {
        let notifier = Self::default();
        notifier.permission.set(Permission::Granted);
        notifier
    }

    /// Permission already refused, and refused again when prompted.
    pub fn denied() -> Self {
        let notifier = Self::default();
        notifier.permission.set(Permission::Denied);
        notifier
    }

    pub fn set_is_device(&self, is_device: bool) {
        self.is_device.set(is_device);
    }

    pub fn set_prompt_answer(&self, answer: Permission) {
        self.prompt_answer.set(answer);
    }

    pub fn set_simulate_schedule_error(&self, simulate: bool) {
        self.simulate_schedule_error.set(simulate);
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.get()
    }

    /// Every request passed to `schedule`, in call order.
    pub fn requests(&self) -> Vec<ReminderRequest> {
        self.requests.borrow().clone()
    }
}

impl Notifier for MemNotifier {
    fn is_device(&self) -> bool {
        self.is_device.get()
    }

    fn permission(&self) -> Result<Permission> {
        Ok(self.permission.get())
    }

    fn request_permission(&self) -> Result<Permission> {
        self.prompts.set(self.prompts.get() + 1);
        self.permission.set(self.prompt_answer.get());
        Ok(self.permission.get())
    }

    fn schedule(&self, request: &ReminderRequest) -> Result<ReminderHandle> {
        let position = {
            let mut requests = self.requests.borrow_mut();
            requests.push(request.clone());
            requests.len()
        };
        if self.simulate_schedule_error.get() {
            return Err(MindDumpError::Notification(
                "Simulated schedule error".to_string(),
            ));
        }
        if self.permission.get() != Permission::Granted {
            return Err(MindDumpError::PermissionDenied);
        }
        Ok(ReminderHandle(format!("mem-{}", position)))
    }
}
