//! Toast queue fed by reconciler notices.

#[cfg(test)]
#[path = "notices_test.rs"]
mod notices_test;

use authgate::{Notice, NoticeLevel};

/// How long a toast stays on screen.
pub const TOAST_TTL_MS: u32 = 4_000;
const MAX_TOASTS: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

impl Toast {
    #[must_use]
    pub fn css_class(&self) -> &'static str {
        match self.level {
            NoticeLevel::Info => "toast toast--info",
            NoticeLevel::Success => "toast toast--success",
            NoticeLevel::Error => "toast toast--error",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoticeState {
    pub toasts: Vec<Toast>,
    next_id: u64,
}

impl NoticeState {
    /// Queue a toast and return its id. The oldest toast is dropped past the cap.
    pub fn push(&mut self, notice: &Notice) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.toasts.push(Toast { id, level: notice.level, message: notice.message.clone() });
        if self.toasts.len() > MAX_TOASTS {
            self.toasts.remove(0);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }
}
