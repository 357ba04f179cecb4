//! Transient user notifications ("toasts").
//!
//! Controllers push notices as a side effect of every operation; the
//! front-end drains and displays them.

use serde::Serialize;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A single user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Queue of pending notices.
#[derive(Debug, Default)]
pub struct Notices {
    queue: Vec<Notice>,
}

impl Notices {
    /// Create an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self { queue: Vec::new() }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message.into());
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message.into());
    }

    fn push(&mut self, level: NoticeLevel, message: String) {
        tracing::debug!(?level, %message, "notice");
        self.queue.push(Notice { level, message });
    }

    /// Take every pending notice, oldest first.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.queue)
    }

    /// Pending notices, oldest first.
    #[must_use]
    pub fn pending(&self) -> &[Notice] {
        &self.queue
    }

    /// Most recent notice.
    #[must_use]
    pub fn last(&self) -> Option<&Notice> {
        self.queue.last()
    }

    /// Number of pending notices at `level`.
    #[must_use]
    pub fn count(&self, level: NoticeLevel) -> usize {
        self.queue.iter().filter(|n| n.level == level).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
