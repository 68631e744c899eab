//! User confirmation and notification capability.
//!
//! Controllers never talk to the terminal directly; they ask a
//! [`UserPrompt`] to confirm destructive actions and to show the outcome.

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Informational message
    Info,
    /// An action completed
    Success,
    /// An action or fetch failed
    Error,
}

/// A message shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn new(message: impl Into<String>, level: NoticeLevel) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NoticeLevel::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NoticeLevel::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NoticeLevel::Error)
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// Blocking confirmation and notification, injected into the controllers
pub trait UserPrompt: Send + Sync {
    /// Ask a yes/no question; `true` means go ahead
    fn confirm(&self, message: &str) -> bool;

    /// Show a notice; returns once the user has been told
    fn notify(&self, notice: &Notice);
}
