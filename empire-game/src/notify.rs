//! Transient user-facing notifications.
use smallvec::SmallVec;

/// Severity of a notification, mapped to toast styling by the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A transient message for the UI toast layer. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

/// Pending notifications between two UI refreshes.
pub type NotificationQueue = SmallVec<[Notification; 4]>;

impl Notification {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Info,
        }
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_tag_the_right_severity() {
        assert_eq!(Notification::info("a").severity, Severity::Info);
        assert_eq!(Notification::success("b").severity, Severity::Success);
        assert_eq!(Notification::error("c").severity, Severity::Error);
        assert_eq!(Notification::info("hello").message, "hello");
    }
}
