// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.

/// Severity level determines how a message is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Operation completed.
    #[default]
    Success,
    /// Neutral status such as the current zoom level.
    Info,
    /// A limit or boundary was hit.
    Warning,
    /// Blocking alert, requires manual dismissal.
    Error,
}

impl Severity {
    /// Returns whether messages of this severity wait for the user to dismiss them.
    #[must_use]
    pub fn requires_dismissal(self) -> bool {
        matches!(self, Severity::Error)
    }
}

/// A message to show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    severity: Severity,
    /// The i18n key for the message.
    message_key: String,
    /// Arguments for message interpolation.
    message_args: Vec<(String, String)>,
}

impl Notification {
    /// Creates a notification with the given severity and i18n key.
    pub fn new(severity: Severity, message_key: impl Into<String>) -> Self {
        Self {
            severity,
            message_key: message_key.into(),
            message_args: Vec::new(),
        }
    }

    pub fn success(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Success, message_key)
    }

    pub fn info(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Info, message_key)
    }

    pub fn warning(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message_key)
    }

    pub fn error(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Error, message_key)
    }

    /// Adds an argument for message interpolation.
    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.message_args.push((key.into(), value.to_string()));
        self
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    #[must_use]
    pub fn message_args(&self) -> &[(String, String)] {
        &self.message_args
    }

    /// Looks up one interpolation argument.
    #[must_use]
    pub fn arg(&self, key: &str) -> Option<&str> {
        self.message_args
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_builder_pattern_works() {
        let notification = Notification::info("notification-search-match")
            .with_arg("current", 2)
            .with_arg("total", 7);

        assert_eq!(notification.severity(), Severity::Info);
        assert_eq!(notification.message_key(), "notification-search-match");
        assert_eq!(notification.message_args().len(), 2);
        assert_eq!(notification.arg("total"), Some("7"));
        assert_eq!(notification.arg("missing"), None);
    }

    #[test]
    fn notification_constructors_set_correct_severity() {
        assert_eq!(Notification::success("").severity(), Severity::Success);
        assert_eq!(Notification::info("").severity(), Severity::Info);
        assert_eq!(Notification::warning("").severity(), Severity::Warning);
        assert_eq!(Notification::error("").severity(), Severity::Error);
    }

    #[test]
    fn only_errors_require_dismissal() {
        assert!(Severity::Error.requires_dismissal());
        assert!(!Severity::Warning.requires_dismissal());
        assert!(!Severity::Info.requires_dismissal());
        assert!(!Severity::Success.requires_dismissal());
    }
}
