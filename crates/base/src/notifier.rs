use anyhow::Result;
use std::fmt::{Display, Formatter};

/// Severity of a message shown to the customer, e.g. as a toast.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl Display for NotificationLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            NotificationLevel::Success => write!(f, "success"),
            NotificationLevel::Info => write!(f, "info"),
            NotificationLevel::Warning => write!(f, "warning"),
            NotificationLevel::Error => write!(f, "error"),
        }
    }
}

pub trait Notifier {
    fn send_message(&self, level: NotificationLevel, message: &str) -> Result<()>;
}

/// Surfaces notifications through the configured logger.
pub struct LogNotifier {
    target_logger: String,
}

impl LogNotifier {
    pub fn new(target_logger: &str) -> Self {
        Self {
            target_logger: target_logger.to_string(),
        }
    }
}

impl Notifier for LogNotifier {
    fn send_message(&self, level: NotificationLevel, message: &str) -> Result<()> {
        let log_level = match level {
            NotificationLevel::Success | NotificationLevel::Info => log::Level::Info,
            NotificationLevel::Warning => log::Level::Warn,
            NotificationLevel::Error => log::Level::Error,
        };

        log::log!(target: &self.target_logger, log_level, "[{}] {}", level, message);
        Ok(())
    }
}
