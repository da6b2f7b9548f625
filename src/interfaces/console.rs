use crate::domain::ports::NotificationSink;
use std::io::{self, Write};

/// Prints notifications to stderr as `success: ...` / `error: ...` lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    fn emit(level: &str, message: &str) {
        // Notifications are best effort; a closed stderr is not an engine error.
        let _ = writeln!(io::stderr().lock(), "{level}: {message}");
    }
}

impl NotificationSink for ConsoleNotifier {
    fn notify_success(&self, message: &str) {
        Self::emit("success", message);
    }

    fn notify_error(&self, message: &str) {
        Self::emit("error", message);
    }
}
