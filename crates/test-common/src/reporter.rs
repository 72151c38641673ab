//! A [`ProgressReporter`] that records instead of printing.

use fleetops::progress_reporter::port::{MessageType, ProgressReporter};
use std::{fmt::Display, sync::Mutex};

/// One recorded line: its severity (`None` for untagged output) and its text
pub type RecordedLine = (Option<MessageType>, String);

#[derive(Debug, Default)]
pub struct RecordingReporter {
    lines: Mutex<Vec<RecordedLine>>,
}

impl RecordingReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every line, in the order it was reported
    pub fn lines(&self) -> Vec<RecordedLine> {
        self.lines.lock().unwrap().clone()
    }

    /// Text of every line of `message_type`, in order
    pub fn of_type(&self, message_type: MessageType) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(t, _)| *t == Some(message_type))
            .map(|(_, line)| line)
            .collect()
    }

    /// Text of every untagged line (usage text, captured backend output)
    pub fn untagged(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(t, _)| t.is_none())
            .map(|(_, line)| line)
            .collect()
    }

    pub fn last(&self) -> Option<RecordedLine> {
        self.lines.lock().unwrap().last().cloned()
    }

    fn push(&self, message_type: Option<MessageType>, message: impl Display) {
        self.lines
            .lock()
            .unwrap()
            .push((message_type, message.to_string()));
    }
}

impl ProgressReporter for RecordingReporter {
    fn status_line<T: Display>(&self, _message_type: MessageType, message: T) -> String {
        message.to_string()
    }

    fn report<T: Display>(&self, message: T) {
        self.push(None, message);
    }

    fn report_progress<T: Display>(&self, message: T) {
        self.push(Some(MessageType::Progress), message);
    }

    fn report_success<T: Display>(&self, message: T) {
        self.push(Some(MessageType::Success), message);
    }

    fn report_info<T: Display>(&self, message: T) {
        self.push(Some(MessageType::Info), message);
    }

    fn report_warning<T: Display>(&self, message: T) {
        self.push(Some(MessageType::Warning), message);
    }

    fn report_error<T: Display>(&self, message: T) {
        self.push(Some(MessageType::Error), message);
    }
}
