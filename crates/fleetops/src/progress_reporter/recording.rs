use std::{fmt::Display, sync::Mutex};

use super::port::{MessageType, ProgressReporter};

/// Reporter that keeps every line in memory, for assertions
#[derive(Debug, Default)]
pub(crate) struct RecordingReporter {
    lines: Mutex<Vec<(Option<MessageType>, String)>>,
}

impl RecordingReporter {
    pub(crate) fn lines(&self) -> Vec<(Option<MessageType>, String)> {
        self.lines.lock().unwrap().clone()
    }

    pub(crate) fn of_type(&self, message_type: MessageType) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(t, _)| *t == Some(message_type))
            .map(|(_, line)| line)
            .collect()
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
