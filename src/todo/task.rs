use std::fmt;

use chrono::{NaiveDateTime, Timelike};
use thiserror::Error;

/// Accepted (and displayed) format for a task's due date-time.
pub const DUE_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub type TaskId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Incomplete,
    Complete,
}

impl TaskStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Incomplete => "Incomplete",
            TaskStatus::Complete => "Complete",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub description: String,
    pub due_at: NaiveDateTime,
    pub status: TaskStatus,
}

impl Task {
    pub fn due_display(&self) -> String {
        self.due_at.format(DUE_AT_FORMAT).to_string()
    }

    pub fn is_complete(&self) -> bool {
        self.status == TaskStatus::Complete
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TaskError {
    #[error("Invalid date format. Use YYYY-MM-DD HH:MM:SS")]
    InvalidDueDate { input: String },
}

/// Parse the combined `"<date> <time>"` text entered for a new task.
///
/// Surrounding whitespace and leap seconds (`:60`) are rejected.
pub fn parse_due_at(text: &str) -> Result<NaiveDateTime, TaskError> {
    let invalid = || TaskError::InvalidDueDate {
        input: text.to_string(),
    };
    if text.trim() != text {
        return Err(invalid());
    }
    let due = NaiveDateTime::parse_from_str(text, DUE_AT_FORMAT).map_err(|_| invalid())?;
    // chrono encodes a leap second as nanoseconds past 1e9.
    if due.nanosecond() >= 1_000_000_000 {
        return Err(invalid());
    }
    Ok(due)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parses_full_date_time() {
        let due = parse_due_at("2024-01-01 10:00:00").unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert_eq!(due, expected);
    }

    #[test]
    fn rejects_malformed_text() {
        let malformed = [
            "",
            "2024-01-01",
            "2024-13-01 10:00:00",
            "2024-01-01 10:00",
            "tomorrow 10:00:00",
            "2024-01-01 10:00:60",
            "2024-01-01 23:59:60",
            " 2024-01-01 10:00:00",
            "2024-01-01 10:00:00 ",
        ];
        for bad in malformed {
            let err = parse_due_at(bad).unwrap_err();
            assert_eq!(
                err,
                TaskError::InvalidDueDate {
                    input: bad.to_string()
                }
            );
        }
    }

    #[test]
    fn last_second_of_minute_is_accepted() {
        let due = parse_due_at("2024-01-01 10:00:59").unwrap();
        assert_eq!(due.second(), 59);
        let reminder = due - crate::todo::reminder::REMINDER_OFFSET;
        assert_eq!(reminder.format(DUE_AT_FORMAT).to_string(), "2024-01-01 09:45:59");
    }

    #[test]
    fn validation_message_names_the_format() {
        let err = parse_due_at("nope").unwrap_err();
        assert_eq!(err.to_string(), "Invalid date format. Use YYYY-MM-DD HH:MM:SS");
    }

    #[test]
    fn status_labels() {
        assert_eq!(TaskStatus::Incomplete.to_string(), "Incomplete");
        assert_eq!(TaskStatus::Complete.to_string(), "Complete");
    }
}
