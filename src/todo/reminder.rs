//! "Set reminder" computes the reminder time and plays the cue right away.
//!
//! Nothing waits for `reminder_at` to arrive: the returned time is only shown
//! to the user.

use chrono::{NaiveDateTime, TimeDelta};
use tracing::info;

use super::task::{Task, DUE_AT_FORMAT};

pub const REMINDER_OFFSET: TimeDelta = TimeDelta::minutes(15);

/// Something that can sound a notification cue. Fire-and-forget.
pub trait CuePlayer {
    fn play_cue(&mut self);
}

pub fn trigger_reminder_for(task: &Task, cue: &mut impl CuePlayer) -> NaiveDateTime {
    let reminder_at = task.due_at - REMINDER_OFFSET;
    info!(
        id = task.id,
        reminder_at = %reminder_at.format(DUE_AT_FORMAT),
        "reminder triggered"
    );
    cue.play_cue();
    reminder_at
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::task::{parse_due_at, TaskStatus};

    #[derive(Default)]
    struct CountingCue {
        plays: usize,
    }

    impl CuePlayer for CountingCue {
        fn play_cue(&mut self) {
            self.plays += 1;
        }
    }

    fn task_due(text: &str) -> Task {
        Task {
            id: 1,
            description: "Buy milk".into(),
            due_at: parse_due_at(text).unwrap(),
            status: TaskStatus::Incomplete,
        }
    }

    #[test]
    fn reminder_is_fifteen_minutes_early() {
        let mut cue = CountingCue::default();
        let at = trigger_reminder_for(&task_due("2024-01-01 10:00:00"), &mut cue);
        assert_eq!(at, parse_due_at("2024-01-01 09:45:00").unwrap());
    }

    #[test]
    fn cue_plays_immediately_once() {
        let mut cue = CountingCue::default();
        trigger_reminder_for(&task_due("2024-01-01 10:00:00"), &mut cue);
        assert_eq!(cue.plays, 1);
    }

    #[test]
    fn crosses_midnight() {
        let mut cue = CountingCue::default();
        let at = trigger_reminder_for(&task_due("2024-01-01 00:05:00"), &mut cue);
        assert_eq!(at, parse_due_at("2023-12-31 23:50:00").unwrap());
    }
}
