//! Handlers behind the user actions. Each takes the state it touches as
//! explicit parameters; a missing selection is always a quiet no-op.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info};

use crate::components::PendingTask;
use crate::todo::{
    parse_due_at, trigger_reminder_for, CuePlayer, Task, TaskError, TaskId, TaskStore,
    DUE_AT_FORMAT,
};

pub fn add_task(store: &mut TaskStore, pending: &PendingTask) -> Result<Task, TaskError> {
    let due_at = parse_due_at(&pending.due_at_text()).inspect_err(|err| {
        info!(input = %pending.due_at_text(), error = %err, "task rejected");
    })?;
    Ok(store.add(pending.description.clone(), due_at))
}

pub fn remove_task(store: &mut TaskStore, selected: Option<TaskId>) -> bool {
    match selected {
        Some(id) => store.remove(id),
        None => false,
    }
}

pub fn complete_task(store: &mut TaskStore, selected: Option<TaskId>) -> bool {
    match selected {
        Some(id) => store.complete(id),
        None => false,
    }
}

/// Plays the cue now and returns the time the reminder was "set" for.
pub fn set_reminder(
    store: &TaskStore,
    selected: Option<TaskId>,
    cue: &mut impl CuePlayer,
) -> Option<NaiveDateTime> {
    let task = store.get(selected?)?;
    Some(trigger_reminder_for(task, cue))
}

pub fn confirm_date(pending: &mut PendingTask, date: NaiveDate) {
    debug!(%date, "date selected");
    pending.set_date(date);
}

pub fn reminder_label(reminder_at: Option<NaiveDateTime>) -> String {
    match reminder_at {
        Some(at) => format!("Reminder set for {}", at.format(DUE_AT_FORMAT)),
        None => "No reminder".to_string(),
    }
}
