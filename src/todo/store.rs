use chrono::NaiveDateTime;
use tracing::debug;

use super::task::{Task, TaskId, TaskStatus};

/// In-memory, insertion-ordered task list.
///
/// Identifiers come from a counter that only moves forward, so an id is
/// never handed out twice within a run even after removals.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: TaskId,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    pub fn add(&mut self, description: impl Into<String>, due_at: NaiveDateTime) -> Task {
        let task = Task {
            id: self.next_id,
            description: description.into(),
            due_at,
            status: TaskStatus::Incomplete,
        };
        self.next_id += 1;
        debug!(id = task.id, due_at = %task.due_display(), "task added");
        self.tasks.push(task.clone());
        task
    }

    /// Returns whether anything was removed. A missing id is not an error.
    pub fn remove(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let removed = self.tasks.len() != before;
        if removed {
            debug!(id, "task removed");
        }
        removed
    }

    pub fn complete(&mut self, id: TaskId) -> bool {
        let mut found = false;
        for task in self.tasks.iter_mut().filter(|t| t.id == id) {
            task.status = TaskStatus::Complete;
            found = true;
        }
        if found {
            debug!(id, "task completed");
        }
        found
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn list_all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
