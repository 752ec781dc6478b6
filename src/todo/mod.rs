pub mod reminder;
pub mod store;
pub mod task;
pub mod times;

pub use reminder::{trigger_reminder_for, CuePlayer};
pub use store::TaskStore;
pub use task::{parse_due_at, Task, TaskError, TaskId, DUE_AT_FORMAT};
