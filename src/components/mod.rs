pub mod date_picker;
pub mod notice;
pub mod status_bar;
pub mod task_form;
pub mod task_table;

pub use date_picker::{DatePicker, DatePickerState};
pub use notice::Notice;
pub use status_bar::StatusBar;
pub use task_form::{FormField, PendingTask, TaskForm};
pub use task_table::TaskTable;
