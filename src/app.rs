use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use ratatui::widgets::TableState;
use tracing::info;

use crate::actions;
use crate::components::{DatePickerState, Notice, PendingTask};
use crate::config::Config;
use crate::sound::{AudioOutput, SoundCue};
use crate::todo::{TaskId, TaskStore};

const CLOCK_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Editing,
    DatePicker,
}

pub struct App {
    pub running: bool,
    pub input_mode: InputMode,
    pub store: TaskStore,
    pub pending: PendingTask,
    pub table_state: TableState,
    pub picker: DatePickerState,
    pub reminder_at: Option<NaiveDateTime>,
    pub notice: Option<Notice>,
    pub show_help: bool,
    pub clock: String,
    pub today: NaiveDate,
    /// Mode to go back to when the date picker closes.
    picker_return: InputMode,
    cue: SoundCue,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let audio = AudioOutput::init();
        let has_player = audio.has_player();
        let cue = SoundCue::new(audio, &config.sound);
        info!(asset = ?cue.asset(), has_player, "sound cue configured");
        Self::with_cue(cue, Local::now())
    }

    pub fn with_cue(cue: SoundCue, now: DateTime<Local>) -> Self {
        let today = now.date_naive();
        Self {
            running: true,
            input_mode: InputMode::Normal,
            store: TaskStore::new(),
            pending: PendingTask::new(now.naive_local()),
            table_state: TableState::default(),
            picker: DatePickerState::new(today),
            reminder_at: None,
            notice: None,
            show_help: false,
            clock: now.format(CLOCK_FORMAT).to_string(),
            today,
            picker_return: InputMode::Normal,
            cue,
        }
    }

    /// Once-per-second refresh of the clock label.
    pub fn on_tick(&mut self, now: DateTime<Local>) {
        self.clock = now.format(CLOCK_FORMAT).to_string();
        self.today = now.date_naive();
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn selected_id(&self) -> Option<TaskId> {
        let index = self.table_state.selected()?;
        self.store.list_all().get(index).map(|t| t.id)
    }

    pub fn select_next(&mut self) {
        let len = self.store.len();
        if len == 0 {
            return;
        }
        let next = match self.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.table_state.select(Some(next));
    }

    pub fn select_prev(&mut self) {
        if self.store.is_empty() {
            return;
        }
        let prev = match self.table_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.table_state.select(Some(prev));
    }

    pub fn start_editing(&mut self) {
        self.input_mode = InputMode::Editing;
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn add_task(&mut self) {
        match actions::add_task(&mut self.store, &self.pending) {
            Ok(_) => {
                self.pending.description.clear();
                self.table_state.select(Some(self.store.len() - 1));
                self.input_mode = InputMode::Normal;
            }
            Err(err) => self.notice = Some(Notice::error(err.to_string())),
        }
    }

    pub fn remove_selected(&mut self) {
        let id = self.selected_id();
        if actions::remove_task(&mut self.store, id) {
            let len = self.store.len();
            let selected = self
                .table_state
                .selected()
                .map(|i| i.min(len.saturating_sub(1)));
            self.table_state.select(if len == 0 { None } else { selected });
        }
    }

    pub fn complete_selected(&mut self) {
        let id = self.selected_id();
        actions::complete_task(&mut self.store, id);
    }

    pub fn set_reminder(&mut self) {
        if let Some(at) = actions::set_reminder(&self.store, self.selected_id(), &mut self.cue) {
            self.reminder_at = Some(at);
        }
    }

    pub fn reminder_label(&self) -> String {
        actions::reminder_label(self.reminder_at)
    }

    pub fn open_date_picker(&mut self) {
        let start = self.pending.parsed_date().unwrap_or(self.today);
        self.picker = DatePickerState::new(start);
        if self.input_mode != InputMode::DatePicker {
            self.picker_return = self.input_mode;
        }
        self.input_mode = InputMode::DatePicker;
    }

    pub fn confirm_date(&mut self) {
        actions::confirm_date(&mut self.pending, self.picker.cursor);
        self.input_mode = self.picker_return;
    }

    pub fn cancel_date_picker(&mut self) {
        self.input_mode = self.picker_return;
    }

    pub fn dismiss_notice(&mut self) {
        if let Some(notice) = self.notice.take() {
            info!(message = %notice.message, "notice dismissed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SoundConfig;
    use chrono::TimeZone;

    fn app() -> App {
        let cue = SoundCue::new(
            AudioOutput::disabled(),
            &SoundConfig {
                enabled: true,
                path: Some(std::env::temp_dir().join("todo-tui-missing-cue.wav")),
            },
        );
        let now = Local.with_ymd_and_hms(2024, 1, 1, 8, 30, 0).unwrap();
        App::with_cue(cue, now)
    }

    fn add(app: &mut App, description: &str, time: &str) {
        app.pending.description = description.to_string();
        app.pending.date = "2024-01-01".to_string();
        app.pending.time = time.to_string();
        app.add_task();
    }

    #[test]
    fn starts_with_current_date_time_and_no_reminder() {
        let app = app();
        assert_eq!(app.pending.date, "2024-01-01");
        assert_eq!(app.pending.time, "08:30:00");
        assert_eq!(app.clock, "08:30:00");
        assert_eq!(app.reminder_label(), "No reminder");
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn add_selects_new_row_and_clears_description() {
        let mut app = app();
        app.start_editing();
        add(&mut app, "Buy milk", "10:00:00");
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.selected_id(), Some(1));
        assert_eq!(app.pending.description, "");
        assert_eq!(app.pending.time, "10:00:00");
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn invalid_date_raises_notice_without_mutation() {
        let mut app = app();
        app.start_editing();
        add(&mut app, "Buy milk", "10:00");
        assert!(app.store.is_empty());
        assert_eq!(
            app.notice,
            Some(Notice::error("Invalid date format. Use YYYY-MM-DD HH:MM:SS"))
        );
        assert_eq!(app.input_mode, InputMode::Editing);
        app.dismiss_notice();
        assert!(app.notice.is_none());
    }

    #[test]
    fn actions_without_selection_do_nothing() {
        let mut app = app();
        add(&mut app, "Buy milk", "10:00:00");
        app.table_state.select(None);
        app.complete_selected();
        app.remove_selected();
        app.set_reminder();
        assert_eq!(app.store.len(), 1);
        assert!(!app.store.list_all()[0].is_complete());
        assert_eq!(app.reminder_label(), "No reminder");
    }

    #[test]
    fn reminder_label_updates_even_without_sound() {
        let mut app = app();
        add(&mut app, "Buy milk", "10:00:00");
        app.set_reminder();
        assert_eq!(app.reminder_label(), "Reminder set for 2024-01-01 09:45:00");
    }

    #[test]
    fn remove_keeps_selection_in_range() {
        let mut app = app();
        add(&mut app, "a", "10:00:00");
        add(&mut app, "b", "11:00:00");
        assert_eq!(app.selected_id(), Some(2));
        app.remove_selected();
        assert_eq!(app.selected_id(), Some(1));
        app.remove_selected();
        assert_eq!(app.selected_id(), None);
        assert!(app.store.is_empty());
    }

    #[test]
    fn selection_moves_within_bounds() {
        let mut app = app();
        app.select_next();
        assert_eq!(app.table_state.selected(), None);
        add(&mut app, "a", "10:00:00");
        add(&mut app, "b", "11:00:00");
        app.select_prev();
        app.select_prev();
        assert_eq!(app.selected_id(), Some(1));
        app.select_next();
        app.select_next();
        assert_eq!(app.selected_id(), Some(2));
    }

    #[test]
    fn date_picker_round_trip_returns_to_editing() {
        let mut app = app();
        app.start_editing();
        app.open_date_picker();
        assert_eq!(app.input_mode, InputMode::DatePicker);
        assert_eq!(app.picker.cursor, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        app.picker.next_month();
        app.confirm_date();
        assert_eq!(app.pending.date, "2024-02-01");
        assert_eq!(app.input_mode, InputMode::Editing);
    }

    #[test]
    fn cancelled_picker_leaves_date_alone() {
        let mut app = app();
        app.open_date_picker();
        app.picker.next_day();
        app.cancel_date_picker();
        assert_eq!(app.pending.date, "2024-01-01");
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn tick_refreshes_clock() {
        let mut app = app();
        app.on_tick(Local.with_ymd_and_hms(2024, 1, 2, 0, 0, 1).unwrap());
        assert_eq!(app.clock, "00:00:01");
        assert_eq!(app.today, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }
}
