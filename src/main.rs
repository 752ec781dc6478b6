mod actions;
mod app;
mod components;
mod config;
mod event;
mod logging;
mod sound;
mod theme;
mod todo;
mod tui;

use std::time::{Duration, Instant};

use app::{App, InputMode};
use chrono::Local;
use color_eyre::Result;
use components::{DatePicker, DatePickerState, FormField, StatusBar, TaskForm, TaskTable};
use config::Config;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use tracing::{info, warn};

const TICK_RATE: Duration = Duration::from_secs(1);

fn main() -> Result<()> {
    color_eyre::install()?;

    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };

    match config::log_dir() {
        Some(dir) => {
            if let Err(err) = logging::init(&config.log_level, &dir) {
                eprintln!("Logging disabled: {err:#}");
            }
        }
        None => eprintln!("Logging disabled: no state or cache directory"),
    }
    if let Some(err) = config_error {
        warn!(error = %format!("{err:#}"), "ignoring config file, using defaults");
    }
    theme::init(&config.theme);

    let mut app = App::new(&config);
    info!("starting");

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    info!(tasks = app.store.len(), "exiting");
    result
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    let mut last_tick = Instant::now();
    while app.running {
        terminal.draw(|frame| render(frame, app))?;

        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
        if let Some(key) = event::next_key_press(timeout)? {
            handle_key(app, key);
        }

        if last_tick.elapsed() >= TICK_RATE {
            app.on_tick(Local::now());
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    // Notice is modal: nothing else reacts until it is dismissed.
    if app.notice.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.dismiss_notice();
        }
        return;
    }

    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            app.show_help = false;
        }
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_input(app, key.code),
        InputMode::Editing => handle_editing_input(app, key.code, key.modifiers),
        InputMode::DatePicker => handle_picker_input(app, key.code),
    }
}

fn handle_normal_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Enter => app.start_editing(),
        KeyCode::Char('d') | KeyCode::Delete => app.remove_selected(),
        KeyCode::Char('c') | KeyCode::Char(' ') => app.complete_selected(),
        KeyCode::Char('r') => app.set_reminder(),
        KeyCode::Char('s') => app.open_date_picker(),
        KeyCode::Char('?') => app.show_help = true,
        _ => {}
    }
}

fn handle_editing_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match code {
        KeyCode::Esc => app.stop_editing(),
        KeyCode::Enter => app.add_task(),
        KeyCode::Tab => app.pending.active_field = app.pending.active_field.next(),
        KeyCode::BackTab => app.pending.active_field = app.pending.active_field.prev(),
        KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => app.open_date_picker(),
        KeyCode::Up if app.pending.active_field == FormField::Time => app.pending.cycle_time(-1),
        KeyCode::Down if app.pending.active_field == FormField::Time => app.pending.cycle_time(1),
        KeyCode::Backspace => app.pending.backspace(),
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => app.pending.input_char(c),
        _ => {}
    }
}

fn handle_picker_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('h') | KeyCode::Left => app.picker.prev_day(),
        KeyCode::Char('l') | KeyCode::Right => app.picker.next_day(),
        KeyCode::Char('j') | KeyCode::Down => app.picker.next_week(),
        KeyCode::Char('k') | KeyCode::Up => app.picker.prev_week(),
        KeyCode::Char('[') => app.picker.prev_month(),
        KeyCode::Char(']') => app.picker.next_month(),
        KeyCode::Char('t') => app.picker = DatePickerState::new(app.today),
        KeyCode::Enter => app.confirm_date(),
        KeyCode::Esc => app.cancel_date_picker(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &mut App) {
    use ratatui::text::Span;
    use ratatui::widgets::Paragraph;

    let area = frame.area();
    let layout = Layout::vertical([
        Constraint::Min(3),    // task table
        Constraint::Length(6), // new task form
        Constraint::Length(1), // reminder label
        Constraint::Length(1), // status bar + clock
    ])
    .split(area);

    let theme = theme::current();
    let editing = app.input_mode == InputMode::Editing;

    TaskTable::render(
        frame,
        layout[0],
        app.store.list_all(),
        &mut app.table_state,
        app.input_mode == InputMode::Normal,
    );
    TaskForm::render(frame, layout[1], &app.pending, editing);

    let reminder = Paragraph::new(Span::styled(format!(" {}", app.reminder_label()), theme.dim));
    frame.render_widget(reminder, layout[2]);

    StatusBar::render(frame, layout[3], app.input_mode, &app.clock);

    if app.input_mode == InputMode::DatePicker {
        DatePicker::render(frame, area, &app.picker, app.today);
    }

    if app.show_help {
        render_help(frame, area);
    }

    if let Some(ref notice) = app.notice {
        notice.render(frame, area);
    }
}

fn render_help(frame: &mut ratatui::Frame, area: Rect) {
    use ratatui::style::{Modifier, Style};
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

    let theme = theme::current();
    let popup_w = area.width.min(52).max(30);
    let popup_h = area.height.min(22).max(12);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h).intersection(area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(theme.header)
        .borders(Borders::ALL)
        .border_style(theme.accent);

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = theme.accent.add_modifier(Modifier::BOLD);
    let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    let entry = |keys: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", keys), key_style),
            Span::raw(desc),
        ])
    };

    let lines = vec![
        Line::from(Span::styled("Tasks", section_style)),
        entry("j/k", "Select next/previous task"),
        entry("a", "Edit the new task"),
        entry("c", "Mark selected task complete"),
        entry("d", "Remove selected task"),
        entry("r", "Reminder for selected task"),
        entry("s", "Pick the due date"),
        Line::from(""),
        Line::from(Span::styled("New task", section_style)),
        entry("Tab", "Next field"),
        entry("\u{2191}/\u{2193}", "Step time by 15 minutes"),
        entry("Ctrl+D", "Pick the due date"),
        entry("Enter", "Add task"),
        entry("Esc", "Back to the task list"),
        Line::from(""),
        entry("q", "Quit"),
    ];

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
