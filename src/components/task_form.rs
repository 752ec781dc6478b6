use chrono::{Local, NaiveDate, NaiveDateTime};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::theme;
use crate::todo::times::{self, TIME_FORMAT};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DROPDOWN_ROWS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Description,
    Date,
    Time,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Description => FormField::Date,
            FormField::Date => FormField::Time,
            FormField::Time => FormField::Description,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormField::Description => FormField::Time,
            FormField::Date => FormField::Description,
            FormField::Time => FormField::Date,
        }
    }
}

/// The not-yet-added task: raw text of each input field.
#[derive(Debug, Clone)]
pub struct PendingTask {
    pub description: String,
    pub date: String,
    pub time: String,
    pub active_field: FormField,
}

impl PendingTask {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            description: String::new(),
            date: now.format(DATE_FORMAT).to_string(),
            time: now.format(TIME_FORMAT).to_string(),
            active_field: FormField::Description,
        }
    }

    pub fn now() -> Self {
        Self::new(Local::now().naive_local())
    }

    /// Date and time joined the way the due-date parser expects them.
    pub fn due_at_text(&self) -> String {
        format!("{} {}", self.date, self.time)
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date.format(DATE_FORMAT).to_string();
    }

    pub fn input_char(&mut self, c: char) {
        match self.active_field {
            FormField::Description => self.description.push(c),
            FormField::Date => self.date.push(c),
            FormField::Time => self.time.push(c),
        }
    }

    pub fn backspace(&mut self) {
        match self.active_field {
            FormField::Description => {
                self.description.pop();
            }
            FormField::Date => {
                self.date.pop();
            }
            FormField::Time => {
                self.time.pop();
            }
        }
    }

    /// Step the time field through the quarter-hour options. A typed value
    /// between two options moves to the neighbour in the requested direction.
    pub fn cycle_time(&mut self, delta: isize) {
        let index = times::nearest_option_index(&self.time);
        let (_, at_index) = times::option_at(index, 0);
        let offset = if at_index == self.time.trim() || delta < 0 {
            delta
        } else {
            delta - 1
        };
        self.time = times::option_at(index, offset).1;
    }
}

pub struct TaskForm;

impl TaskForm {
    pub fn render(frame: &mut Frame, area: Rect, state: &PendingTask, focused: bool) {
        let theme = theme::current();
        let border_style = if focused { theme.accent } else { theme.border };

        let block = Block::default()
            .title(" New Task ")
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([
            Constraint::Length(1), // description
            Constraint::Length(1), // date
            Constraint::Length(1), // time
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        let active = |field: FormField| focused && state.active_field == field;
        render_field(
            frame,
            rows[0],
            "Task:",
            &state.description,
            active(FormField::Description),
        );
        render_field(frame, rows[1], "Date:", &state.date, active(FormField::Date));
        render_field(frame, rows[2], "Time:", &state.time, active(FormField::Time));

        let key = Style::default().add_modifier(Modifier::BOLD);
        let help = if focused {
            Line::from(vec![
                Span::styled("Tab", key),
                Span::styled(":Next ", theme.dim),
                Span::styled("^D", key),
                Span::styled(":Pick date ", theme.dim),
                Span::styled("\u{2191}\u{2193}", key),
                Span::styled(":Time ", theme.dim),
                Span::styled("Enter", key),
                Span::styled(":Add ", theme.dim),
                Span::styled("Esc", key),
                Span::styled(":Done", theme.dim),
            ])
        } else {
            Line::from(vec![
                Span::styled("a", key),
                Span::styled(":Edit new task", theme.dim),
            ])
        };
        frame.render_widget(Paragraph::new(help), rows[3]);

        if active(FormField::Time) {
            render_time_dropdown(frame, rows[2], &state.time);
        }
    }
}

/// Nearby time options listed beside the time field.
fn render_time_dropdown(frame: &mut Frame, field: Rect, current: &str) {
    let theme = theme::current();
    let x = field.x + 18;
    if x + 12 > frame.area().right() {
        return;
    }
    let height = DROPDOWN_ROWS as u16 + 2;
    let y = field.y.saturating_sub(height / 2);
    let area = Rect::new(x, y, 12, height).intersection(frame.area());

    let center = times::nearest_option_index(current);
    let start = (center + times::OPTION_COUNT - DROPDOWN_ROWS / 2) % times::OPTION_COUNT;
    let items: Vec<ListItem> = times::time_options()
        .chain(times::time_options())
        .skip(start)
        .take(DROPDOWN_ROWS)
        .map(|option| {
            let style = if option == current.trim() {
                theme.selected
            } else {
                Style::default()
            };
            ListItem::new(Span::styled(format!(" {option} "), style))
        })
        .collect();

    frame.render_widget(Clear, area);
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.dim),
    );
    frame.render_widget(list, area);
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool) {
    let theme = theme::current();
    let cursor = if active { "_" } else { "" };
    let style = if active { theme.accent } else { Style::default() };

    let spans = vec![
        Span::styled(format!("{:<7}", label), theme.dim),
        Span::styled(format!("{}{}", value, cursor), style),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
