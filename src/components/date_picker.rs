use chrono::{Datelike, Duration, NaiveDate};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme;

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Cursor of the date-picking overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatePickerState {
    pub cursor: NaiveDate,
}

impl DatePickerState {
    pub fn new(cursor: NaiveDate) -> Self {
        Self { cursor }
    }

    pub fn next_day(&mut self) {
        self.cursor = self.cursor.succ_opt().unwrap_or(self.cursor);
    }

    pub fn prev_day(&mut self) {
        self.cursor = self.cursor.pred_opt().unwrap_or(self.cursor);
    }

    pub fn next_week(&mut self) {
        self.cursor = self
            .cursor
            .checked_add_signed(Duration::weeks(1))
            .unwrap_or(self.cursor);
    }

    pub fn prev_week(&mut self) {
        self.cursor = self
            .cursor
            .checked_sub_signed(Duration::weeks(1))
            .unwrap_or(self.cursor);
    }

    pub fn next_month(&mut self) {
        let (year, month) = match self.cursor.month() {
            12 => (self.cursor.year() + 1, 1),
            m => (self.cursor.year(), m + 1),
        };
        self.jump_to_month(year, month);
    }

    pub fn prev_month(&mut self) {
        let (year, month) = match self.cursor.month() {
            1 => (self.cursor.year() - 1, 12),
            m => (self.cursor.year(), m - 1),
        };
        self.jump_to_month(year, month);
    }

    /// Same day of month, clamped to the target month's length.
    fn jump_to_month(&mut self, year: i32, month: u32) {
        let Some(len) = days_in_month(year, month) else {
            return;
        };
        let day = self.cursor.day().min(len);
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            self.cursor = date;
        }
    }
}

pub struct DatePicker;

impl DatePicker {
    pub fn render(frame: &mut Frame, area: Rect, state: &DatePickerState, today: NaiveDate) {
        let theme = theme::current();
        let cursor = state.cursor;
        let (year, month) = (cursor.year(), cursor.month());

        let popup_w = area.width.min(39);
        let popup_h = area.height.min(12);
        let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
        let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
        let popup_area = Rect::new(x, y, popup_w, popup_h);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(format!(" {} {} ", month_name(month), year))
            .title_style(theme.header)
            .title_bottom(Line::from(Span::styled(" Enter:OK Esc:Cancel ", theme.dim)))
            .borders(Borders::ALL)
            .border_style(theme.accent);

        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let header: Vec<Span> = DAY_NAMES
            .iter()
            .map(|d| Span::styled(format!("{:^5}", d), theme.header))
            .collect();

        let Some(len) = days_in_month(year, month) else {
            return;
        };
        let first_weekday = cursor
            .with_day(1)
            .map(|d| d.weekday().num_days_from_sunday() as i32)
            .unwrap_or(0);

        let mut weeks: Vec<Line> = Vec::new();
        let mut day: i32 = 1 - first_weekday;
        while day <= len as i32 {
            let mut cells: Vec<Span> = Vec::with_capacity(7);
            for _ in 0..7 {
                if day < 1 || day > len as i32 {
                    cells.push(Span::raw("     "));
                } else {
                    let date = NaiveDate::from_ymd_opt(year, month, day as u32);
                    let style = if date == Some(cursor) && date == Some(today) {
                        theme.today.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                    } else if date == Some(cursor) {
                        theme.selected
                    } else if date == Some(today) {
                        theme.today
                    } else {
                        Style::default()
                    };
                    cells.push(Span::styled(format!(" {:>2}  ", day), style));
                }
                day += 1;
            }
            weeks.push(Line::from(cells));
        }

        let mut constraints = vec![Constraint::Length(1)];
        constraints.extend(weeks.iter().map(|_| Constraint::Length(1)));
        constraints.push(Constraint::Min(0));
        let rows = Layout::vertical(constraints).split(inner);

        frame.render_widget(Paragraph::new(Line::from(header)), rows[0]);
        for (i, week) in weeks.into_iter().enumerate() {
            frame.render_widget(Paragraph::new(week), rows[i + 1]);
        }
    }
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(next.signed_duration_since(first).num_days() as u32)
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_steps_clamp_day() {
        let mut state = DatePickerState::new(date(2024, 1, 31));
        state.next_month();
        assert_eq!(state.cursor, date(2024, 2, 29));
        state.prev_month();
        assert_eq!(state.cursor, date(2024, 1, 29));
    }

    #[test]
    fn month_steps_cross_years() {
        let mut state = DatePickerState::new(date(2024, 12, 15));
        state.next_month();
        assert_eq!(state.cursor, date(2025, 1, 15));
        state.prev_month();
        state.prev_month();
        assert_eq!(state.cursor, date(2024, 11, 15));
    }

    #[test]
    fn day_and_week_steps() {
        let mut state = DatePickerState::new(date(2024, 2, 28));
        state.next_day();
        assert_eq!(state.cursor, date(2024, 2, 29));
        state.next_week();
        assert_eq!(state.cursor, date(2024, 3, 7));
        state.prev_week();
        state.prev_day();
        assert_eq!(state.cursor, date(2024, 2, 28));
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(2024, 12), Some(31));
        assert_eq!(days_in_month(2024, 13), None);
    }

    #[test]
    fn renders_month_grid() {
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        let state = DatePickerState::new(date(2024, 1, 10));
        terminal
            .draw(|frame| {
                let area = frame.area();
                DatePicker::render(frame, area, &state, date(2024, 1, 1));
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("January 2024"));
        assert!(text.contains("Sun"));
        assert!(text.contains("31"));
        assert!(!text.contains(" 32 "));
    }
}
