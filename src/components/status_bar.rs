use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::InputMode;
use crate::theme;

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, mode: InputMode, clock: &str) {
        let theme = theme::current();
        let w = area.width as usize;

        let mode_str = match mode {
            InputMode::Normal => "TASKS",
            InputMode::Editing => "EDIT",
            InputMode::DatePicker => "DATE",
        };

        let hints = match mode {
            InputMode::Normal if w >= 80 => {
                " a:Add d:Remove c:Complete r:Remind s:Date ?:Help q:Quit"
            }
            InputMode::Normal if w >= 45 => " a:Add d:Del c:Done r:Remind q:Quit",
            InputMode::Editing if w >= 50 => " Enter:Add Tab:Field Esc:Done",
            InputMode::DatePicker if w >= 50 => " hjkl:Move [/]:Month Enter:OK",
            _ => "",
        };

        let left = format!(" {} ", mode_str);
        let right = format!(" {} ", clock);
        let padding = " ".repeat(w.saturating_sub(left.len() + hints.len() + right.len()));

        let line = Line::from(vec![
            Span::styled(left, theme.header),
            Span::styled(hints, theme.status),
            Span::styled(padding, theme.status),
            Span::styled(right, theme.header),
        ]);

        frame.render_widget(Paragraph::new(line).style(theme.status), area);
    }
}
