use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme;

/// A blocking message box; keys are swallowed until it is dismissed.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            message: message.into(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let theme = theme::current();
        let popup_w = area.width.min(50).max(24);
        let popup_h = area.height.min(7).max(5);
        let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
        let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
        let popup_area = Rect::new(x, y, popup_w, popup_h).intersection(area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(theme.error)
            .title_bottom(Line::from(Span::styled(" Enter:OK ", theme.dim)))
            .borders(Borders::ALL)
            .border_style(theme.error);

        let para = Paragraph::new(self.message.as_str())
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(para, popup_area);
    }
}
