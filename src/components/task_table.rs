use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::theme;
use crate::todo::Task;

pub struct TaskTable;

impl TaskTable {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        tasks: &[Task],
        state: &mut TableState,
        focused: bool,
    ) {
        let theme = theme::current();

        let open = tasks.iter().filter(|t| !t.is_complete()).count();
        let block = Block::default()
            .title(" Tasks ")
            .title_style(theme.header)
            .title_bottom(Line::from(Span::styled(
                format!(" {} open, {} total ", open, tasks.len()),
                theme.dim,
            )))
            .borders(Borders::ALL)
            .border_style(if focused { theme.accent } else { theme.border });

        if tasks.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let msg = Paragraph::new("No tasks yet. Press 'a' to add one.").style(theme.dim);
            frame.render_widget(msg, inner);
            return;
        }

        let header = Row::new(["ID", "Task", "Due Date", "Status"])
            .style(theme.header.add_modifier(Modifier::UNDERLINED));

        let rows = tasks.iter().map(|task| {
            let status_style = if task.is_complete() {
                theme.complete
            } else {
                Style::default()
            };
            let description_style = if task.is_complete() {
                Style::default().add_modifier(Modifier::CROSSED_OUT | Modifier::DIM)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(task.id.to_string()),
                Cell::from(Span::styled(task.description.clone(), description_style)),
                Cell::from(task.due_display()),
                Cell::from(Span::styled(task.status.label(), status_style)),
            ])
        });

        let widths = [
            Constraint::Length(4),
            Constraint::Min(10),
            Constraint::Length(19),
            Constraint::Length(10),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(2)
            .row_highlight_style(theme.selected)
            .highlight_symbol("> ");

        frame.render_stateful_widget(table, area, state);
    }
}
