use crate::app::{App, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph},
    Frame,
};

mod form;
mod timer_list;
pub(super) mod utils;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Timers
            Constraint::Length(3), // Status
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    timer_list::render_timer_list(frame, chunks[0], app);
    render_status(frame, chunks[1], app);
    render_controls(frame, chunks[2], app.current_view);

    if app.current_view == View::Form {
        form::render_timer_form(frame, app);
    }
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let status_text = app.status_message.as_deref().unwrap_or("All changes synced");
    let is_error = status_text.starts_with("Failed");

    let (border_style, text_color) = if is_error {
        (Style::default().fg(Color::Red), Color::Red)
    } else {
        (Style::default().fg(Color::DarkGray), Color::White)
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(text_color))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Status ")
                .border_style(border_style)
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(status, area);
}

fn render_controls(frame: &mut Frame, area: Rect, view: View) {
    let keys: &[(&str, &str)] = match view {
        View::List => &[
            ("Space", "Start/Stop"),
            ("n", "New"),
            ("e", "Edit"),
            ("d", "Delete"),
            ("j/k", "Move"),
            ("r", "Refresh"),
            ("q", "Quit"),
        ],
        View::Form => &[("Tab", "Switch field"), ("Enter", "Submit"), ("Esc", "Cancel")],
    };

    let controls = Paragraph::new(utils::key_hints(keys))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Controls ", Style::default().fg(Color::DarkGray)))
                .border_style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(controls, area);
}
