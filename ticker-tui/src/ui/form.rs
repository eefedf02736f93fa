use super::*;
use crate::app::{FormField, TextInput, TimerForm};

pub fn render_timer_form(frame: &mut Frame, app: &App) {
    let Some(form) = &app.form else {
        return;
    };

    let area = utils::centered_rect(60, 11, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        field_line("Title:   ", &form.title, form.focused == FormField::Title),
        field_line("Project: ", &form.project, form.focused == FormField::Project),
        Line::from(""),
        Line::from(Span::styled(
            format!("[ {} ]", form.submit_label()),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        utils::key_hints(&[("Tab", "Switch field"), ("Enter", "Submit"), ("Esc", "Cancel")]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(Span::styled(
                    form_title(form),
                    Style::default().fg(Color::Yellow),
                ))
                .padding(Padding::horizontal(2)),
        )
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, area);
}

fn form_title(form: &TimerForm) -> &'static str {
    if form.editing.is_some() {
        " Edit Timer "
    } else {
        " New Timer "
    }
}

fn field_line(label: &'static str, input: &TextInput, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    if !focused {
        return Line::from(vec![
            Span::styled(label, label_style),
            Span::styled(input.value.clone(), Style::default().fg(Color::White)),
        ]);
    }

    let (before, after) = input.split_at_cursor();
    let value_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    Line::from(vec![
        Span::styled(label, label_style),
        Span::styled(before.to_string(), value_style),
        Span::styled("█", Style::default().fg(Color::Yellow)),
        Span::styled(after.to_string(), value_style),
    ])
}
