use super::*;
use ticker::Timer;
use time::OffsetDateTime;

pub fn render_timer_list(frame: &mut Frame, area: Rect, app: &App) {
    let now = app.now();
    let items: Vec<ListItem> = app
        .snapshot
        .iter()
        .map(|timer| ListItem::new(timer_line(timer, now)))
        .collect();

    let running = app.snapshot.running().count();
    let title = format!(" Timers ({}, {} running) ", app.snapshot.len(), running);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(Span::styled(title, Style::default().fg(Color::Magenta)))
        .padding(Padding::horizontal(1));

    if items.is_empty() {
        let empty = Paragraph::new(Line::from(vec![
            Span::styled("No timers yet. Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("n", Style::default().fg(Color::Yellow)),
            Span::styled(" to create one.", Style::default().fg(Color::DarkGray)),
        ]))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn timer_line(timer: &Timer, now: OffsetDateTime) -> Line<'static> {
    let (marker, clock_style) = if timer.is_running() {
        ("▶ ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        ("  ", Style::default().fg(Color::White))
    };

    Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Green)),
        Span::styled(timer.display_at(now), clock_style),
        Span::raw("  "),
        Span::styled(timer.title.clone(), Style::default().fg(Color::White)),
        Span::styled(
            format!("  {}", timer.project),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use time::Duration;
    use ticker::TimerId;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn running_timer_shows_time_up_to_now() {
        let start = datetime!(2024-03-01 09:00 UTC);
        let timer = Timer::new(TimerId::from("t"), "Read", "Books")
            .with_elapsed(Duration::seconds(30))
            .with_running_since(start);

        let line = timer_line(&timer, start + Duration::seconds(95));

        assert_eq!(text(&line), "▶ 00:02:05  Read  Books");
    }

    #[test]
    fn stopped_timer_shows_accumulated_time() {
        let timer = Timer::new(TimerId::from("t"), "Cook", "Kitchen")
            .with_elapsed(Duration::milliseconds(127_998));

        let line = timer_line(&timer, datetime!(2030-01-01 00:00 UTC));

        assert_eq!(text(&line), "  00:02:07  Cook  Kitchen");
    }
}
