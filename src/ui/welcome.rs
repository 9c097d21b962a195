use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(11),
        Constraint::Fill(1),
    ])
    .horizontal_margin(4)
    .split(area);

    let accent = app.accent();
    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            app.name().to_uppercase(),
            Style::default().fg(accent).bold(),
        )),
        Line::from(""),
        Line::from(
            format!("{} Questions · Multiple Choice", app.question_count()).fg(Color::DarkGray),
        ),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("to start  ·  q to quit".fg(Color::DarkGray)),
    ];

    if let Some(status) = app.status() {
        content.push(Line::from(""));
        content.push(Line::from(status.fg(Color::Red)));
    }

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray),
        );

    frame.render_widget(widget, chunks[1]);
}
