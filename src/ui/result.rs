use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::session::Outcome;
use crate::view::{BreakdownRow, ReportView};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(report) = app.report_view() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(8),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], report, app.accent());
    render_question_breakdown(frame, chunks[2], &report.rows, app.result_scroll());
    render_controls(frame, chunks[3]);
}

fn grade_color(grade: &str) -> Color {
    match grade.chars().next() {
        Some('A') => Color::Green,
        Some('B') => Color::Cyan,
        Some('C') | Some('D') => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, report: &ReportView, accent: Color) {
    let grade_color = grade_color(&report.grade);
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            report.headline,
            Style::default().fg(accent).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}  ({})", report.score, report.percentage),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(Span::styled(
            format!("Grade {}", report.grade),
            Style::default().fg(grade_color),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(frame: &mut Frame, area: Rect, rows: &[BreakdownRow], scroll: usize) {
    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let (symbol, color) = match row.outcome {
                Some(Outcome::Correct) => ("+", Color::Green),
                Some(Outcome::Incorrect) => ("-", Color::Red),
                Some(Outcome::NoAnswerKey) | None => ("?", Color::Yellow),
            };

            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(row.preview.as_str(), Style::default().fg(Color::Gray)),
            ])
        })
        .collect();

    let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);
    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((scroll, 0));
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r restart  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
