use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::view::{FeedbackView, OptionView, QuestionView};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(view) = app.question_view() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(7),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_progress(frame, chunks[0], chunks[1], view, app.accent());
    render_question_text(frame, chunks[2], &view.text);
    render_options(frame, chunks[3], &view.options, app.selected_option(), app.accent());

    if let Some(feedback) = &view.feedback {
        render_feedback(frame, chunks[4], feedback);
    } else if let Some(problem) = app.problem() {
        render_problem(frame, chunks[4], problem);
    }

    render_controls(frame, chunks[5], app);
}

fn render_progress(
    frame: &mut Frame,
    label_area: Rect,
    bar_area: Rect,
    view: &QuestionView,
    accent: Color,
) {
    let label = Paragraph::new(view.heading.as_str())
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(label, label_area);

    let bar = Gauge::default()
        .ratio(view.progress.clamp(0.0, 1.0))
        .label("")
        .gauge_style(Style::default().fg(accent).bg(Color::Black));
    frame.render_widget(bar, bar_area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    options: &[OptionView],
    selected: Option<usize>,
    accent: Color,
) {
    if options.is_empty() {
        let widget = Paragraph::new("(no options)").fg(Color::DarkGray);
        frame.render_widget(widget, area);
        return;
    }

    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);

    for (index, option) in options.iter().enumerate() {
        let is_selected = selected == Some(index);
        let style = if is_selected {
            Style::default().fg(accent).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { "(•)" } else { "( )" };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(option.label.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_feedback(frame: &mut Frame, area: Rect, feedback: &FeedbackView) {
    let color = if feedback.correct {
        Color::Green
    } else {
        Color::Red
    };

    let mut lines = vec![Line::from(Span::styled(
        feedback.title,
        Style::default().fg(color).bold(),
    ))];
    if let Some(correct_answer) = &feedback.correct_answer {
        lines.push(Line::from(correct_answer.as_str().bold()));
    }
    lines.push(Line::from(feedback.explanation.as_str()));

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(color)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_problem(frame: &mut Frame, area: Rect, problem: &str) {
    let lines = vec![
        Line::from(Span::styled(
            "No answer key",
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from(problem),
    ];

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::Yellow)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let widget = if let Some(status) = app.status() {
        Paragraph::new(status).fg(Color::Red)
    } else if app.is_checked() {
        Paragraph::new("enter next  ·  q quit").fg(Color::DarkGray)
    } else {
        Paragraph::new("j/k navigate  ·  a-d pick  ·  enter check  ·  q quit").fg(Color::DarkGray)
    };
    frame.render_widget(widget.alignment(Alignment::Center), area);
}
