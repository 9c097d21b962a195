mod exam;
mod result;
mod welcome;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::models::AppState;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(app.background()), area);

    match app.state {
        AppState::Welcome => welcome::render(frame, area, app),
        AppState::Exam => exam::render(frame, area, app),
        AppState::Result => result::render(frame, area, app),
    }
}
