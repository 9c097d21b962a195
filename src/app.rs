use ratatui::style::Color;
use tracing::{error, info};

use crate::config::Theme;
use crate::document::ParsedDocument;
use crate::math::Typesetter;
use crate::models::{AppState, option_letter};
use crate::session::{ErrorKind, Session, SessionState};
use crate::view::{QuestionView, ReportView, question_view, report_view};

const FORMAT_ERROR: &str = "Failed to parse the exam file. Please check the format.";

pub struct App {
    pub state: AppState,
    name: String,
    document: ParsedDocument,
    session: Session,
    selected_option: Option<usize>,
    status: Option<String>,
    problem: Option<String>,
    result_scroll: usize,
    typesetter: Box<dyn Typesetter>,
    question_view: Option<QuestionView>,
    report_view: Option<ReportView>,
    accent: Color,
    background: Color,
}

impl App {
    pub fn new(
        name: impl Into<String>,
        document: ParsedDocument,
        typesetter: Box<dyn Typesetter>,
    ) -> Self {
        let theme = Theme::default();
        Self {
            state: AppState::Welcome,
            name: name.into(),
            document,
            session: Session::new(),
            selected_option: None,
            status: None,
            problem: None,
            result_scroll: 0,
            typesetter,
            question_view: None,
            report_view: None,
            accent: theme.accent_color(),
            background: theme.background_color(),
        }
    }

    pub fn with_theme(mut self, theme: &Theme) -> Self {
        self.accent = theme.accent_color();
        self.background = theme.background_color();
        self
    }

    pub fn accent(&self) -> Color {
        self.accent
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn question_count(&self) -> usize {
        self.document.questions.len()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn selected_option(&self) -> Option<usize> {
        self.selected_option
    }

    /// Message for the user after a rejected action.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Data problem with the current question, e.g. a missing answer key.
    pub fn problem(&self) -> Option<&str> {
        self.problem.as_deref()
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn question_view(&self) -> Option<&QuestionView> {
        self.question_view.as_ref()
    }

    pub fn report_view(&self) -> Option<&ReportView> {
        self.report_view.as_ref()
    }

    /// True once the current question has been checked and can be left.
    pub fn is_checked(&self) -> bool {
        self.session.is_checked()
    }

    pub fn start_exam(&mut self) {
        if self.document.is_empty() {
            self.status = Some(FORMAT_ERROR.to_string());
            return;
        }

        info!(exam = %self.name, "starting exam");
        self.session.start_document(self.document.clone());
        self.state = AppState::Exam;
        self.clear_question_state();
        self.refresh();
    }

    pub fn select_next_option(&mut self) {
        let count = self.option_count();
        if count == 0 || self.is_checked() {
            return;
        }
        self.selected_option = Some(match self.selected_option {
            Some(index) => (index + 1) % count,
            None => 0,
        });
        self.status = None;
    }

    pub fn select_previous_option(&mut self) {
        let count = self.option_count();
        if count == 0 || self.is_checked() {
            return;
        }
        self.selected_option = Some(match self.selected_option {
            Some(index) => (index + count - 1) % count,
            None => count - 1,
        });
        self.status = None;
    }

    /// Selects the option whose identifier is `letter`, if there is one.
    pub fn select_letter(&mut self, letter: char) {
        if self.is_checked() {
            return;
        }
        let Ok(current) = self.session.current_question() else {
            return;
        };
        if let Some(index) = current
            .question
            .options
            .iter()
            .position(|option| option_letter(option) == Some(letter))
        {
            self.selected_option = Some(index);
            self.status = None;
        }
    }

    pub fn check_answer(&mut self) {
        let selection = self.selected_letter();
        match self.session.submit(selection) {
            Ok(_) => self.status = None,
            Err(err) => match err.kind() {
                ErrorKind::Input => self.status = Some(err.to_string()),
                ErrorKind::Data => self.problem = Some(err.to_string()),
                ErrorKind::Misuse => error!(%err, "check ignored"),
            },
        }
        self.refresh();
    }

    pub fn next_question(&mut self) {
        if let Err(err) = self.session.advance() {
            error!(%err, "advance ignored");
            return;
        }

        self.clear_question_state();
        if self.session.state() == SessionState::Finished {
            self.state = AppState::Result;
        }
        self.refresh();
    }

    /// Enter either checks the answer or moves on, like the two-button flow.
    pub fn confirm(&mut self) {
        if self.is_checked() {
            self.next_question();
        } else {
            self.check_answer();
        }
    }

    pub fn restart(&mut self) {
        self.session.restart();
        self.state = AppState::Welcome;
        self.clear_question_state();
        self.result_scroll = 0;
        self.question_view = None;
        self.report_view = None;
    }

    pub fn scroll_results_down(&mut self) {
        let rows = self.report_view.as_ref().map_or(0, |view| view.rows.len());
        if self.result_scroll + 1 < rows {
            self.result_scroll += 1;
        }
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    fn selected_letter(&self) -> Option<char> {
        let index = self.selected_option?;
        let current = self.session.current_question().ok()?;
        current.question.options.get(index).and_then(|option| option_letter(option))
    }

    fn option_count(&self) -> usize {
        self.session
            .current_question()
            .map_or(0, |current| current.question.options.len())
    }

    fn clear_question_state(&mut self) {
        self.selected_option = None;
        self.status = None;
        self.problem = None;
    }

    /// Rebuilds the views for the current state, typesetting any math.
    fn refresh(&mut self) {
        let typesetter = self.typesetter.as_ref();
        self.question_view = self
            .session
            .current_question()
            .ok()
            .map(|current| question_view(&current, self.session.verdict(), typesetter));
        self.report_view = self.session.report().ok().map(|report| {
            report_view(
                &report,
                self.session.items(),
                self.session.outcomes(),
                typesetter,
            )
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{parse, title};
    use crate::math::PlainText;

    const DOC: &str = "\
# Sample
1. First?
a) x
b) y
2. Second?
a) x
b) y
---
1.  b) y || one
";

    fn app(content: &str) -> App {
        let name = title(content).unwrap_or_else(|| "sample.md".to_string());
        App::new(name, parse(content), Box::new(PlainText))
    }

    #[test]
    fn welcome_shows_title_and_count() {
        let app = app(DOC);
        assert_eq!(app.name(), "Sample");
        assert_eq!(app.question_count(), 2);
        assert_eq!(app.state, AppState::Welcome);
    }

    #[test]
    fn theme_sets_accent_and_background() {
        let theme = Theme::preset("emerald").unwrap();
        let app = app(DOC).with_theme(&theme);
        assert_eq!(app.accent(), Color::Rgb(0x10, 0xb9, 0x81));
        assert_eq!(app.background(), theme.background_color());
        assert_ne!(app.background(), Color::Reset);
    }

    #[test]
    fn unparseable_document_stays_on_welcome() {
        let mut app = app("no separator here");
        app.start_exam();
        assert_eq!(app.state, AppState::Welcome);
        assert_eq!(app.status(), Some(FORMAT_ERROR));
        assert_eq!(app.name(), "sample.md");
    }

    #[test]
    fn checking_without_selection_sets_status_only() {
        let mut app = app(DOC);
        app.start_exam();
        app.check_answer();

        assert_eq!(app.status(), Some("Please select an answer."));
        assert!(!app.is_checked());
        assert_eq!(app.session().score(), 0);
    }

    #[test]
    fn full_run_with_missing_key() {
        let mut app = app(DOC);
        app.start_exam();

        app.select_letter('b');
        app.confirm();
        assert!(app.is_checked());
        assert!(app.question_view().unwrap().feedback.as_ref().unwrap().correct);

        app.confirm();
        assert_eq!(app.selected_option(), None);
        app.select_next_option();
        assert_eq!(app.selected_option(), Some(0));
        app.confirm();
        assert!(app.problem().unwrap().contains("no answer key"));
        assert!(app.is_checked());

        app.confirm();
        assert_eq!(app.state, AppState::Result);
        let report = app.report_view().unwrap();
        assert_eq!(report.score, "1/2");
        assert!(app.question_view().is_none());
    }

    #[test]
    fn selection_wraps_around() {
        let mut app = app(DOC);
        app.start_exam();
        app.select_previous_option();
        assert_eq!(app.selected_option(), Some(1));
        app.select_next_option();
        assert_eq!(app.selected_option(), Some(0));
    }

    #[test]
    fn restart_returns_to_welcome_with_empty_session() {
        let mut app = app(DOC);
        app.start_exam();
        app.select_letter('a');
        app.confirm();
        app.restart();

        assert_eq!(app.state, AppState::Welcome);
        assert_eq!(app.session().state(), SessionState::Empty);
        assert!(app.question_view().is_none());

        app.start_exam();
        assert_eq!(app.state, AppState::Exam);
        assert_eq!(app.session().score(), 0);
    }
}
