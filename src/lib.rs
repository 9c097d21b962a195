//! # mock-exam
//!
//! Load a Markdown mock exam, answer it one question at a time in the
//! terminal, and get a letter grade at the end.
//!
//! ## Document format
//!
//! ```text
//! # Arithmetic Mock Exam
//! 1. What is 2+2?
//! a) 3
//! b) 4
//! ---
//! # Answers
//! 1.  b) 4 || **Explanation:** basic arithmetic
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mock_exam::{Config, Exam, ExamError};
//!
//! fn main() -> Result<(), ExamError> {
//!     let exam = Exam::from_file("algebra.md", &Config::default())?;
//!     exam.run()?;
//!     Ok(())
//! }
//! ```
//!
//! The parser and session can also be driven directly:
//!
//! ```rust
//! use mock_exam::{Session, SessionState, parse};
//!
//! let document = parse("1. What is 2+2?\na) 3\nb) 4\n---\n1.  b) 4 || basic arithmetic");
//! let mut session = Session::new();
//! session.start_document(document);
//!
//! assert!(session.submit(Some('b')).unwrap().is_correct());
//! session.advance().unwrap();
//! assert_eq!(session.state(), SessionState::Finished);
//! assert_eq!(session.report().unwrap().grade.to_string(), "A+");
//! ```

mod app;
pub mod config;
mod data;
pub mod document;
pub mod grading;
pub mod importer;
pub mod logging;
pub mod math;
mod models;
pub mod session;
pub mod template;
pub mod terminal;
mod ui;
pub mod view;

use std::io;
use std::path::Path;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use thiserror::Error;

pub use app::App;
pub use config::{Config, ConfigError};
pub use data::{Catalog, CatalogError, LoadError, load_document};
pub use document::{ExamItem, ParsedDocument, Summary, pair_by_position, parse, summarize, title};
pub use grading::{LetterGrade, Report, Tier};
pub use importer::ImportError;
pub use models::{AnswerKey, AppState, Question};
pub use session::{ErrorKind, Session, SessionError, SessionState, Verdict};

#[derive(Debug, Error)]
pub enum ExamError {
    #[error("Failed to load exam: {0}")]
    Load(#[from] LoadError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to import exam: {0}")]
    Import(#[from] ImportError),

    #[error(
        "{name}: no questions found; the document needs numbered questions, \
         a '---' line and an answer block"
    )]
    Format { name: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// An exam ready to run in the terminal.
pub struct Exam {
    app: App,
}

impl Exam {
    /// Builds an exam from document text, refusing text with no questions.
    ///
    /// The document's `# ` title is shown when present, `name` otherwise.
    pub fn new(name: &str, content: &str, config: &Config) -> Result<Self, ExamError> {
        let document = parse(content);
        if document.is_empty() {
            return Err(ExamError::Format {
                name: name.to_string(),
            });
        }

        let name = title(content).unwrap_or_else(|| name.to_string());
        Self::from_document(&name, document, config)
    }

    /// Builds an exam from an already parsed document.
    pub fn from_document(
        name: &str,
        document: ParsedDocument,
        config: &Config,
    ) -> Result<Self, ExamError> {
        if document.is_empty() {
            return Err(ExamError::Format {
                name: name.to_string(),
            });
        }

        let app = App::new(name, document, config.math.typesetter()).with_theme(&config.theme);
        Ok(Self { app })
    }

    pub fn from_file<P: AsRef<Path>>(path: P, config: &Config) -> Result<Self, ExamError> {
        let path = path.as_ref();
        let content = load_document(path)?;
        let name = path.file_name().map_or_else(
            || path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        );
        Self::new(&name, &content, config)
    }

    pub fn from_catalog(
        name: &str,
        catalog: &Catalog,
        config: &Config,
    ) -> Result<Self, ExamError> {
        let content = catalog.get(name)?;
        Self::new(name, &content, config)
    }

    /// Runs the exam until the user quits.
    pub fn run(mut self) -> Result<(), ExamError> {
        let mut guard = terminal::TerminalGuard::enter()?;
        run_event_loop(guard.terminal(), &mut self.app)
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

/// Parses `content` and summarizes its structure without starting an exam.
pub fn check_document(name: &str, content: &str) -> Result<Summary, ExamError> {
    let document = parse(content);
    if document.is_empty() {
        return Err(ExamError::Format {
            name: name.to_string(),
        });
    }
    Ok(summarize(&document))
}

fn run_event_loop(terminal: &mut terminal::ExamTerminal, app: &mut App) -> Result<(), ExamError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code) {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.state {
        AppState::Welcome => handle_welcome_input(app, key),
        AppState::Exam => handle_exam_input(app, key),
        AppState::Result => handle_result_input(app, key),
    }
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.start_exam();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}

fn handle_exam_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous_option();
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next_option();
            false
        }
        KeyCode::Char(letter @ 'a'..='d') => {
            app.select_letter(letter);
            false
        }
        KeyCode::Char('n') if app.is_checked() => {
            app.next_question();
            false
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.confirm();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_results_down();
            false
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_results_up();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.restart();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "1. What is 2+2?\na) 3\nb) 4\n---\n1.  b) 4 || basic arithmetic";

    #[test]
    fn refuses_documents_without_questions() {
        let err = Exam::new("notes.md", "just notes", &Config::default())
            .err()
            .unwrap();
        assert!(matches!(err, ExamError::Format { .. }));
    }

    #[test]
    fn keys_drive_a_full_exam() {
        let mut exam = Exam::new("quick.md", DOC, &Config::default()).unwrap();
        let app = exam.app_mut();

        assert!(!handle_input(app, KeyCode::Enter));
        assert_eq!(app.state, AppState::Exam);
        assert!(!handle_input(app, KeyCode::Char('b')));
        assert!(!handle_input(app, KeyCode::Enter));
        assert!(app.is_checked());
        assert!(!handle_input(app, KeyCode::Char('n')));
        assert_eq!(app.state, AppState::Result);
        assert_eq!(app.report_view().unwrap().grade, "A+");

        assert!(!handle_input(app, KeyCode::Char('r')));
        assert_eq!(app.state, AppState::Welcome);
        assert!(handle_input(app, KeyCode::Char('q')));
    }

    #[test]
    fn catalog_exams_load_by_name() {
        let exam =
            Exam::from_catalog("rust-basics", &Catalog::builtin(), &Config::default()).unwrap();
        assert_eq!(exam.app().name(), "Rust Basics Mock Exam");
        assert_eq!(exam.app().question_count(), 6);
    }

    #[test]
    fn parsed_document_drives_an_exam() {
        let document = parse(DOC);
        let mut exam = Exam::from_document("Imported", document, &Config::default()).unwrap();
        assert_eq!(exam.app().name(), "Imported");

        let app = exam.app_mut();
        app.start_exam();
        assert_eq!(app.state, AppState::Exam);
        app.select_letter('b');
        app.confirm();
        assert!(app.question_view().unwrap().feedback.as_ref().unwrap().correct);
    }

    #[test]
    fn empty_parsed_document_is_refused() {
        let err = Exam::from_document("Empty", ParsedDocument::default(), &Config::default())
            .err()
            .unwrap();
        assert!(matches!(err, ExamError::Format { name } if name == "Empty"));
    }

    #[test]
    fn check_reports_short_answer_block_and_unknown_letters() {
        let content = "\
1. One?
a) x
b) y
2. Two?
a) x
b) y
3. Three?
a) x
---
1.  a) x || fine
2.  d) z || no such option
";
        let summary = check_document("partial.md", content).unwrap();
        assert_eq!(summary.questions, 3);
        assert_eq!(summary.answers, 2);
        assert_eq!(summary.options_per_question, vec![2, 2, 1]);
        assert_eq!(summary.missing_answer_keys, vec![3]);
        assert_eq!(summary.unknown_answer_letters, vec![2]);
    }

    #[test]
    fn check_refuses_text_without_questions() {
        let err = check_document("notes.md", "plain notes").unwrap_err();
        assert!(err.to_string().starts_with("notes.md: no questions found"));
    }
}
