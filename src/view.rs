//! Display-ready views built from session data.
//!
//! Everything here is a pure function of its inputs, so the terminal UI
//! can rebuild views on every state change and the session stays free of
//! rendering concerns.

use crate::document::ExamItem;
use crate::grading::Report;
use crate::math::Typesetter;
use crate::models::{Question, option_letter};
use crate::session::{CurrentQuestion, Outcome, Verdict};

const QUESTION_PREVIEW_LENGTH: usize = 55;

#[derive(Debug, Clone, PartialEq)]
pub struct OptionView {
    pub letter: Option<char>,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackView {
    pub correct: bool,
    pub title: &'static str,
    /// Set for wrong answers, e.g. `The correct answer is: B)`.
    pub correct_answer: Option<String>,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionView {
    pub heading: String,
    pub progress: f64,
    pub text: String,
    pub options: Vec<OptionView>,
    pub feedback: Option<FeedbackView>,
}

pub fn question_view(
    current: &CurrentQuestion<'_>,
    verdict: Option<&Verdict>,
    typesetter: &dyn Typesetter,
) -> QuestionView {
    QuestionView {
        heading: format!("Question {} of {}", current.number, current.total),
        progress: current.progress,
        text: typesetter.typeset(&current.question.text).into_owned(),
        options: option_views(current.question, typesetter),
        feedback: verdict.map(|verdict| feedback_view(verdict, typesetter)),
    }
}

fn option_views(question: &Question, typesetter: &dyn Typesetter) -> Vec<OptionView> {
    question
        .options
        .iter()
        .map(|option| OptionView {
            letter: option_letter(option),
            label: typesetter.typeset(option).into_owned(),
        })
        .collect()
}

pub fn feedback_view(verdict: &Verdict, typesetter: &dyn Typesetter) -> FeedbackView {
    let explanation = strip_emphasis(&typesetter.typeset(verdict.explanation()));
    match verdict {
        Verdict::Correct { .. } => FeedbackView {
            correct: true,
            title: "Correct!",
            correct_answer: None,
            explanation,
        },
        Verdict::Incorrect { correct, .. } => FeedbackView {
            correct: false,
            title: "Incorrect",
            correct_answer: Some(format!("The correct answer is: {correct})")),
            explanation,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownRow {
    pub outcome: Option<Outcome>,
    pub preview: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportView {
    pub headline: &'static str,
    pub score: String,
    pub percentage: String,
    pub grade: String,
    pub rows: Vec<BreakdownRow>,
}

pub fn report_view(
    report: &Report,
    items: &[ExamItem],
    outcomes: &[Outcome],
    typesetter: &dyn Typesetter,
) -> ReportView {
    let rows = items
        .iter()
        .enumerate()
        .map(|(index, item)| BreakdownRow {
            outcome: outcomes.get(index).copied(),
            preview: truncate(&typesetter.typeset(&item.question.text)),
        })
        .collect();

    ReportView {
        headline: report.tier.headline(),
        score: format!("{}/{}", report.score, report.total),
        percentage: format!("{}%", report.percentage),
        grade: report.grade.to_string(),
        rows,
    }
}

fn strip_emphasis(text: &str) -> String {
    text.replace("**", "")
}

fn truncate(text: &str) -> String {
    if text.chars().count() > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{pair_by_position, parse};
    use crate::math::{PlainText, UnicodeMath};
    use crate::session::Session;

    fn session() -> Session {
        let mut session = Session::new();
        session.start_document(parse(
            "1. Area of a circle?\na) $2\\pi r$\nb) $\\pi r^2$\n---\n\
             1.  b) x || **Explanation:** $A = \\pi r^2$",
        ));
        session
    }

    #[test]
    fn question_view_typesets_text_and_options() {
        let session = session();
        let view = question_view(&session.current_question().unwrap(), None, &UnicodeMath);

        assert_eq!(view.heading, "Question 1 of 1");
        assert_eq!(view.options[0].letter, Some('a'));
        assert_eq!(view.options[1].label, "b) π r²");
        assert!(view.feedback.is_none());
    }

    #[test]
    fn incorrect_feedback_names_the_answer() {
        let mut session = session();
        let verdict = session.submit(Some('a')).unwrap();
        let view = question_view(&session.current_question().unwrap(), Some(&verdict), &PlainText);

        let feedback = view.feedback.unwrap();
        assert!(!feedback.correct);
        assert_eq!(feedback.title, "Incorrect");
        assert_eq!(feedback.correct_answer.as_deref(), Some("The correct answer is: B)"));
        assert_eq!(feedback.explanation, "Explanation: $A = \\pi r^2$");
    }

    #[test]
    fn report_rows_follow_outcomes() {
        let mut session = Session::new();
        let items = pair_by_position(parse(
            "1. One\na) x\n2. Two\na) x\n---\n1.  a) x || ok",
        ));
        session.start_items(items);
        session.submit(Some('a')).unwrap();
        session.advance().unwrap();
        let _ = session.submit(Some('a'));
        session.advance().unwrap();

        let report = session.report().unwrap();
        let view = report_view(&report, session.items(), session.outcomes(), &PlainText);
        assert_eq!(view.score, "1/2");
        assert_eq!(view.percentage, "50%");
        assert_eq!(view.grade, "F");
        assert_eq!(view.headline, "Room for Improvement!");
        assert_eq!(view.rows[0].outcome, Some(Outcome::Correct));
        assert_eq!(view.rows[1].outcome, Some(Outcome::NoAnswerKey));
    }

    #[test]
    fn long_questions_are_truncated() {
        let long = "x".repeat(80);
        let preview = truncate(&long);
        assert_eq!(preview.chars().count(), QUESTION_PREVIEW_LENGTH + 3);
        assert!(preview.ends_with("..."));
    }
}
