//! Document parser.
//!
//! An exam document is a question block and an answer block joined by
//! `---`:
//!
//! ```text
//! # Algebra Mock Exam
//! 1. What is 2+2?
//! a) 3
//! b) 4
//! ---
//! # Answers
//! 1.  b) 4 || **Explanation:** basic arithmetic
//! ```
//!
//! Parsing never fails. Text without a separator yields an empty
//! [`ParsedDocument`], and lines that do not fit the format are skipped.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::models::{AnswerKey, Question};

/// Separator between the question block and the answer block.
///
/// Splitting is on the raw substring, so a `---` inside question or
/// explanation prose ends the block early.
pub const SECTION_SEPARATOR: &str = "---";

const EXPLANATION_SEPARATOR: &str = "||";
const BYTE_ORDER_MARK: char = '\u{FEFF}';

static NUMBERED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.\s").expect("numbered line pattern"));
static OPTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-d]\)\s").expect("option line pattern"));
static HEADING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^##?\s").expect("heading line pattern"));
static TITLE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\s+(.+)$").expect("title line pattern"));
static ANSWER_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.\s+([a-d])\)").expect("answer head pattern"));

/// Questions and answer keys in the order they appear in the document.
///
/// The two lists are independent; their lengths need not match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    pub questions: Vec<Question>,
    pub answers: Vec<AnswerKey>,
}

impl ParsedDocument {
    /// True when the text was not a recognized exam document.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

pub fn parse(content: &str) -> ParsedDocument {
    let content = content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(content);
    let mut sections = content.split(SECTION_SEPARATOR);
    let (Some(question_block), Some(answer_block)) = (sections.next(), sections.next()) else {
        debug!("document has no section separator");
        return ParsedDocument::default();
    };

    let questions = parse_questions(question_block);
    let answers = parse_answers(answer_block);
    debug!(
        questions = questions.len(),
        answers = answers.len(),
        "parsed exam document"
    );

    ParsedDocument { questions, answers }
}

/// Text of the first level-1 heading in the question block, if any.
pub fn title(content: &str) -> Option<String> {
    let question_block = content.split(SECTION_SEPARATOR).next()?;
    question_block.lines().find_map(|line| {
        TITLE_LINE
            .captures(trim_line(line))
            .map(|caps| caps[1].trim().to_string())
    })
}

/// Trims whitespace and stray byte-order marks from both ends of a line.
fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
}

fn parse_questions(block: &str) -> Vec<Question> {
    let mut questions = Vec::new();
    let mut current: Option<Question> = None;

    for line in block.lines().map(trim_line) {
        if NUMBERED_LINE.is_match(line) {
            questions.extend(current.take());
            current = Some(Question::new(line));
        } else if OPTION_LINE.is_match(line) {
            if let Some(question) = current.as_mut() {
                question.options.push(line.to_string());
            }
        } else if HEADING_LINE.is_match(line) || line.is_empty() {
            continue;
        } else if let Some(question) = current.as_mut() {
            question.text.push(' ');
            question.text.push_str(line);
        }
    }

    questions.extend(current);
    questions
}

fn parse_answers(block: &str) -> Vec<AnswerKey> {
    let mut answers = Vec::new();

    for line in block.lines().map(trim_line) {
        if !NUMBERED_LINE.is_match(line) {
            continue;
        }

        let mut parts = line.split(EXPLANATION_SEPARATOR);
        let (Some(head), Some(explanation)) = (parts.next(), parts.next()) else {
            warn!(line, "answer line has no explanation separator");
            continue;
        };

        let Some(caps) = ANSWER_HEAD.captures(head.trim()) else {
            warn!(line, "answer line has no option letter");
            continue;
        };
        let Some(correct) = caps[1].chars().next() else {
            continue;
        };

        answers.push(AnswerKey {
            correct,
            explanation: explanation.trim().to_string(),
        });
    }

    answers
}
