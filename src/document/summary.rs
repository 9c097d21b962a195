use serde::Serialize;

use super::ParsedDocument;

/// Shape of a parsed document, reported by `mock-exam check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub questions: usize,
    pub answers: usize,
    pub options_per_question: Vec<usize>,
    /// 1-based numbers of questions with no answer key.
    pub missing_answer_keys: Vec<usize>,
    /// 1-based numbers of questions whose key names a letter with no option.
    pub unknown_answer_letters: Vec<usize>,
}

/// Summarizes `document` using the same positional pairing as an exam.
pub fn summarize(document: &ParsedDocument) -> Summary {
    let questions = &document.questions;
    let answers = &document.answers;

    let missing_answer_keys = (answers.len()..questions.len())
        .map(|index| index + 1)
        .collect();
    let unknown_answer_letters = questions
        .iter()
        .zip(answers)
        .enumerate()
        .filter(|(_, (question, answer))| !question.has_option(answer.correct))
        .map(|(index, _)| index + 1)
        .collect();

    Summary {
        questions: questions.len(),
        answers: answers.len(),
        options_per_question: questions.iter().map(|q| q.options.len()).collect(),
        missing_answer_keys,
        unknown_answer_letters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse;

    #[test]
    fn short_answer_block_lists_missing_keys() {
        let summary = summarize(&parse(
            "1. A\na) x\nb) y\n2. B\na) x\n3. C\n---\n1.  b) y || only",
        ));

        assert_eq!(summary.questions, 3);
        assert_eq!(summary.answers, 1);
        assert_eq!(summary.options_per_question, vec![2, 1, 0]);
        assert_eq!(summary.missing_answer_keys, vec![2, 3]);
        assert!(summary.unknown_answer_letters.is_empty());
    }

    #[test]
    fn key_without_matching_option_is_flagged() {
        let summary = summarize(&parse(
            "1. A\na) x\nb) y\n2. B\na) x\nb) y\n---\n1.  d) ? || no d\n2.  a) x || fine",
        ));

        assert_eq!(summary.unknown_answer_letters, vec![1]);
        assert!(summary.missing_answer_keys.is_empty());
    }

    #[test]
    fn surplus_answers_are_counted_but_not_flagged() {
        let summary = summarize(&parse("1. A\na) x\n---\n1.  a) x || one\n2.  b) y || two"));
        assert_eq!(summary.answers, 2);
        assert!(summary.missing_answer_keys.is_empty());
        assert!(summary.unknown_answer_letters.is_empty());
    }

    #[test]
    fn serializes_field_names() {
        let json = serde_json::to_value(summarize(&parse("1. A\na) x\n---\n"))).unwrap();
        assert_eq!(json["questions"], 1);
        assert_eq!(json["missing_answer_keys"], serde_json::json!([1]));
    }
}
