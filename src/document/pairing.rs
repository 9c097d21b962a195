use tracing::warn;

use super::ParsedDocument;
use crate::models::{AnswerKey, Question};

/// A question together with the answer key found for it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamItem {
    pub question: Question,
    pub answer: Option<AnswerKey>,
}

/// Pairs the Nth question with the Nth answer key.
///
/// Documents carry no explicit question ids, so position is the only link.
/// Questions past the end of the answer list get `None`; surplus answers
/// are discarded.
pub fn pair_by_position(document: ParsedDocument) -> Vec<ExamItem> {
    let ParsedDocument { questions, answers } = document;

    if answers.len() != questions.len() {
        warn!(
            questions = questions.len(),
            answers = answers.len(),
            "question and answer counts differ"
        );
    }

    let mut answers = answers.into_iter();
    questions
        .into_iter()
        .map(|question| ExamItem {
            question,
            answer: answers.next(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse;

    #[test]
    fn pairs_by_position() {
        let items = pair_by_position(parse(
            "1. A\na) x\nb) y\n2. B\na) x\nb) y\n---\n1.  b) y || first\n2.  a) x || second",
        ));

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].answer.as_ref().map(|a| a.correct), Some('b'));
        assert_eq!(items[1].answer.as_ref().map(|a| a.correct), Some('a'));
    }

    #[test]
    fn short_answer_block_leaves_questions_unkeyed() {
        let items = pair_by_position(parse("1. A\na) x\n2. B\na) x\n---\n1.  a) x || only"));
        assert!(items[0].answer.is_some());
        assert!(items[1].answer.is_none());
    }

    #[test]
    fn surplus_answers_are_dropped() {
        let items = pair_by_position(parse("1. A\na) x\n---\n1.  a) x || one\n2.  a) x || two"));
        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0].answer.as_ref().map(|a| a.explanation.as_str()),
            Some("one")
        );
    }
}
