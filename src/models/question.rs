/// A multiple-choice question as written in the question block.
///
/// `text` keeps the leading numeral (`"3. What is ..."`) and every option
/// keeps its `a) ` prefix, exactly as they appeared in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
}

impl Question {
    pub(crate) fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: Vec::new(),
        }
    }

    /// Letters of the options in document order.
    pub fn option_letters(&self) -> impl Iterator<Item = char> + '_ {
        self.options.iter().filter_map(|option| option_letter(option))
    }

    pub fn has_option(&self, letter: char) -> bool {
        self.option_letters()
            .any(|candidate| candidate.eq_ignore_ascii_case(&letter))
    }
}

/// The correct letter and explanation for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerKey {
    pub correct: char,
    pub explanation: String,
}

/// Identifier of a raw option line: its first character.
pub fn option_letter(option: &str) -> Option<char> {
    option.chars().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_letters_follow_document_order() {
        let mut question = Question::new("1. Pick one");
        question.options.push("b) second".to_string());
        question.options.push("a) first".to_string());

        let letters: Vec<char> = question.option_letters().collect();
        assert_eq!(letters, vec!['b', 'a']);
        assert!(question.has_option('A'));
        assert!(!question.has_option('c'));
    }
}
