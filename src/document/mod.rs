//! Exam documents: parsing raw text and pairing questions with answers.

mod pairing;
mod parser;
mod summary;

pub use pairing::{ExamItem, pair_by_position};
pub use parser::{ParsedDocument, SECTION_SEPARATOR, parse, title};
pub use summary::{Summary, summarize};
