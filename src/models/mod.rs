mod question;
mod state;

pub use question::{AnswerKey, Question, option_letter};
pub use state::AppState;
