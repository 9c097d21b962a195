/// Screen the terminal UI is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    #[default]
    Welcome,
    Exam,
    Result,
}
