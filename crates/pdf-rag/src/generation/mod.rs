//! Answer generation and prompt templating

pub mod answer;
pub mod prompt;

pub use answer::AnswerService;
pub use prompt::PromptBuilder;
