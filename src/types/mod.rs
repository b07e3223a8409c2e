//! Input types for commit message formatting

mod answers;

pub use answers::{AnswerError, AnswerRecord, ChangeType};
