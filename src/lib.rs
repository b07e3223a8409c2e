//! cz-pair - conventional commit messages with pairing credits
//!
//! This library assembles commit messages from a small set of answers (type,
//! scope, subject, body, breaking change, closed issue, navigators) and
//! drives the interactive flow that collects them and commits the result.

// Allow certain clippy warnings that are stylistic
#![allow(clippy::uninlined_format_args)] // Style preference
#![allow(clippy::format_push_string)] // Performance improvement but stylistic
#![allow(clippy::return_self_not_must_use)] // Builder pattern is clear enough
#![allow(clippy::items_after_statements)] // Locally-scoped use statements are fine

pub mod cli;
pub mod commit;
pub mod config;
pub mod git;
pub mod logger;
pub mod prompt;
pub mod text;
pub mod types;
pub mod ui;
pub mod validate;

// Re-export important structs and functions for easier testing
pub use commit::build_commit_message;
pub use config::Config;
pub use types::{AnswerError, AnswerRecord, ChangeType};
pub use validate::{HEADER_LIMIT, LengthOverflow, validate_header_length};
