//! Answer record produced by the question flow and consumed by the formatters

use serde::{Deserialize, Deserializer, Serialize};
use strum::{EnumMessage, IntoEnumIterator};
use strum_macros::{Display, EnumIter, EnumMessage, EnumString, IntoStaticStr};
use thiserror::Error;

/// Kind of change a commit introduces.
///
/// The displayed form is the tag written into the header; long spellings
/// such as `refactor` are accepted when parsing.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    IntoStaticStr,
    EnumString,
    EnumIter,
    EnumMessage,
)]
#[strum(ascii_case_insensitive)]
pub enum ChangeType {
    #[serde(rename = "feat", alias = "feature")]
    #[strum(to_string = "feat", serialize = "feature", message = "A new feature")]
    Feat,
    #[serde(rename = "fix")]
    #[strum(to_string = "fix", message = "A bug fix")]
    Fix,
    #[serde(rename = "docs")]
    #[strum(
        to_string = "docs",
        message = "Change to documentation or comments only."
    )]
    Docs,
    #[serde(rename = "style")]
    #[strum(
        to_string = "style",
        message = "Change that does not affect the meaning of the code (white-space, alignment, formatting, etc)"
    )]
    Style,
    #[serde(rename = "ref", alias = "refactor")]
    #[strum(
        to_string = "ref",
        serialize = "refactor",
        message = "Code change that neither fixes a bug nor adds a feature"
    )]
    Refactor,
    #[serde(rename = "perf")]
    #[strum(to_string = "perf", message = "Code change that improves performance")]
    Perf,
    #[serde(rename = "test")]
    #[strum(to_string = "test", message = "Add test(s)")]
    Test,
    #[serde(rename = "rem", alias = "remove")]
    #[strum(
        to_string = "rem",
        serialize = "remove",
        message = "Remove file(s), function(s), etc from the codebase"
    )]
    Remove,
    #[serde(rename = "chore")]
    #[strum(
        to_string = "chore",
        message = "Change to the build process, auxiliary tools, libraries, etc"
    )]
    Chore,
}

impl ChangeType {
    /// Long name shown in the selection list (`refactor` rather than `ref`)
    pub fn label(self) -> &'static str {
        match self {
            Self::Refactor => "refactor",
            Self::Remove => "remove",
            other => other.tag(),
        }
    }

    /// Tag written into the commit header
    pub fn tag(self) -> &'static str {
        self.into()
    }

    pub fn description(self) -> &'static str {
        self.get_message().unwrap_or_default()
    }

    /// Removals describe a target instead of a subject and skip pairing
    pub fn is_removal(self) -> bool {
        self == Self::Remove
    }

    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

/// Everything the user answered, with absent answers left as `None`.
///
/// Empty strings are treated the same as absent values by every formatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(rename = "break", default)]
    pub is_breaking: bool,
    #[serde(alias = "change", default, skip_serializing_if = "Option::is_none")]
    pub breaking_change: Option<String>,
    #[serde(default)]
    pub close: bool,
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub issue: Option<String>,
    #[serde(default)]
    pub pair: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navs: Option<String>,
}

/// An answer record whose flags promise a value that is missing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerError {
    #[error("A subject is required for '{0}' commits")]
    MissingSubject(ChangeType),
    #[error("A removal commit needs a target")]
    MissingTarget,
    #[error("'break' is set but no breaking change was described")]
    MissingBreakingChange,
    #[error("'close' is set but no issue was given")]
    MissingIssue,
    #[error("'pair' is set but no navigator was given")]
    MissingNavigators,
}

impl AnswerRecord {
    /// Creates a record with only the change type set
    pub fn new(change_type: ChangeType) -> Self {
        Self {
            change_type,
            scope: None,
            subject: None,
            target: None,
            body: None,
            is_breaking: false,
            breaking_change: None,
            close: false,
            issue: None,
            pair: false,
            driver: None,
            navs: None,
        }
    }

    pub fn scope(&self) -> Option<&str> {
        non_empty(self.scope.as_ref())
    }

    /// Free text of the header: the subject, or the target of a removal
    pub fn header_text(&self) -> String {
        format!(
            "{}{}",
            self.subject.as_deref().unwrap_or_default(),
            self.target.as_deref().unwrap_or_default()
        )
    }

    /// Verifies the record is complete enough to produce a meaningful message.
    ///
    /// The formatters never call this: a record that fails it still formats,
    /// with missing values rendered as empty text.
    pub fn check(&self) -> Result<(), AnswerError> {
        if self.change_type.is_removal() {
            if non_empty(self.target.as_ref()).is_none() {
                return Err(AnswerError::MissingTarget);
            }
        } else if non_empty(self.subject.as_ref()).is_none() {
            return Err(AnswerError::MissingSubject(self.change_type));
        }

        if self.is_breaking && non_empty(self.breaking_change.as_ref()).is_none() {
            return Err(AnswerError::MissingBreakingChange);
        }
        if self.close && non_empty(self.issue.as_ref()).is_none() {
            return Err(AnswerError::MissingIssue);
        }
        if self.pair && non_empty(self.navs.as_ref()).is_none() {
            return Err(AnswerError::MissingNavigators);
        }

        Ok(())
    }
}

/// Issue ids are usually typed as numbers in hand-written answer files
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        Text(String),
        Number(i64),
    }

    Ok(
        Option::<StringOrNumber>::deserialize(deserializer)?.map(|value| match value {
            StringOrNumber::Text(text) => text,
            StringOrNumber::Number(number) => number.to_string(),
        }),
    )
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_change_type_tags() {
        assert_eq!(ChangeType::Refactor.to_string(), "ref");
        assert_eq!(ChangeType::Remove.tag(), "rem");
        assert_eq!(ChangeType::Feat.tag(), "feat");
        assert_eq!(ChangeType::all().len(), 9);
    }

    #[test]
    fn test_change_type_parses_long_and_short_forms() {
        assert_eq!(ChangeType::from_str("refactor"), Ok(ChangeType::Refactor));
        assert_eq!(ChangeType::from_str("ref"), Ok(ChangeType::Refactor));
        assert_eq!(ChangeType::from_str("REMOVE"), Ok(ChangeType::Remove));
        assert!(ChangeType::from_str("wip").is_err());
    }

    #[test]
    fn test_check_flags_missing_values() {
        let mut answers = AnswerRecord::new(ChangeType::Feat);
        assert_eq!(
            answers.check(),
            Err(AnswerError::MissingSubject(ChangeType::Feat))
        );

        answers.subject = Some("Add x".to_string());
        assert_eq!(answers.check(), Ok(()));

        answers.close = true;
        assert_eq!(answers.check(), Err(AnswerError::MissingIssue));
        answers.issue = Some("12".to_string());

        answers.pair = true;
        answers.navs = Some(String::new());
        assert_eq!(answers.check(), Err(AnswerError::MissingNavigators));
    }

    #[test]
    fn test_check_removal_needs_target() {
        let mut answers = AnswerRecord::new(ChangeType::Remove);
        assert_eq!(answers.check(), Err(AnswerError::MissingTarget));
        answers.target = Some("legacy parser".to_string());
        assert_eq!(answers.check(), Ok(()));
    }

    #[test]
    fn test_deserialize_uses_original_field_names() {
        let json = r#"{
            "type": "feat",
            "scope": "index",
            "subject": "Add break tag",
            "break": true,
            "change": "Drops the old API",
            "close": true,
            "issue": "367"
        }"#;
        let answers: AnswerRecord = serde_json::from_str(json).expect("valid answers");
        assert_eq!(answers.change_type, ChangeType::Feat);
        assert_eq!(answers.scope(), Some("index"));
        assert!(answers.is_breaking);
        assert_eq!(answers.breaking_change.as_deref(), Some("Drops the old API"));
        assert!(!answers.pair);
    }

    #[test]
    fn test_deserialize_numeric_issue() {
        let answers: AnswerRecord =
            serde_json::from_str(r#"{"type": "fix", "subject": "Fix x", "close": true, "issue": 42}"#)
                .expect("valid answers");
        assert_eq!(answers.issue.as_deref(), Some("42"));
        assert_eq!(answers.check(), Ok(()));
    }
}
