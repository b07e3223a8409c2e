//! Commit message formatting
//!
//! Everything here is a pure function of its arguments: the same answers
//! always produce the same bytes.

use crate::text::{BODY_WIDTH, wrap_paragraph};
use crate::types::AnswerRecord;

/// Separator between the type/scope and the subject
const DELIMITER: &str = ": ";

/// Splits the body into paragraphs
const BODY_SEPARATOR: char = '|';

/// Blank line between message fragments
const FRAGMENT_SEPARATOR: &str = "\n\n";

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Formats the header line: `type(scope): subject`.
///
/// The scope and its parentheses are left out when the scope is empty.
/// `subject` and `target` are written back to back; callers set only one.
pub fn format_header(
    change_type: &str,
    scope: Option<&str>,
    subject: Option<&str>,
    target: Option<&str>,
) -> String {
    let scope = present(scope).map(|s| format!("({s})")).unwrap_or_default();

    format!(
        "{change_type}{scope}{DELIMITER}{}{}",
        subject.unwrap_or_default(),
        target.unwrap_or_default()
    )
}

/// Formats the body: each `|` separated segment wrapped on its own
pub fn format_body(raw_body: Option<&str>) -> String {
    let Some(raw_body) = present(raw_body) else {
        return String::new();
    };

    raw_body
        .split(BODY_SEPARATOR)
        .map(|segment| wrap_paragraph(segment, BODY_WIDTH))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats the footer notes in fixed order, one blank line apart.
///
/// A note is written whenever its flag is set, even if its text is missing.
#[allow(clippy::fn_params_excessive_bools)]
pub fn format_footer(
    is_breaking: bool,
    breaking_change: Option<&str>,
    close: bool,
    issue: Option<&str>,
    pair: bool,
    navs: Option<&str>,
) -> String {
    let notes = [
        (is_breaking, "BREAKING-CHANGE", breaking_change),
        (close, "CLOSES", issue),
        (pair, "PAIRED-WITH", navs),
    ];

    notes
        .into_iter()
        .filter(|(enabled, _, _)| *enabled)
        .map(|(_, key, value)| format!("{key}: {}", value.unwrap_or_default()))
        .collect::<Vec<_>>()
        .join(FRAGMENT_SEPARATOR)
}

/// Builds the complete commit message for `answers`.
///
/// Blank lines separate the header from the body and the body from the
/// footer only when those fragments have content. No validation happens
/// here; header length is checked while the answers are collected.
pub fn build_commit_message(answers: &AnswerRecord) -> String {
    let header = format_header(
        answers.change_type.tag(),
        answers.scope.as_deref(),
        answers.subject.as_deref(),
        answers.target.as_deref(),
    );
    let body = format_body(answers.body.as_deref());
    let footer = format_footer(
        answers.is_breaking,
        answers.breaking_change.as_deref(),
        answers.close,
        answers.issue.as_deref(),
        answers.pair,
        answers.navs.as_deref(),
    );

    let mut message = header;
    for fragment in [body, footer] {
        if !fragment.is_empty() {
            message.push_str(FRAGMENT_SEPARATOR);
            message.push_str(&fragment);
        }
    }

    message
}
