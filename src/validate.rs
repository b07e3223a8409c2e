//! Header length budget checks
//!
//! GitHub truncates commit titles past a fixed width, so the free text of a
//! header (the subject, or the target of a removal) has to fit in whatever is
//! left once the type, the parenthesized scope and the `": "` delimiter are
//! accounted for.

use thiserror::Error;

/// Maximum header width GitHub displays without truncation
pub const HEADER_LIMIT: usize = 69;

/// Width of the `": "` delimiter between type/scope and subject
const DELIMITER_LEN: usize = 2;

/// Header text exceeded the remaining budget by `overflow` characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Message was {overflow} character{} too long.", plural_suffix(.overflow))]
pub struct LengthOverflow {
    pub overflow: usize,
}

#[allow(clippy::trivially_copy_pass_by_ref)] // thiserror hands fields over by reference
fn plural_suffix(count: &usize) -> &'static str {
    if *count > 1 { "s" } else { "" }
}

/// Characters left for the subject once `change_type` and `scope` are placed
pub fn chars_remaining(change_type: &str, scope: Option<&str>) -> usize {
    // +2 for the parentheses around a scope
    let scope_len = match scope {
        Some(scope) if !scope.is_empty() => scope.chars().count() + 2,
        _ => 0,
    };

    HEADER_LIMIT.saturating_sub(change_type.chars().count() + scope_len + DELIMITER_LEN)
}

/// Returns by how much `candidate` overflows the budget, or `None` if it fits.
///
/// A candidate exactly as long as the remaining budget fits.
pub fn calculate_overflow(candidate: &str, change_type: &str, scope: Option<&str>) -> Option<usize> {
    let remaining = chars_remaining(change_type, scope);
    let len = candidate.chars().count();

    (len > remaining).then(|| len - remaining)
}

/// Checks `candidate` against the header budget for `change_type` and `scope`
pub fn validate_header_length(
    candidate: &str,
    change_type: &str,
    scope: Option<&str>,
) -> Result<(), LengthOverflow> {
    match calculate_overflow(candidate, change_type, scope) {
        Some(overflow) => Err(LengthOverflow { overflow }),
        None => Ok(()),
    }
}
