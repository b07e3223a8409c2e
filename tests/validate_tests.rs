use cz_pair::validate::{calculate_overflow, chars_remaining};
use cz_pair::{AnswerRecord, ChangeType, HEADER_LIMIT, LengthOverflow, validate_header_length};

#[test]
fn test_budget_accounts_for_type_scope_and_delimiter() {
    assert_eq!(chars_remaining("feat", None), HEADER_LIMIT - 6);
    assert_eq!(chars_remaining("feat", Some("index")), HEADER_LIMIT - 13);
    assert_eq!(chars_remaining("feat", Some("")), chars_remaining("feat", None));
}

#[test]
fn test_boundary_and_pluralization() {
    let remaining = chars_remaining("fix", Some("parser"));
    let exact = "a".repeat(remaining);

    assert!(validate_header_length(&exact, "fix", Some("parser")).is_ok());

    let one_over = validate_header_length(&format!("{exact}b"), "fix", Some("parser"));
    assert_eq!(one_over, Err(LengthOverflow { overflow: 1 }));
    assert_eq!(
        one_over.expect_err("overflow").to_string(),
        "Message was 1 character too long."
    );

    let two_over = validate_header_length(&format!("{exact}bc"), "fix", Some("parser"))
        .expect_err("overflow");
    assert_eq!(two_over.to_string(), "Message was 2 characters too long.");
}

#[test]
fn test_validated_header_fits_the_limit() {
    let scope = "index";
    let subject = "x".repeat(chars_remaining("feat", Some(scope)));
    assert!(validate_header_length(&subject, "feat", Some(scope)).is_ok());

    let answers = AnswerRecord {
        scope: Some(scope.to_string()),
        subject: Some(subject),
        ..AnswerRecord::new(ChangeType::Feat)
    };
    let message = cz_pair::build_commit_message(&answers);
    assert_eq!(message.chars().count(), HEADER_LIMIT);
}

#[test]
fn test_overflow_is_counted_in_characters() {
    let remaining = chars_remaining("docs", None);
    let accented = "é".repeat(remaining);
    assert_eq!(calculate_overflow(&accented, "docs", None), None);
    assert_eq!(
        calculate_overflow(&format!("{accented}é"), "docs", None),
        Some(1)
    );
}

#[test]
fn test_overlong_scope_leaves_no_room() {
    let scope = "s".repeat(HEADER_LIMIT);
    assert_eq!(chars_remaining("feat", Some(&scope)), 0);
    assert_eq!(calculate_overflow("a", "feat", Some(&scope)), Some(1));
}
