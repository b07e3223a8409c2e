use cz_pair::commit::{build_commit_message, format_body, format_footer, format_header};
use cz_pair::text::{BODY_WIDTH, wrap_paragraph};
use cz_pair::{AnswerRecord, ChangeType};

fn index_answers() -> AnswerRecord {
    AnswerRecord {
        scope: Some("index".to_string()),
        subject: Some("Add break tag".to_string()),
        body: Some("Add break tag to body of index.".to_string()),
        ..AnswerRecord::new(ChangeType::Feat)
    }
}

#[test]
fn test_message_without_footer() {
    assert_eq!(
        build_commit_message(&index_answers()),
        "feat(index): Add break tag\n\nAdd break tag to body of index."
    );
}

#[test]
fn test_message_closing_an_issue() {
    let answers = AnswerRecord {
        close: true,
        issue: Some("367".to_string()),
        ..index_answers()
    };

    let message = build_commit_message(&answers);
    assert_eq!(
        message,
        "feat(index): Add break tag\n\nAdd break tag to body of index.\n\nCLOSES: 367"
    );
    assert!(!message.ends_with('\n'));
}

#[test]
fn test_full_message_layout() {
    let answers = AnswerRecord {
        body: Some("First paragraph.|Second paragraph.".to_string()),
        is_breaking: true,
        breaking_change: Some("Index markup changed".to_string()),
        close: true,
        issue: Some("12".to_string()),
        pair: true,
        driver: Some("alice".to_string()),
        navs: Some("bob, carol".to_string()),
        ..index_answers()
    };

    assert_eq!(
        build_commit_message(&answers),
        "feat(index): Add break tag\n\
         \n\
         First paragraph.\n\
         Second paragraph.\n\
         \n\
         BREAKING-CHANGE: Index markup changed\n\
         \n\
         CLOSES: 12\n\
         \n\
         PAIRED-WITH: bob, carol"
    );
}

#[test]
fn test_removal_message_uses_target() {
    let answers = AnswerRecord {
        target: Some("legacy importer".to_string()),
        close: true,
        issue: Some("8".to_string()),
        ..AnswerRecord::new(ChangeType::Remove)
    };

    assert_eq!(
        build_commit_message(&answers),
        "rem: legacy importer\n\nCLOSES: 8"
    );
}

#[test]
fn test_header_only_message() {
    let answers = AnswerRecord {
        subject: Some("Bump version".to_string()),
        scope: Some(String::new()),
        body: Some(String::new()),
        ..AnswerRecord::new(ChangeType::Chore)
    };

    assert_eq!(build_commit_message(&answers), "chore: Bump version");
}

#[test]
fn test_footer_without_body() {
    let answers = AnswerRecord {
        body: None,
        pair: true,
        navs: Some("dana".to_string()),
        ..index_answers()
    };

    assert_eq!(
        build_commit_message(&answers),
        "feat(index): Add break tag\n\nPAIRED-WITH: dana"
    );
}

#[test]
fn test_building_is_deterministic() {
    let answers = AnswerRecord {
        close: true,
        issue: Some("367".to_string()),
        ..index_answers()
    };

    assert_eq!(build_commit_message(&answers), build_commit_message(&answers));
}

#[test]
fn test_format_header_and_body_examples() {
    assert_eq!(
        format_header("feat", Some("index"), Some("Add x"), Some("")),
        "feat(index): Add x"
    );
    assert_eq!(format_header("feat", None, Some("Add x"), None), "feat: Add x");
    assert_eq!(format_body(None), "");
    assert_eq!(format_body(Some("")), "");
    assert_eq!(format_body(Some("line1|line2")), "line1\nline2");
}

#[test]
fn test_footer_flag_without_value_still_renders() {
    assert_eq!(
        format_footer(false, None, true, None, false, None),
        "CLOSES: "
    );
    assert_eq!(format_footer(false, None, false, None, false, None), "");
}

#[test]
fn test_long_body_segments_wrap_independently() {
    let long = "word ".repeat(40);
    let body = format!("{long}|short");
    let formatted = format_body(Some(&body));

    let lines: Vec<&str> = formatted.lines().collect();
    assert_eq!(lines.last(), Some(&"short"));
    assert!(lines.iter().all(|line| line.chars().count() <= BODY_WIDTH));
    assert!(lines.len() > 2);
}

#[test]
fn test_body_lines_are_filled_greedily() {
    let first_line = "the by every again body that tool page generated rendering index Add Add";
    assert_eq!(first_line.chars().count(), BODY_WIDTH);

    let body = format!("{first_line} index the break tag");
    assert_eq!(
        format_body(Some(&body)),
        format!("{first_line}\nindex the break tag")
    );
    assert_eq!(wrap_paragraph("aaa bb cc ddddd", 6), "aaa bb\ncc\nddddd");
}

#[test]
fn test_wrapping_preserves_words() {
    let text = "The quick brown fox jumps over the lazy dog and keeps running \
                through the forest until it reaches a supercalifragilisticexpialidocious river";

    for width in [10, 20, 72] {
        let wrapped = wrap_paragraph(text, width);
        let rejoined = wrapped.lines().collect::<Vec<_>>().join(" ");
        assert_eq!(
            rejoined.split_whitespace().collect::<Vec<_>>(),
            text.split_whitespace().collect::<Vec<_>>()
        );
        for line in wrapped.lines() {
            assert!(
                line.chars().count() <= width || !line.contains(' '),
                "line '{line}' exceeds width {width}"
            );
        }
    }
}
