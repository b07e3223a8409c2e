//! The fixed question list and the walk that turns replies into answers

use anyhow::Result;
use strum::IntoEnumIterator;

use super::{Choice, PromptIo};
use crate::commit::Action;
use crate::log_debug;
use crate::text;
use crate::types::{AnswerRecord, ChangeType};
use crate::validate::{LengthOverflow, validate_header_length};

/// Answer slot a question fills
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Scope,
    Target,
    Subject,
    Body,
    Break,
    Change,
    Close,
    Issue,
    Pair,
    Driver,
    Navs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Input,
    Confirm,
}

pub type Predicate = fn(&AnswerRecord) -> bool;
pub type Validator = fn(&str, &AnswerRecord) -> Result<(), LengthOverflow>;

/// One question, asked only when `when` holds for the answers so far
#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub field: Field,
    pub kind: QuestionKind,
    pub message: &'static str,
    pub when: Predicate,
    pub validate: Option<Validator>,
}

const TYPE_MESSAGE: &str = "Select the type of change that you're committing:";
const ACTION_MESSAGE: &str = "How would you like to proceed?";

fn always(_: &AnswerRecord) -> bool {
    true
}

fn not_removal(answers: &AnswerRecord) -> bool {
    !answers.change_type.is_removal()
}

fn removal(answers: &AnswerRecord) -> bool {
    answers.change_type.is_removal()
}

fn breaking(answers: &AnswerRecord) -> bool {
    answers.is_breaking
}

fn closing(answers: &AnswerRecord) -> bool {
    answers.close
}

fn paired(answers: &AnswerRecord) -> bool {
    answers.pair
}

fn header_fits(candidate: &str, answers: &AnswerRecord) -> Result<(), LengthOverflow> {
    validate_header_length(candidate, answers.change_type.tag(), answers.scope())
}

/// Questions asked after the change type, in order
pub fn questions() -> Vec<Question> {
    let input = |field: Field, message: &'static str, when: Predicate| Question {
        field,
        kind: QuestionKind::Input,
        message,
        when,
        validate: None,
    };
    let confirm = |field: Field, message: &'static str, when: Predicate| Question {
        field,
        kind: QuestionKind::Confirm,
        message,
        when,
        validate: None,
    };

    vec![
        input(Field::Scope, "Denote the location of this change:", not_removal),
        Question {
            validate: Some(header_fits),
            ..input(Field::Target, "What are you removing?", removal)
        },
        Question {
            validate: Some(header_fits),
            ..input(
                Field::Subject,
                "Write a short, imperative tense description of the change:",
                not_removal,
            )
        },
        input(
            Field::Body,
            "Provide a longer description of the change. Use \"|\" to add a line break.",
            always,
        ),
        confirm(
            Field::Break,
            "Does this commit introduce a breaking change?",
            not_removal,
        ),
        input(Field::Change, "Describe the breaking change:", breaking),
        confirm(Field::Close, "Does this commit close an issue?", always),
        input(Field::Issue, "Closes Issue #:", closing),
        confirm(Field::Pair, "Did you pair with anyone?", not_removal),
        input(Field::Driver, "Driver:", paired),
        input(Field::Navs, "Navigator(s):", paired),
    ]
}

fn change_type_choices() -> Vec<Choice> {
    ChangeType::iter()
        .map(|change_type| {
            let name = format!("{}:", change_type.label());
            Choice::new(
                format!("{name:<9} {}", change_type.description()),
                [change_type.label(), change_type.tag()],
            )
        })
        .collect()
}

fn store_text(answers: &mut AnswerRecord, field: Field, value: String) {
    let value = (!value.is_empty()).then_some(value);
    match field {
        Field::Scope => answers.scope = value,
        Field::Target => answers.target = value,
        Field::Subject => answers.subject = value,
        Field::Body => answers.body = value,
        Field::Change => answers.breaking_change = value,
        Field::Issue => answers.issue = value,
        Field::Driver => answers.driver = value,
        Field::Navs => answers.navs = value,
        Field::Break | Field::Close | Field::Pair => {}
    }
}

fn store_flag(answers: &mut AnswerRecord, field: Field, value: bool) {
    match field {
        Field::Break => answers.is_breaking = value,
        Field::Close => answers.close = value,
        Field::Pair => answers.pair = value,
        _ => {}
    }
}

/// Asks for the change type, then every question that applies.
///
/// Text replies are trimmed. A reply failing validation is reported
/// through [`PromptIo::warn`] and the same question is asked again.
pub fn collect_answers(io: &mut dyn PromptIo) -> Result<AnswerRecord> {
    let types: Vec<ChangeType> = ChangeType::iter().collect();
    let selected = io.select(TYPE_MESSAGE, &change_type_choices())?;
    let change_type = types
        .get(selected)
        .copied()
        .ok_or_else(|| anyhow::anyhow!("Invalid change type selection: {selected}"))?;

    let mut answers = AnswerRecord::new(change_type);
    log_debug!("Collecting answers for '{}' commit", change_type);

    for question in questions() {
        if !(question.when)(&answers) {
            continue;
        }

        match question.kind {
            QuestionKind::Confirm => {
                let value = io.confirm(question.message, false)?;
                store_flag(&mut answers, question.field, value);
            }
            QuestionKind::Input => {
                let value = ask_until_valid(io, &question, &answers)?;
                store_text(&mut answers, question.field, value);
            }
        }
    }

    Ok(answers)
}

fn ask_until_valid(
    io: &mut dyn PromptIo,
    question: &Question,
    answers: &AnswerRecord,
) -> Result<String> {
    loop {
        let value = text::trim(&io.input(question.message)?);

        match question.validate.map(|validate| validate(&value, answers)) {
            Some(Err(overflow)) => {
                log_debug!("Rejected {:?} answer: {}", question.field, overflow);
                io.warn(&overflow.to_string())?;
            }
            _ => return Ok(value),
        }
    }
}

/// Shows the message and asks what to do with it
pub fn choose_action(io: &mut dyn PromptIo, message: &str) -> Result<Action> {
    io.show(&format!("Here is your commit message:\n\n{message}\n"))?;

    let actions: Vec<Action> = Action::iter().collect();
    let choices: Vec<Choice> = actions
        .iter()
        .map(|action| {
            let key = match action {
                Action::Commit => "commit",
                Action::Edit => "edit",
                Action::Cancel => "cancel",
            };
            Choice::new(action.to_string(), [key])
        })
        .collect();

    let selected = io.select(ACTION_MESSAGE, &choices)?;
    actions
        .get(selected)
        .copied()
        .ok_or_else(|| anyhow::anyhow!("Invalid action selection: {selected}"))
}
