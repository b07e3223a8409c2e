//! Interactive collection of commit answers
//!
//! The question flow talks to the user only through [`PromptIo`], so the same
//! walk drives a real terminal or a scripted conversation.

mod questions;

pub use questions::{
    Field, Predicate, Question, QuestionKind, Validator, choose_action, collect_answers,
    questions,
};

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use anyhow::{Result, bail};
use colored::Colorize;

/// An entry in a selection list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    /// Words the user may type instead of the entry number
    pub keys: Vec<String>,
}

impl Choice {
    pub fn new<'a>(label: impl Into<String>, keys: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            label: label.into(),
            keys: keys.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn matches(&self, reply: &str) -> bool {
        self.keys.iter().any(|key| key.eq_ignore_ascii_case(reply))
    }
}

/// The user-facing side of the question flow
pub trait PromptIo {
    /// Returns the index of the chosen entry in `choices`
    fn select(&mut self, message: &str, choices: &[Choice]) -> Result<usize>;
    /// Returns the raw reply; trimming is up to the caller
    fn input(&mut self, message: &str) -> Result<String>;
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool>;
    /// Reports a rejected reply
    fn warn(&mut self, message: &str) -> Result<()>;
    fn show(&mut self, message: &str) -> Result<()>;
}

/// Line-oriented prompts over any reader and writer
pub struct TerminalPrompt<R, W> {
    reader: R,
    writer: W,
}

impl TerminalPrompt<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn ask(&mut self, message: &str, hint: &str) -> Result<String> {
        write!(self.writer, "{} {} ", "?".green().bold(), message.bold())?;
        if !hint.is_empty() {
            write!(self.writer, "{} ", hint.dimmed())?;
        }
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            bail!("Prompt aborted: no more input");
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl<R: BufRead, W: Write> PromptIo for TerminalPrompt<R, W> {
    fn select(&mut self, message: &str, choices: &[Choice]) -> Result<usize> {
        if choices.is_empty() {
            bail!("Nothing to choose from for: {message}");
        }

        writeln!(self.writer, "{} {}", "?".green().bold(), message.bold())?;
        for (i, choice) in choices.iter().enumerate() {
            writeln!(self.writer, "  {} {}", format!("{})", i + 1).cyan(), choice.label)?;
        }

        let hint = format!("[1-{}]", choices.len());
        loop {
            let reply = self.ask("Choice", &hint)?;
            let reply = reply.trim();

            let by_number = reply
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=choices.len()).contains(n))
                .map(|n| n - 1);
            let selected = by_number.or_else(|| choices.iter().position(|c| c.matches(reply)));

            if let Some(index) = selected {
                return Ok(index);
            }
            self.warn(&format!(
                "Please enter a number between 1 and {}",
                choices.len()
            ))?;
        }
    }

    fn input(&mut self, message: &str) -> Result<String> {
        self.ask(message, "")
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        let hint = if default { "(Y/n)" } else { "(y/N)" };
        loop {
            let reply = self.ask(message, hint)?;
            match reply.trim().to_ascii_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.warn("Please answer y or n")?,
            }
        }
    }

    fn warn(&mut self, message: &str) -> Result<()> {
        writeln!(self.writer, "{} {}", ">>".red().bold(), message.red())?;
        Ok(())
    }

    fn show(&mut self, message: &str) -> Result<()> {
        writeln!(self.writer, "{message}")?;
        Ok(())
    }
}
