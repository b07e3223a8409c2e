//! Small string helpers shared by the formatters and the terminal UI

use textwrap::WordSeparator;
use textwrap::core::{Fragment, Word};
use textwrap::wrap_algorithms::wrap_first_fit;

/// Column width commit message bodies are wrapped at
pub const BODY_WIDTH: usize = 72;

/// Removes leading and trailing whitespace
pub fn trim(input: &str) -> String {
    input.trim().to_string()
}

/// Concatenates `unit` with itself `count` times
pub fn repeat(unit: &str, count: usize) -> String {
    unit.repeat(count)
}

fn columns(count: usize) -> f64 {
    f64::from(u32::try_from(count).unwrap_or(u32::MAX))
}

/// A word measured in characters, the same unit the header validator counts
#[derive(Debug)]
struct CharWord<'a>(Word<'a>);

impl Fragment for CharWord<'_> {
    fn width(&self) -> f64 {
        columns(self.0.word.chars().count())
    }

    fn whitespace_width(&self) -> f64 {
        columns(self.0.whitespace.chars().count())
    }

    fn penalty_width(&self) -> f64 {
        0.0
    }
}

/// Greedy word wrap of `text` into lines of at most `width` characters.
///
/// Each line takes as many words as fit before moving on. Words are only
/// ever split at spaces: a word longer than `width` is kept whole on a line
/// of its own, and hyphenated words are never broken. Every produced line
/// is trimmed. Width is counted in characters, so double-width glyphs are
/// not given extra room.
pub fn wrap_paragraph(text: &str, width: usize) -> String {
    text.trim()
        .lines()
        .flat_map(|line| wrap_line(line, width.max(1)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let words: Vec<CharWord<'_>> = WordSeparator::AsciiSpace
        .find_words(line)
        .map(CharWord)
        .collect();

    wrap_first_fit(&words, &[columns(width)])
        .into_iter()
        .map(|line_words| {
            let mut rendered = String::new();
            for CharWord(word) in line_words {
                rendered.push_str(word.word);
                rendered.push_str(word.whitespace);
            }
            rendered.trim().to_string()
        })
        .collect()
}
