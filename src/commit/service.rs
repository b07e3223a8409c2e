//! Finalizing a formatted message: optional editing, then committing
//!
//! The service only coordinates. Editing, committing and reporting are
//! injected so the flow can be driven without a terminal or a repository.

use std::cell::RefCell;
use std::env;
use std::fs;
use std::io::{self, Write};
use std::process::{Command, ExitStatus};

use anyhow::Result;
use colored::Colorize;
use strum_macros::{Display, EnumIter};
use thiserror::Error;

use crate::git::{CommitResult, GitRepo};
use crate::{log_debug, log_info, log_warn, ui};

/// What to do with the previewed message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Action {
    #[strum(to_string = "Commit")]
    Commit,
    #[strum(to_string = "Edit Message")]
    Edit,
    #[strum(to_string = "Cancel Commit")]
    Cancel,
}

/// How a finalize request ended
#[derive(Debug, Clone)]
pub enum CommitOutcome {
    Committed {
        message: String,
        result: CommitResult,
    },
    Cancelled,
    /// The editor failed; nothing was committed
    EditorFailed,
}

#[derive(Debug, Error)]
pub enum EditError {
    #[error("No editor configured")]
    NoEditor,
    #[error("Failed to launch editor '{command}': {source}")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("Editor exited with {status}")]
    Failed { status: ExitStatus },
    #[error("Failed to prepare message file: {0}")]
    Io(#[from] io::Error),
}

/// Lets the user revise a message
pub trait EditService {
    fn edit(&self, message: &str) -> Result<String, EditError>;
}

/// Receives the final message
pub trait CommitSink {
    fn commit(&self, message: &str) -> Result<CommitResult>;
}

/// Where user-facing diagnostics go
pub trait DiagnosticsSink {
    fn warning(&self, message: &str);
    fn debug(&self, message: &str);
    /// Hands over text the user must be able to recover; never suppressed
    fn preserve(&self, message: &str);
}

const DEFAULT_EDITOR: &str = "vi";

/// Picks the editor command: explicit override, then `$VISUAL`, then `$EDITOR`, then `vi`.
///
/// Blank candidates are skipped.
pub fn resolve_editor_command(override_command: Option<&str>) -> String {
    first_editor_command([
        override_command.map(str::to_string),
        env::var("VISUAL").ok(),
        env::var("EDITOR").ok(),
    ])
}

fn first_editor_command(candidates: impl IntoIterator<Item = Option<String>>) -> String {
    candidates
        .into_iter()
        .flatten()
        .find(|command| !command.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
}

/// Edits the message in an external editor through a temporary file
#[derive(Debug, Clone)]
pub struct ExternalEditor {
    command: String,
}

impl ExternalEditor {
    /// `command` may carry arguments, e.g. `"code --wait"`
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl EditService for ExternalEditor {
    fn edit(&self, message: &str) -> Result<String, EditError> {
        let _span = tracing::info_span!("edit", command = %self.command).entered();
        let mut parts = self.command.split_whitespace();
        let program = parts.next().ok_or(EditError::NoEditor)?;

        let mut file = tempfile::Builder::new()
            .prefix("COMMIT_EDITMSG-")
            .suffix(".txt")
            .tempfile()?;
        file.write_all(message.as_bytes())?;
        file.flush()?;

        log_debug!("Launching editor '{}' on {:?}", self.command, file.path());

        // blocks until the editor exits
        let status = Command::new(program)
            .args(parts)
            .arg(file.path())
            .status()
            .map_err(|source| EditError::Launch {
                command: self.command.clone(),
                source,
            })?;

        tracing::debug!(%status, "Editor exited");
        if !status.success() {
            return Err(EditError::Failed { status });
        }

        Ok(fs::read_to_string(file.path())?)
    }
}

/// Commits into a local repository, optionally running commit hooks
#[derive(Debug, Clone)]
pub struct GitCommitSink {
    repo: GitRepo,
    verify: bool,
}

impl GitCommitSink {
    pub fn new(repo: GitRepo, verify: bool) -> Self {
        Self { repo, verify }
    }
}

impl CommitSink for GitCommitSink {
    fn commit(&self, message: &str) -> Result<CommitResult> {
        let _span = tracing::info_span!("git_commit", verify = self.verify).entered();
        log_debug!("Performing commit with message: {}", message);

        let result = if self.verify {
            self.repo.commit_and_verify(message)?
        } else {
            log_debug!("Skipping commit hooks (verify=false)");
            self.repo.commit(message)?
        };

        tracing::info!(
            hash = %result.commit_hash,
            files = result.files_changed,
            "Commit created"
        );
        Ok(result)
    }
}

/// Reports through the log and the terminal.
///
/// Preserved text goes to `recovery` (stderr by default) even in quiet mode
/// and with logging off.
pub struct LogDiagnostics<W: Write = io::Stderr> {
    recovery: RefCell<W>,
}

impl LogDiagnostics {
    pub fn new() -> Self {
        Self::with_writer(io::stderr())
    }
}

impl Default for LogDiagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> LogDiagnostics<W> {
    pub fn with_writer(recovery: W) -> Self {
        Self {
            recovery: RefCell::new(recovery),
        }
    }
}

impl<W: Write> DiagnosticsSink for LogDiagnostics<W> {
    fn warning(&self, message: &str) {
        log_warn!("{}", message);
        ui::print_warning(message);
    }

    fn debug(&self, message: &str) {
        log_debug!("{}", message);
    }

    fn preserve(&self, message: &str) {
        log_info!("{}", message);
        let mut recovery = self.recovery.borrow_mut();
        if let Err(e) = writeln!(recovery, "{}", message.yellow().bold()) {
            log_warn!("Failed to write preserved message: {}", e);
        }
        let _ = recovery.flush();
    }
}

/// Carries a formatted message through the chosen [`Action`]
pub struct CommitService {
    editor: Box<dyn EditService>,
    sink: Box<dyn CommitSink>,
    diagnostics: Box<dyn DiagnosticsSink>,
}

impl CommitService {
    pub fn new(
        editor: Box<dyn EditService>,
        sink: Box<dyn CommitSink>,
        diagnostics: Box<dyn DiagnosticsSink>,
    ) -> Self {
        Self {
            editor,
            sink,
            diagnostics,
        }
    }

    /// Applies `action` to `message`.
    ///
    /// A failing editor aborts the commit and hands the original message to
    /// the diagnostics sink so it can be recovered by hand.
    pub fn finalize(&self, action: Action, message: &str) -> Result<CommitOutcome> {
        let _span = tracing::info_span!("finalize", %action).entered();
        self.diagnostics
            .debug(&format!("Finalizing commit message with action: {action}"));

        match action {
            Action::Commit => self.commit(message.to_string()),
            Action::Cancel => {
                self.diagnostics.warning("Commit cancelled.");
                Ok(CommitOutcome::Cancelled)
            }
            Action::Edit => match self.editor.edit(message) {
                Ok(edited) if edited.trim().is_empty() => {
                    self.diagnostics
                        .warning("Aborting commit due to empty commit message.");
                    Ok(CommitOutcome::Cancelled)
                }
                Ok(edited) => self.commit(edited),
                Err(e) => {
                    self.diagnostics.debug(&format!("Editor failed: {e}"));
                    self.diagnostics.preserve(&format!(
                        "Editor returned error. Commit message was:\n{message}"
                    ));
                    Ok(CommitOutcome::EditorFailed)
                }
            },
        }
    }

    fn commit(&self, message: String) -> Result<CommitOutcome> {
        let result = self.sink.commit(&message)?;
        Ok(CommitOutcome::Committed { message, result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_editor_candidates_are_skipped() {
        let blank_override = [
            Some(String::new()),
            Some("  ".to_string()),
            Some("nano".to_string()),
        ];
        assert_eq!(first_editor_command(blank_override), "nano");

        let from_visual = [
            None,
            Some("code --wait".to_string()),
            Some("vim".to_string()),
        ];
        assert_eq!(first_editor_command(from_visual), "code --wait");

        assert_eq!(
            first_editor_command([None, Some(String::new()), None]),
            DEFAULT_EDITOR
        );
    }
}
