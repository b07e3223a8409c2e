#![allow(dead_code)]

use anyhow::{Result, bail};
use cz_pair::git::GitRepo;
use cz_pair::prompt::{Choice, PromptIo};
use git2::Repository;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Creates a temporary Git repository with an initial commit for testing
pub fn setup_git_repo() -> (TempDir, GitRepo) {
    let (temp_dir, git_repo) = setup_unborn_repo();
    let repo = Repository::open(temp_dir.path()).expect("Failed to open repository");

    // Create and commit an initial file
    fs::write(temp_dir.path().join("initial.txt"), "Initial content")
        .expect("Failed to write initial file");

    let mut index = repo.index().expect("Failed to get repository index");
    index
        .add_path(Path::new("initial.txt"))
        .expect("Failed to add file to index");
    index.write().expect("Failed to write index");

    let tree_id = index.write_tree().expect("Failed to write tree");
    let tree = repo.find_tree(tree_id).expect("Failed to find tree");
    let signature = repo.signature().expect("Failed to create signature");
    repo.commit(
        Some("HEAD"),
        &signature,
        &signature,
        "Initial commit",
        &tree,
        &[],
    )
    .expect("Failed to commit");

    (temp_dir, git_repo)
}

/// Creates a temporary Git repository without any commit
pub fn setup_unborn_repo() -> (TempDir, GitRepo) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let repo = Repository::init(temp_dir.path()).expect("Failed to initialize repository");

    // Configure git user
    let mut config = repo.config().expect("Failed to get repository config");
    config
        .set_str("user.name", "Test User")
        .expect("Failed to set user name");
    config
        .set_str("user.email", "test@example.com")
        .expect("Failed to set user email");

    let git_repo = GitRepo::new(temp_dir.path()).expect("Failed to create GitRepo");
    (temp_dir, git_repo)
}

/// Writes `content` to `name` in the work tree and stages it
pub fn stage_file(temp_dir: &TempDir, name: &str, content: &str) -> Result<()> {
    fs::write(temp_dir.path().join(name), content)?;
    let repo = Repository::open(temp_dir.path())?;
    let mut index = repo.index()?;
    index.add_path(Path::new(name))?;
    index.write()?;
    Ok(())
}

/// Installs an executable shell hook that echoes `message` and exits 0 or 1
#[cfg(unix)]
pub fn create_hook(temp_dir: &TempDir, name: &str, message: &str, fail: bool) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let hooks_dir = temp_dir.path().join(".git").join("hooks");
    fs::create_dir_all(&hooks_dir)?;
    let hook_path = hooks_dir.join(name);
    let exit_code = i32::from(fail);
    fs::write(
        &hook_path,
        format!("#!/bin/sh\necho \"{message}\"\nexit {exit_code}\n"),
    )?;
    fs::set_permissions(&hook_path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

/// Message of the commit `HEAD` points to
pub fn head_message(temp_dir: &TempDir) -> Result<String> {
    let repo = Repository::open(temp_dir.path())?;
    let commit = repo.head()?.peel_to_commit()?;
    Ok(commit.message().unwrap_or_default().to_string())
}

/// A `PromptIo` that replays canned replies and records what it was asked
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    replies: VecDeque<String>,
    pub asked: Vec<String>,
    pub warnings: Vec<String>,
    pub shown: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<'a>(replies: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            replies: replies.into_iter().map(str::to_string).collect(),
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.replies.len()
    }

    fn next_reply(&mut self, message: &str) -> Result<String> {
        self.asked.push(message.to_string());
        match self.replies.pop_front() {
            Some(reply) => Ok(reply),
            None => bail!("No scripted reply for: {message}"),
        }
    }
}

impl PromptIo for ScriptedPrompt {
    fn select(&mut self, message: &str, choices: &[Choice]) -> Result<usize> {
        let reply = self.next_reply(message)?;
        match choices.iter().position(|choice| choice.matches(&reply)) {
            Some(index) => Ok(index),
            None => bail!("Scripted reply '{reply}' matches no choice"),
        }
    }

    fn input(&mut self, message: &str) -> Result<String> {
        self.next_reply(message)
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        let reply = self.next_reply(message)?;
        Ok(match reply.as_str() {
            "y" => true,
            "n" => false,
            _ => default,
        })
    }

    fn warn(&mut self, message: &str) -> Result<()> {
        self.warnings.push(message.to_string());
        Ok(())
    }

    fn show(&mut self, message: &str) -> Result<()> {
        self.shown.push(message.to_string());
        Ok(())
    }
}
