use crate::git::commit::{self, CommitResult};
use crate::git::utils::is_inside_work_tree;
use crate::log_debug;
use anyhow::{Context as AnyhowContext, Result, anyhow};
use git2::Repository;
use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// A local Git repository the formatted message is committed into
#[derive(Debug, Clone)]
pub struct GitRepo {
    repo_path: PathBuf,
}

impl GitRepo {
    /// Creates a new `GitRepo` for the repository at `repo_path`.
    ///
    /// The path is not opened until an operation needs it.
    pub fn new(repo_path: &Path) -> Result<Self> {
        Ok(Self {
            repo_path: repo_path.to_path_buf(),
        })
    }

    /// Finds the repository containing the current directory
    pub fn from_current_dir() -> Result<Self> {
        let current_dir = env::current_dir()?;
        Self::discover(&current_dir)
    }

    /// Finds the repository containing `path`, walking up parent directories
    pub fn discover(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path)
            .with_context(|| format!("No Git repository found at {}", path.display()))?;
        let workdir = repo
            .workdir()
            .context("Bare repositories are not supported")?;

        log_debug!("Discovered repository at {:?}", workdir);
        Self::new(workdir)
    }

    /// Open the repository at the stored path
    pub fn open_repo(&self) -> Result<Repository, git2::Error> {
        Repository::open(&self.repo_path)
    }

    /// Returns the repository path
    pub fn repo_path(&self) -> &PathBuf {
        &self.repo_path
    }

    /// Executes the Git hook `hook_name` if the repository has one installed.
    ///
    /// Hook output is forwarded to this process's stdout and stderr.
    pub fn execute_hook(&self, hook_name: &str) -> Result<()> {
        let _span = tracing::info_span!("hook", name = hook_name).entered();
        let repo = self.open_repo()?;
        let hook_path = repo.path().join("hooks").join(hook_name);

        if !hook_path.exists() {
            log_debug!("Hook '{}' not found at {:?}", hook_name, hook_path);
            return Ok(());
        }

        log_debug!("Executing hook: {} ({:?})", hook_name, hook_path);

        let repo_workdir = repo
            .workdir()
            .context("Repository has no working directory")?;

        let mut command = Command::new(&hook_path);
        command
            .current_dir(repo_workdir) // hooks run from the top level, not .git
            .env("GIT_DIR", repo.path())
            .env("GIT_WORK_TREE", repo_workdir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command
            .spawn()
            .with_context(|| format!("Failed to run hook '{hook_name}'"))?;

        let mut stdout = child.stdout.take().context("Could not get stdout")?;
        let mut stderr = child.stderr.take().context("Could not get stderr")?;

        let out = std::thread::spawn(move || std::io::copy(&mut stdout, &mut std::io::stdout()));
        let err = std::thread::spawn(move || std::io::copy(&mut stderr, &mut std::io::stderr()));

        let status = child.wait()?;
        let _ = out.join();
        let _ = err.join();

        if !status.success() {
            return Err(anyhow!(
                "Hook '{}' failed with exit code: {:?}",
                hook_name,
                status.code()
            ));
        }

        log_debug!("Hook '{}' executed successfully", hook_name);
        Ok(())
    }

    /// Whether anything is staged for the next commit
    pub fn has_staged_changes(&self) -> Result<bool> {
        let repo = self.open_repo()?;
        commit::has_staged_changes(&repo)
    }

    /// Commits the staged index with `message`
    pub fn commit(&self, message: &str) -> Result<CommitResult> {
        let repo = self.open_repo()?;
        commit::commit(&repo, message)
    }

    /// Runs `pre-commit`, commits, then runs `post-commit`.
    ///
    /// A failing `post-commit` hook is logged but does not undo the commit.
    pub fn commit_and_verify(&self, message: &str) -> Result<CommitResult> {
        self.execute_hook("pre-commit")?;

        let result = self.commit(message)?;

        if let Err(e) = self.execute_hook("post-commit") {
            log_debug!("Post-commit hook failed: {}", e);
        }

        Ok(result)
    }

    /// Get the root directory of the repository containing the current directory
    pub fn get_repo_root() -> Result<PathBuf> {
        if !is_inside_work_tree()? {
            return Err(anyhow!(
                "Not in a Git repository. Please run this command from within a Git repository."
            ));
        }

        let repo = Self::from_current_dir()?;
        Ok(repo.repo_path)
    }
}
