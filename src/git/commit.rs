use crate::log_debug;
use anyhow::Result;
use git2::{Delta, FileMode, Repository};

/// Results from a commit operation
#[derive(Debug, Clone)]
pub struct CommitResult {
    pub branch: String,
    pub commit_hash: String,
    pub files_changed: usize,
    pub insertions: usize,
    pub deletions: usize,
    pub new_files: Vec<(String, FileMode)>,
}

/// Commits the current index to `HEAD` with `message`.
///
/// Works on a repository with no commits yet, in which case the new commit
/// has no parent.
pub fn commit(repo: &Repository, message: &str) -> Result<CommitResult> {
    let signature = repo.signature()?;
    let mut index = repo.index()?;
    let tree_id = index.write_tree()?;
    let tree = repo.find_tree(tree_id)?;

    let parent_commit = match repo.head() {
        Ok(head) => Some(head.peel_to_commit()?),
        Err(e) if e.code() == git2::ErrorCode::UnbornBranch => None,
        Err(e) => return Err(e.into()),
    };
    let parents: Vec<&git2::Commit> = parent_commit.iter().collect();

    let commit_oid = repo.commit(
        Some("HEAD"),
        &signature,
        &signature,
        message,
        &tree,
        &parents,
    )?;
    log_debug!("Created commit {}", commit_oid);

    let branch = repo.head()?.shorthand().unwrap_or("HEAD").to_string();
    let commit_hash = commit_oid.to_string().chars().take(7).collect();

    let parent_tree = parent_commit.as_ref().map(git2::Commit::tree).transpose()?;
    let diff = repo.diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?;
    let stats = diff.stats()?;

    let new_files = diff
        .deltas()
        .filter(|delta| delta.status() == Delta::Added)
        .filter_map(|delta| {
            let file = delta.new_file();
            file.path()
                .map(|path| (path.to_string_lossy().into_owned(), file.mode()))
        })
        .collect();

    Ok(CommitResult {
        branch,
        commit_hash,
        files_changed: stats.files_changed(),
        insertions: stats.insertions(),
        deletions: stats.deletions(),
        new_files,
    })
}

/// Whether the index differs from `HEAD` (or holds anything, before the first commit)
pub fn has_staged_changes(repo: &Repository) -> Result<bool> {
    let head_tree = match repo.head() {
        Ok(head) => Some(head.peel_to_tree()?),
        Err(e) if e.code() == git2::ErrorCode::UnbornBranch => None,
        Err(e) => return Err(e.into()),
    };

    let diff = repo.diff_tree_to_index(head_tree.as_ref(), None, None)?;
    Ok(diff.deltas().next().is_some())
}
