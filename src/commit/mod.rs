mod format;
pub mod service;

pub use format::{build_commit_message, format_body, format_footer, format_header};
pub use service::{
    Action, CommitOutcome, CommitService, CommitSink, DiagnosticsSink, EditError, EditService,
    ExternalEditor, GitCommitSink, LogDiagnostics, resolve_editor_command,
};

use crate::git::CommitResult;
use git2::FileMode;
use std::fmt::Write;

/// Summarizes a finished commit the way `git commit` does
pub fn format_commit_result(result: &CommitResult, message: &str) -> String {
    let mut output = format!(
        "[{} {}] {}\n",
        result.branch,
        result.commit_hash,
        message.lines().next().unwrap_or("")
    );

    writeln!(
        &mut output,
        " {} file{} changed, {} insertion{}(+), {} deletion{}(-)",
        result.files_changed,
        plural(result.files_changed),
        result.insertions,
        plural(result.insertions),
        result.deletions,
        plural(result.deletions)
    )
    .expect("writing to string should never fail");

    for (file, mode) in &result.new_files {
        writeln!(
            &mut output,
            " create mode {} {}",
            format_file_mode(*mode),
            file
        )
        .expect("writing to string should never fail");
    }

    output
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

fn format_file_mode(mode: FileMode) -> &'static str {
    match mode {
        FileMode::Blob => "100644",
        FileMode::BlobExecutable => "100755",
        FileMode::Link => "120000",
        FileMode::Commit => "160000",
        FileMode::Tree => "040000",
        _ => "000000",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_commit_result() {
        let result = CommitResult {
            branch: "main".to_string(),
            commit_hash: "abc1234".to_string(),
            files_changed: 1,
            insertions: 3,
            deletions: 0,
            new_files: vec![("src/lib.rs".to_string(), FileMode::Blob)],
        };

        let output = format_commit_result(&result, "feat(index): Add x\n\nbody");
        assert_eq!(
            output,
            "[main abc1234] feat(index): Add x\n \
             1 file changed, 3 insertions(+), 0 deletions(-)\n \
             create mode 100644 src/lib.rs\n"
        );
    }
}
