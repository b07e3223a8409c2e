use crate::commit::{
    Action, CommitOutcome, CommitService, ExternalEditor, GitCommitSink, LogDiagnostics,
    build_commit_message, format_commit_result, resolve_editor_command,
};
use crate::config::Config;
use crate::git::GitRepo;
use crate::prompt::{TerminalPrompt, choose_action, collect_answers};
use crate::types::AnswerRecord;
use crate::validate::validate_header_length;
use crate::{log_debug, ui};
use anyhow::{Context, Result};
use clap::builder::{Styles, styling::AnsiColor};
use clap::{Args, Parser, Subcommand, crate_version};
use std::fs;
use std::path::{Path, PathBuf};

const LOG_FILE: &str = "cz-pair-debug.log";

/// CLI structure defining the available commands and global arguments
#[derive(Parser)]
#[command(
    author,
    version = crate_version!(),
    about = "cz-pair: conventional commit messages with pairing credits",
    long_about = "cz-pair asks a short series of questions and assembles a conventional commit message, \
                  including breaking changes, closed issues and the people you paired with.",
    disable_version_flag = true,
    styles = get_styles(),
)]
pub struct Cli {
    /// Subcommands available for the CLI
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log debug messages to a file
    #[arg(
        short = 'l',
        long = "log",
        global = true,
        help = "Log debug messages to a file"
    )]
    pub log: bool,

    /// Specify a custom log file path
    #[arg(
        long = "log-file",
        global = true,
        help = "Specify a custom log file path"
    )]
    pub log_file: Option<String>,

    /// Suppress non-essential output
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress non-essential output"
    )]
    pub quiet: bool,

    /// Display the version
    #[arg(
        short = 'v',
        long = "version",
        global = true,
        help = "Display the version"
    )]
    pub version: bool,
}

/// Enumeration of available subcommands
#[derive(Subcommand)]
#[command(subcommand_negates_reqs = true)]
#[command(subcommand_precedence_over_arg = true)]
pub enum Commands {
    /// Build a commit message interactively and commit it
    #[command(
        about = "Build a commit message and commit it (default)",
        long_about = "Ask for the type, scope, subject, body and footer of the change, preview the \
                      assembled message, then commit, edit or cancel."
    )]
    Commit(CommitArgs),

    /// Print the message assembled from an answers file
    #[command(about = "Print the message assembled from an answers file")]
    Format {
        /// JSON or TOML file holding the answers
        #[arg(long, help = "JSON or TOML file holding the answers")]
        answers: PathBuf,
    },

    /// Show or update the configuration
    #[command(
        about = "Show or update the configuration",
        long_about = "Display the current configuration, or update the personal configuration file."
    )]
    Config {
        /// Editor command used to edit messages
        #[arg(long, help = "Editor command used to edit messages (empty to unset)")]
        editor: Option<String>,

        /// Whether to run pre-commit and post-commit hooks
        #[arg(long, help = "Run pre-commit and post-commit hooks (true/false)")]
        verify: Option<bool>,
    },
}

/// Arguments of the `commit` command
#[derive(Args, Debug, Default, Clone)]
pub struct CommitArgs {
    /// Print the message to stdout instead of committing
    #[arg(short, long, help = "Print the message to stdout instead of committing")]
    pub print: bool,

    /// Skip the verification step (pre/post commit hooks)
    #[arg(long, help = "Skip verification steps (pre/post commit hooks)")]
    pub no_verify: bool,

    /// Read the answers from a file instead of asking
    #[arg(long, help = "Read the answers from a JSON or TOML file instead of asking")]
    pub answers: Option<PathBuf>,

    /// Open the message in the editor before committing
    #[arg(long, help = "Open the message in the editor before committing")]
    pub edit: bool,
}

/// Define custom styles for Clap
fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Magenta.on_default().bold())
        .usage(AnsiColor::Cyan.on_default().bold())
        .literal(AnsiColor::Green.on_default().bold())
        .placeholder(AnsiColor::Yellow.on_default())
        .valid(AnsiColor::Blue.on_default().bold())
        .invalid(AnsiColor::Red.on_default().bold())
        .error(AnsiColor::Red.on_default().bold())
}

/// Parse the command-line arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Main function to parse arguments and handle the command
pub fn main() -> Result<()> {
    let cli = parse_args();

    if cli.version {
        ui::print_version(crate_version!());
        return Ok(());
    }

    if cli.log {
        crate::logger::enable_logging();
        let log_file = cli.log_file.as_deref().unwrap_or(LOG_FILE);
        crate::logger::set_log_file(log_file)?;

        // Load config to check for verbose logging settings
        if let Ok(config) = Config::load() {
            crate::logger::set_verbose_logging(config.verbose_logging);
            if config.verbose_logging {
                log_debug!("Verbose logging enabled - will show external library logs");
            }
        }
    } else {
        crate::logger::disable_logging();
    }

    // Set quiet mode in the UI module
    if cli.quiet {
        ui::set_quiet_mode(true);
    }

    handle_command(
        cli.command
            .unwrap_or_else(|| Commands::Commit(CommitArgs::default())),
    )
}

/// Dispatch a parsed command
pub fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Commit(args) => {
            log_debug!("Handling 'commit' command with {:?}", args);
            let config = Config::load()?;
            handle_commit(&args, &config)
        }
        Commands::Format { answers } => {
            log_debug!("Handling 'format' command with answers file {:?}", answers);
            let answers = load_answers(&answers)?;
            println!("{}", build_commit_message(&answers));
            Ok(())
        }
        Commands::Config { editor, verify } => handle_config(editor, verify),
    }
}

/// Reads an answer record from a `.toml` file, or JSON otherwise.
///
/// The record must be complete and its header must fit.
pub fn load_answers(path: &Path) -> Result<AnswerRecord> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read answers file {}", path.display()))?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let answers: AnswerRecord = if is_toml {
        toml::from_str(&content)
            .with_context(|| format!("Invalid TOML answers in {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON answers in {}", path.display()))?
    };

    answers.check()?;
    validate_header_length(
        &answers.header_text(),
        answers.change_type.tag(),
        answers.scope(),
    )?;

    log_debug!("Loaded answers from {:?}: {:?}", path, answers);
    Ok(answers)
}

fn handle_commit(args: &CommitArgs, config: &Config) -> Result<()> {
    let _span = tracing::info_span!("commit", print = args.print).entered();

    let repo = if args.print {
        None
    } else {
        let repo = GitRepo::from_current_dir()?;
        if !repo.has_staged_changes()? {
            ui::print_warning("No staged changes. Please stage your changes before committing.");
            ui::print_info("You can stage changes using 'git add <file>' or 'git add .'");
            return Ok(());
        }
        Some(repo)
    };

    let mut prompt = TerminalPrompt::stdio();
    let answers = match &args.answers {
        Some(path) => load_answers(path)?,
        None => collect_answers(&mut prompt)?,
    };
    let message = build_commit_message(&answers);
    tracing::debug!(chars = message.chars().count(), "Assembled commit message");

    let Some(repo) = repo else {
        println!("{message}");
        return Ok(());
    };

    let action = if args.edit {
        Action::Edit
    } else if args.answers.is_some() {
        Action::Commit
    } else {
        choose_action(&mut prompt, &message)?
    };

    let editor = ExternalEditor::new(resolve_editor_command(config.editor.as_deref()));
    log_debug!("Using editor '{}' for action {}", editor.command(), action);
    let verify = config.verify && !args.no_verify;
    let service = CommitService::new(
        Box::new(editor),
        Box::new(GitCommitSink::new(repo, verify)),
        Box::new(LogDiagnostics::new()),
    );

    if let CommitOutcome::Committed { message, result } = service.finalize(action, &message)? {
        ui::print_success("Commit created successfully.");
        ui::print_bordered_content(&format_commit_result(&result, &message));
    }

    Ok(())
}

/// Handle the `Config` command
fn handle_config(editor: Option<String>, verify: Option<bool>) -> Result<()> {
    log_debug!(
        "Handling 'config' command with editor: {:?}, verify: {:?}",
        editor,
        verify
    );

    let mut config = Config::load()?;

    if editor.is_some() || verify.is_some() {
        config.update(editor, verify);
        config.save()?;
        ui::print_success("Configuration updated successfully.");
        ui::print_newline();
    }

    print_configuration(&config);
    Ok(())
}

fn print_configuration(config: &Config) {
    ui::print_section_header("CZ-PAIR CONFIGURATION");
    ui::print_config_row(
        "Editor",
        &resolve_editor_command(config.editor.as_deref()),
        config.editor.is_some(),
    );
    ui::print_config_row(
        "Hooks",
        if config.verify { "enabled" } else { "disabled" },
        config.verify,
    );
    ui::print_config_row(
        "Verbose log",
        if config.verbose_logging { "on" } else { "off" },
        false,
    );
}
