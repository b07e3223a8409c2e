//! Debug logging to a file
//!
//! `log` records and `tracing` spans land in the same file. Nothing is
//! written until [`enable_logging`] is called and a file is set with
//! [`set_log_file`]; the terminal is left to [`crate::ui`].

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::{LazyLock, OnceLock};
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, MakeWriter, format::FmtSpan},
    layer::SubscriberExt,
};

const DEFAULT_FILTER: &str = "cz_pair=debug,warn";
const OWN_TARGET: &str = "cz_pair";

#[derive(Default)]
struct LogState {
    enabled: bool,
    verbose: bool,
    file: Option<File>,
}

impl LogState {
    fn write_line(&mut self, bytes: &[u8]) {
        if !self.enabled {
            return;
        }
        if let Some(file) = self.file.as_mut() {
            let _ = file.write_all(bytes);
            let _ = file.flush();
        }
    }
}

static STATE: LazyLock<Mutex<LogState>> = LazyLock::new(|| Mutex::new(LogState::default()));

struct FileLogger;

static LOGGER: FileLogger = FileLogger;

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        let state = STATE.lock();
        if !state.enabled {
            return false;
        }

        // other crates only report problems unless verbose
        if metadata.target().starts_with(OWN_TARGET) || state.verbose {
            metadata.level() <= Level::Debug
        } else {
            metadata.level() <= Level::Warn
        }
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!(
            "{} {} [{}] - {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        );
        STATE.lock().write_line(line.as_bytes());
    }

    fn flush(&self) {}
}

/// Feeds `tracing` output (commit, edit and hook spans with timings) into the log file
#[derive(Clone, Copy)]
struct SpanWriter;

impl Write for SpanWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        STATE.lock().write_line(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SpanWriter {
    type Writer = SpanWriter;

    fn make_writer(&'a self) -> Self::Writer {
        *self
    }
}

/// Installs the `log` backend and the `tracing` subscriber.
///
/// Safe to call more than once; later calls return the first outcome.
/// `RUST_LOG` overrides the default `tracing` filter, and `CZ_PAIR_VERBOSE`
/// lets other crates' debug records through.
pub fn init() -> anyhow::Result<()> {
    static INIT_RESULT: OnceLock<Result<(), String>> = OnceLock::new();

    INIT_RESULT
        .get_or_init(install)
        .clone()
        .map_err(anyhow::Error::msg)
}

fn install() -> Result<(), String> {
    if std::env::var_os("CZ_PAIR_VERBOSE").is_some() {
        set_verbose_logging(true);
    }

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let fmt_layer = fmt::Layer::new()
        .with_ansi(false)
        .with_target(true)
        .with_timer(fmt::time::ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string()))
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(SpanWriter);

    // set_global_default leaves the `log` facade free for FileLogger
    tracing::subscriber::set_global_default(Registry::default().with(env_filter).with(fmt_layer))
        .map_err(|e| format!("Failed to install tracing subscriber: {e}"))?;

    log::set_logger(&LOGGER).map_err(|e| format!("Failed to install logger: {e}"))?;
    log::set_max_level(LevelFilter::Debug);
    Ok(())
}

pub fn enable_logging() {
    STATE.lock().enabled = true;
}

pub fn disable_logging() {
    STATE.lock().enabled = false;
}

pub fn set_verbose_logging(enabled: bool) {
    STATE.lock().verbose = enabled;
}

/// Appends to `file_path`, creating it if needed
pub fn set_log_file(file_path: &str) -> io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file_path)?;

    STATE.lock().file = Some(file);
    Ok(())
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}
