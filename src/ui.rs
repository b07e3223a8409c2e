use colored::Colorize;
use parking_lot::Mutex;

use crate::text;

// RGB tuples for use with `colored`'s `.truecolor()`
pub mod rgb {
    pub const ACCENT: (u8, u8, u8) = (225, 53, 255);
    pub const HIGHLIGHT: (u8, u8, u8) = (128, 255, 234);
    pub const DIM: (u8, u8, u8) = (180, 180, 190);
    pub const SEPARATOR: (u8, u8, u8) = (60, 60, 70);
}

const BORDER_WIDTH: usize = 50;

/// Track quiet mode state
static QUIET_MODE: std::sync::LazyLock<Mutex<bool>> =
    std::sync::LazyLock::new(|| Mutex::new(false));

/// Enable or disable quiet mode
pub fn set_quiet_mode(enabled: bool) {
    let mut quiet_mode = QUIET_MODE.lock();
    *quiet_mode = enabled;
}

/// Check if quiet mode is enabled
pub fn is_quiet_mode() -> bool {
    *QUIET_MODE.lock()
}

pub fn print_info(message: &str) {
    if !is_quiet_mode() {
        println!("{}", message.cyan().bold());
    }
}

pub fn print_warning(message: &str) {
    if !is_quiet_mode() {
        println!("{}", message.yellow().bold());
    }
}

pub fn print_error(message: &str) {
    // Always print errors, even in quiet mode
    eprintln!("{}", message.red().bold());
}

pub fn print_success(message: &str) {
    if !is_quiet_mode() {
        println!("{}", message.green().bold());
    }
}

pub fn print_version(version: &str) {
    if !is_quiet_mode() {
        println!(
            "{} {} {}",
            "cz-pair".magenta().bold(),
            "version".cyan(),
            version.green()
        );
    }
}

/// Print content with decorative borders
pub fn print_bordered_content(content: &str) {
    if !is_quiet_mode() {
        let (r, g, b) = rgb::ACCENT;
        let border = text::repeat("━", BORDER_WIDTH);
        println!("{}", border.truecolor(r, g, b));
        println!("{content}");
        println!("{}", border.truecolor(r, g, b));
    }
}

/// Print a section title followed by a dimmed rule
pub fn print_section_header(name: &str) {
    if !is_quiet_mode() {
        let (r, g, b) = rgb::ACCENT;
        let (sr, sg, sb) = rgb::SEPARATOR;
        println!(
            "{} {} {}",
            "─".truecolor(r, g, b),
            name.truecolor(r, g, b).bold(),
            text::repeat("─", 30 - name.chars().count().min(28)).truecolor(sr, sg, sb)
        );
    }
}

/// Print a right-aligned label and its value
pub fn print_config_row(label: &str, value: &str, highlight: bool) {
    if !is_quiet_mode() {
        let (dr, dg, db) = rgb::DIM;
        let (hr, hg, hb) = rgb::HIGHLIGHT;
        let label_styled = format!("{label:>12}").truecolor(dr, dg, db);
        let value_styled = if highlight {
            value.truecolor(hr, hg, hb).bold()
        } else {
            value.truecolor(dr, dg, db)
        };
        println!("{label_styled}  {value_styled}");
    }
}

/// Print an empty line (respects quiet mode)
pub fn print_newline() {
    if !is_quiet_mode() {
        println!();
    }
}
