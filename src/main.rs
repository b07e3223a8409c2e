use cz_pair::{cli, logger, ui};

fn main() {
    if let Err(e) = logger::init() {
        eprintln!("Failed to initialize logging: {e}");
    }

    if let Err(e) = cli::main() {
        cz_pair::log_error!("{e:#}");
        ui::print_error(&format!("Error: {e:#}"));
        std::process::exit(1);
    }
}
