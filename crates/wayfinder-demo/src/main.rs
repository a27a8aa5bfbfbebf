#![forbid(unsafe_code)]

//! Wayfinder demo binary entry point.

use std::io;

use tracing::warn;
use wayfinder::RuntimeSettings;
use wayfinder_demo::cli;

fn main() {
    let opts = cli::Opts::parse();
    wayfinder_core::logging::init("wayfinder_runtime=info,wayfinder_demo=info");

    let (settings, diagnostics) = RuntimeSettings::from_env();
    for diagnostic in &diagnostics {
        warn!(%diagnostic, "ignoring invalid setting");
    }

    let stdout = io::stdout();
    match wayfinder_demo::run(&opts, settings, &mut stdout.lock()) {
        Ok(summary) => {
            if summary.outcome == wayfinder_demo::Outcome::Unfinished {
                std::process::exit(2);
            }
        }
        Err(e) => {
            eprintln!("Demo error: {e}");
            std::process::exit(1);
        }
    }
}
