// Public modules
pub mod types;
mod validators;

pub use types::*;
pub use validators::*;

use clap::Parser;
use clap::error::ErrorKind;
use std::process;

/// Parse command line arguments and validate them
///
/// Usage errors exit with status 1 after a single message; `--help` and
/// `--version` exit with status 0.
#[must_use]
pub fn args_checks() -> Args {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            process::exit(1);
        }
    };

    if let Err(e) = args.validate() {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    args
}
