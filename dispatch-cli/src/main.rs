//! Entry point for the `dispatch` command-line interface.
#![forbid(unsafe_code)]

use dispatch_cli::CliError;

fn main() {
    match dispatch_cli::run() {
        Ok(()) => {}
        // Clap renders help, version and usage errors itself.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("dispatch: {err}");
            std::process::exit(1);
        }
    }
}
