//! Usage:
//!   splitlog [--config PATH] [--simple] [--root DIR] [--app NAME] <LEVEL> <MESSAGE>...
//!
//! LEVEL is one of debug, info, warn, error, exit. `exit` writes the message to
//! the err stream and terminates with status -1.

use clap::Parser;
use splitlog::cli::{Cli, run};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    run(&cli)
}
