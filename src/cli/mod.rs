//! Command-line front end: log one message through the global logger.

use crate::config::LogConfig;
use crate::level::Level;
use crate::{facade, internal};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Level argument. `exit` logs the message and terminates with status -1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliLevel {
    Debug,
    Info,
    Warn,
    Error,
    Exit,
}

impl From<CliLevel> for Level {
    fn from(level: CliLevel) -> Self {
        match level {
            CliLevel::Debug => Self::Debug,
            CliLevel::Info => Self::Info,
            CliLevel::Warn => Self::Warn,
            CliLevel::Error => Self::Error,
            CliLevel::Exit => Self::Error,
        }
    }
}

/// splitlog - Write a message to the split debug/err log files.
#[derive(Debug, Parser)]
#[command(
    name = "splitlog",
    version,
    about = "Write a message to the split debug/err log files"
)]
pub struct Cli {
    /// Config file (default: <config dir>/splitlog/splitlog.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Write every level to debug.log
    #[arg(long)]
    pub simple: bool,
    /// Log root directory, replacing /var/log or /tmp
    #[arg(long, value_name = "DIR")]
    pub root: Option<String>,
    /// Application directory name
    #[arg(long, value_name = "NAME")]
    pub app: Option<String>,
    /// Log level
    #[arg(value_enum)]
    pub level: CliLevel,
    /// Message words, joined by single spaces
    #[arg(required = true, num_args = 1..)]
    pub message: Vec<String>,
}

impl Cli {
    /// Loads the config file and applies command-line overrides on top.
    ///
    /// # Errors
    /// Propagates config loading failures.
    pub fn load_config(&self) -> Result<LogConfig, crate::Error> {
        let mut config = match &self.config {
            Some(path) => LogConfig::load_from(path)?,
            None => LogConfig::load()?,
        };
        if self.simple {
            config.simple = true;
        }
        if let Some(root) = &self.root {
            config.root_dir = Some(root.clone());
        }
        if let Some(app) = &self.app {
            config.app_name.clone_from(app);
        }
        Ok(config)
    }

    #[must_use]
    pub fn message(&self) -> String {
        self.message.join(" ")
    }
}

/// Runs a parsed command line. Does not return for `exit`.
pub fn run(cli: &Cli) -> ExitCode {
    let config = match cli.load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = facade::init_logger(&config) {
        eprintln!("Error initializing logger: {e}");
        return ExitCode::FAILURE;
    }

    let message = cli.message();
    if cli.level == CliLevel::Exit {
        facade::exit(message);
    }

    match facade::log(cli.level.into(), message).and_then(|()| facade::flush()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            internal::error("CLI", &format!("Log failed: {e}"));
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
