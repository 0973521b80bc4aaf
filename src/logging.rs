//! Log output for the `microbe-web` binary.
//!
//! Library code only emits `tracing` events; this module decides where they go. Stdout is
//! left to the selection report and feeding outcomes, so console logs go to stderr.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use microbe_web::error::Result;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::cli::Cli;

#[derive(Debug, Clone, PartialEq)]
pub struct LogSettings {
    pub level: LevelFilter,
    pub file: Option<PathBuf>,
}

impl LogSettings {
    pub fn from_cli(cli: &Cli) -> LogSettings {
        let level = match (cli.quiet, cli.verbose) {
            (true, _) => LevelFilter::OFF,
            (false, 0) => LevelFilter::WARN,
            (false, 1) => LevelFilter::INFO,
            (false, 2) => LevelFilter::DEBUG,
            (false, _) => LevelFilter::TRACE,
        };
        LogSettings { level, file: cli.log_file.clone() }
    }

    /// Installs the global subscriber. Fails if the log file cannot be created.
    pub fn install(&self) -> Result<()> {
        // the file keeps targets so search and feeding events can be told apart
        let file_layer = match &self.file {
            Some(path) => Some(
                fmt::layer()
                    .with_writer(Mutex::new(File::create(path)?))
                    .with_ansi(false)
                    .with_target(true),
            ),
            None => None,
        };

        tracing_subscriber::registry()
            .with(self.level)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false).compact())
            .with(file_layer)
            .init();
        Ok(())
    }
}
