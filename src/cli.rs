use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Pick the best microbe treatment group for a site, or step through feeding events in a food web."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search every group of microbes for the highest treatment effectiveness score.
    Select(SelectArgs),
    /// Apply feeding events to a food web, one predator name per input line.
    Feed(FeedArgs),
}

#[derive(Args, Debug)]
pub struct SelectArgs {
    /// JSON file with the candidate microbes.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub microbes: PathBuf,

    /// TOML run configuration (site profile, group size, scoring rules).
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the number of microbes per group.
    #[arg(short, long, value_name = "INT")]
    pub group_size: Option<usize>,

    /// Award points when no member carries an undesirable trait.
    #[arg(long)]
    pub undesired_trait_check: bool,

    /// Print the score of every combination before the winner.
    #[arg(long)]
    pub all: bool,
}

#[derive(Args, Debug)]
pub struct FeedArgs {
    /// JSON file with the species of the food web.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub species: PathBuf,

    /// Read commands from a file instead of standard input.
    #[arg(long, value_name = "PATH")]
    pub commands: Option<PathBuf>,
}
