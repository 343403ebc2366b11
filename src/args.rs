//! Command line arguments

use std::path::PathBuf;

use clap::Parser;

#[cfg(test)]
mod test;

#[derive(Debug, Clone, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// JSON file that keeps scores and the game in progress. Without one, nothing is saved.
    #[arg(short, long)]
    pub store: Option<PathBuf>,

    /// JSON array of nation names to play with, in place of the built-in list.
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,

    /// The reserved guest identity, whose scores are never kept.
    #[arg(short, long, default_value = "Guest")]
    pub guest: String,

    /// Seed for the computer's choices.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Print replies as JSON.
    #[arg(long)]
    pub json: bool,
}
