//! Command-line arguments.
//!
//! ```bash
//! omup picture.png
//! omup -p -b notes.txt
//! omup --short archive.tar.gz
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::ui::Options;

#[derive(Parser, Debug)]
#[command(
    name = "omup",
    version,
    about = "Upload a file to omploader from the command line.",
    disable_version_flag = true
)]
pub struct Args {
    /// File to upload
    pub file: PathBuf,

    /// Prompt before upload
    #[arg(short, long)]
    pub prompt: bool,

    /// Print the short URI instead of the full one
    #[arg(short, long)]
    pub short: bool,

    /// Also print the BBC code
    #[arg(short, long)]
    pub bbc: bool,

    /// Log progress to stderr
    #[arg(long)]
    pub verbose: bool,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,
}

impl Args {
    pub fn options(&self) -> Options {
        Options {
            prompt: self.prompt,
            short: self.short,
            bbc: self.bbc,
        }
    }
}
