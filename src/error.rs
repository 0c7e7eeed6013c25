//! Error types for the uploader.
//!
//! Every failure is terminal for the invocation. Internal functions return
//! `Result<_, UploadError>` and only `main` turns an error into an exit code.
//! Messages leave the underlying cause to the `source()` chain.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// One of the three scrape passes came up empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no BBC code found")]
    NoBbcCode,
    #[error("no short URI found")]
    NoShortUri,
    #[error("no full URI found")]
    NoFullUri,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("error reading file {}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not connect to {host}")]
    Connection {
        host: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP returned: {status}. Reason: {reason}")]
    ServerRejected { status: u16, reason: String },

    #[error("could not parse response")]
    Parse(#[from] ParseError),

    #[error("prompt failed")]
    Prompt(#[source] io::Error),

    #[error("could not write output")]
    Output(#[source] io::Error),

    #[error("upload interrupted")]
    Interrupted,
}

impl UploadError {
    /// Process exit status for this error. A declined prompt never reaches
    /// here; it is a successful outcome.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
