// Entrypoint for the uploader.
// - Keeps `main` small: set up logging and Ctrl-C, then hand the file to
//   `ui::run_upload` with the real HTTP transport and terminal prompt.
// - Every failure comes back here as a value and is mapped to exit status 1.

use std::io;
use std::process;

use anyhow::Context;
use clap::Parser;
use omup::api::HttpTransport;
use omup::cli::Args;
use omup::error::UploadError;
use omup::logging;
use omup::ui::{run_upload, Outcome, TerminalPrompter};

fn run(args: &Args) -> anyhow::Result<Outcome> {
    logging::initialize(args.verbose).context("Failed to initialize logging")?;

    // Blocking reads and the HTTP exchange can't be unwound from a signal
    // handler; report and exit, the OS closes the socket.
    ctrlc::set_handler(|| {
        eprintln!("Error: {}", UploadError::Interrupted);
        process::exit(UploadError::Interrupted.exit_code());
    })
    .context("Failed to install interrupt handler")?;

    let transport = HttpTransport::default();
    let outcome = run_upload(
        &args.file,
        &args.options(),
        &transport,
        &mut TerminalPrompter,
        &mut io::stdout().lock(),
    )?;
    Ok(outcome)
}

fn main() {
    let args = Args::parse();

    match run(&args) {
        Ok(_) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            let code = error
                .downcast_ref::<UploadError>()
                .map_or(1, UploadError::exit_code);
            process::exit(code);
        }
    }
}
