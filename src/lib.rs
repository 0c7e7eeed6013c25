// Library root
// -----------
// The binary (`main.rs`) parses arguments and hands off to `ui::run_upload`.
//
// Module responsibilities:
// - `cli`: command-line flags.
// - `config`: fixed upload host/path/boundary and request timeouts.
// - `error`: the single error type threaded back to `main`.
// - `multipart`: reads the file and builds the form body.
// - `api`: sends the form over HTTP and returns the result page.
// - `scrape`: pulls the BBC code, short URI and full URI out of that page.
// - `ui`: confirmation prompt, spinner, output, and the flow tying it together.
// - `logging`: stderr logger.
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod multipart;
pub mod scrape;
pub mod ui;
