// Upload flow: optional confirmation prompt, read + encode the file, send it,
// scrape the result page and print the link(s). Terminal bits (`dialoguer`
// prompt, `indicatif` spinner) live here; everything else is delegated.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;
use std::time::Duration;

use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};

use crate::api::Transport;
use crate::error::UploadError;
use crate::multipart::UploadRequest;
use crate::scrape::{scrape, ScrapedLinks};

/// Source of the y/n answer before an upload.
pub trait Prompter {
    fn ask(&mut self, question: &str) -> io::Result<String>;
}

/// Asks with `dialoguer` when stdin is a terminal, otherwise reads one
/// line from stdin so a piped answer works.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            Input::<String>::new()
                .with_prompt(question)
                .allow_empty(true)
                .interact_text()
        } else {
            read_answer(question, &mut stdin.lock(), &mut io::stderr())
        }
    }
}

/// Write `question` to `prompt_out` and read one line from `input`. End of
/// input reads as an empty answer.
pub fn read_answer<R, W>(question: &str, input: &mut R, prompt_out: &mut W) -> io::Result<String>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    write!(prompt_out, "{} ", question)?;
    prompt_out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line)
}

/// `y` or `yes` in any case; anything else is a no. Only the line
/// terminator is stripped, so `" y"` is a no.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim_end_matches(['\r', '\n']);
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Flags that shape one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub prompt: bool,
    pub short: bool,
    pub bbc: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Uploaded(ScrapedLinks),
    /// The user said no at the prompt. Nothing was read or sent.
    Declined,
}

/// Lines printed for a successful upload.
pub fn render_output(links: &ScrapedLinks, options: &Options) -> Vec<String> {
    let mut lines = Vec::with_capacity(2);
    // The scraped href already ends in the real file name, so the full URI
    // is printed as is rather than with the base name appended again.
    if options.short {
        lines.push(links.short_uri.clone());
    } else {
        lines.push(links.full_uri.clone());
    }
    if options.bbc {
        lines.push(format!("BBC code: {}", links.bbc_code));
    }
    lines
}

/// Run one upload end to end. Output is written only once every scrape
/// step has succeeded.
pub fn run_upload<T, P, W>(
    path: &Path,
    options: &Options,
    transport: &T,
    prompter: &mut P,
    out: &mut W,
) -> Result<Outcome, UploadError>
where
    T: Transport + ?Sized,
    P: Prompter + ?Sized,
    W: Write + ?Sized,
{
    if options.prompt {
        let question = format!(
            "Upload '{}' to {}? [y/n]",
            path.display(),
            transport.endpoint().host
        );
        let answer = prompter.ask(&question).map_err(UploadError::Prompt)?;
        if !is_affirmative(&answer) {
            info!("upload of {} declined", path.display());
            return Ok(Outcome::Declined);
        }
    }

    let request = UploadRequest::from_path(path)?;
    let form = request.encode();
    debug!(
        "encoded {} as {} ({} byte body)",
        request.file_name,
        request.mime,
        form.body.len()
    );

    let spinner = upload_spinner(&request.file_name);
    let response = transport.post(&form);
    spinner.finish_and_clear();
    let response = response?;

    let links = scrape(&response.body, &transport.endpoint().base_url())?;
    for line in render_output(&links, options) {
        writeln!(out, "{}", line).map_err(UploadError::Output)?;
    }
    out.flush().map_err(UploadError::Output)?;

    Ok(Outcome::Uploaded(links))
}

// Draws on stderr and hides itself when stderr is not a terminal.
fn upload_spinner(file_name: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Uploading {}...", file_name));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
