//! Link recovery from the upload result page.
//!
//! The service answers with an HTML page meant for people, not programs, so
//! the links are pulled out with three dependent pattern passes:
//!
//! 1. the BBC link tag (`[url=...]...[/url]`), matched greedily up to the
//!    last `[/url]` in the page;
//! 2. the short URI inside that tag, up to the first `]`;
//! 3. the full URI: the `href` whose value contains `/<file id>/` plus more
//!    path, where the file id is the last segment of the short URI.
//!
//! The page truncates file names in anchor text but keeps the real path in
//! the `href`, which is why step 3 goes back to the page instead of trusting
//! the short URI. Any failed pass aborts the whole scrape.

use std::sync::OnceLock;

use log::debug;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;

use crate::error::ParseError;

/// Everything except unreserved characters and `/` gets escaped.
const PATH_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

/// Links recovered from one upload response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedLinks {
    pub bbc_code: String,
    pub short_uri: String,
    pub full_uri: String,
}

fn bbc_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)\[url=.*\[/url\]").expect("valid BBC pattern"))
}

fn short_uri_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)^\[url=(?P<uri>.*?)\].*\[/url\]").expect("valid short URI pattern")
    })
}

/// Greedy match from the first `[url=` to the last `[/url]`.
pub fn extract_bbc(page: &str) -> Result<&str, ParseError> {
    bbc_pattern()
        .find(page)
        .map(|m| m.as_str())
        .ok_or(ParseError::NoBbcCode)
}

/// The target of the BBC tag: everything between `[url=` and the first `]`.
pub fn extract_short_uri(bbc: &str) -> Result<&str, ParseError> {
    short_uri_pattern()
        .captures(bbc)
        .and_then(|caps| caps.name("uri"))
        .map(|m| m.as_str())
        .ok_or(ParseError::NoShortUri)
}

/// Last non-empty path segment of the short URI.
pub fn file_id(short_uri: &str) -> Option<&str> {
    short_uri
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
}

/// Find the anchor pointing at `/<id>/...` and make it absolute under
/// `base_url` (e.g. `http://ompldr.org`).
pub fn extract_full_uri(page: &str, short_uri: &str, base_url: &str) -> Result<String, ParseError> {
    let id = file_id(short_uri).ok_or(ParseError::NoFullUri)?;
    let pattern = format!(r#"href="(?P<href>[^"]*?/{}/[^"]+?)""#, regex::escape(id));
    let href_re = Regex::new(&pattern).map_err(|_| ParseError::NoFullUri)?;

    let href = href_re
        .captures(page)
        .and_then(|caps| caps.name("href"))
        .map(|m| m.as_str())
        .ok_or(ParseError::NoFullUri)?;
    debug!("file id {} resolved to href {}", id, href);

    Ok(format!("{}{}", base_url, utf8_percent_encode(href, PATH_ESCAPE)))
}

/// Run all three passes over `page`.
pub fn scrape(page: &str, base_url: &str) -> Result<ScrapedLinks, ParseError> {
    let bbc_code = extract_bbc(page)?;
    let short_uri = extract_short_uri(bbc_code)?;
    let full_uri = extract_full_uri(page, short_uri, base_url)?;

    Ok(ScrapedLinks {
        bbc_code: bbc_code.to_string(),
        short_uri: short_uri.to_string(),
        full_uri,
    })
}
