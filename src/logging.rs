//! Logging setup. Everything goes to stderr so stdout only ever carries the
//! links.

use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

pub fn level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

pub fn initialize(verbose: bool) -> Result<(), log::SetLoggerError> {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .add_filter_allow_str("omup")
        .build();

    TermLogger::init(level(verbose), config, TerminalMode::Stderr, ColorChoice::Auto)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_level() {
        assert_eq!(level(false), LevelFilter::Warn);
        assert_eq!(level(true), LevelFilter::Debug);
    }
}
