//! Logger setup for the binary.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::Path;

const STDERR_PATTERN: &str = "{d(%H:%M:%S)} {h({l})} {M} - {m}{n}";

/// Console-only config used when no log4rs file is available.
///
/// Logs go to stderr so stdout only carries the report.
pub fn fallback_config(level: LevelFilter) -> Result<Config, Box<dyn Error>> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(STDERR_PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    Ok(config)
}

/// Initialize log4rs from `config_file`, or from [`fallback_config`] if the
/// file is missing or unreadable.
pub fn init(config_file: &Path) -> Result<(), Box<dyn Error>> {
    if config_file.exists() {
        match log4rs::init_file(config_file, Default::default()) {
            Ok(()) => {
                log::debug!("Logging configured from {}", config_file.display());
                return Ok(());
            }
            Err(e) => eprintln!("Error reading {}: {e}", config_file.display()),
        }
    }
    log4rs::init_config(fallback_config(LevelFilter::Warn)?)?;
    Ok(())
}
