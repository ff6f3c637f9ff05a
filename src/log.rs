//! Program logging.
//!
//! Messages are written to the terminal, with warnings and errors on stderr. When running a
//! variant they are also written to log files in the output folder. The log level is taken from
//! the `ADORB_LOG_LEVEL` environment variable, then the settings file, then [`DEFAULT_LOG_LEVEL`].
use anyhow::{Context, Result, anyhow};
use chrono::Local;
use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{LevelFilter, Record};
use std::env;
use std::fmt::{Arguments, Display};
use std::fs::File;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::OnceLock;

/// A flag indicating whether the logger has been initialised
static LOGGER_INIT: OnceLock<()> = OnceLock::new();

/// The log level used if none is given in the environment or the settings file
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// The environment variable used to override the log level
const LOG_LEVEL_ENV_VAR: &str = "ADORB_LOG_LEVEL";

/// Log file for messages about the ordinary operation of the program
pub const LOG_INFO_FILE_NAME: &str = "adorb_info.log";

/// Log file for warnings and errors
pub const LOG_ERROR_FILE_NAME: &str = "adorb_error.log";

/// Messages from other crates are only shown at this level or above
const DEPENDENCY_LOG_LEVEL: LevelFilter = LevelFilter::Warn;

/// Whether the program logger has been initialised
pub fn is_logger_initialised() -> bool {
    LOGGER_INIT.get().is_some()
}

/// Choose the log level, preferring the environment over the settings file.
///
/// Level names are parsed case-insensitively.
fn resolve_log_level(from_env: Option<&str>, from_settings: Option<&str>) -> Result<LevelFilter> {
    let level = from_env.or(from_settings).unwrap_or(DEFAULT_LOG_LEVEL);
    level
        .parse()
        .map_err(|_| anyhow!("Unknown log level: {level}"))
}

/// The part of a log target worth showing, i.e. the module path within this crate
fn short_target(target: &str) -> &str {
    target
        .strip_prefix(concat!(env!("CARGO_CRATE_NAME"), "::"))
        .unwrap_or(target)
}

/// Write a message in the `[HH:MM:SS LEVEL target] message` format
fn write_log<T: Display>(out: FormatCallback, level: T, target: &str, message: &Arguments) {
    let timestamp = Local::now().format("%H:%M:%S");
    let target = short_target(target);

    out.finish(format_args!("[{timestamp} {level} {target}] {message}"));
}

/// Write a message with no colours
fn write_log_plain(out: FormatCallback, message: &Arguments, record: &Record) {
    write_log(out, record.level(), record.target(), message);
}

/// A dispatcher for a terminal stream, which only uses colour if the stream is a terminal
fn terminal_dispatch(use_colour: bool) -> Dispatch {
    let colours = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta);

    Dispatch::new().format(move |out, message, record| {
        if use_colour {
            write_log(out, colours.color(record.level()), record.target(), message);
        } else {
            write_log_plain(out, message, record);
        }
    })
}

/// Create (or truncate) a log file in the given folder
fn create_log_file(dir: &Path, file_name: &str) -> Result<File> {
    let file_path = dir.join(file_name);
    File::create(&file_path)
        .with_context(|| format!("Could not create log file {}", file_path.display()))
}

/// Initialise the program logger.
///
/// Possible log levels are `off`, `error`, `warn`, `info`, `debug` and `trace`. Messages from
/// other crates are limited to warnings and errors.
///
/// # Arguments
///
/// * `log_level_from_settings`: The log level specified in `settings.toml`
/// * `log_file_dir`: Folder in which to create log files. No files are written if this is `None`.
pub fn init(log_level_from_settings: Option<&str>, log_file_dir: Option<&Path>) -> Result<()> {
    let from_env = env::var(LOG_LEVEL_ENV_VAR).ok();
    let log_level = resolve_log_level(from_env.as_deref(), log_level_from_settings)?;

    let mut dispatch = Dispatch::new()
        .level(log_level.min(DEPENDENCY_LOG_LEVEL))
        .level_for(env!("CARGO_CRATE_NAME"), log_level)
        .chain(
            terminal_dispatch(std::io::stdout().is_terminal())
                .filter(|metadata| metadata.level() > LevelFilter::Warn)
                .chain(std::io::stdout()),
        )
        .chain(
            terminal_dispatch(std::io::stderr().is_terminal())
                .level(log_level.min(LevelFilter::Warn))
                .chain(std::io::stderr()),
        );

    if let Some(dir) = log_file_dir {
        dispatch = dispatch
            .chain(
                Dispatch::new()
                    .filter(|metadata| metadata.level() > LevelFilter::Warn)
                    .format(write_log_plain)
                    .level(log_level.max(LevelFilter::Info))
                    .chain(create_log_file(dir, LOG_INFO_FILE_NAME)?),
            )
            .chain(
                Dispatch::new()
                    .format(write_log_plain)
                    .level(LevelFilter::Warn)
                    .chain(create_log_file(dir, LOG_ERROR_FILE_NAME)?),
            );
    }

    dispatch.apply().context("Logger already initialised")?;
    LOGGER_INIT
        .set(())
        .map_err(|_| anyhow!("Logger already initialised"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None, LevelFilter::Info)]
    #[case(None, Some("debug"), LevelFilter::Debug)]
    #[case(Some("warn"), Some("debug"), LevelFilter::Warn)]
    #[case(Some("TRACE"), None, LevelFilter::Trace)]
    #[case(Some("off"), Some("info"), LevelFilter::Off)]
    fn test_resolve_log_level(
        #[case] from_env: Option<&str>,
        #[case] from_settings: Option<&str>,
        #[case] expected: LevelFilter,
    ) {
        assert_eq!(
            resolve_log_level(from_env, from_settings).unwrap(),
            expected
        );
    }

    #[test]
    fn test_resolve_log_level_unknown() {
        let err = resolve_log_level(None, Some("loud")).unwrap_err();
        assert_eq!(err.to_string(), "Unknown log level: loud");
    }

    #[rstest]
    #[case("adorb::variant", "variant")]
    #[case("adorb::input::grid_region", "input::grid_region")]
    #[case("csv", "csv")]
    fn test_short_target(#[case] target: &str, #[case] expected: &str) {
        assert_eq!(short_target(target), expected);
    }

    #[test]
    fn test_create_log_file_truncates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(LOG_INFO_FILE_NAME), "old run").unwrap();
        create_log_file(dir.path(), LOG_INFO_FILE_NAME).unwrap();
        assert!(
            std::fs::read_to_string(dir.path().join(LOG_INFO_FILE_NAME))
                .unwrap()
                .is_empty()
        );
    }
}
