//! Program settings, read from `settings.toml` in the user's config folder.
use crate::get_adorb_config_dir;
use crate::input::read_toml;
use crate::log::DEFAULT_LOG_LEVEL;
use anyhow::Result;
use documented::DocumentedFields;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const SETTINGS_FILE_NAME: &str = "settings.toml";

const DEFAULT_SETTINGS_FILE_HEADER: &str = "# Program settings for adorb.
# Every setting is optional. Uncomment a line to change its value.
";

/// Default log level for program
fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Default folder for results
fn default_results_dir() -> PathBuf {
    PathBuf::from("adorb_results")
}

/// Get the path to where the settings file will be read from
pub fn get_settings_file_path() -> PathBuf {
    get_adorb_config_dir().join(SETTINGS_FILE_NAME)
}

/// Program settings from config file
#[derive(Debug, DocumentedFields, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// The default program log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Folder in which a results folder is created for each variant run without --output-dir
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    /// Whether to replace the results of a previous run by default
    #[serde(default)]
    pub overwrite: bool,
    /// Whether to write intermediate cost streams to CSV files
    #[serde(default)]
    pub debug_model: bool,
}

impl Default for Settings {
    fn default() -> Self {
        toml::from_str("").expect("Cannot create settings from empty TOML file")
    }
}

impl Settings {
    /// Read the program settings file, using defaults if it does not exist
    pub fn load() -> Result<Settings> {
        Self::load_from_path(&get_settings_file_path())
    }

    /// Read from the specified path, returning defaults if the file does not exist
    fn load_from_path(file_path: &Path) -> Result<Settings> {
        if !file_path.is_file() {
            return Ok(Settings::default());
        }

        read_toml(file_path)
    }

    /// The contents of a placeholder settings file.
    ///
    /// Each setting is commented out at its default value, below its documentation.
    pub fn default_file_contents() -> String {
        let defaults = toml::Value::try_from(Settings::default())
            .expect("Could not convert settings to TOML");
        let Some(table) = defaults.as_table() else {
            unreachable!("Settings always serialise to a table")
        };

        let mut out = DEFAULT_SETTINGS_FILE_HEADER.to_string();
        for (field, value) in table {
            let docs = Settings::get_field_docs(field).unwrap_or_default();
            out.push('\n');
            for line in docs.lines() {
                out.push_str(&format!("# # {}\n", line.trim()));
            }
            out.push_str(&format!("# {field} = {value}\n"));
        }

        out
    }
}
