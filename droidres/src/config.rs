//! Fixed configuration tables and their optional TOML override.
//!
//! Every table has a compiled-in default, so the tools run without any
//! configuration file. A `droidres.toml` can override any subset of fields:
//!
//! ```toml
//! resources_dir = "common/src/main/res"
//! prune_resources_dir = "app/src/main/res"
//! protected_names = ["setup_welcome_title"]
//!
//! [locale_overrides]
//! id = "in"
//! ```

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{error::Error, locale::LocaleOverrides};

/// File looked up in the working directory when no config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "droidres.toml";

const SETUP_WIZARD_NAMES: &[&str] = &[
    "setup_welcome_title",
    "setup_welcome_additional_description",
    "setup_start_action",
    "setup_next_action",
    "setup_steps_title",
    "setup_step1_title",
    "setup_step1_instruction",
    "setup_step1_finished_instruction",
    "setup_step1_action",
    "setup_step2_title",
    "setup_step2_instruction",
    "setup_step2_action",
    "setup_step3_title",
    "setup_step3_instruction",
    "setup_step3_action",
    "setup_finish_action",
    "show_setup_wizard_icon",
    "show_setup_wizard_icon_summary",
];

/// Entry names the translation merger must never overwrite.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ProtectedNames(BTreeSet<String>);

impl Default for ProtectedNames {
    fn default() -> Self {
        SETUP_WIZARD_NAMES.iter().copied().collect()
    }
}

impl<'a> FromIterator<&'a str> for ProtectedNames {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        ProtectedNames(iter.into_iter().map(str::to_string).collect())
    }
}

impl ProtectedNames {
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Root of the shared Android resource tree (string remover and merger).
    pub resources_dir: PathBuf,
    /// Resource tree the English-duplicate remover walks.
    pub prune_resources_dir: PathBuf,
    /// Root of the crowd-sourced translation export.
    pub crowd_dir: PathBuf,
    /// Directory (under `resources_dir`) holding the baseline English strings.
    pub baseline_dir: String,
    /// Name of the resource files to process.
    pub file_name: String,
    pub protected_names: ProtectedNames,
    pub locale_overrides: LocaleOverrides,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            resources_dir: PathBuf::from("common/src/main/res"),
            prune_resources_dir: PathBuf::from("app/src/main/res"),
            crowd_dir: PathBuf::from("crowdin"),
            baseline_dir: "values".to_string(),
            file_name: "strings.xml".to_string(),
            protected_names: ProtectedNames::default(),
            locale_overrides: LocaleOverrides::default(),
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text; missing fields keep their defaults.
    pub fn from_toml(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from `path`, or from [`DEFAULT_CONFIG_FILE`] if it
    /// exists, or fall back to the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let path = match path {
            Some(path) => path,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Path::new(DEFAULT_CONFIG_FILE),
            None => return Ok(Config::default()),
        };
        let text = fs::read_to_string(path).map_err(|e| Error::Io(e).at(path))?;
        Self::from_toml(&text).map_err(|e| e.at(path))
    }
}
