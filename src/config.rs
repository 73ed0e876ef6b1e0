//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/courseplan/courseplan.toml`
//! 3. Local config: `<dir>/.courseplan.toml` (usually the working directory)
//! 4. Explicit config file passed with `--config`
//! 5. Environment variables: `COURSEPLAN_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::expand_env_vars;

/// Catalog file offered by the shell when the user just presses Enter.
pub const DEFAULT_CATALOG_FILE: &str = "CS 300 ABCU_Advising_Program_Input.csv";

/// Heading printed before the ordered course list.
pub const DEFAULT_LIST_HEADING: &str = "Here is a sample schedule:";

/// Raw settings for intermediate parsing (`None` means "not specified, inherit").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub default_file: Option<PathBuf>,
    pub list_heading: Option<String>,
}

/// Unified configuration for courseplan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Catalog file loaded when no file name is given
    pub default_file: PathBuf,
    /// Heading for the course list
    pub list_heading: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_file: PathBuf::from(DEFAULT_CATALOG_FILE),
            list_heading: DEFAULT_LIST_HEADING.to_string(),
        }
    }
}

/// Get the XDG config directory for courseplan.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "courseplan").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("courseplan.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".courseplan.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.default_file.to_string_lossy().as_ref());
        self.default_file = PathBuf::from(expanded);
    }

    /// Merge overlay config onto self: overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            default_file: overlay
                .default_file
                .clone()
                .unwrap_or_else(|| self.default_file.clone()),
            list_heading: overlay
                .list_heading
                .clone()
                .unwrap_or_else(|| self.list_heading.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Directory searched for `.courseplan.toml`
    /// * `explicit` - Config file given on the command line; must exist
    pub fn load(local_dir: Option<&Path>, explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Local config
        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 4. Explicit config file
        if let Some(path) = explicit {
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        // 5. Environment variables
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply COURSEPLAN_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("COURSEPLAN")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("default_file") {
            settings.default_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("list_heading") {
            settings.list_heading = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        format!(
            r#"# courseplan configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/courseplan/courseplan.toml
#   Local:  ./.courseplan.toml
#   --config <FILE>
#   Env:    COURSEPLAN_* environment variables

# Catalog file loaded when you press Enter at the load prompt (~ and $VAR expand)
# default_file = "{DEFAULT_CATALOG_FILE}"

# Heading printed before the course list
# list_heading = "{DEFAULT_LIST_HEADING}"
"#
        )
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
