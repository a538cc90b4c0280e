//! # Toolkit Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority, applied by the command)      │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     ERPKIT_CODE_WIDTH=3                                                │
//! │     ERPKIT_ALLOWED_WIDTHS=2,3                                          │
//! │     ERPKIT_STRICT_CODES=true                                           │
//! │     ERPKIT_DATE_POLICY=exclusive                                       │
//! │     ERPKIT_TIME_POLICY=inclusive                                       │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/erpkit/erpkit.toml (Linux)                               │
//! │     ~/Library/Application Support/com.erpkit.erpkit/erpkit.toml (macOS)│
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [codes]
//! default_width = 3
//! allowed_widths = [2, 3]
//! strict = false
//!
//! [overlap]
//! dates = "exclusive"
//! times = "exclusive"
//!
//! [categories.size]
//! code_width = 2
//! normalize_case = false
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use erpkit_core::validation::validate_code_width;
use erpkit_core::{AttributeCategory, CategoryConfig, CategoryTable, CodePolicy, OverlapPolicy};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

/// Default config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "erpkit.toml";

// =============================================================================
// Code Settings
// =============================================================================

/// Sequential code behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSettings {
    /// Seed width when the input gives no usable width.
    #[serde(default = "default_code_width")]
    pub default_width: usize,

    /// Widths accepted as a current code.
    #[serde(default = "default_allowed_widths")]
    pub allowed_widths: Vec<usize>,

    /// Fail on bad input and overflow instead of seeding / wrapping.
    #[serde(default)]
    pub strict: bool,
}

fn default_code_width() -> usize {
    3
}

fn default_allowed_widths() -> Vec<usize> {
    vec![2, 3]
}

impl Default for CodeSettings {
    fn default() -> Self {
        CodeSettings {
            default_width: default_code_width(),
            allowed_widths: default_allowed_widths(),
            strict: false,
        }
    }
}

// =============================================================================
// Overlap Settings
// =============================================================================

/// Boundary policy per kind of range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapSettings {
    /// Policy for date ranges (leave, assignments, rosters).
    #[serde(default = "default_policy")]
    pub dates: OverlapPolicy,

    /// Policy for time ranges (shifts).
    #[serde(default = "default_policy")]
    pub times: OverlapPolicy,
}

fn default_policy() -> OverlapPolicy {
    OverlapPolicy::Exclusive
}

impl Default for OverlapSettings {
    fn default() -> Self {
        OverlapSettings {
            dates: default_policy(),
            times: default_policy(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete toolkit configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolkitConfig {
    #[serde(default)]
    pub codes: CodeSettings,

    #[serde(default)]
    pub overlap: OverlapSettings,

    /// Per-category overrides, keyed by category identifier.
    /// Categories not listed keep their built-in settings.
    #[serde(default)]
    pub categories: BTreeMap<String, CategoryConfig>,
}

impl ToolkitConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path, else the platform default if present)
    /// 3. Environment variables
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file is not.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// Same as [`load`](Self::load) with a custom environment lookup.
    pub fn load_with(
        config_path: Option<PathBuf>,
        env: impl Fn(&str) -> Option<String>,
    ) -> CliResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_overrides(env);
        config.validate()?;

        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CliError::ConfigLoad(format!("{}: {}", path.display(), e)))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file, creating parent directories.
    pub fn save(&self, config_path: Option<PathBuf>) -> CliResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| CliError::ConfigSave("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        for &width in &self.codes.allowed_widths {
            validate_code_width(width).map_err(|e| CliError::InvalidConfig(e.to_string()))?;
        }
        self.code_policy()?;
        self.category_table()?;
        Ok(())
    }

    /// Applies `ERPKIT_*` overrides from the given lookup.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(width) = env("ERPKIT_CODE_WIDTH") {
            match width.trim().parse::<usize>() {
                Ok(w) => {
                    debug!(width = w, "Overriding default code width from environment");
                    self.codes.default_width = w;
                }
                Err(_) => warn!(value = %width, "Ignoring invalid ERPKIT_CODE_WIDTH"),
            }
        }

        if let Some(widths) = env("ERPKIT_ALLOWED_WIDTHS") {
            let parsed: Result<Vec<usize>, _> =
                widths.split(',').map(|w| w.trim().parse::<usize>()).collect();
            match parsed {
                Ok(list) if !list.is_empty() => self.codes.allowed_widths = list,
                _ => warn!(value = %widths, "Ignoring invalid ERPKIT_ALLOWED_WIDTHS"),
            }
        }

        if let Some(strict) = env("ERPKIT_STRICT_CODES") {
            match strict.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => self.codes.strict = true,
                "0" | "false" | "no" => self.codes.strict = false,
                _ => warn!(value = %strict, "Ignoring invalid ERPKIT_STRICT_CODES"),
            }
        }

        if let Some(policy) = env("ERPKIT_DATE_POLICY") {
            match policy.parse() {
                Ok(p) => self.overlap.dates = p,
                Err(_) => warn!(value = %policy, "Ignoring invalid ERPKIT_DATE_POLICY"),
            }
        }

        if let Some(policy) = env("ERPKIT_TIME_POLICY") {
            match policy.parse() {
                Ok(p) => self.overlap.times = p,
                Err(_) => warn!(value = %policy, "Ignoring invalid ERPKIT_TIME_POLICY"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "erpkit", "erpkit")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Derived Values
    // =========================================================================

    /// Code policy built from `[codes]`.
    pub fn code_policy(&self) -> CliResult<CodePolicy> {
        CodePolicy::new(self.codes.default_width, self.codes.allowed_widths.clone()).map_err(|_| {
            CliError::InvalidConfig(format!(
                "codes.default_width {} must be one of codes.allowed_widths {:?}",
                self.codes.default_width, self.codes.allowed_widths
            ))
        })
    }

    /// Built-in category table with `[categories.*]` applied on top.
    pub fn category_table(&self) -> CliResult<CategoryTable> {
        let mut table = CategoryTable::default();
        for (name, settings) in &self.categories {
            let category: AttributeCategory = name
                .parse()
                .map_err(|e| CliError::InvalidConfig(format!("categories.{}: {}", name, e)))?;
            validate_code_width(settings.code_width)
                .map_err(|e| CliError::InvalidConfig(format!("categories.{}: {}", name, e)))?;
            table.insert(category, settings.clone());
        }
        Ok(table)
    }
}
