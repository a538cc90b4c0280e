//! # config show / init / path

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use super::Report;
use crate::config::ToolkitConfig;
use crate::error::{CliError, CliResult};

#[derive(Debug, Serialize)]
pub struct ConfigReport {
    pub path: Option<PathBuf>,
    pub config: ToolkitConfig,
}

impl Report for ConfigReport {
    fn to_text(&self) -> String {
        let body = toml::to_string_pretty(&self.config)
            .unwrap_or_else(|e| format!("# unable to render config: {}", e));
        match &self.path {
            Some(path) => format!("# {}\n{}", path.display(), body),
            None => body,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PathReport {
    pub path: Option<PathBuf>,
}

impl Report for PathReport {
    fn to_text(&self) -> String {
        self.path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(no config directory on this platform)".to_string())
    }
}

/// The effective config, after file and environment.
pub fn show(config: &ToolkitConfig, path: Option<PathBuf>) -> ConfigReport {
    ConfigReport {
        path: path.or_else(ToolkitConfig::default_config_path),
        config: config.clone(),
    }
}

/// Writes a default config file. Refuses to overwrite unless `force`.
pub fn init(path: Option<PathBuf>, force: bool) -> CliResult<PathReport> {
    let target = path
        .or_else(ToolkitConfig::default_config_path)
        .ok_or_else(|| CliError::ConfigSave("No config path available".into()))?;

    if target.exists() && !force {
        return Err(CliError::ConfigSave(format!(
            "{} already exists (use --force to overwrite)",
            target.display()
        )));
    }

    let written = ToolkitConfig::default().save(Some(target))?;
    info!(path = ?written, "Wrote default config");
    Ok(PathReport {
        path: Some(written),
    })
}

pub fn path(path: Option<PathBuf>) -> PathReport {
    PathReport {
        path: path.or_else(ToolkitConfig::default_config_path),
    }
}
