use crate::git::GitRepo;
use crate::log_debug;

use anyhow::{Result, anyhow};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Project configuration filename, looked up at the repository root
pub const PROJECT_CONFIG_FILENAME: &str = ".czpair.toml";

/// Configuration structure for cz-pair
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Editor command used for "Edit Message"; falls back to `$VISUAL`/`$EDITOR`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
    /// Run pre-commit and post-commit hooks
    #[serde(default = "default_verify")]
    pub verify: bool,
    /// Log external library output as well as our own
    #[serde(default)]
    pub verbose_logging: bool,
}

fn default_verify() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            editor: None,
            verify: default_verify(),
            verbose_logging: false,
        }
    }
}

/// Project-level overrides; only keys present in the file take effect
#[derive(Deserialize, Clone, Debug, Default)]
struct ProjectOverrides {
    editor: Option<String>,
    verify: Option<bool>,
    verbose_logging: Option<bool>,
}

impl Config {
    /// Load the personal configuration, then merge the project file over it
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::get_config_path()?)?;

        if let Ok(project_path) = Self::get_project_config_path()
            && project_path.exists()
        {
            config.merge_project_file(&project_path)?;
        }

        log_debug!("Configuration loaded: {:?}", config);
        Ok(config)
    }

    /// Load a configuration file, or the defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| anyhow!("Invalid configuration in {}: {}", path.display(), e))
    }

    /// Merge the project file at `path`; values it sets take precedence
    pub fn merge_project_file(&mut self, path: &Path) -> Result<()> {
        log_debug!("Merging with project configuration at {:?}", path);

        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read project config file: {}", e))?;
        let overrides: ProjectOverrides = toml::from_str(&content).map_err(|e| {
            anyhow!(
                "Invalid project configuration file format: {}. Please check your {} file for syntax errors.",
                e,
                PROJECT_CONFIG_FILENAME
            )
        })?;

        if let Some(editor) = overrides.editor {
            self.editor = Some(editor);
        }
        if let Some(verify) = overrides.verify {
            self.verify = verify;
        }
        if let Some(verbose) = overrides.verbose_logging {
            self.verbose_logging = verbose;
        }

        Ok(())
    }

    /// Save the configuration to the personal config file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        log_debug!("Configuration saved: {:?}", self);
        Ok(())
    }

    /// Update the configuration with new values
    pub fn update(&mut self, editor: Option<String>, verify: Option<bool>) {
        if let Some(editor) = editor {
            self.editor = (!editor.trim().is_empty()).then_some(editor);
        }
        if let Some(verify) = verify {
            self.verify = verify;
        }

        log_debug!("Configuration updated: {:?}", self);
    }

    /// Get the path to the project configuration file
    pub fn get_project_config_path() -> Result<PathBuf> {
        let repo_root = GitRepo::get_repo_root()?;
        Ok(repo_root.join(PROJECT_CONFIG_FILENAME))
    }

    /// Get the path to the configuration file
    fn get_config_path() -> Result<PathBuf> {
        let mut path =
            config_dir().ok_or_else(|| anyhow!("Unable to determine config directory"))?;
        path.push("cz-pair");
        fs::create_dir_all(&path)?;
        path.push("config.toml");
        Ok(path)
    }
}
