//! Configuration management for NEETHub

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::claude::ClaudeModel;
use crate::quiz::timer::SECONDS_PER_QUESTION;
use crate::supply::DEFAULT_QUESTION_COUNT;
use crate::theme::Theme;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Selected theme name
    pub theme: String,

    /// Model used to generate questions
    pub model: ClaudeModel,

    /// Questions per generated test
    pub question_count: usize,

    /// Countdown allowance per question
    pub seconds_per_question: u64,

    /// Vim mode enabled
    pub vim_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "Tokyo Night".to_string(),
            model: ClaudeModel::default(),
            question_count: DEFAULT_QUESTION_COUNT,
            seconds_per_question: SECONDS_PER_QUESTION,
            vim_mode: true,
        }
    }
}

impl Config {
    /// Load configuration from disk, or create default if not exists
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "neethub").context("Failed to determine home directory")
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.data_dir().to_path_buf())
    }

    /// Get the test history path
    pub fn history_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("history.json"))
    }

    /// Get the log directory path
    pub fn log_dir() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("logs"))
    }

    /// Get the active theme
    pub fn active_theme(&self) -> Theme {
        Theme::by_name(&self.theme).unwrap_or_default()
    }
}
