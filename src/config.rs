use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::cli::Cli;
use crate::model::{Difficulty, QuestionType, QuizOptions};
use crate::provider::DEFAULT_ENDPOINT;

#[derive(Debug)]
pub enum ConfigError {
    Read(PathBuf, String),
    Parse(PathBuf, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read(path, e) => write!(f, "Cannot read {}: {}", path.display(), e),
            ConfigError::Parse(path, e) => write!(f, "Invalid config {}: {}", path.display(), e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Defaults section of `config.yaml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DefaultsSection {
    pub count: Option<u32>,
    pub category: Option<u32>,
    pub difficulty: Option<Difficulty>,
    #[serde(rename = "type")]
    pub question_type: Option<QuestionType>,
    pub timer: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub endpoint: Option<String>,
    pub log_level: Option<String>,
    pub defaults: DefaultsSection,
}

/// Settings after merging defaults, the config file and CLI flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub endpoint: String,
    pub log_level: String,
    pub options: QuizOptions,
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "triviaterm")
}

pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join("config.yaml"))
}

pub fn default_log_dir() -> PathBuf {
    project_dirs()
        .map(|d| d.data_local_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("triviaterm-logs"))
}

pub fn parse_config(content: &str, path: &Path) -> Result<ConfigFile, ConfigError> {
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e.to_string()))
}

/// Load a config file. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<ConfigFile, ConfigError> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::Read(path.to_path_buf(), e.to_string()))?;
    parse_config(&content, path)
}

/// CLI flags win over the config file, which wins over built-in defaults.
pub fn merge(file: &ConfigFile, cli: &Cli) -> Settings {
    let base = QuizOptions::default();
    let d = &file.defaults;

    let options = QuizOptions {
        question_count: cli.count.or(d.count).unwrap_or(base.question_count),
        category: cli.category.or(d.category).unwrap_or(base.category),
        difficulty: cli.difficulty.or(d.difficulty).unwrap_or(base.difficulty),
        question_type: cli
            .question_type
            .or(d.question_type)
            .unwrap_or(base.question_type),
        timer_seconds: cli.timer.or(d.timer).unwrap_or(base.timer_seconds),
    }
    .clamped();

    let endpoint = cli
        .endpoint
        .clone()
        .or_else(|| file.endpoint.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    let log_level = std::env::var("RUST_LOG")
        .ok()
        .or_else(|| file.log_level.clone())
        .unwrap_or_else(|| "info".to_string());

    Settings {
        endpoint,
        log_level,
        options,
    }
}

/// Resolve the config path from the CLI or the platform default, load it and merge.
pub fn resolve(cli: &Cli) -> Result<Settings, ConfigError> {
    let path = cli
        .config
        .as_ref()
        .map(PathBuf::from)
        .or_else(default_config_path);

    let file = match path {
        Some(p) => load_config(&p)?,
        None => ConfigFile::default(),
    };
    Ok(merge(&file, cli))
}
