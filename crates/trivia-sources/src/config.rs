//! Trivia configuration and question source factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use trivia_core::traits::QuestionSource;

use crate::builtin::BuiltinSource;
use crate::file::FileSource;

/// Where questions come from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    /// The built-in sample quiz.
    #[default]
    Builtin,
    /// A TOML question set file. `${VAR}` references are expanded.
    File { path: String },
}

/// Top-level trivia configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriviaConfig {
    /// Question source.
    #[serde(default)]
    pub source: SourceConfig,
    /// Reveal the expected answer after an incorrect submission.
    #[serde(default = "default_true")]
    pub show_correct_answer: bool,
}

fn default_true() -> bool {
    true
}

impl Default for TriviaConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            show_correct_answer: true,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not expanded again. Unset variables become empty.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `trivia.toml` in the current directory
/// 2. `~/.config/trivia/config.toml`
///
/// Environment variable override: `TRIVIA_QUESTIONS` selects a question file.
pub fn load_config() -> Result<TriviaConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<TriviaConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("trivia.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!("using config {}", path.display());
            toml::from_str::<TriviaConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => TriviaConfig::default(),
    };

    // Apply env var override
    if let Ok(path) = std::env::var("TRIVIA_QUESTIONS") {
        if !path.is_empty() {
            config.source = SourceConfig::File { path };
        }
    }

    if let SourceConfig::File { path } = &config.source {
        config.source = SourceConfig::File {
            path: resolve_env_vars(path),
        };
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("trivia"))
}

/// Create a question source from its configuration.
pub fn create_source(config: &SourceConfig) -> Box<dyn QuestionSource> {
    match config {
        SourceConfig::Builtin => Box::new(BuiltinSource::new()),
        SourceConfig::File { path } => Box::new(FileSource::new(path)),
    }
}
