//! Configuration loading and merging.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::split::{DEFAULT_ESCAPE, Mode, Options, SEPARATOR};

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid escape {0:?}: must be a single character other than space")]
    InvalidEscape(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Splitting dialect ("simple" or "quoted").
    pub mode: Option<Mode>,

    /// Escape character for simple mode.
    pub escape: Option<String>,

    /// Output settings.
    pub output: OutputConfig,

    /// Audit logging settings.
    pub audit: AuditConfig,
}

/// How split results are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON array per input line.
    #[default]
    Json,
    /// One word per line, each input line's words followed by a blank line.
    Lines,
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
}

/// Audit logging configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AuditConfig {
    /// Enable audit logging.
    pub enabled: bool,
    /// Path to audit log file.
    pub path: Option<String>,
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Options passed to the splitter.
    pub options: Options,
    /// Output format.
    pub format: OutputFormat,
    /// Audit log path, if auditing is enabled.
    pub audit_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration, merging user and project configs.
    pub fn load(cwd: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(user_config) = Self::load_user_config()? {
            config = user_config;
        }

        if let Some(cwd) = cwd
            && let Some(project_config) = Self::load_project_config(cwd)?
        {
            config.merge(project_config);
        }

        Ok(config)
    }

    /// Load user-level config from ~/.config/wordsplit.toml
    fn load_user_config() -> Result<Option<Self>, ConfigError> {
        match Self::user_config_path() {
            Some(path) => Self::load_file(&path),
            None => Ok(None),
        }
    }

    /// Load project-level config from .wordsplit.toml
    fn load_project_config(cwd: &Path) -> Result<Option<Self>, ConfigError> {
        Self::load_file(&cwd.join(".wordsplit.toml"))
    }

    fn load_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        debug!(path = %path.display(), "loading config");
        let content = fs::read_to_string(path)?;
        Ok(Some(toml::from_str(&content)?))
    }

    /// Get user config path.
    /// Respects WORDSPLIT_CONFIG env var for testing.
    fn user_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("WORDSPLIT_CONFIG") {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|d| d.join("wordsplit.toml"))
    }

    /// Merge another config into this one (other takes precedence for scalars).
    fn merge(&mut self, other: Config) {
        if other.mode.is_some() {
            self.mode = other.mode;
        }
        if other.escape.is_some() {
            self.escape = other.escape;
        }
        if other.output.format.is_some() {
            self.output.format = other.output.format;
        }
        if other.audit.enabled {
            self.audit.enabled = true;
            if other.audit.path.is_some() {
                self.audit.path = other.audit.path;
            }
        }
    }

    /// Validate into settings for the splitter and the CLI.
    pub fn compile(self) -> Result<Settings, ConfigError> {
        let mode = self.mode.unwrap_or_default();
        let escape = match self.escape.as_deref() {
            Some(s) => parse_escape(s)?,
            None => DEFAULT_ESCAPE,
        };
        if mode == Mode::Quoted && escape != DEFAULT_ESCAPE {
            warn!(%escape, "escape is only used in simple mode");
        }

        let audit_path = match (self.audit.enabled, self.audit.path) {
            (true, Some(path)) => Some(PathBuf::from(path)),
            (true, None) => {
                warn!("audit logging enabled without a path");
                None
            }
            (false, _) => None,
        };

        Ok(Settings {
            options: Options { mode, escape },
            format: self.output.format.unwrap_or_default(),
            audit_path,
        })
    }
}

fn parse_escape(s: &str) -> Result<char, ConfigError> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c != SEPARATOR => Ok(c),
        _ => Err(ConfigError::InvalidEscape(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let settings = Config::default().compile().unwrap();
        assert_eq!(settings.options, Options::default());
        assert_eq!(settings.format, OutputFormat::Json);
        assert!(settings.audit_path.is_none());
    }

    #[test]
    fn test_parse_config() {
        let config: Config = toml::from_str(
            r#"
mode = "simple"
escape = "^"

[output]
format = "lines"

[audit]
enabled = true
path = "/tmp/wordsplit.jsonl"
"#,
        )
        .unwrap();
        let settings = config.compile().unwrap();
        assert_eq!(settings.options.mode, Mode::Simple);
        assert_eq!(settings.options.escape, '^');
        assert_eq!(settings.format, OutputFormat::Lines);
        assert_eq!(
            settings.audit_path,
            Some(PathBuf::from("/tmp/wordsplit.jsonl"))
        );
    }

    #[test]
    fn test_invalid_escape() {
        for escape in ["", "ab", " "] {
            let config = Config {
                escape: Some(escape.to_string()),
                ..Default::default()
            };
            assert!(matches!(
                config.compile(),
                Err(ConfigError::InvalidEscape(_))
            ));
        }
    }

    #[test]
    fn test_unknown_mode() {
        assert!(toml::from_str::<Config>(r#"mode = "shell""#).is_err());
    }

    #[test]
    fn test_merge_project_wins() {
        let mut config = Config {
            mode: Some(Mode::Simple),
            escape: Some("^".to_string()),
            ..Default::default()
        };
        config.merge(Config {
            mode: Some(Mode::Quoted),
            ..Default::default()
        });
        assert_eq!(config.mode, Some(Mode::Quoted));
        assert_eq!(config.escape.as_deref(), Some("^"));
    }

    #[test]
    fn test_merge_audit() {
        let mut config = Config::default();
        config.merge(Config {
            audit: AuditConfig {
                enabled: true,
                path: Some("audit.jsonl".to_string()),
            },
            ..Default::default()
        });
        assert!(config.audit.enabled);
        assert_eq!(config.audit.path.as_deref(), Some("audit.jsonl"));
    }

    #[test]
    fn test_audit_needs_path() {
        let config = Config {
            audit: AuditConfig {
                enabled: true,
                path: None,
            },
            ..Default::default()
        };
        assert!(config.compile().unwrap().audit_path.is_none());
    }

    #[test]
    fn test_load_project_config() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join(".wordsplit.toml"), "mode = \"simple\"\n").unwrap();
        let config = Config::load_project_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.mode, Some(Mode::Simple));
        assert!(
            Config::load_project_config(&dir.path().join("missing"))
                .unwrap()
                .is_none()
        );
    }
}
