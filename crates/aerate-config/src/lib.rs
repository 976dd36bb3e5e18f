//! Configuration management for aerate.
//!
//! Parses `aerate.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `input.xml_dir`
//! - `output.dir`
//! - `render.domain`
//! - `render.language`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override Doxygen XML directory.
    pub xml_dir: Option<PathBuf>,
    /// Override file name patterns.
    pub patterns: Option<Vec<String>>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Write to stdout even if an output directory is configured.
    pub stdout: bool,
    /// Override indentation width.
    pub indent: Option<usize>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "aerate.toml";

/// Compound file patterns used when none are configured (C headers).
const DEFAULT_PATTERNS: &[&str] = &["*_8h.xml"];

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input selection (paths are relative strings from TOML).
    input: InputConfigRaw,
    /// Output location (paths are relative strings from TOML).
    output: OutputConfigRaw,
    /// Rendering settings.
    pub render: RenderConfig,

    /// Resolved input configuration (set after loading).
    #[serde(skip)]
    pub input_resolved: InputConfig,
    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw input configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct InputConfigRaw {
    xml_dir: Option<String>,
    patterns: Option<Vec<String>>,
}

/// Resolved input configuration with absolute paths.
#[derive(Debug, Default)]
pub struct InputConfig {
    /// Doxygen XML output directory (holds `index.xml`).
    pub xml_dir: PathBuf,
    /// Glob patterns selecting compound files by name.
    pub patterns: Vec<String>,
}

/// Raw output configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    dir: Option<String>,
}

/// Resolved output configuration.
#[derive(Debug, Default)]
pub struct OutputConfig {
    /// Directory for `.rst` files. `None` writes to stdout.
    pub dir: Option<PathBuf>,
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Spaces per nesting level.
    pub indent: usize,
    /// Sphinx domain for directives and roles.
    pub domain: String,
    /// Code block language when a listing names none (defaults to the domain).
    pub language: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent: 3,
            domain: "c".to_owned(),
            language: None,
        }
    }
}

impl RenderConfig {
    /// Code block language, falling back to the domain.
    #[must_use]
    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or(&self.domain)
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`input.xml_dir`").
        field: String,
        /// Error message (e.g., "${`DOXYGEN_XML`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `aerate.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. The result is
    /// validated again after overrides.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails, or
    /// the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(xml_dir) = &settings.xml_dir {
            self.input_resolved.xml_dir.clone_from(xml_dir);
        }
        if let Some(patterns) = &settings.patterns {
            self.input_resolved.patterns.clone_from(patterns);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.output_resolved.dir = Some(output_dir.clone());
        }
        if settings.stdout {
            self.output_resolved.dir = None;
        }
        if let Some(indent) = settings.indent {
            self.render.indent = indent;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            input: InputConfigRaw::default(),
            output: OutputConfigRaw::default(),
            render: RenderConfig::default(),
            input_resolved: InputConfig {
                xml_dir: base.join("xml"),
                patterns: default_patterns(),
            },
            output_resolved: OutputConfig::default(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_input()?;
        self.validate_render()?;
        Ok(())
    }

    /// Validate input configuration.
    fn validate_input(&self) -> Result<(), ConfigError> {
        if self.input_resolved.patterns.is_empty() {
            return Err(ConfigError::Validation(
                "input.patterns cannot be empty".to_owned(),
            ));
        }
        for pattern in &self.input_resolved.patterns {
            glob::Pattern::new(pattern).map_err(|err| {
                ConfigError::Validation(format!("input.patterns: invalid pattern {pattern:?}: {err}"))
            })?;
        }
        Ok(())
    }

    /// Validate render configuration.
    fn validate_render(&self) -> Result<(), ConfigError> {
        const MAX_INDENT: usize = 8;

        if self.render.indent == 0 || self.render.indent > MAX_INDENT {
            return Err(ConfigError::Validation(format!(
                "render.indent must be between 1 and {MAX_INDENT}"
            )));
        }
        require_non_empty(&self.render.domain, "render.domain")?;
        if let Some(language) = &self.render.language {
            require_non_empty(language, "render.language")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref xml_dir) = self.input.xml_dir {
            self.input.xml_dir = Some(expand::expand_env(xml_dir, "input.xml_dir")?);
        }
        if let Some(ref dir) = self.output.dir {
            self.output.dir = Some(expand::expand_env(dir, "output.dir")?);
        }

        self.render.domain = expand::expand_env(&self.render.domain, "render.domain")?;
        if let Some(ref language) = self.render.language {
            self.render.language = Some(expand::expand_env(language, "render.language")?);
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.input_resolved = InputConfig {
            xml_dir: config_dir.join(self.input.xml_dir.as_deref().unwrap_or("xml")),
            patterns: self
                .input
                .patterns
                .clone()
                .unwrap_or_else(default_patterns),
        };

        self.output_resolved = OutputConfig {
            dir: self.output.dir.as_deref().map(|dir| config_dir.join(dir)),
        };
    }
}

fn default_patterns() -> Vec<String> {
    DEFAULT_PATTERNS.iter().map(|&p| p.to_owned()).collect()
}
