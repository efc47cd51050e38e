//! Application configuration.
//!
//! Built once at startup and handed to whatever needs it by reference;
//! nothing reads settings from global state.
//!
//! `#[serde(default)]` fills in missing fields, so a config file only
//! needs the keys it wants to change.

use crate::preset::SyntaxPreset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where posts and generated files live
    pub paths: PathsConfig,

    /// Image renderer service
    pub renderer: RendererConfig,

    /// Highlighting style
    pub style: StyleConfig,
}

impl Config {
    /// Loads config from the default location, falling back to defaults.
    pub fn load() -> Self {
        match Self::load_from_default_path() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Using default config: {}", e);
                Self::default()
            }
        }
    }

    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Loads from the default config path.
    fn load_from_default_path() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default config file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("codeglow").join("config.toml"))
    }

    /// Saves the config to `path`, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Applies overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, keyed by environment variable name.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let path = |key: &str| lookup(key).filter(|v| !v.is_empty()).map(PathBuf::from);

        if let Some(p) = path("BLOG_POSTS_PATH") {
            self.paths.blog_posts = Some(p);
        }
        if let Some(p) = path("OUTPUT_PATH") {
            self.paths.output = Some(p);
        }
        if let Some(p) = path("LINKEDIN_POSTS_PATH") {
            self.paths.linkedin_posts = Some(p);
        }
        if let Some(p) = path("LINKEDIN_BLOG_POSTS_PATH") {
            self.paths.linkedin_blog_posts = Some(p);
        }
        if let Some(url) = lookup("RENDERER_SERVICE_URL").filter(|v| !v.is_empty()) {
            self.renderer.url = url;
        }
        if let Some(preset) = lookup("SYNTAX_PRESET").filter(|v| !v.is_empty()) {
            self.style.preset = preset
                .parse()
                .map_err(|_| ConfigError::UnknownPreset(preset))?;
        }
        Ok(self)
    }
}

/// Folder configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Folder holding `Blog Post N` directories
    pub blog_posts: Option<PathBuf>,

    /// Default output folder
    pub output: Option<PathBuf>,

    /// Folder holding `Post N` directories for social posts
    pub linkedin_posts: Option<PathBuf>,

    /// Folder for blog posts cross-posted to social media
    pub linkedin_blog_posts: Option<PathBuf>,

    /// Overrides the built-in HTML templates
    pub templates_dir: Option<PathBuf>,

    /// Font file referenced by the image template
    pub font_path: Option<PathBuf>,
}

/// Image renderer service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Base URL of the service
    pub url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Host folder mounted as the service's output directory
    pub host_output_root: Option<PathBuf>,
}

impl RendererConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:3000".to_string(),
            timeout_secs: 30,
            host_output_root: None,
        }
    }
}

/// Highlighting style configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Colour preset
    pub preset: SyntaxPreset,

    /// Echo highlighted snippets to the terminal while generating
    pub show_code_snippet: bool,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("Unknown syntax preset: {0}")]
    UnknownPreset(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.renderer.url, "http://localhost:3000");
        assert_eq!(config.renderer.timeout(), Duration::from_secs(30));
        assert_eq!(config.style.preset, SyntaxPreset::Rider);
        assert!(config.paths.blog_posts.is_none());
    }

    #[test]
    fn test_config_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.style.preset = SyntaxPreset::VisualStudio;
        config.paths.blog_posts = Some(PathBuf::from("/posts/blog"));
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.style.preset, SyntaxPreset::VisualStudio);
        assert_eq!(loaded.paths.blog_posts, Some(PathBuf::from("/posts/blog")));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[style]\npreset = \"VISUAL_STUDIO\"\n").unwrap();
        assert_eq!(config.style.preset, SyntaxPreset::VisualStudio);
        assert_eq!(config.renderer.timeout_secs, 30);
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("BLOG_POSTS_PATH", "/blog"),
            ("RENDERER_SERVICE_URL", "http://renderer:3000"),
            ("SYNTAX_PRESET", "VISUAL_STUDIO"),
            ("OUTPUT_PATH", ""),
        ]);
        let config = Config::default()
            .with_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.paths.blog_posts, Some(PathBuf::from("/blog")));
        assert_eq!(config.paths.output, None);
        assert_eq!(config.renderer.url, "http://renderer:3000");
        assert_eq!(config.style.preset, SyntaxPreset::VisualStudio);
    }

    #[test]
    fn test_unknown_preset_override() {
        let result = Config::default().with_overrides(|key| {
            (key == "SYNTAX_PRESET").then(|| "SOLARIZED".to_string())
        });
        assert!(matches!(result, Err(ConfigError::UnknownPreset(p)) if p == "SOLARIZED"));
    }
}
