//! Server configuration management for `doctree.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[content]` | Content root directory, static asset directories |
//! | `[serve]`   | HTTP server (interface, port, live reload)       |
//!
//! The config file is optional: a missing file yields defaults rooted at
//! the current directory. CLI arguments override file values.

use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::Deserialize;
use thiserror::Error;

use crate::cli::{Cli, Commands};

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),
}

/// Root configuration structure representing doctree.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Content tree settings
    #[serde(default)]
    pub content: ContentConfig,

    /// HTTP server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

/// `[content]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Content root, relative to the project root.
    pub dir: PathBuf,
    /// Directories under the content root served as static assets,
    /// bypassing route resolution.
    pub static_dirs: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("content"),
            static_dirs: ["js", "style", "audio", "images", "media"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// `[serve]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Network interface to bind.
    pub interface: IpAddr,
    /// Port number to listen on.
    pub port: u16,
    /// Re-run the parse cycle before every request, so content edits show
    /// up without restarting. Disable for production serving.
    pub live_reload: bool,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
            live_reload: true,
        }
    }
}

impl Config {
    /// Load configuration from the CLI-selected config file, then apply
    /// CLI overrides on top.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(&cli.config)?;

        if let Some(dir) = &cli.content {
            config.content.dir = dir.clone();
        }
        if let Commands::Serve {
            interface,
            port,
            live_reload,
        } = &cli.command
        {
            if let Some(interface) = interface {
                config.serve.interface = *interface;
            }
            if let Some(port) = port {
                config.serve.port = *port;
            }
            if let Some(live_reload) = live_reload {
                config.serve.live_reload = *live_reload;
            }
        }

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Ok(Self {
                root: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
                ..Self::default()
            });
        }

        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let mut config: Self = toml::from_str(&raw)?;
        config.root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(config)
    }

    /// Absolute-ish path of the content root.
    pub fn content_root(&self) -> PathBuf {
        self.root.join(&self.content.dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.content.dir, PathBuf::from("content"));
        assert_eq!(config.serve.port, 8080);
        assert!(config.serve.live_reload);
        assert!(config.content.static_dirs.contains(&"style".to_string()));
    }

    #[test]
    fn test_sections_parse() {
        let config: Config = toml::from_str(
            r#"
            [content]
            dir = "www"
            static_dirs = ["js"]

            [serve]
            interface = "0.0.0.0"
            port = 80
            live_reload = false
            "#,
        )
        .unwrap();

        assert_eq!(config.content.dir, PathBuf::from("www"));
        assert_eq!(config.content.static_dirs, ["js"]);
        assert_eq!(config.serve.interface.to_string(), "0.0.0.0");
        assert_eq!(config.serve.port, 80);
        assert!(!config.serve.live_reload);
    }

    #[test]
    fn test_content_root_joins_project_root() {
        let config = Config {
            root: PathBuf::from("/srv/docs"),
            ..Config::default()
        };
        assert_eq!(config.content_root(), PathBuf::from("/srv/docs/content"));
    }
}
