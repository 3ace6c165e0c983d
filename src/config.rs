use anyhow::Context;
use serde::Deserialize;
use std::path::PathBuf;

/// Top-level configuration.
///
/// Loaded from a YAML file named by the `STATICD_CONFIG` environment
/// variable, falling back to built-in defaults (with a `LISTEN` override for
/// the bind address) when no file is given.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the accept loop binds, e.g. "127.0.0.1:8080"
    pub listen_addr: String,
}

/// Everything a connection handler needs to serve content. Immutable for the
/// lifetime of the process; cloned into each handler task.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory resource paths are resolved under
    pub document_root: PathBuf,

    /// Identity sent in the Server header and inserted at the server marker
    pub server_id: String,

    /// Content type sent with every response
    pub content_type: String,

    /// Literal substring that triggers insertion of a timestamp line
    pub date_marker: String,

    /// Literal substring that triggers insertion of the server identity line
    pub server_marker: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            site: SiteConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            document_root: PathBuf::from("."),
            server_id: "staticd/0.1".to_string(),
            content_type: "text/html".to_string(),
            date_marker: "<!--date-->".to_string(),
            server_marker: "<!--server-->".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        if let Ok(path) = std::env::var("STATICD_CONFIG") {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config file {path}"))?;
            let cfg = serde_yaml::from_str(&text)
                .with_context(|| format!("parsing config file {path}"))?;
            return Ok(cfg);
        }

        let mut cfg = Self::default();
        if let Ok(addr) = std::env::var("LISTEN") {
            cfg.server.listen_addr = addr;
        }
        Ok(cfg)
    }
}
