use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default ceiling for a single image: 10 MiB.
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "Fetched_Images";
/// Default User-Agent sent with both the probe and the full GET.
pub const DEFAULT_USER_AGENT: &str = "imgfetch/0.1 (+libcurl)";
/// Default connect and stall timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

fn default_supported_extensions() -> Vec<String> {
    ["jpg", "jpeg", "png", "gif"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Process-wide fetch configuration loaded from `~/.config/imgfetch/config.toml`.
///
/// Set once at startup and shared read-only (behind an `Arc`) by every worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Largest body accepted, checked against the declared `Content-Length`
    /// and again while the GET streams in.
    pub max_file_size_bytes: u64,
    /// Markers searched for as substrings of the `Content-Type` header.
    pub supported_extensions: Vec<String>,
    pub user_agent: String,
    /// Directory receiving one file per fetched URL.
    pub output_directory: PathBuf,
    /// Connect timeout, and how long a HEAD or GET may stall without data.
    /// Not a cap on total transfer time.
    pub timeout_secs: u64,
    /// Number of worker threads pulling URLs from the queue.
    pub workers: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            supported_extensions: default_supported_extensions(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            output_directory: PathBuf::from(DEFAULT_OUTPUT_DIRECTORY),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            workers: 1,
        }
    }
}

impl FetchConfig {
    /// Rejects values that would make every fetch fail or hang.
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            anyhow::bail!("workers must be at least 1");
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be at least 1");
        }
        if self.supported_extensions.is_empty() {
            anyhow::bail!("supported_extensions must not be empty");
        }
        if self.user_agent.trim().is_empty() {
            anyhow::bail!("user_agent must not be empty");
        }
        Ok(())
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imgfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: FetchConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = FetchConfig::default();
        assert_eq!(cfg.max_file_size_bytes, 10 * 1024 * 1024);
        assert_eq!(cfg.supported_extensions, vec!["jpg", "jpeg", "png", "gif"]);
        assert_eq!(cfg.output_directory, PathBuf::from("Fetched_Images"));
        assert_eq!(cfg.timeout_secs, 10);
        assert_eq!(cfg.workers, 1);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: FetchConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_partial_uses_defaults() {
        let toml = r#"
            max_file_size_bytes = 2048
            workers = 4
        "#;
        let cfg: FetchConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.max_file_size_bytes, 2048);
        assert_eq!(cfg.workers, 4);
        assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(cfg.supported_extensions.len(), 4);
    }

    #[test]
    fn config_toml_custom_markers() {
        let toml = r#"
            supported_extensions = [".jpg", ".png"]
            output_directory = "/tmp/pics"
            user_agent = "test-agent/1.0"
        "#;
        let cfg: FetchConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.supported_extensions, vec![".jpg", ".png"]);
        assert_eq!(cfg.output_directory, PathBuf::from("/tmp/pics"));
        assert_eq!(cfg.user_agent, "test-agent/1.0");
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut cfg = FetchConfig::default();
        cfg.workers = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = FetchConfig::default();
        cfg.timeout_secs = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = FetchConfig::default();
        cfg.supported_extensions.clear();
        assert!(cfg.validate().is_err());

        let mut cfg = FetchConfig::default();
        cfg.user_agent = "  ".to_string();
        assert!(cfg.validate().is_err());
    }
}
