use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Global configuration loaded from `~/.config/cosmico/config.toml`.
///
/// Every key is optional in the file; missing keys take the built-in default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CosmicoConfig {
    /// Eventbrite organizer whose events `download` walks when `--org-id` is absent.
    pub org_id: Option<String>,
    /// Events requested per listing page.
    pub page_size: u32,
    /// Eventbrite site root (listing and API live under it).
    pub eventbrite_base_url: String,
    /// StreamYard site root, sent as Referer.
    pub streamyard_base_url: String,
    /// StreamYard public API root.
    pub streamyard_api_base_url: String,
    /// User-Agent for Eventbrite requests.
    pub user_agent: String,
    /// User-Agent for StreamYard and the recording CDN.
    pub browser_user_agent: String,
    /// Time zone reported when registering for a webinar.
    pub time_zone: String,
    pub connect_timeout_secs: u64,
    /// Overall limit for API requests (recording downloads are not bounded by it).
    pub timeout_secs: u64,
    /// Where recordings are saved when `--output` is absent (default `./output`).
    pub output_dir: Option<PathBuf>,
}

impl Default for CosmicoConfig {
    fn default() -> Self {
        Self {
            org_id: None,
            page_size: 20,
            eventbrite_base_url: "https://www.eventbrite.it".to_string(),
            streamyard_base_url: "https://streamyard.com".to_string(),
            streamyard_api_base_url: "https://oa-api.streamyard.com".to_string(),
            user_agent: format!("cosmico-webinar/{}", env!("CARGO_PKG_VERSION")),
            browser_user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36".to_string(),
            time_zone: "Europe/Rome".to_string(),
            connect_timeout_secs: 15,
            timeout_secs: 60,
            output_dir: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cosmico")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CosmicoConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] but for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<CosmicoConfig> {
    if !path.exists() {
        let default_cfg = CosmicoConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: CosmicoConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = CosmicoConfig::default();
        assert!(cfg.org_id.is_none());
        assert_eq!(cfg.page_size, 20);
        assert_eq!(cfg.eventbrite_base_url, "https://www.eventbrite.it");
        assert_eq!(cfg.streamyard_api_base_url, "https://oa-api.streamyard.com");
        assert_eq!(cfg.time_zone, "Europe/Rome");
        assert!(cfg.user_agent.starts_with("cosmico-webinar/"));
    }

    #[test]
    fn config_toml_partial_values() {
        let toml = r#"
            org_id = "12345678"
            page_size = 5
        "#;
        let cfg: CosmicoConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.org_id.as_deref(), Some("12345678"));
        assert_eq!(cfg.page_size, 5);
        assert_eq!(cfg.timeout_secs, 60);
        assert!(cfg.output_dir.is_none());
    }

    #[test]
    fn config_toml_custom_endpoints() {
        let toml = r#"
            eventbrite_base_url = "http://127.0.0.1:8080"
            streamyard_api_base_url = "http://127.0.0.1:8081"
            time_zone = "UTC"
            output_dir = "/srv/webinars"
        "#;
        let cfg: CosmicoConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.eventbrite_base_url, "http://127.0.0.1:8080");
        assert_eq!(cfg.streamyard_api_base_url, "http://127.0.0.1:8081");
        assert_eq!(cfg.time_zone, "UTC");
        assert_eq!(cfg.output_dir.as_deref(), Some(Path::new("/srv/webinars")));
    }

    #[test]
    fn load_or_init_writes_defaults_then_reads_them_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let created = load_or_init_at(&path).unwrap();
        assert!(path.exists());

        fs::write(&path, "page_size = 7\n").unwrap();
        let loaded = load_or_init_at(&path).unwrap();
        assert_eq!(created.page_size, 20);
        assert_eq!(loaded.page_size, 7);
    }

    #[test]
    fn load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "page_size = \"many\"\n").unwrap();
        assert!(load_or_init_at(&path).is_err());
    }
}
