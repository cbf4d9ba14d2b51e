use std::time::Duration;
use std::{fs::File, path::Path};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::{HarnessError, Result};


pub const DEFAULT_BASE_URL: &str = "https://dogapi.dog";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const CI_RETRIES: u32 = 2;

// ================== Public types ==================

/// Suite-wide settings, resolved once at startup and handed to every
/// scenario's request context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    pub base_url: String,
    pub extra_http_headers: IndexMap<String, String>,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub ci: bool,
    // None means "derive from `ci`"
    pub retries: Option<u32>,
    pub workers: Option<usize>,
    pub forbid_only: Option<bool>,
    pub proxy: Option<ProxyConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub server: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl ProxyConfig {
    /// The proxy as reqwest sees it. A server reqwest cannot parse is a
    /// configuration error, not a transport one.
    pub fn to_reqwest(&self) -> Result<reqwest::Proxy> {
        let mut proxy = reqwest::Proxy::all(&self.server).map_err(|e| {
            HarnessError::ConfigError(format!("invalid proxy server {:?}: {e}", self.server))
        })?;
        if let Some(user) = &self.username {
            proxy = proxy.basic_auth(user, self.password.as_deref().unwrap_or_default());
        }
        Ok(proxy)
    }
}

impl Default for SuiteConfig {
    fn default() -> Self {
        let mut extra_http_headers = IndexMap::new();
        extra_http_headers.insert("Accept".to_string(), "application/json".to_string());
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            extra_http_headers,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            ci: false,
            retries: None,
            workers: None,
            forbid_only: None,
            proxy: None,
        }
    }
}

pub fn load_config_from_path<P: AsRef<Path>>(path: P) -> Result<SuiteConfig> {
    let f = File::open(path)?;
    Ok(serde_yaml::from_reader(f)?)
}

// ================== Resolution ==================

impl SuiteConfig {
    /// defaults < YAML file < environment (including `.env`).
    /// CLI overrides are applied by the caller afterwards, so the merged
    /// result is not validated here; call [`SuiteConfig::validate`] last.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        if let Ok(p) = dotenvy::dotenv() {
            tracing::debug!(path = %p.display(), "loaded .env");
        }

        let mut cfg = match path {
            Some(p) => load_config_from_path(p)?,
            None => SuiteConfig::default(),
        };
        cfg.apply_env_from(|k| std::env::var(k).ok())?;
        Ok(cfg)
    }

    /// Overlay values from an environment-like lookup.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("BASE_URL").filter(|v| !v.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        if let Some(ci) = lookup("CI") {
            self.ci = parse_flag(&ci);
        }
        if let Some(secs) = lookup("DOGAPI_TIMEOUT_SECS") {
            self.timeout_secs = secs.trim().parse().map_err(|_| {
                HarnessError::ConfigError(format!("DOGAPI_TIMEOUT_SECS is not a number: {secs}"))
            })?;
        }
        if let Some(server) = lookup("PROXY_SERVER").filter(|v| !v.trim().is_empty()) {
            self.proxy = Some(ProxyConfig {
                server,
                username: lookup("PROXY_USERNAME"),
                password: lookup("PROXY_PASSWORD"),
            });
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.base_url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(HarnessError::ConfigError(format!(
                "base_url must be http or https, got {}",
                url.scheme()
            )));
        }
        if self.workers == Some(0) {
            return Err(HarnessError::ConfigError(
                "workers must be at least 1".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(HarnessError::ConfigError(
                "timeout_secs must be at least 1".to_string(),
            ));
        }
        if let Some(proxy) = &self.proxy {
            proxy.to_reqwest()?;
        }
        Ok(())
    }

    pub fn base_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.base_url)?)
    }

    pub fn retries(&self) -> u32 {
        self.retries
            .unwrap_or(if self.ci { CI_RETRIES } else { 0 })
    }

    pub fn workers(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            if self.ci {
                1
            } else {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(4)
            }
        })
    }

    pub fn forbid_only(&self) -> bool {
        self.forbid_only.unwrap_or(self.ci)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn parse_flag(v: &str) -> bool {
    let v = v.trim();
    !v.is_empty() && v != "0" && !v.eq_ignore_ascii_case("false")
}
