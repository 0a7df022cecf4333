//! Backend selection, resolved once from the environment.
//!
//! | variable | meaning |
//! |---|---|
//! | `CLARITY_USE_LOCAL_STORAGE` | `true` or `1` forces the local backend |
//! | `CLARITY_API_BASE_URL` | remote REST base URL |
//! | `CLARITY_DATA_DIR` | local store directory, default `<data dir>/clarity` |

use std::path::PathBuf;

use crate::error::GatewayError;

const APP_DIR: &str = "clarity";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub use_local_store: bool,
    pub remote_base_url: Option<String>,
    pub data_dir: PathBuf,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, GatewayError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let use_local_store = get("CLARITY_USE_LOCAL_STORAGE")
            .is_some_and(|value| value.eq_ignore_ascii_case("true") || value == "1");

        let data_dir = match get("CLARITY_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };

        Ok(Self {
            use_local_store,
            remote_base_url: get("CLARITY_API_BASE_URL"),
            data_dir,
        })
    }

    /// Local store with no remote configured.
    pub fn local(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            use_local_store: true,
            remote_base_url: None,
            data_dir: data_dir.into(),
        }
    }

    /// The remote URL, unless the local store is forced or no URL is set.
    pub fn remote_url(&self) -> Option<&str> {
        if self.use_local_store {
            return None;
        }
        self.remote_base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

fn default_data_dir() -> Result<PathBuf, GatewayError> {
    let base = dirs::data_dir()
        .ok_or_else(|| GatewayError::Config("no data directory found".to_string()))?;
    Ok(base.join(APP_DIR))
}
