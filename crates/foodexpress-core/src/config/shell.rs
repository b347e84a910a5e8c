//! App shell configuration: origin, cache version, and static manifest.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::AppError;
use crate::result::AppResult;

/// App shell configuration.
///
/// The static manifest lists every asset fetched and cached at install
/// time. Relative entries are resolved against `origin`; absolute entries
/// (third-party scripts) are fetched verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Origin the app shell is served from.
    #[serde(default = "default_origin")]
    pub origin: String,
    /// Cache version tag. A code update bumps this, producing new
    /// generation names so activation purges the previous version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Static asset manifest fetched at install time.
    #[serde(default = "default_manifest")]
    pub static_manifest: Vec<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            version: default_version(),
            static_manifest: default_manifest(),
        }
    }
}

impl ShellConfig {
    /// Parse the configured origin.
    pub fn origin_url(&self) -> AppResult<Url> {
        Url::parse(&self.origin)
            .map_err(|e| AppError::configuration(format!("Invalid shell origin '{}': {e}", self.origin)))
    }

    /// Resolve the static manifest into absolute URLs.
    pub fn manifest_urls(&self) -> AppResult<Vec<Url>> {
        let origin = self.origin_url()?;
        self.static_manifest
            .iter()
            .map(|entry| {
                origin.join(entry).map_err(|e| {
                    AppError::configuration(format!("Invalid manifest entry '{entry}': {e}"))
                })
            })
            .collect()
    }
}

fn default_origin() -> String {
    "http://localhost:8080".to_string()
}

fn default_version() -> String {
    "v1.0.0".to_string()
}

fn default_manifest() -> Vec<String> {
    vec![
        "/".to_string(),
        "/index.html".to_string(),
        "/app.js".to_string(),
        "/styles.css".to_string(),
        "/manifest.json".to_string(),
        "https://cdnjs.cloudflare.com/ajax/libs/feather-icons/4.29.0/feather.min.js".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_resolution() {
        let config = ShellConfig::default();
        let urls = config.manifest_urls().unwrap();
        assert_eq!(urls.len(), 6);
        assert_eq!(urls[1].as_str(), "http://localhost:8080/index.html");
        // Absolute entries are kept verbatim.
        assert_eq!(
            urls[5].as_str(),
            "https://cdnjs.cloudflare.com/ajax/libs/feather-icons/4.29.0/feather.min.js"
        );
    }

    #[test]
    fn test_bad_origin_is_rejected() {
        let config = ShellConfig {
            origin: "not a url".to_string(),
            ..ShellConfig::default()
        };
        assert!(config.origin_url().is_err());
    }
}
