// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Curator-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Curator and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Dashboard configuration.
//!
//! Loaded from an optional JSON file; every field has a default so an empty object is a valid
//! config. `CURATOR_BASE_URL` overrides the file, CLI flags override both.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const BASE_URL_ENV: &str = "CURATOR_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_EXPANSION: f64 = 1.5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("page_size must be at least 1")]
    ZeroPageSize,

    #[error("base_url must start with http:// or https:// (got {0:?})")]
    InvalidBaseUrl(String),
}

/// Paths of the backend endpoints, relative to [`Config::base_url`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub items: String,
    pub publish: String,
    pub shrink: String,
    pub expand: String,
    pub rewrite: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            items: "/api/newspapers".to_owned(),
            publish: "/api/publish".to_owned(),
            shrink: "/api/summary/decrease".to_owned(),
            expand: "/api/summary/increase".to_owned(),
            rewrite: "/api/summary/edit".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub page_size: usize,
    /// Factor sent with every expand request.
    pub expansion: f64,
    pub endpoints: Endpoints,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            page_size: DEFAULT_PAGE_SIZE,
            expansion: DEFAULT_EXPANSION,
            endpoints: Endpoints::default(),
            log_file: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_owned(), source })?;
        Self::from_json(&raw).map_err(|source| ConfigError::Parse { path: path.to_owned(), source })
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Applies `CURATOR_BASE_URL` when set to a non-blank value.
    pub fn apply_env(&mut self) {
        self.apply_base_url_override(std::env::var(BASE_URL_ENV).ok());
    }

    fn apply_base_url_override(&mut self, value: Option<String>) {
        if let Some(value) = value.filter(|value| !value.trim().is_empty()) {
            self.base_url = value.trim().to_owned();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, ConfigError, Endpoints, DEFAULT_PAGE_SIZE};

    #[test]
    fn empty_object_is_default_config() {
        let config = Config::from_json("{}").expect("parse config");
        assert_eq!(config, Config::default());
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn partial_endpoints_keep_remaining_defaults() {
        let config =
            Config::from_json(r#"{"page_size": 5, "endpoints": {"publish": "/api/tweet"}}"#)
                .expect("parse config");
        assert_eq!(config.page_size, 5);
        assert_eq!(config.endpoints.publish, "/api/tweet");
        assert_eq!(config.endpoints.items, Endpoints::default().items);
    }

    #[test]
    fn env_override_ignores_blank_values() {
        let mut config = Config::default();
        config.apply_base_url_override(Some("   ".to_owned()));
        assert_eq!(config.base_url, Config::default().base_url);

        config.apply_base_url_override(Some(" https://curate.example ".to_owned()));
        assert_eq!(config.base_url, "https://curate.example");
    }

    #[test]
    fn validate_rejects_zero_page_size_and_bad_urls() {
        let config = Config { page_size: 0, ..Config::default() };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroPageSize)));

        let config = Config { base_url: "localhost:5000".to_owned(), ..Config::default() };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBaseUrl(_))));

        Config::default().validate().expect("default config is valid");
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load(std::path::Path::new("/nonexistent/curator.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
