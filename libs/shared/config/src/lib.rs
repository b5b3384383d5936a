use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_SESSION_FILE: &str = ".turnos/session.json";
pub const DEFAULT_SKELETON_COUNT: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_url: String,
    pub session_file: PathBuf,
    pub skeleton_count: usize,
    #[serde(skip)]
    api_url_from_env: bool,
}

impl AppConfig {
    pub fn new(api_url: impl Into<String>, session_file: impl Into<PathBuf>) -> Self {
        Self {
            api_url: normalize_base_url(api_url.into()),
            session_file: session_file.into(),
            skeleton_count: DEFAULT_SKELETON_COUNT,
            api_url_from_env: true,
        }
    }

    pub fn from_env() -> Self {
        let api_url_var = env::var("API_URL").ok().filter(|v| !v.trim().is_empty());
        let api_url_from_env = api_url_var.is_some();

        let config = Self {
            api_url: normalize_base_url(api_url_var.unwrap_or_else(|| {
                warn!("API_URL not set, using default {}", DEFAULT_API_URL);
                DEFAULT_API_URL.to_string()
            })),
            session_file: env::var("TURNOS_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_FILE)),
            skeleton_count: env::var("TURNOS_SKELETON_COUNT")
                .ok()
                .and_then(|raw| match raw.trim().parse::<usize>() {
                    Ok(count) => Some(count),
                    Err(_) => {
                        warn!("TURNOS_SKELETON_COUNT={} is not a number, using default", raw);
                        None
                    }
                })
                .unwrap_or(DEFAULT_SKELETON_COUNT),
            api_url_from_env,
        };

        if !config.is_configured() {
            warn!("Client not fully configured - API_URL missing, requests go to {}", config.api_url);
        }

        config
    }

    pub fn with_skeleton_count(mut self, count: usize) -> Self {
        self.skeleton_count = count;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_url_from_env && !self.api_url.is_empty()
    }
}

// Paths are always joined as `{base}{/path}`.
fn normalize_base_url(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}
