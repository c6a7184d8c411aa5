// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! The target building and the static Situm API key are the only inputs that
//! change the viewer's behavior; the rest are deployment knobs.

use std::env;

/// Default Situm REST endpoint.
pub const DEFAULT_API_URL: &str = "https://dashboard.situm.com";

/// Default base-map style handed to MapLibre.
pub const DEFAULT_MAP_STYLE_URL: &str =
    "https://basemaps.cartocdn.com/gl/positron-gl-style/style.json";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Building to display. `None` disables all fetching.
    pub building_id: Option<u64>,
    /// Static Situm API key
    pub api_key: String,
    /// Base URL of the cartography service
    pub api_url: String,
    /// Base-map style URL for the map engine
    pub map_style_url: String,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            building_id: parse_building_id(env::var("SITUM_BUILDING_ID").ok())?,
            api_key: env::var("SITUM_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("SITUM_API_KEY"))?,
            api_url: env::var("SITUM_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            map_style_url: env::var("MAP_STYLE_URL")
                .unwrap_or_else(|_| DEFAULT_MAP_STYLE_URL.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        })
    }

    /// Config for tests: points at a local service that is never started.
    pub fn test_default() -> Self {
        Self {
            building_id: Some(7033),
            api_key: "test_api_key".to_string(),
            api_url: "http://127.0.0.1:9".to_string(),
            map_style_url: DEFAULT_MAP_STYLE_URL.to_string(),
            port: 8080,
        }
    }
}

/// An unset variable means "no building"; anything else must be a positive id.
fn parse_building_id(raw: Option<String>) -> Result<Option<u64>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    match raw.trim().parse::<u64>() {
        Ok(id) if id > 0 => Ok(Some(id)),
        _ => Err(ConfigError::Invalid {
            name: "SITUM_BUILDING_ID",
            value: raw,
        }),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
