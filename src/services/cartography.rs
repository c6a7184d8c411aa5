// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Situm cartography API client.
//!
//! Only two reads are used: building detail and the building's POIs. The
//! floor-plan raster is a plain download of the URL the floor points at.

use crate::config::Config;
use crate::error::AppError;
use crate::models::{Building, Poi};
use serde::Deserialize;
use std::time::Duration;

/// Header carrying the static API key.
const API_KEY_HEADER: &str = "X-API-KEY";

/// Upper bound on a floor-plan download; the page renders without it after.
const FLOOR_IMAGE_TIMEOUT: Duration = Duration::from_secs(20);

/// Situm cartography API client.
#[derive(Clone)]
pub struct CartographyClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Raw floor-plan download.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// The POI listing comes back either bare or wrapped in `data`.
#[derive(Deserialize)]
#[serde(untagged)]
enum PoiListing {
    Bare(Vec<Poi>),
    Paged { data: Vec<Poi> },
}

impl CartographyClient {
    /// Create a client for the given service root (no trailing slash).
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_url.clone(), config.api_key.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get building detail (floors, corners, location) by id.
    pub async fn get_building(&self, building_id: u64) -> Result<Building, AppError> {
        let url = format!("{}/api/v1/buildings/{}", self.base_url, building_id);
        tracing::debug!(building_id, "Fetching building");
        self.get_json(&url, &[]).await
    }

    /// Get every POI of a building.
    pub async fn get_pois(&self, building_id: u64) -> Result<Vec<Poi>, AppError> {
        let url = format!("{}/api/v1/pois", self.base_url);
        tracing::debug!(building_id, "Fetching POIs");
        let listing: PoiListing = self
            .get_json(&url, &[("building_id", building_id.to_string())])
            .await?;

        Ok(match listing {
            PoiListing::Bare(pois) | PoiListing::Paged { data: pois } => pois,
        })
    }

    /// Download a floor-plan raster. Relative URLs resolve against the service.
    pub async fn fetch_floor_image(&self, url: &str) -> Result<FetchedImage, AppError> {
        let url = if url.starts_with('/') {
            format!("{}{}", self.base_url, url)
        } else {
            url.to_string()
        };

        let response = self
            .http
            .get(&url)
            .timeout(FLOOR_IMAGE_TIMEOUT)
            .send()
            .await
            .map_err(|e| AppError::FloorImage(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::FloorImage(format!("HTTP {}", response.status())));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::FloorImage(e.to_string()))?;

        Ok(FetchedImage {
            bytes: bytes.to_vec(),
            content_type,
        })
    }

    /// Authenticated GET with JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::MappingService(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            match status.as_u16() {
                404 => return Err(AppError::NotFound(body)),
                401 | 403 => tracing::warn!(%status, "Mapping service rejected the API key"),
                429 => tracing::warn!("Mapping service rate limit hit (429)"),
                _ => {}
            }

            return Err(AppError::MappingService(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::MappingService(format!("JSON parse error: {}", e)))
    }
}
