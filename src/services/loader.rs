// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data-fetch layer.
//!
//! Fetches the building, then its POIs, and writes them into the store.
//! Each fetch is gated on its key being known, cached forever per key, and
//! discarded on arrival if the store was reset while it was in flight.

use crate::derived::corner_winding;
use crate::error::AppError;
use crate::models::{Building, Poi};
use crate::services::cartography::CartographyClient;
use crate::services::query_cache::QueryCache;
use crate::store::ViewerStore;
use chrono::{DateTime, Utc};
use geo::algorithm::winding_order::WindingOrder;
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// State of one query, as views need it.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum QueryState {
    /// Not started (or disabled because its key is unknown).
    #[default]
    Idle,
    Loading,
    Ready {
        #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
        fetched_at: DateTime<Utc>,
    },
    Failed {
        message: String,
    },
}

impl QueryState {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            QueryState::Failed { message } => Some(message),
            _ => None,
        }
    }
}

/// Status of both queries.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LoadStatus {
    pub building: QueryState,
    pub pois: QueryState,
}

impl LoadStatus {
    /// First error message, building before POIs.
    pub fn error(&self) -> Option<&str> {
        self.building.error().or_else(|| self.pois.error())
    }
}

/// Loads cartography into the store.
#[derive(Clone)]
pub struct ViewerLoader {
    client: CartographyClient,
    store: ViewerStore,
    buildings: QueryCache<u64, Building>,
    pois: QueryCache<u64, Vec<Poi>>,
    status: Arc<RwLock<LoadStatus>>,
}

impl ViewerLoader {
    pub fn new(client: CartographyClient, store: ViewerStore) -> Self {
        Self {
            client,
            store,
            buildings: QueryCache::new(),
            pois: QueryCache::new(),
            status: Arc::new(RwLock::new(LoadStatus::default())),
        }
    }

    pub fn status(&self) -> LoadStatus {
        self.status
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn update_status(&self, f: impl FnOnce(&mut LoadStatus)) {
        f(&mut self.status.write().unwrap_or_else(PoisonError::into_inner));
    }

    /// Like [`Self::update_status`], but dropped if the store was reset after
    /// `generation` was taken. Checked under the status lock so a reload's
    /// own status reset always lands last.
    fn update_status_for(&self, generation: u64, f: impl FnOnce(&mut LoadStatus)) {
        let mut status = self.status.write().unwrap_or_else(PoisonError::into_inner);
        if self.store.generation() == generation {
            f(&mut status);
        } else {
            tracing::debug!(generation, "Dropping status update from a stale fetch");
        }
    }

    /// Fetch a building and make it current.
    ///
    /// With no id nothing is requested. Returns the building if it was
    /// applied to the store.
    pub async fn load_building(
        &self,
        building_id: Option<u64>,
    ) -> Result<Option<Arc<Building>>, AppError> {
        let Some(building_id) = building_id else {
            tracing::debug!("No building id; building fetch disabled");
            return Ok(None);
        };

        let generation = self.store.generation();
        self.update_status(|s| s.building = QueryState::Loading);

        let client = self.client.clone();
        let result = self
            .buildings
            .get_or_fetch(building_id, || async move {
                client.get_building(building_id).await
            })
            .await;

        let building = match result {
            Ok(b) => b,
            Err(e) => {
                log_fetch_error(building_id, "Building", &e);
                let message = e.to_string();
                self.update_status_for(generation, |s| s.building = QueryState::Failed { message });
                return Err(e);
            }
        };

        check_corners(&building);

        if !self.store.apply_building(generation, (*building).clone()) {
            tracing::debug!(building_id, generation, "Discarding stale building response");
            return Ok(None);
        }

        tracing::info!(
            building_id,
            name = %building.name,
            floors = building.floors.len(),
            "Building loaded"
        );
        self.update_status_for(generation, |s| {
            s.building = QueryState::Ready {
                fetched_at: Utc::now(),
            }
        });
        Ok(Some(building))
    }

    /// Fetch POIs for the building currently in the store.
    ///
    /// Gated on the building: without one the service is never called.
    pub async fn load_pois(&self) -> Result<Option<Arc<Vec<Poi>>>, AppError> {
        let Some(building_id) = self.store.building_id() else {
            tracing::debug!("No building loaded; POI fetch disabled");
            return Ok(None);
        };

        let generation = self.store.generation();
        self.update_status(|s| s.pois = QueryState::Loading);

        let client = self.client.clone();
        let result = self
            .pois
            .get_or_fetch(building_id, || async move { client.get_pois(building_id).await })
            .await;

        let pois = match result {
            Ok(p) => p,
            Err(e) => {
                log_fetch_error(building_id, "POI", &e);
                let message = e.to_string();
                self.update_status_for(generation, |s| s.pois = QueryState::Failed { message });
                return Err(e);
            }
        };

        if !self.store.apply_pois(generation, (*pois).clone()) {
            tracing::debug!(building_id, generation, "Discarding stale POI response");
            return Ok(None);
        }

        tracing::info!(building_id, count = pois.len(), "POIs loaded");
        self.update_status_for(generation, |s| {
            s.pois = QueryState::Ready {
                fetched_at: Utc::now(),
            }
        });
        Ok(Some(pois))
    }

    /// Building first, then its POIs.
    pub async fn load_all(&self, building_id: Option<u64>) -> Result<(), AppError> {
        self.load_building(building_id).await?;
        self.load_pois().await?;
        Ok(())
    }

    /// Start over: new store generation, fresh status, load again.
    ///
    /// Successful fetches stay cached, so this only hits the network for
    /// queries that failed.
    pub async fn reload(&self, building_id: Option<u64>) -> Result<(), AppError> {
        let generation = self.store.reset();
        self.update_status(|s| *s = LoadStatus::default());
        tracing::info!(generation, "Reloading viewer data");
        self.load_all(building_id).await
    }
}

/// A missing building is a data problem; anything else is the service.
fn log_fetch_error(building_id: u64, what: &str, err: &AppError) {
    if err.is_transitional() {
        tracing::warn!(building_id, error = %err, "{} not available", what);
    } else {
        tracing::error!(building_id, error = %err, "{} fetch failed", what);
    }
}

/// Corners are trusted as NW, NE, SE, SW; say so when the data disagrees.
fn check_corners(building: &Building) {
    let count = building.corners.len();
    if count != 4 {
        tracing::warn!(
            building_id = building.id,
            count,
            "Building does not have exactly four corners"
        );
    }
    if let Some(WindingOrder::CounterClockwise) = corner_winding(&building.corners) {
        tracing::warn!(
            building_id = building.id,
            "Building corners wind counter-clockwise; floor plan may be mirrored"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_prefers_building() {
        let mut status = LoadStatus::default();
        assert!(status.error().is_none());

        status.pois = QueryState::Failed {
            message: "pois down".to_string(),
        };
        assert_eq!(status.error(), Some("pois down"));

        status.building = QueryState::Failed {
            message: "building down".to_string(),
        };
        assert_eq!(status.error(), Some("building down"));
    }

    #[test]
    fn test_query_state_serializes_tagged() {
        let json = serde_json::to_value(QueryState::Failed {
            message: "HTTP 503".to_string(),
        })
        .unwrap();
        assert_eq!(json["state"], "failed");
        assert_eq!(json["message"], "HTTP 503");

        assert!(QueryState::Loading.is_loading());
        assert!(!QueryState::Idle.is_loading());
    }

    #[tokio::test]
    async fn test_without_building_id_nothing_loads() {
        let store = ViewerStore::new();
        let loader = ViewerLoader::new(CartographyClient::new("http://127.0.0.1:9", "key"), store.clone());

        assert!(loader.load_building(None).await.unwrap().is_none());
        assert!(loader.load_pois().await.unwrap().is_none());
        assert_eq!(loader.status(), LoadStatus::default());
        assert!(store.snapshot().building.is_none());
    }
}
