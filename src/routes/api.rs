// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON API over the same store the HTML viewer uses.

use super::ViewportQuery;
use crate::derived::{map_config, markers, markers_geojson, visible_pois, MapConfig};
use crate::error::Result;
use crate::models::{Floor, Poi};
use crate::render::info_to_text;
use crate::services::LoadStatus;
use crate::store::UiState;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use geojson::FeatureCollection;
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/state", get(get_state))
        .route("/api/pois", get(get_pois))
        .route("/api/map", get(get_map))
        .route("/api/map/markers", get(get_markers))
        .route("/api/floors/{floor_id}", post(select_floor))
        .route("/api/pois/{poi_id}/select", post(select_poi))
        .route("/api/pois/{poi_id}/marker-click", post(marker_click))
        .route("/api/popup/close", post(close_popup))
}

// ─── Response types ──────────────────────────────────────────

/// One floor as the selector shows it.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FloorSummary {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub level: i32,
    pub name: String,
    pub has_map: bool,
}

impl From<&Floor> for FloorSummary {
    fn from(floor: &Floor) -> Self {
        Self {
            id: floor.id,
            level: floor.level,
            name: floor.display_name(),
            has_map: floor.map_url().is_some(),
        }
    }
}

/// One POI. `info` is already reduced to plain text.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PoiSummary {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub floor_id: u64,
    pub name: String,
    pub category_name: Option<String>,
    pub info: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl From<&Poi> for PoiSummary {
    fn from(poi: &Poi) -> Self {
        let position = poi.marker_position();
        Self {
            id: poi.id,
            floor_id: poi.floor_id,
            name: poi.name.clone(),
            category_name: poi.category_name.clone(),
            info: poi
                .info
                .as_deref()
                .map(info_to_text)
                .filter(|text| !text.is_empty()),
            lat: position.map(|p| p.lat),
            lng: position.map(|p| p.lng),
        }
    }
}

/// Building header plus its floors.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct BuildingSummary {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub name: String,
    pub floors: Vec<FloorSummary>,
}

/// Full viewer state.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StateResponse {
    pub building: Option<BuildingSummary>,
    pub current_floor: Option<FloorSummary>,
    pub selected_poi: Option<PoiSummary>,
    pub is_popup_open: bool,
    /// POIs on the current floor, in draw order.
    pub pois: Vec<PoiSummary>,
    pub status: LoadStatus,
}

impl StateResponse {
    fn new(state: &UiState, status: LoadStatus) -> Self {
        let building = state.building.as_deref().map(|b| BuildingSummary {
            id: b.id,
            name: b.name.clone(),
            floors: b.floors.iter().map(FloorSummary::from).collect(),
        });

        Self {
            building,
            current_floor: state.current_floor.as_ref().map(FloorSummary::from),
            selected_poi: state.selected_poi.as_ref().map(PoiSummary::from),
            is_popup_open: state.is_popup_open,
            pois: visible_poi_summaries(state),
            status,
        }
    }
}

fn visible_poi_summaries(state: &UiState) -> Vec<PoiSummary> {
    visible_pois(state)
        .into_iter()
        .map(PoiSummary::from)
        .collect()
}

fn current_state(state: &AppState) -> Json<StateResponse> {
    Json(StateResponse::new(
        &state.store.snapshot(),
        state.loader.status(),
    ))
}

// ─── Reads ───────────────────────────────────────────────────

async fn get_state(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    current_state(&state)
}

async fn get_pois(State(state): State<Arc<AppState>>) -> Json<Vec<PoiSummary>> {
    Json(visible_poi_summaries(&state.store.snapshot()))
}

/// Map configuration, resolving the floor image first.
async fn get_map(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewportQuery>,
) -> Result<Json<MapConfig>> {
    let width = query.viewport_width()?;
    let snapshot = state.store.snapshot();
    let image = state
        .floor_images
        .prepare(snapshot.current_floor.as_ref())
        .await;

    Ok(Json(map_config(
        &snapshot,
        &state.config.map_style_url,
        image.url(),
        width,
    )))
}

async fn get_markers(State(state): State<Arc<AppState>>) -> Json<FeatureCollection> {
    let snapshot = state.store.snapshot();
    let selected = snapshot.selected_poi.as_ref().map(|p| p.id);
    Json(markers_geojson(&markers(&visible_pois(&snapshot), selected)))
}

// ─── Interactions ────────────────────────────────────────────

async fn select_floor(
    State(state): State<Arc<AppState>>,
    Path(floor_id): Path<u64>,
) -> Result<Json<StateResponse>> {
    state.store.select_floor(floor_id)?;
    state.floor_images.release().await;
    Ok(current_state(&state))
}

async fn select_poi(
    State(state): State<Arc<AppState>>,
    Path(poi_id): Path<u64>,
) -> Result<Json<StateResponse>> {
    state.store.select_poi_from_list(poi_id)?;
    Ok(current_state(&state))
}

async fn marker_click(
    State(state): State<Arc<AppState>>,
    Path(poi_id): Path<u64>,
) -> Result<Json<StateResponse>> {
    state.store.select_poi_from_marker(poi_id)?;
    Ok(current_state(&state))
}

async fn close_popup(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    state.store.close_popup();
    current_state(&state)
}
