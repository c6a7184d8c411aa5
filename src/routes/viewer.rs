// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Server-rendered viewer page and the form posts behind its buttons.

use super::ViewportQuery;
use crate::derived::map_config;
use crate::error::Result;
use crate::render::{error_page, form_action, loading_page, no_building_page, viewer_page};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Viewer routes (HTML).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/floors/{floor_id}", post(select_floor))
        .route("/pois/{poi_id}/select", post(select_poi))
        .route("/popup/close", post(close_popup))
        .route("/reload", post(reload))
}

/// Back to the page, keeping the viewport width.
fn back_to_viewer(viewport_width: Option<u32>) -> Redirect {
    Redirect::to(&form_action("/", viewport_width))
}

/// The whole viewer: selector, list, map and popup.
async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewportQuery>,
) -> Result<Response> {
    let width = query.viewport_width()?;
    let status = state.loader.status();
    let snapshot = state.store.snapshot();

    if let Some(message) = status.error() {
        return Ok((StatusCode::BAD_GATEWAY, Html(error_page(message))).into_response());
    }

    if snapshot.building.is_none() {
        let page = match state.config.building_id {
            None => no_building_page(),
            Some(_) => loading_page(),
        };
        return Ok(Html(page).into_response());
    }

    let image = state
        .floor_images
        .prepare(snapshot.current_floor.as_ref())
        .await;
    let map = map_config(&snapshot, &state.config.map_style_url, image.url(), width);

    Ok(Html(viewer_page(&snapshot, &map, width)).into_response())
}

/// Floor selector button.
async fn select_floor(
    State(state): State<Arc<AppState>>,
    Path(floor_id): Path<u64>,
    Query(query): Query<ViewportQuery>,
) -> Result<Redirect> {
    let width = query.viewport_width()?;
    let floor = state.store.select_floor(floor_id)?;
    state.floor_images.release().await;
    tracing::debug!(floor_id, level = floor.level, "Floor selected");
    Ok(back_to_viewer(width))
}

/// POI list item.
async fn select_poi(
    State(state): State<Arc<AppState>>,
    Path(poi_id): Path<u64>,
    Query(query): Query<ViewportQuery>,
) -> Result<Redirect> {
    let width = query.viewport_width()?;
    state.store.select_poi_from_list(poi_id)?;
    Ok(back_to_viewer(width))
}

/// Popup close button.
async fn close_popup(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewportQuery>,
) -> Result<Redirect> {
    let width = query.viewport_width()?;
    state.store.close_popup();
    Ok(back_to_viewer(width))
}

/// Reload button on the error banner: start over in the background.
async fn reload(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewportQuery>,
) -> Result<Redirect> {
    let width = query.viewport_width()?;
    state.floor_images.release().await;

    let loader = state.loader.clone();
    let building_id = state.config.building_id;
    tokio::spawn(async move {
        if let Err(e) = loader.reload(building_id).await {
            tracing::warn!(error = %e, "Reload failed");
        }
    });

    Ok(back_to_viewer(width))
}
