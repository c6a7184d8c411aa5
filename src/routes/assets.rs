// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Static assets and registered floor-plan blobs.

use crate::error::{AppError, Result};
use crate::render::assets::{MAP_SCRIPT, STYLESHEET};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/assets/map.js", get(map_script))
        .route("/assets/viewer.css", get(stylesheet))
        .route("/blobs/{token}", get(get_blob))
}

async fn map_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        MAP_SCRIPT,
    )
}

async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}

/// Serve a floor image while its reference is live.
async fn get_blob(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
    headers: HeaderMap,
) -> Result<Response> {
    let blob = state
        .floor_images
        .registry()
        .get(&token)
        .ok_or_else(|| AppError::NotFound(format!("Blob {}", token)))?;

    let etag = format!("\"{}\"", blob.etag);
    let etag_value =
        HeaderValue::from_str(&etag).map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;

    let unchanged = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.split(',').any(|tag| tag.trim() == etag || tag.trim() == "*"));

    if unchanged {
        return Ok((
            StatusCode::NOT_MODIFIED,
            [
                (header::ETAG, etag_value),
                (header::CACHE_CONTROL, HeaderValue::from_static("private, no-cache")),
            ],
        )
            .into_response());
    }

    let content_type = HeaderValue::from_str(&blob.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::ETAG, etag_value),
            (header::CACHE_CONTROL, HeaderValue::from_static("private, no-cache")),
        ],
        blob.bytes.clone(),
    )
        .into_response())
}
