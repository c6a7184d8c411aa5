// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod api;
pub mod assets;
pub mod viewer;

use crate::error::{AppError, Result};
use crate::middleware::{add_security_headers, panic_fallback};
use crate::AppState;
use axum::extract::State;
use axum::{middleware, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthResponse {
    pub status: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number | null"))]
    pub building_id: Option<u64>,
}

/// Health check response
async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        building_id: state.config.building_id,
    })
}

/// `?width=` carried by page loads and form redirects.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ViewportQuery {
    #[validate(range(min = 1, max = 10000))]
    pub width: Option<u32>,
}

impl ViewportQuery {
    /// Validated viewport width, if the client sent one.
    pub fn viewport_width(&self) -> Result<Option<u32>> {
        self.validate()
            .map_err(|e| AppError::BadRequest(format!("Invalid width: {}", e)))?;
        Ok(self.width)
    }
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(viewer::routes())
        .merge(api::routes())
        .merge(assets::routes())
        .layer(middleware::from_fn(add_security_headers))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CatchPanicLayer::custom(panic_fallback))
        .with_state(state)
}
