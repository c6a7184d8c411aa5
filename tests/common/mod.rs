// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use indoor_viewer::config::Config;
use indoor_viewer::routes::create_router;
use indoor_viewer::AppState;
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const BUILDING_ID: u64 = 7033;

const BUILDING_7033: &str = include_str!("../fixtures/building_7033.json");
const POIS_7033: &str = include_str!("../fixtures/pois_7033.json");

/// Request counters and failure switches for the fake mapping service.
#[derive(Default)]
pub struct FakeSitumCalls {
    pub building: AtomicUsize,
    pub pois: AtomicUsize,
    pub images: AtomicUsize,
    pub fail_building: AtomicBool,
    pub building_delay_ms: AtomicU64,
    pub image_delay_ms: AtomicU64,
}

#[allow(dead_code)]
impl FakeSitumCalls {
    pub fn building(&self) -> usize {
        self.building.load(Ordering::SeqCst)
    }

    pub fn pois(&self) -> usize {
        self.pois.load(Ordering::SeqCst)
    }

    pub fn images(&self) -> usize {
        self.images.load(Ordering::SeqCst)
    }
}

/// A local stand-in for the Situm cartography API.
#[allow(dead_code)]
pub struct FakeSitum {
    pub url: String,
    pub calls: Arc<FakeSitumCalls>,
}

/// A decodable floor plan.
#[allow(dead_code)]
pub fn floor_plan_png() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(64, 48, image::Rgb([230, 230, 230]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("Failed to encode PNG");
    out.into_inner()
}

fn has_api_key(headers: &HeaderMap) -> bool {
    headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| !v.is_empty())
}

async fn fake_building(
    State(calls): State<Arc<FakeSitumCalls>>,
    Path(building_id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    calls.building.fetch_add(1, Ordering::SeqCst);
    if !has_api_key(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let delay = calls.building_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    if calls.fail_building.load(Ordering::SeqCst) {
        return (StatusCode::SERVICE_UNAVAILABLE, "upstream unavailable").into_response();
    }
    if building_id != BUILDING_ID {
        return (StatusCode::NOT_FOUND, "Building not found").into_response();
    }

    ([(header::CONTENT_TYPE, "application/json")], BUILDING_7033).into_response()
}

async fn fake_pois(
    State(calls): State<Arc<FakeSitumCalls>>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    calls.pois.fetch_add(1, Ordering::SeqCst);
    if !has_api_key(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    match params.get("building_id").map(String::as_str) {
        Some("7033") => ([(header::CONTENT_TYPE, "application/json")], POIS_7033).into_response(),
        _ => ([(header::CONTENT_TYPE, "application/json")], r#"{"data": []}"#).into_response(),
    }
}

async fn fake_map(State(calls): State<Arc<FakeSitumCalls>>, Path(name): Path<String>) -> Response {
    calls.images.fetch_add(1, Ordering::SeqCst);

    let delay = calls.image_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    match name.as_str() {
        "101.png" => ([(header::CONTENT_TYPE, "image/png")], floor_plan_png()).into_response(),
        // Served as an image, but the bytes are not one.
        "broken.png" => ([(header::CONTENT_TYPE, "image/png")], "not a png").into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Start the fake mapping service on an ephemeral port.
pub async fn spawn_fake_situm() -> FakeSitum {
    let calls = Arc::new(FakeSitumCalls::default());

    let app = Router::new()
        .route("/api/v1/buildings/{building_id}", get(fake_building))
        .route("/api/v1/pois", get(fake_pois))
        .route("/maps/{name}", get(fake_map))
        .with_state(calls.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake service");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    FakeSitum {
        url: format!("http://{}", addr),
        calls,
    }
}

/// Config pointing at the given mapping service.
#[allow(dead_code)]
pub fn test_config(api_url: &str, building_id: Option<u64>) -> Config {
    Config {
        building_id,
        api_url: api_url.to_string(),
        ..Config::test_default()
    }
}

/// Create a test app from a config.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app_with(config: Config) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config));
    (create_router(state.clone()), state)
}

/// Create a test app that never reaches a mapping service.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::test_default())
}

/// Create a test app backed by the fake service, with building 7033 loaded.
#[allow(dead_code)]
pub async fn create_loaded_app() -> (axum::Router, Arc<AppState>, FakeSitum) {
    let fake = spawn_fake_situm().await;
    let (app, state) = create_test_app_with(test_config(&fake.url, Some(BUILDING_ID)));
    state
        .loader
        .load_all(Some(BUILDING_ID))
        .await
        .expect("Initial load failed");
    (app, state, fake)
}

/// Read a response body as text.
#[allow(dead_code)]
pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}
