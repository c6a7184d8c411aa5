// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Floor-plan image lifecycle: fetch, serve, revoke.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use indoor_viewer::services::FloorImageState;
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};
use tower::ServiceExt;

mod common;

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Blob URL of the floor plan in the page's map config.
fn blob_url(html: &str) -> String {
    let start = html.find("/blobs/").expect("no floor plan in page");
    let rest = &html[start..];
    let end = rest.find('&').unwrap_or(rest.len());
    rest[..end].to_string()
}

#[tokio::test]
async fn test_floor_image_served_and_cached() {
    let (app, state, fake) = common::create_loaded_app().await;

    let html = common::body_string(app.clone().oneshot(get("/")).await.unwrap()).await;
    let url = blob_url(&html);
    assert_eq!(fake.calls.images(), 1);
    assert_eq!(state.floor_images.registry().len(), 1);

    // Rendering again on the same floor reuses the live image.
    let again = common::body_string(app.clone().oneshot(get("/")).await.unwrap()).await;
    assert_eq!(blob_url(&again), url);
    assert_eq!(fake.calls.images(), 1);

    let response = app.clone().oneshot(get(&url)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "image/png");
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "private, no-cache"
    );
    let etag = response
        .headers()
        .get(header::ETAG)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(body.to_vec(), common::floor_plan_png());

    let response = app
        .oneshot(
            Request::builder()
                .uri(&url)
                .header(header::IF_NONE_MATCH, &etag)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
}

#[tokio::test]
async fn test_floor_change_revokes_image() {
    let (app, state, _fake) = common::create_loaded_app().await;

    let html = common::body_string(app.clone().oneshot(get("/")).await.unwrap()).await;
    let url = blob_url(&html);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/floors/102")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(state.floor_images.registry().is_empty());

    let response = app.oneshot(get(&url)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_floor_change_does_not_wait_for_download() {
    let (_app, state, fake) = common::create_loaded_app().await;
    fake.calls.image_delay_ms.store(1000, Ordering::SeqCst);

    let pending = {
        let state = state.clone();
        tokio::spawn(async move {
            let floor = state.store.snapshot().current_floor;
            state.floor_images.prepare(floor.as_ref()).await
        })
    };

    // The ground floor's image is still downloading when the user moves on.
    tokio::time::sleep(Duration::from_millis(100)).await;
    state.store.select_floor(102).unwrap();

    let started = Instant::now();
    state.floor_images.release().await;
    assert!(
        started.elapsed() < Duration::from_millis(500),
        "release blocked for {:?}",
        started.elapsed()
    );

    // The late image is dropped rather than installed for the wrong floor.
    assert_eq!(pending.await.unwrap(), FloorImageState::Missing);
    assert!(state.floor_images.registry().is_empty());
    assert_eq!(fake.calls.images(), 1);
}

#[tokio::test]
async fn test_corrupt_image_degrades_to_no_floor_plan() {
    let (app, state, fake) = common::create_loaded_app().await;
    state.store.select_floor(102).unwrap();

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = common::body_string(response).await;

    assert!(html.contains("&quot;floor_plan&quot;:null"));
    assert!(html.contains(">Escalera</button>"));
    assert_eq!(fake.calls.images(), 1);
    assert!(state.floor_images.registry().is_empty());
}

#[tokio::test]
async fn test_unknown_blob_is_not_found() {
    let (app, _state) = common::create_test_app();

    let response = app.oneshot(get("/blobs/deadbeef-0")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_static_assets() {
    let (app, _state) = common::create_test_app();

    let response = app.clone().oneshot(get("/assets/map.js")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/javascript"));

    let response = app.oneshot(get("/assets/viewer.css")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
