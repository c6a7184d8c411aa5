// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Top-level error boundary: a panic while handling a request becomes the
//! generic fallback page instead of a dropped connection.

use crate::render::fallback_page;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::any::Any;

/// Response for `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn panic_fallback(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    tracing::error!(panic = %detail, "Request handler panicked");
    (StatusCode::INTERNAL_SERVER_ERROR, Html(fallback_page())).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::Request;
    use axum::{routing::get, Router};
    use tower::ServiceExt; // for oneshot
    use tower_http::catch_panic::CatchPanicLayer;

    async fn exploding_handler() -> &'static str {
        panic!("render blew up")
    }

    #[tokio::test]
    async fn test_panic_renders_fallback() {
        let app = Router::new()
            .route("/", get(exploding_handler))
            .layer(CatchPanicLayer::custom(panic_fallback));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Reload window"));
    }
}
