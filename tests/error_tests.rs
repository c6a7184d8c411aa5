// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{http::StatusCode, response::IntoResponse};
use indoor_viewer::error::AppError;

#[test]
fn test_transitional_errors() {
    assert!(AppError::NotFound("Floor 3".to_string()).is_transitional());
    assert!(AppError::FloorImage("Image too small: 4x4".to_string()).is_transitional());

    assert!(!AppError::MappingService("HTTP 500".to_string()).is_transitional());
    assert!(!AppError::BadRequest("width".to_string()).is_transitional());
}

#[test]
fn test_error_statuses() {
    let cases = [
        (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
        (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
        (AppError::MappingService("x".into()), StatusCode::BAD_GATEWAY),
        (AppError::FloorImage("x".into()), StatusCode::BAD_GATEWAY),
        (
            AppError::Internal(anyhow::anyhow!("x")),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (err, status) in cases {
        assert_eq!(err.into_response().status(), status);
    }
}

#[test]
fn test_display_includes_detail() {
    let err = AppError::MappingService("HTTP 503: upstream".to_string());
    assert_eq!(err.to_string(), "Mapping service error: HTTP 503: upstream");
}
