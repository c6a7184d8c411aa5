// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Full pages: the viewer itself and its placeholder/error states.

use super::assets::{MAPLIBRE_CSS, MAPLIBRE_JS};
use super::map::{map_canvas, poi_popup};
use super::sidebar::{floor_selector, poi_list};
use super::{form_action, text::escape_html};
use crate::derived::MapConfig;
use crate::store::UiState;

/// Wrap a body in the shared document shell.
fn document(title: &str, body: &str, with_map: bool) -> String {
    let map_head = if with_map {
        format!(
            r#"<link rel="stylesheet" href="{MAPLIBRE_CSS}">
<script src="{MAPLIBRE_JS}" defer></script>
<script src="/assets/map.js" defer></script>"#
        )
    } else {
        String::new()
    };

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/assets/viewer.css">
{map_head}
</head>
<body>
{body}
</body>
</html>"#,
        title = escape_html(title),
    )
}

/// The loaded viewer: sidebar, map, popup.
pub fn viewer_page(state: &UiState, map: &MapConfig, viewport_width: Option<u32>) -> String {
    let title = state
        .building
        .as_ref()
        .map(|b| b.name.clone())
        .unwrap_or_else(|| "Indoor viewer".to_string());

    let body = format!(
        r#"<h1>{heading}</h1>
<main class="viewer">
<div class="sidebar">
{selector}
{list}
</div>
<div class="map-panel">
{canvas}
{popup}
</div>
</main>"#,
        heading = escape_html(&title),
        selector = floor_selector(state, viewport_width),
        list = poi_list(state, viewport_width),
        canvas = map_canvas(state, map),
        popup = poi_popup(state, viewport_width),
    );

    document(&title, &body, true)
}

pub fn loading_page() -> String {
    document(
        "Loading",
        r#"<div class="placeholder">Loading building…</div>"#,
        false,
    )
}

/// Shown when no building id is configured; nothing will ever load.
pub fn no_building_page() -> String {
    document(
        "No building",
        r#"<div class="placeholder">No building configured. Set SITUM_BUILDING_ID and restart.</div>"#,
        false,
    )
}

/// Inline error banner for failed fetches.
pub fn error_page(message: &str) -> String {
    let body = format!(
        r#"<div class="error-banner" role="alert">
<p>Error: {message}</p>
<form method="post" action="{reload}"><button type="submit">Reload</button></form>
</div>"#,
        message = escape_html(message),
        reload = form_action("/reload", None),
    );
    document("Error", &body, false)
}

/// Generic fallback for unexpected failures while rendering.
pub fn fallback_page() -> String {
    document(
        "Something went wrong",
        r#"<div class="fallback" role="alert">
<h2>Oops! Something went wrong.</h2>
<p>The viewer hit an unexpected error.</p>
<form method="get" action="/"><button type="submit">Reload window</button></form>
</div>"#,
        false,
    )
}
