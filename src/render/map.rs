// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map canvas and POI detail popup.

use super::{form_action, text::escape_html, text::info_to_text};
use crate::derived::MapConfig;
use crate::store::UiState;

/// Map container. The config travels as a data attribute; `/assets/map.js`
/// turns it into a MapLibre map.
pub fn map_canvas(state: &UiState, config: &MapConfig) -> String {
    if state.building.is_none() {
        return r#"<div class="placeholder">Loading map…</div>"#.to_string();
    }

    let json = match serde_json::to_string(config) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize map config");
            return r#"<div class="placeholder">Loading map…</div>"#.to_string();
        }
    };

    format!(
        r#"<div id="map" data-config="{config}"></div>"#,
        config = escape_html(&json)
    )
}

/// Detail panel for a POI picked on the map. Empty unless the popup is open.
pub fn poi_popup(state: &UiState, viewport_width: Option<u32>) -> String {
    let (true, Some(poi)) = (state.is_popup_open, state.selected_poi.as_ref()) else {
        return String::new();
    };

    let category = poi
        .category_name
        .as_deref()
        .map(|c| format!(r#"<span class="category">{}</span>"#, escape_html(c)))
        .unwrap_or_default();

    let floor_name = state
        .current_floor
        .as_ref()
        .map(|f| f.display_name())
        .unwrap_or_else(|| format!("Level {}", poi.floor_id));

    let info = poi
        .info
        .as_deref()
        .map(info_to_text)
        .filter(|text| !text.is_empty())
        .map(|text| format!("<p>{}</p>", escape_html(&text)))
        .unwrap_or_else(|| r#"<p class="empty">No additional information.</p>"#.to_string());

    format!(
        r#"<aside class="popup" role="dialog" aria-label="{name}">
<header><h3>{name}</h3>{category}<form method="post" action="{close}"><button type="submit" aria-label="Close">×</button></form></header>
<div class="body"><p>Floor: <strong>{floor}</strong></p>{info}</div>
</aside>"#,
        name = escape_html(poi.name.trim()),
        close = form_action("/popup/close", viewport_width),
        floor = escape_html(&floor_name),
    )
}
