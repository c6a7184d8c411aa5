// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sidebar components: floor selector and POI list.

use super::{form_action, text::escape_html};
use crate::derived::listed_pois;
use crate::store::UiState;
use std::fmt::Write;

/// Building header and one button per floor. Empty without a building.
pub fn floor_selector(state: &UiState, viewport_width: Option<u32>) -> String {
    let Some(building) = state.building.as_deref() else {
        return String::new();
    };
    let current = state.current_floor.as_ref().map(|f| f.id);

    let mut buttons = String::new();
    for floor in &building.floors {
        let pressed = current == Some(floor.id);
        let _ = write!(
            buttons,
            r#"<form method="post" action="{action}"><button type="submit" aria-pressed="{pressed}">{name}</button></form>"#,
            action = form_action(&format!("/floors/{}", floor.id), viewport_width),
            name = escape_html(&floor.display_name()),
        );
    }

    format!(
        r#"<section class="floor-selector">
<h2>{name}</h2>
<p>Building ID: {id}</p>
<h3>Floors</h3>
<div>{buttons}</div>
</section>"#,
        name = escape_html(&building.name),
        id = building.id,
    )
}

/// Header with level and count, then the sorted POIs of the current floor.
pub fn poi_list(state: &UiState, viewport_width: Option<u32>) -> String {
    let Some(floor) = state.current_floor.as_ref() else {
        return r#"<section class="poi-list"><p class="placeholder">Loading floor…</p></section>"#
            .to_string();
    };

    let listed = listed_pois(state);
    let selected = state.selected_poi.as_ref().map(|p| p.id);

    let mut items = String::new();
    for poi in &listed {
        let _ = write!(
            items,
            r#"<li aria-selected="{sel}"><form method="post" action="{action}"><button type="submit">{name}</button></form></li>"#,
            sel = selected == Some(poi.id),
            action = form_action(&format!("/pois/{}/select", poi.id), viewport_width),
            name = escape_html(poi.name.trim()),
        );
    }

    format!(
        r#"<section class="poi-list">
<header><h2>Floor: Level {level}</h2><p><strong>{count} points of interest</strong></p></header>
<ul>{items}</ul>
</section>"#,
        level = floor.level,
        count = listed.len(),
    )
}
