// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Server-rendered presentation components.
//!
//! Each component is a stateless function of a store snapshot (and derived
//! values) to an HTML fragment. Every service-provided string goes through
//! [`escape_html`]; POI info is reduced to plain text first.

pub mod assets;
pub mod map;
pub mod page;
pub mod sidebar;
pub mod text;

pub use map::{map_canvas, poi_popup};
pub use page::{error_page, fallback_page, loading_page, no_building_page, viewer_page};
pub use sidebar::{floor_selector, poi_list};
pub use text::{escape_html, info_to_text};

/// Form target that keeps the viewport width across the redirect.
pub(crate) fn form_action(path: &str, viewport_width: Option<u32>) -> String {
    match viewport_width {
        Some(width) => format!("{}?width={}", path, width),
        None => path.to_string(),
    }
}
