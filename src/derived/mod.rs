// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pure views computed from a store snapshot.
//!
//! Nothing here is cached or stored; callers recompute from the current
//! [`UiState`](crate::store::UiState) whenever they need a view.

pub mod map;
pub mod pois;
pub mod projection;

pub use map::{map_config, markers, markers_geojson, FloorPlanSource, MapConfig, Marker};
pub use pois::{compare_names, filter_pois, listed_pois, sort_pois, visible_pois};
pub use projection::{
    bearing_degrees, corner_winding, image_coordinates, map_view, responsive_zoom, MapView,
};
