// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map view and floor-plan image projection.
//!
//! Corner convention: the service's corners are read as index 0 = NW,
//! 1 = NE, 2 = SE, 3 = SW, and emitted as `[lng, lat]` pairs in MapLibre
//! ImageSource order (top-left, top-right, bottom-right, bottom-left).
//! Walked in that order the ring is clockwise; [`corner_winding`] lets the
//! loader flag buildings whose data disagrees.

use crate::models::{Building, LatLng};
use geo::algorithm::winding_order::{Winding, WindingOrder};
use geo::LineString;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Center used when the building has no usable location.
pub const FALLBACK_CENTER: LatLng = LatLng::new(43.352942, -8.426001);
pub const FALLBACK_ZOOM: f64 = 15.0;

/// Zoom for wide viewports (and when the width is unknown).
pub const DEFAULT_ZOOM: f64 = 18.0;

/// (exclusive upper width bound in px, zoom)
const ZOOM_BREAKPOINTS: [(u32, f64); 3] = [(500, 16.2), (768, 16.8), (1280, 17.4)];

/// Initial camera for the map engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MapView {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
    /// Degrees clockwise from north.
    pub bearing: f64,
    pub pitch: f64,
}

/// Zoom level for a viewport width, stepping down on narrow screens.
pub fn responsive_zoom(viewport_width: Option<u32>) -> f64 {
    let Some(width) = viewport_width else {
        return DEFAULT_ZOOM;
    };
    ZOOM_BREAKPOINTS
        .iter()
        .find(|(bound, _)| width < *bound)
        .map(|(_, zoom)| *zoom)
        .unwrap_or(DEFAULT_ZOOM)
}

/// Building rotation (radians) as a map bearing (degrees).
pub fn bearing_degrees(rotation: f64) -> f64 {
    if rotation.is_finite() {
        rotation.to_degrees()
    } else {
        0.0
    }
}

/// Initial view: centered on the building and rotated to square it up.
pub fn map_view(building: Option<&Building>, viewport_width: Option<u32>) -> MapView {
    match building.and_then(|b| b.location.filter(LatLng::is_finite).map(|loc| (b, loc))) {
        Some((b, loc)) => MapView {
            longitude: loc.lng,
            latitude: loc.lat,
            zoom: responsive_zoom(viewport_width),
            bearing: bearing_degrees(b.rotation),
            pitch: 0.0,
        },
        None => MapView {
            longitude: FALLBACK_CENTER.lng,
            latitude: FALLBACK_CENTER.lat,
            zoom: FALLBACK_ZOOM,
            bearing: 0.0,
            pitch: 0.0,
        },
    }
}

/// Four `[lng, lat]` corners for the floor-plan raster, NW/NE/SE/SW.
///
/// `None` with fewer than four corners; anything past the fourth is ignored.
pub fn image_coordinates(corners: &[LatLng]) -> Option<[[f64; 2]; 4]> {
    match corners {
        [nw, ne, se, sw, ..] => Some([nw.lng_lat(), ne.lng_lat(), se.lng_lat(), sw.lng_lat()]),
        _ => None,
    }
}

/// Winding of the first four corners taken as a closed ring.
pub fn corner_winding(corners: &[LatLng]) -> Option<WindingOrder> {
    if corners.len() < 4 {
        return None;
    }
    let mut ring: LineString<f64> = corners[..4]
        .iter()
        .map(|c| geo::Coord::from(*c))
        .collect();
    ring.close();
    ring.winding_order()
}
