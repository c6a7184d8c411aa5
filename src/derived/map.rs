// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Everything the map engine needs to draw the current floor.

use super::pois::visible_pois;
use super::projection::{image_coordinates, map_view, MapView};
use crate::models::Poi;
use crate::store::UiState;
use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A marker placement. Array order is draw order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Marker {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub poi_id: u64,
    pub name: String,
    pub lng: f64,
    pub lat: f64,
    pub selected: bool,
}

/// Raster floor plan stretched over four `[lng, lat]` corners.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FloorPlanSource {
    pub url: String,
    pub coordinates: [[f64; 2]; 4],
}

/// Map engine configuration for one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MapConfig {
    pub style_url: String,
    pub view: MapView,
    pub floor_plan: Option<FloorPlanSource>,
    pub markers: Vec<Marker>,
}

/// Markers for an already sorted list, skipping POIs without a position.
pub fn markers(visible: &[&Poi], selected: Option<u64>) -> Vec<Marker> {
    visible
        .iter()
        .filter_map(|poi| {
            let pos = poi.marker_position()?;
            Some(Marker {
                poi_id: poi.id,
                name: poi.name.trim().to_string(),
                lng: pos.lng,
                lat: pos.lat,
                selected: selected == Some(poi.id),
            })
        })
        .collect()
}

/// Markers as GeoJSON Point features, in draw order.
pub fn markers_geojson(markers: &[Marker]) -> FeatureCollection {
    let features = markers
        .iter()
        .map(|m| {
            let mut properties = JsonObject::new();
            properties.insert("name".to_string(), m.name.clone().into());
            properties.insert("selected".to_string(), m.selected.into());

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(vec![m.lng, m.lat]))),
                id: Some(Id::Number(m.poi_id.into())),
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Build the map configuration for the current state.
///
/// The raster source is only present when the building has corners and the
/// floor image has been resolved to a local URL.
pub fn map_config(
    state: &UiState,
    style_url: &str,
    floor_image_url: Option<&str>,
    viewport_width: Option<u32>,
) -> MapConfig {
    let building = state.building.as_deref();
    let floor_plan = building
        .and_then(|b| image_coordinates(&b.corners))
        .zip(floor_image_url)
        .map(|(coordinates, url)| FloorPlanSource {
            url: url.to_string(),
            coordinates,
        });

    let selected = state.selected_poi.as_ref().map(|p| p.id);

    MapConfig {
        style_url: style_url.to_string(),
        view: map_view(building, viewport_width),
        floor_plan,
        markers: markers(&visible_pois(state), selected),
    }
}
