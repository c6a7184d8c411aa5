// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Points of interest.
//!
//! The REST API and the JS SDK disagree on field naming and on where the
//! floor and coordinates live, so POIs are decoded through [`PoiRecord`]
//! and normalized in one pass.

use super::LatLng;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, located entity on one floor. Read-only on this side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PoiRecord")]
pub struct Poi {
    pub id: u64,
    pub building_id: u64,
    pub floor_id: u64,
    pub name: String,
    pub category_name: Option<String>,
    /// Service-provided HTML. Never render it as markup.
    pub info: Option<String>,
    pub location: Option<LatLng>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Poi {
    /// Where the marker goes, if the POI has a usable position.
    pub fn marker_position(&self) -> Option<LatLng> {
        self.location.filter(LatLng::is_finite)
    }
}

/// Wire shape of a POI, accepting both snake_case and camelCase names.
#[derive(Debug, Deserialize)]
struct PoiRecord {
    id: u64,
    #[serde(default, alias = "buildingId")]
    building_id: Option<u64>,
    #[serde(default, alias = "floorId")]
    floor_id: Option<u64>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, alias = "categoryName")]
    category_name: Option<String>,
    #[serde(default)]
    info: Option<String>,
    #[serde(default, alias = "infoUnsafe")]
    info_unsafe: Option<String>,
    #[serde(default)]
    location: Option<LatLng>,
    #[serde(default)]
    position: Option<PositionRecord>,
    /// Kept as text so an odd timestamp format never rejects the POI.
    #[serde(default, alias = "updatedAt")]
    updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PositionRecord {
    #[serde(default, alias = "floorId")]
    floor_id: Option<u64>,
    #[serde(default)]
    georeferences: Option<LatLng>,
}

impl From<PoiRecord> for Poi {
    fn from(r: PoiRecord) -> Self {
        let (pos_floor, pos_location) = match r.position {
            Some(p) => (p.floor_id, p.georeferences),
            None => (None, None),
        };

        let non_empty = |s: Option<String>| s.filter(|v| !v.trim().is_empty());

        Poi {
            id: r.id,
            building_id: r.building_id.unwrap_or_default(),
            floor_id: r.floor_id.or(pos_floor).unwrap_or_default(),
            name: r.name.unwrap_or_default(),
            category_name: non_empty(r.category_name),
            info: non_empty(r.info).or_else(|| non_empty(r.info_unsafe)),
            location: r.location.or(pos_location),
            updated_at: r
                .updated_at
                .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}
