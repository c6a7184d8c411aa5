// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Building and floor cartography.

use super::{LatLng, Poi};
use serde::{Deserialize, Serialize};

/// A building with its floors, as returned by `GET /api/v1/buildings/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub info: Option<String>,
    /// Geographic center; `None` when the service omits it.
    #[serde(default)]
    pub location: Option<LatLng>,
    /// Rotation from north, in radians.
    #[serde(default)]
    pub rotation: f64,
    /// Floor-plan corners, expected as NW, NE, SE, SW.
    #[serde(default)]
    pub corners: Vec<LatLng>,
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    #[serde(default)]
    pub floors: Vec<Floor>,
    #[serde(default)]
    pub pois: Vec<Poi>,
}

impl Building {
    /// Floor shown on first load: level 0, else whatever comes first.
    pub fn default_floor(&self) -> Option<&Floor> {
        self.floors
            .iter()
            .find(|f| f.level == 0)
            .or_else(|| self.floors.first())
    }

    pub fn floor(&self, floor_id: u64) -> Option<&Floor> {
        self.floors.iter().find(|f| f.id == floor_id)
    }
}

/// Building footprint in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub length: f64,
}

/// One level of a building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub id: u64,
    #[serde(alias = "buildingId")]
    pub building_id: u64,
    /// May be negative (basements) or zero (ground floor).
    pub level: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub maps: Option<FloorMaps>,
}

impl Floor {
    pub fn display_name(&self) -> String {
        if self.name.trim().is_empty() {
            format!("Level {}", self.level)
        } else {
            self.name.clone()
        }
    }

    /// Floor-plan raster URL, if the floor has a usable one.
    pub fn map_url(&self) -> Option<&str> {
        self.maps
            .as_ref()
            .and_then(|m| m.map_url.as_deref())
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Floor-plan raster reference.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FloorMaps {
    #[serde(default, alias = "mapUrl")]
    pub map_url: Option<String>,
    #[serde(default)]
    pub scale: Option<f64>,
    #[serde(default, alias = "mapId")]
    pub map_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor(id: u64, level: i32) -> Floor {
        Floor {
            id,
            building_id: 1,
            level,
            name: String::new(),
            maps: None,
        }
    }

    fn building(floors: Vec<Floor>) -> Building {
        Building {
            id: 1,
            name: "Test".to_string(),
            info: None,
            location: None,
            rotation: 0.0,
            corners: Vec::new(),
            dimensions: None,
            floors,
            pois: Vec::new(),
        }
    }

    #[test]
    fn test_default_floor_prefers_ground_level() {
        let b = building(vec![floor(1, -1), floor(2, 0), floor(3, 1)]);
        assert_eq!(b.default_floor().map(|f| f.id), Some(2));
    }

    #[test]
    fn test_default_floor_falls_back_to_first() {
        let b = building(vec![floor(5, 2), floor(6, 3)]);
        assert_eq!(b.default_floor().map(|f| f.id), Some(5));
        assert!(building(Vec::new()).default_floor().is_none());
    }

    #[test]
    fn test_display_name_and_map_url() {
        let mut f = floor(1, -2);
        assert_eq!(f.display_name(), "Level -2");
        assert_eq!(f.map_url(), None);

        f.name = "Sótano".to_string();
        f.maps = Some(FloorMaps {
            map_url: Some("  ".to_string()),
            ..Default::default()
        });
        assert_eq!(f.display_name(), "Sótano");
        assert_eq!(f.map_url(), None);
    }

    #[test]
    fn test_deserialize_camel_case_maps() {
        let json = r#"{
            "id": 101, "buildingId": 7033, "level": 0, "name": "Baja",
            "maps": {"mapUrl": "http://example.com/map.png", "scale": 1, "mapId": "1"}
        }"#;
        let f: Floor = serde_json::from_str(json).unwrap();
        assert_eq!(f.building_id, 7033);
        assert_eq!(f.map_url(), Some("http://example.com/map.png"));
    }
}
