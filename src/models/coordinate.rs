// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Geographic coordinates as the cartography service sends them.

use serde::{Deserialize, Serialize};

/// A WGS84 position. The service always sends `lat`/`lng` objects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components are real numbers (not NaN or infinite).
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// `[lng, lat]`, the order map engines and GeoJSON expect.
    pub fn lng_lat(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

impl From<LatLng> for geo::Coord<f64> {
    fn from(value: LatLng) -> Self {
        geo::coord! { x: value.lng, y: value.lat }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_axis_order() {
        let c: geo::Coord<f64> = LatLng::new(43.35, -8.42).into();
        assert_eq!(c.x, -8.42);
        assert_eq!(c.y, 43.35);
    }

    #[test]
    fn test_is_finite() {
        assert!(LatLng::new(0.0, 0.0).is_finite());
        assert!(!LatLng::new(f64::NAN, 1.0).is_finite());
        assert!(!LatLng::new(1.0, f64::INFINITY).is_finite());
    }
}
