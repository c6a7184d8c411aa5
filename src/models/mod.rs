// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cartography data models.

pub mod building;
pub mod coordinate;
pub mod poi;

pub use building::{Building, Dimensions, Floor, FloorMaps};
pub use coordinate::LatLng;
pub use poi::Poi;
