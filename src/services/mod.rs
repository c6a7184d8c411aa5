// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - fetching and resource management.

pub mod cartography;
pub mod floor_image;
pub mod loader;
pub mod query_cache;

pub use cartography::CartographyClient;
pub use floor_image::{FloorImageService, FloorImageState, ObjectUrl, ObjectUrlRegistry};
pub use loader::{LoadStatus, QueryState, ViewerLoader};
pub use query_cache::QueryCache;
