// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Indoor Viewer: browse a building's floors and points of interest
//!
//! This crate fetches one building's cartography from the Situm API, keeps
//! the viewer's selection state, and serves the floor selector, POI list,
//! map and detail popup as HTML (plus a JSON API over the same state).

pub mod config;
pub mod derived;
pub mod error;
pub mod middleware;
pub mod models;
pub mod render;
pub mod routes;
pub mod services;
pub mod store;

use config::Config;
use services::{CartographyClient, FloorImageService, ObjectUrlRegistry, ViewerLoader};
use store::ViewerStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: ViewerStore,
    pub loader: ViewerLoader,
    pub floor_images: FloorImageService,
}

impl AppState {
    /// Wire up the store and the services that feed it.
    pub fn new(config: Config) -> Self {
        let client = CartographyClient::from_config(&config);
        let store = ViewerStore::new();
        let loader = ViewerLoader::new(client.clone(), store.clone());
        let floor_images = FloorImageService::new(client, store.clone(), ObjectUrlRegistry::new());

        Self {
            config,
            store,
            loader,
            floor_images,
        }
    }
}
