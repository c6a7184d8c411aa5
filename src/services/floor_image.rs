// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Floor-plan rasters as local, revocable references.
//!
//! The current floor's image is downloaded once, checked to be a real image,
//! and registered under a `/blobs/{token}` URL the map engine can load. The
//! reference must be revoked when the floor changes or the viewer shuts
//! down; otherwise the bytes stay in memory forever.

use crate::error::AppError;
use crate::models::Floor;
use crate::services::cartography::CartographyClient;
use crate::store::ViewerStore;
use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::io::Cursor;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Route prefix the registry's URLs live under.
pub const BLOB_PATH_PREFIX: &str = "/blobs/";

/// Smallest width and height (exclusive) accepted as a real floor plan.
const MIN_IMAGE_SIDE: u32 = 10;

/// A registered image.
#[derive(Debug)]
pub struct FloorBlob {
    pub bytes: Vec<u8>,
    pub content_type: String,
    /// SHA-256 of the bytes, hex encoded.
    pub etag: String,
}

/// Local URL of a registered blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn token(&self) -> &str {
        self.0.trim_start_matches(BLOB_PATH_PREFIX)
    }
}

/// Token → blob map backing `/blobs/{token}`.
#[derive(Clone, Default)]
pub struct ObjectUrlRegistry {
    blobs: Arc<DashMap<String, Arc<FloorBlob>>>,
    counter: Arc<AtomicU64>,
}

impl ObjectUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register bytes and hand back a URL for them.
    pub fn create(&self, bytes: Vec<u8>, content_type: impl Into<String>) -> ObjectUrl {
        let etag = hex::encode(Sha256::digest(&bytes));
        // Same image on two floors still gets two independently revocable URLs.
        let serial = self.counter.fetch_add(1, Ordering::Relaxed);
        let token = format!("{}-{}", &etag[..16], serial);

        self.blobs.insert(
            token.clone(),
            Arc::new(FloorBlob {
                bytes,
                content_type: content_type.into(),
                etag,
            }),
        );
        tracing::debug!(token = %token, "Floor image registered");
        ObjectUrl(format!("{}{}", BLOB_PATH_PREFIX, token))
    }

    /// Drop a blob. Returns `false` if it was already gone.
    pub fn revoke(&self, url: &ObjectUrl) -> bool {
        let removed = self.blobs.remove(url.token()).is_some();
        if removed {
            tracing::debug!(token = %url.token(), "Floor image revoked");
        }
        removed
    }

    pub fn get(&self, token: &str) -> Option<Arc<FloorBlob>> {
        self.blobs.get(token).map(|b| b.clone())
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

/// Check the bytes decode as an image larger than 10×10.
///
/// Returns the dimensions and the content type implied by the format.
pub fn validate_image(bytes: &[u8]) -> Result<(u32, u32, &'static str), AppError> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| AppError::FloorImage(e.to_string()))?;

    let content_type = reader
        .format()
        .map(|f| f.to_mime_type())
        .ok_or_else(|| AppError::FloorImage("Unrecognized image format".to_string()))?;

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| AppError::FloorImage(e.to_string()))?;

    if width <= MIN_IMAGE_SIDE || height <= MIN_IMAGE_SIDE {
        return Err(AppError::FloorImage(format!(
            "Image too small: {}x{}",
            width, height
        )));
    }

    Ok((width, height, content_type))
}

/// Outcome of resolving the current floor's image.
#[derive(Debug, Clone, PartialEq)]
pub enum FloorImageState {
    /// No floor, no image URL, or the floor changed mid-download.
    Missing,
    Ready(ObjectUrl),
    Failed(String),
}

impl FloorImageState {
    pub fn url(&self) -> Option<&str> {
        match self {
            FloorImageState::Ready(url) => Some(url.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct ActiveImage {
    floor_id: u64,
    url: ObjectUrl,
}

/// Keeps at most one live floor image: the current floor's.
#[derive(Clone)]
pub struct FloorImageService {
    client: CartographyClient,
    store: ViewerStore,
    registry: ObjectUrlRegistry,
    active: Arc<Mutex<Option<ActiveImage>>>,
}

impl FloorImageService {
    pub fn new(client: CartographyClient, store: ViewerStore, registry: ObjectUrlRegistry) -> Self {
        Self {
            client,
            store,
            registry,
            active: Arc::new(Mutex::new(None)),
        }
    }

    pub fn registry(&self) -> &ObjectUrlRegistry {
        &self.registry
    }

    /// Resolve the image for `floor`, reusing the live one if it matches.
    ///
    /// The lock is only taken to inspect and swap the live image, never
    /// across the download, so [`Self::release`] on a floor change returns
    /// at once. A download that finishes after its floor stopped being
    /// current is revoked instead of installed.
    pub async fn prepare(&self, floor: Option<&Floor>) -> FloorImageState {
        let Some((floor, map_url)) = floor.and_then(|f| f.map_url().map(|u| (f, u))) else {
            self.release().await;
            return FloorImageState::Missing;
        };

        if let Some(current) = self.active.lock().await.as_ref() {
            if current.floor_id == floor.id {
                return FloorImageState::Ready(current.url.clone());
            }
        }

        let fetched = match self.client.fetch_floor_image(map_url).await {
            Ok(f) => f,
            Err(e) => {
                tracing::error!(floor_id = floor.id, url = %map_url, error = %e, "Floor image download failed");
                return FloorImageState::Failed(e.to_string());
            }
        };

        let content_type = match validate_image(&fetched.bytes) {
            Ok((width, height, mime)) => {
                tracing::info!(floor_id = floor.id, width, height, "Floor image valid");
                fetched.content_type.unwrap_or_else(|| mime.to_string())
            }
            Err(e) => {
                tracing::error!(floor_id = floor.id, url = %map_url, error = %e, "Floor image invalid or corrupt");
                return FloorImageState::Failed(e.to_string());
            }
        };

        let url = self.registry.create(fetched.bytes, content_type);
        let mut active = self.active.lock().await;

        let still_current = self
            .store
            .snapshot()
            .current_floor
            .is_some_and(|f| f.id == floor.id);
        if !still_current {
            tracing::debug!(floor_id = floor.id, "Floor changed during download; dropping image");
            self.registry.revoke(&url);
            return FloorImageState::Missing;
        }

        // A concurrent render for the same floor may have won the race.
        if let Some(current) = active.as_ref().filter(|a| a.floor_id == floor.id) {
            self.registry.revoke(&url);
            return FloorImageState::Ready(current.url.clone());
        }

        if let Some(previous) = active.replace(ActiveImage {
            floor_id: floor.id,
            url: url.clone(),
        }) {
            self.registry.revoke(&previous.url);
        }
        FloorImageState::Ready(url)
    }

    /// Revoke the live image, if any.
    pub async fn release(&self) {
        if let Some(previous) = self.active.lock().await.take() {
            self.registry.revoke(&previous.url);
        }
    }
}
