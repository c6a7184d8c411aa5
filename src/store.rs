// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared UI store: the single writable source of truth.
//!
//! Every transition takes the write lock exactly once, so readers never see
//! half of a compound change (e.g. a new floor with the old selection).
//! Fetch results are tagged with the generation they were requested under
//! and dropped if the store has been reset since.

use crate::derived::visible_pois;
use crate::error::{AppError, Result};
use crate::models::{Building, Floor, Poi};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// What the user is looking at, plus the data it is drawn from.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub building: Option<Arc<Building>>,
    pub pois: Arc<Vec<Poi>>,
    pub current_floor: Option<Floor>,
    pub selected_poi: Option<Poi>,
    pub is_popup_open: bool,
}

#[derive(Debug, Default)]
struct StoreInner {
    state: UiState,
    generation: u64,
}

/// Cloneable handle to the process-wide UI state.
#[derive(Debug, Clone, Default)]
pub struct ViewerStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl ViewerStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A panicking writer cannot leave UiState half-updated (each setter is a
    // plain field assignment), so a poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current state. Building and POIs are shared, not cloned.
    pub fn snapshot(&self) -> UiState {
        self.read().state.clone()
    }

    pub fn generation(&self) -> u64 {
        self.read().generation
    }

    /// Id of the loaded building, if any.
    pub fn building_id(&self) -> Option<u64> {
        self.read().state.building.as_ref().map(|b| b.id)
    }

    // ─── Data setters ────────────────────────────────────────────

    pub fn set_building(&self, building: Option<Building>) {
        self.write().state.building = building.map(Arc::new);
    }

    pub fn set_pois(&self, pois: Vec<Poi>) {
        self.write().state.pois = Arc::new(pois);
    }

    // ─── Selection setters ───────────────────────────────────────

    /// Change floor. Always clears the selected POI and closes the popup.
    pub fn set_current_floor(&self, floor: Option<Floor>) {
        let mut inner = self.write();
        inner.state.current_floor = floor;
        inner.state.selected_poi = None;
        inner.state.is_popup_open = false;
    }

    pub fn set_selected_poi(&self, poi: Option<Poi>) {
        self.write().state.selected_poi = poi;
    }

    pub fn set_popup_open(&self, open: bool) {
        self.write().state.is_popup_open = open;
    }

    // ─── Fetch results ───────────────────────────────────────────

    /// Install a fetched building and its default floor in one transition.
    ///
    /// Returns `false` (and changes nothing) if the store was reset after the
    /// fetch started.
    pub fn apply_building(&self, generation: u64, building: Building) -> bool {
        let mut inner = self.write();
        if inner.generation != generation {
            return false;
        }
        let default_floor = building.default_floor().cloned();
        inner.state.building = Some(Arc::new(building));
        inner.state.current_floor = default_floor;
        inner.state.selected_poi = None;
        inner.state.is_popup_open = false;
        true
    }

    /// Install fetched POIs. Same generation rule as [`Self::apply_building`].
    pub fn apply_pois(&self, generation: u64, pois: Vec<Poi>) -> bool {
        let mut inner = self.write();
        if inner.generation != generation {
            return false;
        }
        inner.state.pois = Arc::new(pois);
        true
    }

    /// Clear everything and start a new generation.
    pub fn reset(&self) -> u64 {
        let mut inner = self.write();
        inner.generation += 1;
        inner.state = UiState::default();
        inner.generation
    }

    // ─── User interactions ───────────────────────────────────────

    /// Floor selector click.
    pub fn select_floor(&self, floor_id: u64) -> Result<Floor> {
        let mut inner = self.write();
        let floor = inner
            .state
            .building
            .as_ref()
            .and_then(|b| b.floor(floor_id))
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Floor {}", floor_id)))?;

        inner.state.current_floor = Some(floor.clone());
        inner.state.selected_poi = None;
        inner.state.is_popup_open = false;
        Ok(floor)
    }

    /// POI list click: select without touching the popup.
    pub fn select_poi_from_list(&self, poi_id: u64) -> Result<Poi> {
        let mut inner = self.write();
        let poi = visible_poi(&inner.state, poi_id)?;
        inner.state.selected_poi = Some(poi.clone());
        Ok(poi)
    }

    /// Map marker click: select and open the popup.
    pub fn select_poi_from_marker(&self, poi_id: u64) -> Result<Poi> {
        let mut inner = self.write();
        let poi = visible_poi(&inner.state, poi_id)?;
        inner.state.selected_poi = Some(poi.clone());
        inner.state.is_popup_open = true;
        Ok(poi)
    }

    /// Popup close button.
    pub fn close_popup(&self) {
        let mut inner = self.write();
        inner.state.is_popup_open = false;
        inner.state.selected_poi = None;
    }
}

/// Only POIs on the current floor can be selected.
fn visible_poi(state: &UiState, poi_id: u64) -> Result<Poi> {
    visible_pois(state)
        .into_iter()
        .find(|p| p.id == poi_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("POI {} on current floor", poi_id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor(id: u64, level: i32) -> Floor {
        Floor {
            id,
            building_id: 7033,
            level,
            name: format!("Floor {}", id),
            maps: None,
        }
    }

    fn poi(id: u64, floor_id: u64, name: &str) -> Poi {
        Poi {
            id,
            building_id: 7033,
            floor_id,
            name: name.to_string(),
            category_name: None,
            info: None,
            location: None,
            updated_at: None,
        }
    }

    fn building() -> Building {
        Building {
            id: 7033,
            name: "Edificio Test".to_string(),
            info: None,
            location: None,
            rotation: 0.0,
            corners: Vec::new(),
            dimensions: None,
            floors: vec![floor(102, 1), floor(101, 0)],
            pois: Vec::new(),
        }
    }

    #[test]
    fn test_starts_empty() {
        let store = ViewerStore::new();
        let state = store.snapshot();
        assert!(state.building.is_none());
        assert!(state.pois.is_empty());
        assert!(state.current_floor.is_none());
        assert!(state.selected_poi.is_none());
        assert!(!state.is_popup_open);
    }

    #[test]
    fn test_set_current_floor_clears_selection() {
        let store = ViewerStore::new();
        store.set_selected_poi(Some(poi(50, 101, "Cafetería")));
        store.set_popup_open(true);

        store.set_current_floor(Some(floor(101, 0)));

        let state = store.snapshot();
        assert_eq!(state.current_floor.map(|f| f.id), Some(101));
        assert!(state.selected_poi.is_none());
        assert!(!state.is_popup_open);

        store.set_selected_poi(Some(poi(50, 101, "Cafetería")));
        store.set_current_floor(None);
        assert!(store.snapshot().selected_poi.is_none());
    }

    #[test]
    fn test_apply_building_picks_ground_floor() {
        let store = ViewerStore::new();
        let generation = store.generation();
        assert!(store.apply_building(generation, building()));
        assert_eq!(store.building_id(), Some(7033));
        assert_eq!(store.snapshot().current_floor.map(|f| f.id), Some(101));
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let store = ViewerStore::new();
        let stale = store.generation();
        let fresh = store.reset();
        assert_ne!(stale, fresh);

        assert!(!store.apply_building(stale, building()));
        assert!(!store.apply_pois(stale, vec![poi(1, 101, "A")]));
        assert!(store.snapshot().building.is_none());
        assert!(store.snapshot().pois.is_empty());

        assert!(store.apply_pois(fresh, vec![poi(1, 101, "A")]));
        assert_eq!(store.snapshot().pois.len(), 1);
    }

    #[test]
    fn test_list_and_marker_selection() {
        let store = ViewerStore::new();
        store.apply_building(store.generation(), building());
        store.set_pois(vec![poi(50, 101, "Cafetería"), poi(100, 102, "Escalera")]);

        store.select_poi_from_list(50).unwrap();
        let state = store.snapshot();
        assert_eq!(state.selected_poi.map(|p| p.id), Some(50));
        assert!(!state.is_popup_open);

        store.select_poi_from_marker(50).unwrap();
        assert!(store.snapshot().is_popup_open);

        store.close_popup();
        let state = store.snapshot();
        assert!(state.selected_poi.is_none());
        assert!(!state.is_popup_open);
    }

    #[test]
    fn test_cannot_select_poi_on_other_floor() {
        let store = ViewerStore::new();
        store.apply_building(store.generation(), building());
        store.set_pois(vec![poi(100, 102, "Escalera")]);

        let err = store.select_poi_from_marker(100).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(!store.snapshot().is_popup_open);
    }

    #[test]
    fn test_select_unknown_floor() {
        let store = ViewerStore::new();
        assert!(store.select_floor(101).is_err());

        store.apply_building(store.generation(), building());
        assert!(matches!(store.select_floor(999), Err(AppError::NotFound(_))));
        assert_eq!(store.select_floor(102).unwrap().level, 1);
    }
}
