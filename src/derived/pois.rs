// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Floor filtering and draw-order sorting of POIs.

use crate::models::{Floor, Poi};
use crate::store::UiState;
use std::cmp::Ordering;

/// POIs whose `floor_id` is the given floor. No floor, no POIs.
pub fn filter_pois<'a>(pois: &'a [Poi], floor: Option<&Floor>) -> Vec<&'a Poi> {
    let Some(floor) = floor else {
        return Vec::new();
    };
    pois.iter().filter(|p| p.floor_id == floor.id).collect()
}

/// Sort alphabetically by trimmed name, with the selected POI moved last.
///
/// The list doubles as map draw order, so last means on top.
pub fn sort_pois(pois: &mut [&Poi], selected: Option<u64>) {
    pois.sort_by(|a, b| {
        let a_selected = selected == Some(a.id);
        let b_selected = selected == Some(b.id);
        a_selected
            .cmp(&b_selected)
            .then_with(|| compare_names(&a.name, &b.name))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// The filtered, sorted list for the current floor.
pub fn visible_pois(state: &UiState) -> Vec<&Poi> {
    let mut visible = filter_pois(&state.pois, state.current_floor.as_ref());
    sort_pois(&mut visible, state.selected_poi.as_ref().map(|p| p.id));
    visible
}

/// The current floor's POIs in list order: alphabetical, selection ignored.
///
/// The sidebar highlights the selected POI in place; only the map moves it
/// last to draw it on top.
pub fn listed_pois(state: &UiState) -> Vec<&Poi> {
    let mut listed = filter_pois(&state.pois, state.current_floor.as_ref());
    sort_pois(&mut listed, None);
    listed
}

/// Locale-style name comparison on trimmed names.
///
/// Letters compare first ignoring accents and case, then ignoring case only,
/// and finally lowercase before uppercase.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let (a, b) = (a.trim(), b.trim());
    let lower = |s: &'_ str| s.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
    let (a_lower, b_lower) = (lower(a), lower(b));

    a_lower
        .iter()
        .map(|c| fold_accent(*c))
        .cmp(b_lower.iter().map(|c| fold_accent(*c)))
        .then_with(|| a_lower.cmp(&b_lower))
        .then_with(|| b.cmp(a))
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        'ý' | 'ÿ' => 'y',
        _ => c,
    }
}
