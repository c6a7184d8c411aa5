// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Static assets served by the viewer.
//!
//! Kept as `&'static str` so they ship inside the binary.

/// MapLibre GL JS, loaded from the CDN.
pub const MAPLIBRE_JS: &str = "https://unpkg.com/maplibre-gl@4.7.1/dist/maplibre-gl.js";
pub const MAPLIBRE_CSS: &str = "https://unpkg.com/maplibre-gl@4.7.1/dist/maplibre-gl.css";

/// Builds the map from the JSON config on `#map`.
///
/// Markers are added in array order, so the last one (the selected POI)
/// ends up on top.
pub const MAP_SCRIPT: &str = r#"(function () {
  'use strict';

  const params = new URLSearchParams(window.location.search);
  if (!params.has('width')) {
    params.set('width', String(window.innerWidth));
    window.location.replace(window.location.pathname + '?' + params.toString());
    return;
  }

  const el = document.getElementById('map');
  if (!el || !window.maplibregl) {
    return;
  }

  const config = JSON.parse(el.dataset.config);
  const view = config.view;
  const map = new maplibregl.Map({
    container: el,
    style: config.style_url,
    center: [view.longitude, view.latitude],
    zoom: view.zoom,
    bearing: view.bearing,
    pitch: view.pitch,
    scrollZoom: false
  });
  map.addControl(new maplibregl.NavigationControl(), 'top-right');

  map.on('load', function () {
    if (!config.floor_plan) {
      return;
    }
    map.addSource('floorplan-source', {
      type: 'image',
      url: config.floor_plan.url,
      coordinates: config.floor_plan.coordinates
    });
    map.addLayer({
      id: 'floorplan-layer',
      type: 'raster',
      source: 'floorplan-source',
      paint: { 'raster-opacity': 1, 'raster-fade-duration': 0 }
    });
  });

  config.markers.forEach(function (m) {
    const node = document.createElement('button');
    node.type = 'button';
    node.className = m.selected ? 'marker marker--selected' : 'marker';
    node.title = m.name;
    node.textContent = m.name;
    node.addEventListener('click', function (event) {
      event.stopPropagation();
      fetch('/api/pois/' + m.poi_id + '/marker-click', { method: 'POST' })
        .finally(function () { window.location.reload(); });
    });
    new maplibregl.Marker({ element: node, anchor: 'bottom' })
      .setLngLat([m.lng, m.lat])
      .addTo(map);
  });
})();
"#;

pub const STYLESHEET: &str = r#"
:root { --brand: #283380; --muted: #6b7280; --danger: #b91c1c; }
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, sans-serif; background: #f3f4f6; color: var(--brand); }
h1 { text-align: center; font-size: 1.5rem; }
.viewer { display: flex; gap: 1.5rem; height: 800px; max-width: 1600px; margin: 0 auto; padding: 0.5rem; }
.sidebar { flex: 0 0 25%; display: flex; flex-direction: column; background: #fff; border: 1px solid #1f2937; border-radius: 6px; overflow: hidden; }
.floor-selector { padding: 0.5rem; }
.floor-selector form { display: inline; }
.floor-selector button { margin: 0.2rem; padding: 0.5rem 1rem; border: 0; border-radius: 4px; background: #f3f4f6; cursor: pointer; }
.floor-selector button[aria-pressed="true"] { background: var(--brand); color: #fff; }
.poi-list { flex: 1; min-height: 0; overflow-y: auto; border-top: 1px solid var(--brand); }
.poi-list header { padding: 1rem; background: #f9fafb; }
.poi-list ul { list-style: none; margin: 0.25rem; padding: 0; }
.poi-list button { width: 100%; text-align: left; margin: 0.1rem 0; padding: 0.75rem; border: 0; border-radius: 6px; background: rgba(40, 51, 128, 0.1); cursor: pointer; }
.poi-list li[aria-selected="true"] button { background: var(--brand); color: #fff; }
.map-panel { position: relative; flex: 1; border: 1px solid #1f2937; border-radius: 6px; overflow: hidden; }
#map { position: absolute; inset: 0; }
.marker { border: 2px solid #fff; border-radius: 4px; background: #dc2626; color: #fff; font-weight: bold; cursor: pointer; opacity: 0.85; }
.marker--selected { background: var(--brand); opacity: 1; }
.popup { position: absolute; left: 50%; bottom: 6rem; transform: translateX(-50%); width: 24rem; background: rgba(255, 255, 255, 0.95); border-radius: 8px; box-shadow: 0 10px 25px rgba(0, 0, 0, 0.3); overflow: hidden; z-index: 50; }
.popup header { position: relative; background: var(--brand); color: #fff; padding: 1rem 2.5rem 1rem 1rem; }
.popup header form { position: absolute; top: 0.5rem; right: 0.5rem; }
.popup .category { display: inline-block; font-size: 0.65rem; text-transform: uppercase; background: rgba(255, 255, 255, 0.2); padding: 0.1rem 0.5rem; border-radius: 4px; }
.popup .body { padding: 1rem; color: #4b5563; }
.popup .empty { font-style: italic; color: #9ca3af; }
.placeholder { display: flex; align-items: center; justify-content: center; height: 100%; min-height: 50vh; color: var(--muted); }
.error-banner { margin: 2.5rem; padding: 2.5rem; border: 1px solid #fecaca; background: #fef2f2; color: var(--danger); border-radius: 6px; }
.fallback { display: flex; flex-direction: column; align-items: center; gap: 1.25rem; margin: 10vh auto; max-width: 32rem; padding: 2rem; border: 2px solid #7096ff; border-radius: 8px; text-align: center; }
"#;
