//! # visor-map — Map Renderer
//!
//! Turns a filtered [`Subset`](visor_query::Subset) into a [`MapView`]: one
//! styled GeoJSON overlay per plottable territory, the bounds to fit, and
//! the chosen [`BaseMapStyle`]. [`to_html`] writes the view as a standalone
//! Leaflet document, used both by the viewer iframe and the HTML export.
//!
//! Records whose geometry cannot be drawn are reported in
//! [`MapView::skipped`] and never abort a render.

pub mod html;
pub mod render;

pub use html::{to_html, LEAFLET_VERSION};
pub use render::{
    render, LatLng, LatLngBounds, MapView, Overlay, OverlayStyle, COUNCIL_COLOR, DEFAULT_CENTER,
    DEFAULT_ZOOM, EMPTY_MAP_ZOOM, INDIGENOUS_COLOR,
};
pub use visor_core::BaseMapStyle;
