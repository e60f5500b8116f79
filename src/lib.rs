//! Waymark - interactive POI map core
//!
//! The client-side logic of a map annotation tool: viewport setup over a
//! raster image, marker lifecycle, popup wiring with role-gated controls,
//! and the save pipeline behind the POI form. Rendering and input are
//! delegated to a host through the [`surface`] traits.

pub mod bounds;
pub mod cleanup;
pub mod click;
pub mod geo;
pub mod i18n;
pub mod marker;
pub mod marker_manager;
pub mod model;
pub mod notify;
pub mod popup;
pub mod save;
pub mod services;
pub mod surface;
pub mod viewport;

pub use bounds::{calculate_map_bounds, default_viewport_config, MapBounds};
pub use marker_manager::MarkerManager;
pub use viewport::{initialize_viewport, MapViewport, ViewportError};
