//! Viewport bounds and navigation-limit calculation.
//!
//! Pure functions: given map image dimensions and the device class, compute
//! the image rectangle and the padded rectangle used as the hard pan limit.

use crate::geo::{Bounds, LatLng};
use crate::model::MapData;

/// Outward padding factor applied to both dimensions on mobile devices.
pub const MOBILE_EXTEND_FACTOR: f64 = 0.5;
/// Outward padding factor applied to both dimensions on desktop.
pub const DESKTOP_EXTEND_FACTOR: f64 = 0.3;

/// The image rectangle and its padded navigation limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    /// Exact image pixel rectangle `[(0,0), (height,width)]`.
    pub normal: Bounds,
    /// `normal` padded symmetrically outward; the hard pan limit.
    pub extended: Bounds,
}

/// Compute viewport bounds for a map image.
///
/// The extended rectangle pads the image by `factor × dimension` on every
/// side, so its origin is negative and its far corner is
/// `(1 + factor) × dimension`.
pub fn calculate_map_bounds(map: &MapData, is_mobile: bool) -> MapBounds {
    let height = f64::from(map.image_height);
    let width = f64::from(map.image_width);

    let normal = Bounds::from_origin(height, width);

    let factor = if is_mobile {
        MOBILE_EXTEND_FACTOR
    } else {
        DESKTOP_EXTEND_FACTOR
    };
    let extended = Bounds::new(
        LatLng::new(-height * factor, -width * factor),
        LatLng::new(height * (1.0 + factor), width * (1.0 + factor)),
    );

    MapBounds { normal, extended }
}

/// Interaction configuration for a new viewport.
///
/// Mirrors the option set of the underlying mapping library; the surface
/// backend consumes this verbatim at construction time.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Hard navigation limit; panning past it is rejected.
    pub max_bounds: Bounds,
    /// 1.0 means a fully elastic stop at the edge.
    pub max_bounds_viscosity: f64,
    pub zoom_control: bool,
    pub zoom_snap: f64,
    pub zoom_delta: f64,
    pub wheel_debounce_time_ms: u32,
    pub wheel_px_per_zoom_level: u32,
    pub double_click_zoom: bool,
    pub touch_zoom: bool,
    pub scroll_wheel_zoom: bool,
    pub keyboard: bool,
    /// Pan distance in pixels for one keyboard arrow press.
    pub keyboard_pan_delta: u32,
}

/// Fixed configuration bundle with `bounds` as the navigation limit.
pub fn default_viewport_config(bounds: Bounds) -> ViewportConfig {
    ViewportConfig {
        min_zoom: -5.0,
        max_zoom: 5.0,
        max_bounds: bounds,
        max_bounds_viscosity: 1.0,
        zoom_control: true,
        zoom_snap: 0.5,
        zoom_delta: 0.5,
        wheel_debounce_time_ms: 40,
        wheel_px_per_zoom_level: 60,
        double_click_zoom: true,
        touch_zoom: true,
        scroll_wheel_zoom: true,
        keyboard: true,
        keyboard_pan_delta: 80,
    }
}
