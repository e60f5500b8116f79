//! Marker icon factory, placement markers, and view recentering.

use crate::geo::{LatLng, ScreenPoint};
use crate::model::Category;
use crate::surface::{MapSurface, MarkerHandle, PanAnimation};

/// Icon bounding box in pixels, (width, height).
pub const MARKER_SIZE: (u32, u32) = (40, 64);
/// Anchor point inside the bounding box. Offset below the visual center so
/// the pin tip, not the circle, sits on the POI position.
pub const MARKER_ANCHOR: (u32, u32) = (20, 48);
/// Fill color used when the category does not define one.
pub const DEFAULT_MARKER_COLOR: &str = "#0099ff";
/// Icon glyph used when the category does not define one.
pub const DEFAULT_MARKER_ICON: &str = "mdi-map-marker";

/// Vertical viewport fraction where a recentered marker lands.
pub const RECENTER_TARGET_FRACTION: f64 = 0.25;
/// Duration of the recenter animation in seconds.
pub const RECENTER_ANIMATION_SECS: f64 = 0.3;

/// A fully resolved marker icon, ready for the surface to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerIcon {
    /// CSS class on the icon container.
    pub class_name: &'static str,
    /// Inner HTML of the icon element.
    pub html: String,
    pub size: (u32, u32),
    pub anchor: (u32, u32),
}

/// Build the icon for a POI/category pairing, falling back to the default
/// pin when the category is absent or leaves color/icon unset.
pub fn create_marker_icon(category: Option<&Category>) -> MarkerIcon {
    let color = category
        .and_then(|c| c.color.as_deref())
        .unwrap_or(DEFAULT_MARKER_COLOR);
    let icon = category
        .and_then(|c| c.icon.as_deref())
        .unwrap_or(DEFAULT_MARKER_ICON);

    let html = format!(
        r#"<div style="background-color: {color}; --marker-color: {color}; width: 40px; height: 40px; border-radius: 50%; display: flex; align-items: center; justify-content: center; box-shadow: 0 0 6px rgba(0,0,0,0.5), 0 0 2px rgba(0,0,0,0.25); z-index:1;"><i class="mdi {icon}" style="color: white; font-size: 25px; z-index:2;"></i></div>"#
    );

    MarkerIcon {
        class_name: "custom-marker",
        html,
        size: MARKER_SIZE,
        anchor: MARKER_ANCHOR,
    }
}

/// Place a transient marker at the clicked position, styled for the
/// category the user currently has selected.
pub fn create_placement_marker(
    surface: &mut dyn MapSurface,
    position: LatLng,
    category: Option<&Category>,
) -> MarkerHandle {
    surface.add_marker(position, create_marker_icon(category))
}

/// Recenter the view so `position` lands at [`RECENTER_TARGET_FRACTION`] of
/// the viewport height from the top.
///
/// Used after placing a marker on small viewports: the form popup covers the
/// lower part of the screen, so a centered marker would be hidden. Computed
/// as a forward/inverse projection round trip and applied animated.
pub fn center_on_marker(surface: &mut dyn MapSurface, position: LatLng) {
    let target_y = surface.size().y * RECENTER_TARGET_FRACTION;
    let current_y = surface.lat_lng_to_container_point(position).y;
    // Shifting the view down by this amount moves the marker up to the
    // target line, and vice versa.
    let offset_y = current_y - target_y;

    let center_point = surface.lat_lng_to_container_point(surface.center());
    let new_center = surface.container_point_to_lat_lng(ScreenPoint::new(
        center_point.x,
        center_point.y + offset_y,
    ));

    let zoom = surface.zoom();
    surface.set_view(
        new_center,
        zoom,
        Some(PanAnimation {
            duration_secs: RECENTER_ANIMATION_SECS,
        }),
    );
}
