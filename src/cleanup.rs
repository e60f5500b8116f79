//! Idempotent teardown of transient UI state.
//!
//! Used on every cancel/escape path: each flag independently releases one
//! transient resource. Slots are nulled before the surface is touched, so a
//! second call finds nothing to release.

use crate::surface::{MapSurface, MarkerHandle, PopupHandle};

/// The 0-or-1 transient resources of a viewport session.
#[derive(Debug, Default)]
pub struct TransientUi {
    /// The temporary placement marker shown before a POI is persisted.
    pub temp_marker: Option<MarkerHandle>,
    /// The open create/edit form popup.
    pub form_popup: Option<PopupHandle>,
    /// Whether the "click the map to place a POI" hint is showing.
    pub show_placement_hint: bool,
}

/// Which transient resources [`cleanup`] releases.
#[derive(Debug, Clone, Copy)]
pub struct CleanupOptions {
    pub popup: bool,
    pub marker: bool,
    pub reset_hint: bool,
}

impl Default for CleanupOptions {
    /// Full reset.
    fn default() -> Self {
        Self {
            popup: true,
            marker: true,
            reset_hint: true,
        }
    }
}

/// Release the selected transient resources, detaching them from the
/// surface. Calling twice is safe.
pub fn cleanup(surface: &mut dyn MapSurface, ui: &mut TransientUi, options: CleanupOptions) {
    if options.popup {
        if let Some(popup) = ui.form_popup.take() {
            surface.remove_popup(popup);
        }
    }
    if options.marker {
        if let Some(marker) = ui.temp_marker.take() {
            surface.remove_marker(marker);
        }
    }
    if options.reset_hint {
        ui.show_placement_hint = false;
    }
}
