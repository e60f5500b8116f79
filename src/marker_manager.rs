//! Lifecycle of persistent POI markers and their popups.
//!
//! The manager owns the mapping from POI id to marker handle for the
//! lifetime of a viewport session; callers address markers by POI id only.

use std::collections::HashMap;

use crate::marker::create_marker_icon;
use crate::model::{Category, Poi};
use crate::popup::marker_popup_options;
use crate::surface::{MapSurface, MarkerHandle, PopupOpenCallback};

/// Owns one marker+popup pair per persisted POI.
#[derive(Default)]
pub struct MarkerManager {
    markers: HashMap<String, MarkerHandle>,
}

impl MarkerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or refresh the marker for `poi`.
    ///
    /// A POI without an id cannot have a marker (the marker must represent
    /// a persisted entity), so the call logs and returns `None` without
    /// touching the surface. On refresh, an open popup is closed, rebound
    /// with the new content, and reopened, so it never shows stale content
    /// and its open/closed state survives the update.
    pub fn upsert(
        &mut self,
        surface: &mut dyn MapSurface,
        poi: &Poi,
        category: Option<&Category>,
        render_popup: impl FnOnce(&Poi) -> String,
        on_popup_open: PopupOpenCallback,
    ) -> Option<MarkerHandle> {
        let Some(id) = poi.id.as_deref() else {
            log::error!("cannot create marker for POI without id");
            return None;
        };

        let content = render_popup(poi);
        match self.markers.get(id).copied() {
            Some(handle) => {
                surface.set_marker_icon(handle, create_marker_icon(category));
                surface.set_marker_position(handle, poi.position());

                let was_open = surface.is_popup_open(handle);
                if was_open {
                    surface.close_popup(handle);
                }
                surface.bind_popup(handle, content, marker_popup_options());
                surface.on_popup_open(handle, on_popup_open);
                if was_open {
                    surface.open_popup(handle);
                }
                Some(handle)
            }
            None => {
                let handle = surface.add_marker(poi.position(), create_marker_icon(category));
                surface.bind_popup(handle, content, marker_popup_options());
                surface.on_popup_open(handle, on_popup_open);
                self.markers.insert(id.to_string(), handle);
                log::debug!("marker created for POI {id}");
                Some(handle)
            }
        }
    }

    /// Detach and forget the marker for `poi_id`. Returns whether one
    /// existed; removing an unknown or already-removed id is a no-op.
    pub fn remove(&mut self, surface: &mut dyn MapSurface, poi_id: &str) -> bool {
        match self.markers.remove(poi_id) {
            Some(handle) => {
                surface.remove_marker(handle);
                log::debug!("marker removed for POI {poi_id}");
                true
            }
            None => false,
        }
    }

    /// Tear down every managed marker (viewport teardown path).
    pub fn clear(&mut self, surface: &mut dyn MapSurface) {
        for (_, handle) in self.markers.drain() {
            surface.remove_marker(handle);
        }
    }

    pub fn handle(&self, poi_id: &str) -> Option<MarkerHandle> {
        self.markers.get(poi_id).copied()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
