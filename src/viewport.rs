//! Viewport construction and the per-viewport session state.
//!
//! [`initialize_viewport`] builds the surface from the host backend, attaches
//! the base image layer, and fits the initial view. The returned
//! [`MapViewport`] exclusively owns every transient UI resource of the
//! session: the add-mode flag, the click handler slot, the placement marker,
//! the form popup, and the placement hint.

use std::cell::Cell;
use std::rc::Rc;

use thiserror::Error;
use url::Url;

use crate::bounds::{calculate_map_bounds, default_viewport_config, MapBounds};
use crate::cleanup::{cleanup, CleanupOptions, TransientUi};
use crate::click::ClickBinding;
use crate::geo::LatLng;
use crate::marker::create_placement_marker;
use crate::model::{Category, MapData};
use crate::popup::form_popup_options;
use crate::surface::{ControlCorner, MapBackend, MapSurface, MarkerHandle, OverlayHandle, PopupHandle};

/// Errors raised while constructing a viewport.
#[derive(Error, Debug)]
pub enum ViewportError {
    /// The map snapshot carries no image URL. A viewport cannot exist
    /// without its base layer; nothing is constructed.
    #[error("map '{map_id}' has no image URL")]
    MissingImageUrl { map_id: String },

    /// The image URL could not be resolved against the host origin.
    #[error("cannot resolve image URL '{url}': {source}")]
    InvalidImageUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// A live viewport session over one map snapshot.
pub struct MapViewport {
    surface: Box<dyn MapSurface>,
    image_overlay: OverlayHandle,
    bounds: MapBounds,
    add_mode: Rc<Cell<bool>>,
    click: ClickBinding,
    transient: TransientUi,
}

/// Build and configure the viewport for a map.
///
/// Fails fast when the map has no image URL. Relative image URLs are
/// resolved against the backend's origin. The initial view is fitted to the
/// `normal` bounds so the image fills the frame; the `extended` bounds act
/// as the hard navigation limit.
pub fn initialize_viewport(
    backend: &dyn MapBackend,
    map: &MapData,
    is_mobile: bool,
) -> Result<MapViewport, ViewportError> {
    let image_url = map
        .image_url
        .as_deref()
        .ok_or_else(|| ViewportError::MissingImageUrl {
            map_id: map.id.clone(),
        })?;
    let resolved = resolve_image_url(&backend.origin(), image_url)?;

    let bounds = calculate_map_bounds(map, is_mobile);
    let config = default_viewport_config(bounds.extended);

    let mut surface = backend.create_surface(&config);
    surface.set_zoom_control_position(ControlCorner::TopRight);
    surface.remove_attribution();

    let image_overlay = surface.add_image_overlay(&resolved, bounds.normal);
    surface.fit_bounds(bounds.normal);
    log::debug!(
        "viewport initialized for map {} ({}x{})",
        map.id,
        map.image_width,
        map.image_height
    );

    Ok(MapViewport {
        surface,
        image_overlay,
        bounds,
        add_mode: Rc::new(Cell::new(false)),
        click: ClickBinding::new(),
        transient: TransientUi::default(),
    })
}

fn resolve_image_url(origin: &str, image_url: &str) -> Result<String, ViewportError> {
    if image_url.starts_with("http") {
        return Ok(image_url.to_string());
    }
    let base = Url::parse(origin).map_err(|source| ViewportError::InvalidImageUrl {
        url: image_url.to_string(),
        source,
    })?;
    let resolved = base
        .join(image_url)
        .map_err(|source| ViewportError::InvalidImageUrl {
            url: image_url.to_string(),
            source,
        })?;
    Ok(resolved.into())
}

impl MapViewport {
    pub fn surface(&mut self) -> &mut dyn MapSurface {
        self.surface.as_mut()
    }

    pub fn bounds(&self) -> &MapBounds {
        &self.bounds
    }

    pub fn image_overlay(&self) -> OverlayHandle {
        self.image_overlay
    }

    pub fn add_mode(&self) -> bool {
        self.add_mode.get()
    }

    /// Toggle add-POI mode. The click handler observes the new value on its
    /// next invocation; the container cursor follows the mode.
    pub fn set_add_mode(&mut self, enabled: bool) {
        self.add_mode.set(enabled);
        self.surface.set_add_mode_cursor(enabled);
    }

    /// Install the add-POI click handler, replacing any previous one.
    pub fn set_click_handler(&mut self, on_click: impl FnMut(LatLng) + 'static) {
        let add_mode = Rc::clone(&self.add_mode);
        self.click.set(self.surface.as_mut(), add_mode, on_click);
    }

    /// Place the transient marker for a pending POI, releasing any previous
    /// one first so at most one exists.
    pub fn place_temp_marker(
        &mut self,
        position: LatLng,
        category: Option<&Category>,
    ) -> MarkerHandle {
        if let Some(old) = self.transient.temp_marker.take() {
            self.surface.remove_marker(old);
        }
        let handle = create_placement_marker(self.surface.as_mut(), position, category);
        self.transient.temp_marker = Some(handle);
        handle
    }

    /// Open the create/edit form popup at `position`, releasing any previous
    /// form popup first.
    pub fn open_form_popup(&mut self, position: LatLng, content: String) -> PopupHandle {
        if let Some(old) = self.transient.form_popup.take() {
            self.surface.remove_popup(old);
        }
        let handle = self
            .surface
            .open_popup_at(position, content, form_popup_options());
        self.transient.form_popup = Some(handle);
        handle
    }

    pub fn set_placement_hint(&mut self, show: bool) {
        self.transient.show_placement_hint = show;
    }

    pub fn transient(&self) -> &TransientUi {
        &self.transient
    }

    /// Release transient resources per `options`. Safe to call repeatedly.
    pub fn cleanup(&mut self, options: CleanupOptions) {
        cleanup(self.surface.as_mut(), &mut self.transient, options);
    }

    /// Full session teardown: unbind the click handler, release all
    /// transient state, and leave add mode.
    pub fn teardown(&mut self) {
        self.click.clear(self.surface.as_mut());
        self.cleanup(CleanupOptions::default());
        self.set_add_mode(false);
    }
}
