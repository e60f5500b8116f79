//! The external mapping-library boundary.
//!
//! The crate never renders anything itself; a host supplies an
//! implementation of [`MapSurface`] (the pannable/zoomable surface) and
//! [`PopupElement`] (the control surface of a rendered popup). Everything
//! above this boundary (marker lifecycle, popup wiring, permission gating)
//! is the crate's responsibility.

#[cfg(test)]
pub(crate) mod mock;

use std::rc::Rc;

use crate::bounds::ViewportConfig;
use crate::geo::{Bounds, LatLng, ScreenPoint};
use crate::marker::MarkerIcon;
use crate::model::ImageFile;

/// Opaque handle to a marker placed on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

/// Opaque handle to a standalone (non-marker-bound) popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PopupHandle(pub u64);

/// Opaque handle to an image overlay layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayHandle(pub u64);

/// Identifies one bound click handler, for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClickHandlerId(pub u64);

/// Screen corner for positioning built-in controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCorner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Animation settings for a programmatic view change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanAnimation {
    pub duration_secs: f64,
}

/// Presentation options for a popup.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupOptions {
    /// Pixel offset from the anchor point, (x, y).
    pub offset: (f64, f64),
    /// CSS class applied to the popup container.
    pub class_name: &'static str,
    /// Whether the library renders its default close button.
    pub close_button: bool,
}

/// Sections of the detail popup that are revealed by the permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PopupSection {
    /// Edit/delete/close button row.
    Actions,
    /// Created/updated attribution row.
    Metadata,
}

/// Interactive controls inside popup markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PopupControl {
    Edit,
    Delete,
    Close,
    Save,
    Cancel,
    RemoveImage,
}

/// Text-bearing fields of the POI form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Category,
    Description,
}

pub type ClickCallback = Box<dyn FnMut(LatLng)>;
pub type PopupOpenCallback = Box<dyn FnMut()>;
pub type ControlCallback = Box<dyn FnMut()>;
pub type FileCallback = Box<dyn FnMut(ImageFile)>;
pub type FieldCallback = Box<dyn FnMut(FormField, String)>;

/// The rendered DOM of an open popup.
///
/// Methods take `&self` because the host side is a shared, interiorly
/// mutable document, the same model the browser imposes.
pub trait PopupElement {
    /// Whether the element is still part of the live document. A popup that
    /// was closed or whose marker was removed reports `false`; results of
    /// in-flight checks must then be discarded.
    fn is_attached(&self) -> bool;

    fn set_section_visible(&self, section: PopupSection, visible: bool);

    /// Register a click callback for a control. Rebinding a control replaces
    /// the previous callback.
    fn on_control(&self, control: PopupControl, callback: ControlCallback);

    /// Register a callback for the form's file input.
    fn on_file_selected(&self, callback: FileCallback);

    /// Register a callback for edits to the form's text/select fields.
    fn on_field_changed(&self, callback: FieldCallback);

    /// Show a preview image (`Some(data_url)`) or revert to the upload
    /// placeholder (`None`).
    fn set_image_preview(&self, data_url: Option<&str>);
}

/// The pannable/zoomable map surface supplied by the host.
///
/// Removal methods are tolerant of stale handles: removing something that
/// is already gone is a no-op, not an error.
pub trait MapSurface {
    // Base layer and chrome
    fn add_image_overlay(&mut self, url: &str, bounds: Bounds) -> OverlayHandle;
    fn fit_bounds(&mut self, bounds: Bounds);
    fn set_zoom_control_position(&mut self, corner: ControlCorner);
    fn remove_attribution(&mut self);
    /// Toggle the add-POI crosshair cursor on the container.
    fn set_add_mode_cursor(&mut self, enabled: bool);

    // Markers
    fn add_marker(&mut self, position: LatLng, icon: MarkerIcon) -> MarkerHandle;
    fn set_marker_icon(&mut self, marker: MarkerHandle, icon: MarkerIcon);
    fn set_marker_position(&mut self, marker: MarkerHandle, position: LatLng);
    fn remove_marker(&mut self, marker: MarkerHandle);

    // Marker-bound popups
    fn bind_popup(&mut self, marker: MarkerHandle, content: String, options: PopupOptions);
    fn is_popup_open(&self, marker: MarkerHandle) -> bool;
    fn open_popup(&mut self, marker: MarkerHandle);
    fn close_popup(&mut self, marker: MarkerHandle);
    /// Register the popup-open hook for a marker; rebinding replaces it.
    fn on_popup_open(&mut self, marker: MarkerHandle, callback: PopupOpenCallback);
    /// The live element of the marker's popup, if it is currently open.
    fn popup_element(&self, marker: MarkerHandle) -> Option<Rc<dyn PopupElement>>;

    // Standalone popups (the placement form)
    fn open_popup_at(
        &mut self,
        position: LatLng,
        content: String,
        options: PopupOptions,
    ) -> PopupHandle;
    fn remove_popup(&mut self, popup: PopupHandle);
    fn standalone_popup_element(&self, popup: PopupHandle) -> Option<Rc<dyn PopupElement>>;

    // Click events
    fn on_click(&mut self, callback: ClickCallback) -> ClickHandlerId;
    fn off_click(&mut self, handler: ClickHandlerId);

    // View state and projection
    fn size(&self) -> ScreenPoint;
    fn center(&self) -> LatLng;
    fn zoom(&self) -> f64;
    fn set_view(&mut self, center: LatLng, zoom: f64, animation: Option<PanAnimation>);
    fn lat_lng_to_container_point(&self, position: LatLng) -> ScreenPoint;
    fn container_point_to_lat_lng(&self, point: ScreenPoint) -> LatLng;
}

/// Constructs surfaces and answers environment questions (the `window`
/// analog).
pub trait MapBackend {
    fn create_surface(&self, config: &ViewportConfig) -> Box<dyn MapSurface>;
    /// Origin used to resolve relative image URLs, e.g. `https://maps.example`.
    fn origin(&self) -> String;
}
