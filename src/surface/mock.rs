//! In-memory `MapSurface`/`PopupElement` doubles backing the unit tests.
//!
//! Projection is linear with a fixed scale: the lat axis points up on
//! screen (smaller container y), matching the simple-CRS convention of the
//! real surface.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::geo::{Bounds, LatLng, ScreenPoint};
use crate::marker::MarkerIcon;
use crate::model::ImageFile;
use crate::surface::{
    ClickCallback, ClickHandlerId, ControlCallback, ControlCorner, FieldCallback, FileCallback,
    FormField, MapSurface, MarkerHandle, OverlayHandle, PanAnimation, PopupControl,
    PopupElement, PopupHandle, PopupOpenCallback, PopupOptions, PopupSection,
};

#[derive(Default)]
pub(crate) struct MockPopupElement {
    attached: Cell<bool>,
    sections: RefCell<HashMap<PopupSection, bool>>,
    controls: RefCell<HashMap<PopupControl, ControlCallback>>,
    file_callback: RefCell<Option<FileCallback>>,
    field_callback: RefCell<Option<FieldCallback>>,
    preview: RefCell<Option<String>>,
}

impl MockPopupElement {
    pub(crate) fn new_attached() -> Rc<Self> {
        let element = Rc::new(Self::default());
        element.attached.set(true);
        element
    }

    pub(crate) fn detach(&self) {
        self.attached.set(false);
    }

    pub(crate) fn section_visible(&self, section: PopupSection) -> bool {
        self.sections.borrow().get(&section).copied().unwrap_or(false)
    }

    /// Simulate a user click on a popup control.
    pub(crate) fn click(&self, control: PopupControl) {
        let callback = self.controls.borrow_mut().remove(&control);
        if let Some(mut callback) = callback {
            callback();
            self.controls.borrow_mut().entry(control).or_insert(callback);
        }
    }

    /// Simulate the user picking a file in the form's file input.
    pub(crate) fn select_file(&self, file: ImageFile) {
        let callback = self.file_callback.borrow_mut().take();
        if let Some(mut callback) = callback {
            callback(file);
            let mut slot = self.file_callback.borrow_mut();
            if slot.is_none() {
                *slot = Some(callback);
            }
        }
    }

    /// Simulate the user editing a form field.
    pub(crate) fn edit_field(&self, field: FormField, value: &str) {
        let callback = self.field_callback.borrow_mut().take();
        if let Some(mut callback) = callback {
            callback(field, value.to_string());
            let mut slot = self.field_callback.borrow_mut();
            if slot.is_none() {
                *slot = Some(callback);
            }
        }
    }

    pub(crate) fn preview(&self) -> Option<String> {
        self.preview.borrow().clone()
    }
}

impl PopupElement for MockPopupElement {
    fn is_attached(&self) -> bool {
        self.attached.get()
    }

    fn set_section_visible(&self, section: PopupSection, visible: bool) {
        self.sections.borrow_mut().insert(section, visible);
    }

    fn on_control(&self, control: PopupControl, callback: ControlCallback) {
        self.controls.borrow_mut().insert(control, callback);
    }

    fn on_file_selected(&self, callback: FileCallback) {
        *self.file_callback.borrow_mut() = Some(callback);
    }

    fn on_field_changed(&self, callback: FieldCallback) {
        *self.field_callback.borrow_mut() = Some(callback);
    }

    fn set_image_preview(&self, data_url: Option<&str>) {
        *self.preview.borrow_mut() = data_url.map(str::to_string);
    }
}

struct MockMarker {
    position: LatLng,
    icon: MarkerIcon,
}

struct MockPopup {
    content: String,
    options: PopupOptions,
    open: bool,
    element: Option<Rc<MockPopupElement>>,
    on_open: Option<PopupOpenCallback>,
}

struct MockStandalonePopup {
    element: Rc<MockPopupElement>,
}

pub(crate) struct MockSurface {
    next_id: u64,
    markers: HashMap<MarkerHandle, MockMarker>,
    popups: HashMap<MarkerHandle, MockPopup>,
    standalone: HashMap<PopupHandle, MockStandalonePopup>,
    click_handlers: HashMap<ClickHandlerId, ClickCallback>,
    pub(crate) overlays: Vec<(String, Bounds)>,
    pub(crate) fitted_bounds: Vec<Bounds>,
    pub(crate) zoom_control_corner: Option<ControlCorner>,
    pub(crate) attribution_removed: bool,
    pub(crate) add_mode_cursor: bool,
    size: ScreenPoint,
    center: LatLng,
    zoom: f64,
    view_changes: Vec<(LatLng, f64, Option<PanAnimation>)>,
}

impl MockSurface {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 1,
            markers: HashMap::new(),
            popups: HashMap::new(),
            standalone: HashMap::new(),
            click_handlers: HashMap::new(),
            overlays: Vec::new(),
            fitted_bounds: Vec::new(),
            zoom_control_corner: None,
            attribution_removed: false,
            add_mode_cursor: false,
            size: ScreenPoint::new(1000.0, 800.0),
            center: LatLng::new(0.0, 0.0),
            zoom: 0.0,
            view_changes: Vec::new(),
        }
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn set_size(&mut self, size: ScreenPoint) {
        self.size = size;
    }

    pub(crate) fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub(crate) fn marker_position(&self, marker: MarkerHandle) -> Option<LatLng> {
        self.markers.get(&marker).map(|m| m.position)
    }

    pub(crate) fn marker_icon(&self, marker: MarkerHandle) -> Option<&MarkerIcon> {
        self.markers.get(&marker).map(|m| &m.icon)
    }

    pub(crate) fn popup_content(&self, marker: MarkerHandle) -> Option<&str> {
        self.popups.get(&marker).map(|p| p.content.as_str())
    }

    pub(crate) fn popup_options(&self, marker: MarkerHandle) -> Option<&PopupOptions> {
        self.popups.get(&marker).map(|p| &p.options)
    }

    pub(crate) fn standalone_popup_count(&self) -> usize {
        self.standalone.len()
    }

    pub(crate) fn click_handler_count(&self) -> usize {
        self.click_handlers.len()
    }

    /// Simulate a user click on the surface, firing every bound handler.
    pub(crate) fn fire_click(&mut self, position: LatLng) {
        let mut handlers = std::mem::take(&mut self.click_handlers);
        for callback in handlers.values_mut() {
            callback(position);
        }
        // Handlers registered during dispatch win over the stashed set.
        for (id, callback) in handlers {
            self.click_handlers.entry(id).or_insert(callback);
        }
    }

    pub(crate) fn last_view_change(&self) -> Option<(LatLng, f64, Option<PanAnimation>)> {
        self.view_changes.last().copied()
    }
}

impl MapSurface for MockSurface {
    fn add_image_overlay(&mut self, url: &str, bounds: Bounds) -> OverlayHandle {
        self.overlays.push((url.to_string(), bounds));
        OverlayHandle(self.next_id())
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.fitted_bounds.push(bounds);
        self.center = bounds.center();
    }

    fn set_zoom_control_position(&mut self, corner: ControlCorner) {
        self.zoom_control_corner = Some(corner);
    }

    fn remove_attribution(&mut self) {
        self.attribution_removed = true;
    }

    fn set_add_mode_cursor(&mut self, enabled: bool) {
        self.add_mode_cursor = enabled;
    }

    fn add_marker(&mut self, position: LatLng, icon: MarkerIcon) -> MarkerHandle {
        let handle = MarkerHandle(self.next_id());
        self.markers.insert(handle, MockMarker { position, icon });
        handle
    }

    fn set_marker_icon(&mut self, marker: MarkerHandle, icon: MarkerIcon) {
        if let Some(entry) = self.markers.get_mut(&marker) {
            entry.icon = icon;
        }
    }

    fn set_marker_position(&mut self, marker: MarkerHandle, position: LatLng) {
        if let Some(entry) = self.markers.get_mut(&marker) {
            entry.position = position;
        }
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        self.markers.remove(&marker);
        if let Some(popup) = self.popups.remove(&marker) {
            if let Some(element) = popup.element {
                element.detach();
            }
        }
    }

    fn bind_popup(&mut self, marker: MarkerHandle, content: String, options: PopupOptions) {
        let entry = self.popups.entry(marker).or_insert(MockPopup {
            content: String::new(),
            options: options.clone(),
            open: false,
            element: None,
            on_open: None,
        });
        entry.content = content;
        entry.options = options;
    }

    fn is_popup_open(&self, marker: MarkerHandle) -> bool {
        self.popups.get(&marker).is_some_and(|p| p.open)
    }

    fn open_popup(&mut self, marker: MarkerHandle) {
        let Some(popup) = self.popups.get_mut(&marker) else {
            return;
        };
        popup.open = true;
        popup.element = Some(MockPopupElement::new_attached());

        let mut callback = popup.on_open.take();
        if let Some(cb) = callback.as_mut() {
            cb();
        }
        if let Some(popup) = self.popups.get_mut(&marker) {
            if popup.on_open.is_none() {
                popup.on_open = callback;
            }
        }
    }

    fn close_popup(&mut self, marker: MarkerHandle) {
        if let Some(popup) = self.popups.get_mut(&marker) {
            popup.open = false;
            if let Some(element) = popup.element.take() {
                element.detach();
            }
        }
    }

    fn on_popup_open(&mut self, marker: MarkerHandle, callback: PopupOpenCallback) {
        if let Some(popup) = self.popups.get_mut(&marker) {
            popup.on_open = Some(callback);
        }
    }

    fn popup_element(&self, marker: MarkerHandle) -> Option<Rc<dyn PopupElement>> {
        self.popups
            .get(&marker)
            .filter(|p| p.open)
            .and_then(|p| p.element.clone())
            .map(|e| e as Rc<dyn PopupElement>)
    }

    fn open_popup_at(
        &mut self,
        _position: LatLng,
        _content: String,
        _options: PopupOptions,
    ) -> PopupHandle {
        let handle = PopupHandle(self.next_id());
        self.standalone.insert(
            handle,
            MockStandalonePopup {
                element: MockPopupElement::new_attached(),
            },
        );
        handle
    }

    fn remove_popup(&mut self, popup: PopupHandle) {
        if let Some(entry) = self.standalone.remove(&popup) {
            entry.element.detach();
        }
    }

    fn standalone_popup_element(&self, popup: PopupHandle) -> Option<Rc<dyn PopupElement>> {
        self.standalone
            .get(&popup)
            .map(|p| p.element.clone() as Rc<dyn PopupElement>)
    }

    fn on_click(&mut self, callback: ClickCallback) -> ClickHandlerId {
        let id = ClickHandlerId(self.next_id());
        self.click_handlers.insert(id, callback);
        id
    }

    fn off_click(&mut self, handler: ClickHandlerId) {
        self.click_handlers.remove(&handler);
    }

    fn size(&self) -> ScreenPoint {
        self.size
    }

    fn center(&self) -> LatLng {
        self.center
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn set_view(&mut self, center: LatLng, zoom: f64, animation: Option<PanAnimation>) {
        self.center = center;
        self.zoom = zoom;
        self.view_changes.push((center, zoom, animation));
    }

    fn lat_lng_to_container_point(&self, position: LatLng) -> ScreenPoint {
        ScreenPoint::new(
            self.size.x / 2.0 + (position.lng - self.center.lng),
            self.size.y / 2.0 + (self.center.lat - position.lat),
        )
    }

    fn container_point_to_lat_lng(&self, point: ScreenPoint) -> LatLng {
        LatLng::new(
            self.center.lat + (self.size.y / 2.0 - point.y),
            self.center.lng + (point.x - self.size.x / 2.0),
        )
    }
}

/// A [`MockSurface`] behind shared ownership, so tests can keep inspecting
/// a surface after handing it to a viewport session.
#[derive(Clone)]
pub(crate) struct SharedMockSurface(pub(crate) Rc<RefCell<MockSurface>>);

impl SharedMockSurface {
    pub(crate) fn new() -> Self {
        Self(Rc::new(RefCell::new(MockSurface::new())))
    }
}

impl MapSurface for SharedMockSurface {
    fn add_image_overlay(&mut self, url: &str, bounds: Bounds) -> OverlayHandle {
        self.0.borrow_mut().add_image_overlay(url, bounds)
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.0.borrow_mut().fit_bounds(bounds)
    }

    fn set_zoom_control_position(&mut self, corner: ControlCorner) {
        self.0.borrow_mut().set_zoom_control_position(corner)
    }

    fn remove_attribution(&mut self) {
        self.0.borrow_mut().remove_attribution()
    }

    fn set_add_mode_cursor(&mut self, enabled: bool) {
        self.0.borrow_mut().set_add_mode_cursor(enabled)
    }

    fn add_marker(&mut self, position: LatLng, icon: MarkerIcon) -> MarkerHandle {
        self.0.borrow_mut().add_marker(position, icon)
    }

    fn set_marker_icon(&mut self, marker: MarkerHandle, icon: MarkerIcon) {
        self.0.borrow_mut().set_marker_icon(marker, icon)
    }

    fn set_marker_position(&mut self, marker: MarkerHandle, position: LatLng) {
        self.0.borrow_mut().set_marker_position(marker, position)
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        self.0.borrow_mut().remove_marker(marker)
    }

    fn bind_popup(&mut self, marker: MarkerHandle, content: String, options: PopupOptions) {
        self.0.borrow_mut().bind_popup(marker, content, options)
    }

    fn is_popup_open(&self, marker: MarkerHandle) -> bool {
        self.0.borrow().is_popup_open(marker)
    }

    fn open_popup(&mut self, marker: MarkerHandle) {
        self.0.borrow_mut().open_popup(marker)
    }

    fn close_popup(&mut self, marker: MarkerHandle) {
        self.0.borrow_mut().close_popup(marker)
    }

    fn on_popup_open(&mut self, marker: MarkerHandle, callback: PopupOpenCallback) {
        self.0.borrow_mut().on_popup_open(marker, callback)
    }

    fn popup_element(&self, marker: MarkerHandle) -> Option<Rc<dyn PopupElement>> {
        self.0.borrow().popup_element(marker)
    }

    fn open_popup_at(
        &mut self,
        position: LatLng,
        content: String,
        options: PopupOptions,
    ) -> PopupHandle {
        self.0.borrow_mut().open_popup_at(position, content, options)
    }

    fn remove_popup(&mut self, popup: PopupHandle) {
        self.0.borrow_mut().remove_popup(popup)
    }

    fn standalone_popup_element(&self, popup: PopupHandle) -> Option<Rc<dyn PopupElement>> {
        self.0.borrow().standalone_popup_element(popup)
    }

    fn on_click(&mut self, callback: ClickCallback) -> ClickHandlerId {
        self.0.borrow_mut().on_click(callback)
    }

    fn off_click(&mut self, handler: ClickHandlerId) {
        self.0.borrow_mut().off_click(handler)
    }

    fn size(&self) -> ScreenPoint {
        self.0.borrow().size()
    }

    fn center(&self) -> LatLng {
        self.0.borrow().center()
    }

    fn zoom(&self) -> f64 {
        self.0.borrow().zoom()
    }

    fn set_view(&mut self, center: LatLng, zoom: f64, animation: Option<PanAnimation>) {
        self.0.borrow_mut().set_view(center, zoom, animation)
    }

    fn lat_lng_to_container_point(&self, position: LatLng) -> ScreenPoint {
        self.0.borrow().lat_lng_to_container_point(position)
    }

    fn container_point_to_lat_lng(&self, point: ScreenPoint) -> LatLng {
        self.0.borrow().container_point_to_lat_lng(point)
    }
}

/// Backend double recording every surface it constructs.
pub(crate) struct MockBackend {
    pub(crate) origin: String,
    pub(crate) created: RefCell<Vec<(SharedMockSurface, crate::bounds::ViewportConfig)>>,
}

impl MockBackend {
    pub(crate) fn new(origin: &str) -> Self {
        Self {
            origin: origin.to_string(),
            created: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn last_surface(&self) -> SharedMockSurface {
        self.created
            .borrow()
            .last()
            .expect("no surface created")
            .0
            .clone()
    }
}

impl crate::surface::MapBackend for MockBackend {
    fn create_surface(&self, config: &crate::bounds::ViewportConfig) -> Box<dyn MapSurface> {
        let surface = SharedMockSurface::new();
        self.created
            .borrow_mut()
            .push((surface.clone(), config.clone()));
        Box::new(surface)
    }

    fn origin(&self) -> String {
        self.origin.clone()
    }
}
