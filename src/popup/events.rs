//! Popup event wiring: detail-view controls behind the permission check,
//! and form controls feeding a shared form state.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::geo::LatLng;
use crate::model::{ImageFile, ImageSelection, Poi, PoiDraft, UserRoleData};
use crate::popup::access::has_edit_access;
use crate::services::PoiService;
use crate::surface::{ControlCallback, FormField, PopupControl, PopupElement, PopupSection};

/// Ticket for one popup-open's pending permission check.
///
/// Produced by [`RevealGate::bind_poi_events`]; holds the generation the
/// check belongs to so a result that arrives after the popup was reopened or
/// torn down is discarded.
pub struct PendingReveal {
    generation: u64,
    element: Rc<dyn PopupElement>,
    creator_id: Option<String>,
}

/// Serializes permission-check reveals for one viewport session.
///
/// The popup opens with actions and metadata hidden; only the result of the
/// most recent `bind_poi_events` may reveal them, and only while the element
/// is still attached.
#[derive(Default)]
pub struct RevealGate {
    generation: u64,
}

impl RevealGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wire the detail-view controls and stage a permission check.
    ///
    /// Actions and metadata are forced hidden here; the returned ticket is
    /// later passed to [`apply`](Self::apply) with the fetched role.
    pub fn bind_poi_events(
        &mut self,
        element: Rc<dyn PopupElement>,
        poi: &Poi,
        on_edit: ControlCallback,
        on_delete: ControlCallback,
        on_close: ControlCallback,
    ) -> PendingReveal {
        self.generation += 1;

        element.set_section_visible(PopupSection::Actions, false);
        element.set_section_visible(PopupSection::Metadata, false);
        element.on_control(PopupControl::Edit, on_edit);
        element.on_control(PopupControl::Delete, on_delete);
        element.on_control(PopupControl::Close, on_close);

        PendingReveal {
            generation: self.generation,
            element,
            creator_id: poi.creator_id.clone(),
        }
    }

    /// Apply a resolved permission check.
    ///
    /// Stale tickets (a newer popup-open exists) and detached elements are
    /// silently dropped; a denial leaves the controls hidden.
    pub fn apply(&self, pending: PendingReveal, role: Option<UserRoleData>) {
        if pending.generation != self.generation {
            log::debug!(
                "discarding stale permission result (generation {} < {})",
                pending.generation,
                self.generation
            );
            return;
        }
        if !pending.element.is_attached() {
            log::debug!("discarding permission result for detached popup");
            return;
        }
        if has_edit_access(role.as_ref(), pending.creator_id.as_deref()) {
            pending.element.set_section_visible(PopupSection::Actions, true);
            pending.element.set_section_visible(PopupSection::Metadata, true);
        }
    }

    /// Convenience for hosts with a blocking event loop: bind, fetch the
    /// role, and apply in one step.
    pub fn bind_and_check(
        &mut self,
        element: Rc<dyn PopupElement>,
        poi: &Poi,
        service: &dyn PoiService,
        on_edit: ControlCallback,
        on_delete: ControlCallback,
        on_close: ControlCallback,
    ) {
        let pending = self.bind_poi_events(element, poi, on_edit, on_delete, on_close);
        let role = service.role(&poi.map_id);
        self.apply(pending, role);
    }
}

/// Live state of the create/edit form, updated by the wired controls.
///
/// The save pipeline reads this directly; rendered markup is never parsed
/// back.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub name: String,
    pub category_id: String,
    pub description: String,
    pub image: ImageSelection,
}

impl FormState {
    /// Pre-fill from the POI being edited, or blank for a new one.
    pub fn from_poi(poi: Option<&Poi>) -> Self {
        match poi {
            Some(poi) => Self {
                name: poi.name.clone(),
                category_id: poi.category_id.clone(),
                description: poi.description.clone().unwrap_or_default(),
                image: ImageSelection::Keep,
            },
            None => Self::default(),
        }
    }

    /// Combine the form fields with the placement position into a draft.
    pub fn draft(&self, id: Option<String>, map_id: &str, position: LatLng) -> PoiDraft {
        PoiDraft {
            id,
            map_id: map_id.to_string(),
            name: self.name.clone(),
            category_id: self.category_id.clone(),
            description: (!self.description.is_empty()).then(|| self.description.clone()),
            x: 0.0,
            y: 0.0,
            image: self.image.clone(),
        }
        .at_position(position)
    }
}

/// Build the `data:` URL used for the immediate file preview.
pub fn image_data_url(file: &ImageFile) -> String {
    format!("data:{};base64,{}", file.mime, BASE64.encode(&file.bytes))
}

/// Wire the form popup's controls to a shared [`FormState`].
///
/// File selection stages the file for upload and shows a preview built from
/// its bytes; the remove-image control marks the image for deletion and
/// reverts to the upload placeholder.
pub fn bind_form_events(
    element: &Rc<dyn PopupElement>,
    state: Rc<RefCell<FormState>>,
    on_save: ControlCallback,
    on_cancel: ControlCallback,
) {
    element.on_control(PopupControl::Save, on_save);
    element.on_control(PopupControl::Cancel, on_cancel);

    {
        let state = Rc::clone(&state);
        let weak: Weak<dyn PopupElement> = Rc::downgrade(element);
        element.on_file_selected(Box::new(move |file| {
            if let Some(element) = weak.upgrade() {
                element.set_image_preview(Some(&image_data_url(&file)));
            }
            state.borrow_mut().image = ImageSelection::Replace(file);
        }));
    }

    {
        let state = Rc::clone(&state);
        let weak: Weak<dyn PopupElement> = Rc::downgrade(element);
        element.on_control(
            PopupControl::RemoveImage,
            Box::new(move || {
                if let Some(element) = weak.upgrade() {
                    element.set_image_preview(None);
                }
                state.borrow_mut().image = ImageSelection::Remove;
            }),
        );
    }

    element.on_field_changed(Box::new(move |field, value| {
        let mut state = state.borrow_mut();
        match field {
            FormField::Name => state.name = value,
            FormField::Category => state.category_id = value,
            FormField::Description => state.description = value,
        }
    }));
}
