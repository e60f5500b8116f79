//! Add-POI click handler management.
//!
//! Exactly one click handler may be bound to a surface through a binding;
//! setting a new handler always unbinds the previous one first. The binding
//! is a value owned by its viewport session, so two coexisting viewports
//! cannot clobber each other's handlers.

use std::cell::Cell;
use std::rc::Rc;

use crate::geo::LatLng;
use crate::surface::{ClickHandlerId, MapSurface};

/// The per-viewport click handler slot.
#[derive(Default)]
pub struct ClickBinding {
    bound: Option<ClickHandlerId>,
}

impl ClickBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `on_click`, unbinding any previously bound handler.
    ///
    /// The installed handler consults `add_mode` freshly on every click, so
    /// toggling add mode does not require rebinding: clicks while the flag
    /// is off are silently swallowed.
    pub fn set(
        &mut self,
        surface: &mut dyn MapSurface,
        add_mode: Rc<Cell<bool>>,
        mut on_click: impl FnMut(LatLng) + 'static,
    ) {
        self.clear(surface);

        let id = surface.on_click(Box::new(move |position| {
            if !add_mode.get() {
                return;
            }
            on_click(position);
        }));
        self.bound = Some(id);
        log::debug!("click handler bound: {id:?}");
    }

    /// Unbind the current handler, if any. Safe to call repeatedly.
    pub fn clear(&mut self, surface: &mut dyn MapSurface) {
        if let Some(id) = self.bound.take() {
            surface.off_click(id);
            log::debug!("click handler unbound: {id:?}");
        }
    }

    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }
}
