//! Data models for maps, categories, POIs, and roles.

mod category;
mod map;
mod poi;

pub use category::{Category, CategoryPatch, NewCategory};
pub use map::{MapData, UserRole, UserRoleData};
pub use poi::{
    ImageFile, ImageSelection, Poi, PoiDraft, PoiPayload, PoiUser, POI_NAME_MAX_LEN,
    POI_NAME_MIN_LEN,
};

use serde::{Serialize, Serializer};

/// A tri-state update for a nullable server-side field.
///
/// `Unchanged` is omitted from the payload entirely (the server keeps the
/// stored value), `Clear` serializes as an explicit `null`, and `Set`
/// serializes as the new value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldUpdate<T> {
    #[default]
    Unchanged,
    Clear,
    Set(T),
}

impl<T> FieldUpdate<T> {
    /// Used with `#[serde(skip_serializing_if = "FieldUpdate::is_unchanged")]`.
    pub fn is_unchanged(&self) -> bool {
        matches!(self, FieldUpdate::Unchanged)
    }
}

impl<T: Serialize> Serialize for FieldUpdate<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Unchanged is skipped at the field level via skip_serializing_if.
            FieldUpdate::Unchanged | FieldUpdate::Clear => serializer.serialize_none(),
            FieldUpdate::Set(value) => serializer.serialize_some(value),
        }
    }
}
