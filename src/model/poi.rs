//! Point-of-interest model, draft state, and wire payloads.

use crate::geo::LatLng;
use crate::model::FieldUpdate;
use serde::{Deserialize, Serialize};

/// Minimum POI name length accepted on create.
pub const POI_NAME_MIN_LEN: usize = 1;
/// Maximum POI name length accepted on create.
pub const POI_NAME_MAX_LEN: usize = 40;

/// Display info for the user who created or last updated a POI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoiUser {
    pub username: String,
}

/// A point of interest as fetched from the backend.
///
/// Coordinates are stored in image pixel space with the axes swapped
/// relative to the surface convention: `x` is the lng-like axis and `y` the
/// lat-like axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poi {
    /// Absent only on drafts that have never been persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub map_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub x: f64,
    pub y: f64,
    pub category_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updater_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<PoiUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updater: Option<PoiUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Poi {
    /// Position of this POI on the surface (note the axis swap).
    pub fn position(&self) -> LatLng {
        LatLng::new(self.y, self.x)
    }
}

/// A staged image file (the browser `File` analog).
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFile")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Tri-state outcome of the form's image control.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageSelection {
    /// No change; image fields are omitted from the payload.
    #[default]
    Keep,
    /// A new file is staged for upload.
    Replace(ImageFile),
    /// Explicit removal; both URL fields are cleared.
    Remove,
}

/// Everything needed to create or update a POI, gathered from the form and
/// the clicked position.
#[derive(Debug, Clone, Default)]
pub struct PoiDraft {
    /// Present when editing an existing POI.
    pub id: Option<String>,
    pub map_id: String,
    pub name: String,
    pub category_id: String,
    pub description: Option<String>,
    pub x: f64,
    pub y: f64,
    pub image: ImageSelection,
}

impl PoiDraft {
    /// Apply a clicked surface position (swapping axes into storage order).
    pub fn at_position(mut self, position: LatLng) -> Self {
        self.x = position.lng;
        self.y = position.lat;
        self
    }
}

/// JSON body for POI create and update calls.
///
/// Image URL fields are tri-state: omitted (keep), null (clear), or set to
/// the URLs returned by the upload endpoint. The staged file itself never
/// appears here.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoiPayload {
    pub map_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub x: f64,
    pub y: f64,
    pub category_id: String,
    #[serde(skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub image_url: FieldUpdate<String>,
    #[serde(skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub thumbnail_url: FieldUpdate<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_swaps_axes() {
        let poi = Poi {
            id: Some("p1".to_string()),
            map_id: "m1".to_string(),
            name: "Inn".to_string(),
            description: None,
            x: 120.0,
            y: 45.0,
            category_id: "c1".to_string(),
            image_url: None,
            thumbnail_url: None,
            creator_id: None,
            updater_id: None,
            creator: None,
            updater: None,
            created_at: None,
            updated_at: None,
        };
        assert_eq!(poi.position(), LatLng::new(45.0, 120.0));
    }

    #[test]
    fn draft_at_position_stores_swapped_coordinates() {
        let draft = PoiDraft::default().at_position(LatLng::new(10.0, 99.0));
        assert_eq!(draft.x, 99.0);
        assert_eq!(draft.y, 10.0);
    }

    #[test]
    fn payload_keep_omits_image_fields() {
        let payload = PoiPayload {
            map_id: "m1".to_string(),
            name: "Inn".to_string(),
            description: None,
            x: 1.0,
            y: 2.0,
            category_id: "c1".to_string(),
            image_url: FieldUpdate::Unchanged,
            thumbnail_url: FieldUpdate::Unchanged,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("imageUrl").is_none());
        assert!(json.get("thumbnailUrl").is_none());
        assert_eq!(json["categoryId"], "c1");
    }
}
