//! Save pipeline: validation, staged-image upload, then create or update.

use thiserror::Error;

use crate::i18n::Translator;
use crate::model::{
    FieldUpdate, ImageSelection, Poi, PoiDraft, PoiPayload, POI_NAME_MAX_LEN, POI_NAME_MIN_LEN,
};
use crate::services::{PoiService, ServiceError};

#[derive(Debug, Error)]
pub enum SaveError {
    /// The draft failed validation; `message` is already localized.
    #[error("{message}")]
    Validation { message: String },
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Check a new draft before it is sent anywhere.
///
/// Names are measured in characters, not bytes. Edits of existing POIs are
/// not re-validated; the form can only have been populated from data the
/// backend already accepted.
pub fn validate_new_poi(draft: &PoiDraft, translator: &dyn Translator) -> Result<(), SaveError> {
    let name_len = draft.name.chars().count();
    if name_len < POI_NAME_MIN_LEN || name_len > POI_NAME_MAX_LEN {
        return Err(SaveError::Validation {
            message: translator.t("poi.error.validation.name"),
        });
    }
    if draft.category_id.is_empty() {
        return Err(SaveError::Validation {
            message: translator.t("poi.error.validation.category"),
        });
    }
    Ok(())
}

/// Persist a draft.
///
/// A staged replacement image is uploaded before the POI call so the create
/// or update body can carry the returned URLs; if the upload fails the POI
/// is never written. Removal clears both URL fields in the same call.
pub fn save_poi(
    draft: &PoiDraft,
    service: &dyn PoiService,
    translator: &dyn Translator,
) -> Result<Poi, SaveError> {
    if draft.id.is_none() {
        validate_new_poi(draft, translator)?;
    }

    let (image_url, thumbnail_url) = match &draft.image {
        ImageSelection::Keep => (FieldUpdate::Unchanged, FieldUpdate::Unchanged),
        ImageSelection::Remove => (FieldUpdate::Clear, FieldUpdate::Clear),
        ImageSelection::Replace(file) => {
            let uploaded = service.upload_image(&draft.map_id, file)?;
            (
                FieldUpdate::Set(uploaded.url),
                FieldUpdate::Set(uploaded.thumbnail_url),
            )
        }
    };

    let payload = PoiPayload {
        map_id: draft.map_id.clone(),
        name: draft.name.clone(),
        description: draft.description.clone(),
        x: draft.x,
        y: draft.y,
        category_id: draft.category_id.clone(),
        image_url,
        thumbnail_url,
    };

    let saved = match &draft.id {
        Some(id) => service.update(id, &payload)?,
        None => service.create(&draft.map_id, &payload)?,
    };
    Ok(saved)
}
