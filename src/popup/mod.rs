//! Popup content: read-only POI detail markup and the editable form.
//!
//! Popup content crosses the [`crate::surface::MapSurface`] boundary as HTML,
//! matching the contract of the underlying mapping library. Event wiring and
//! the permission-gated reveal live in [`events`]; the access predicate in
//! [`access`].

pub mod access;
pub mod events;

use crate::i18n::Translator;
use crate::model::{Category, Poi};
use crate::surface::PopupOptions;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::OffsetDateTime;

/// Fixed popup width in pixels.
pub const POPUP_WIDTH: u32 = 400;
/// Popup background color.
pub const POPUP_BACKGROUND: &str = "#002040";
/// Popup text color.
pub const POPUP_TEXT_COLOR: &str = "#fff";

/// Options for the popup bound to a persistent POI marker. Closing is via
/// the in-popup close control, never the library's default button.
pub fn marker_popup_options() -> PopupOptions {
    PopupOptions {
        offset: (0.0, 12.0),
        class_name: "poi-info-popup",
        close_button: false,
    }
}

/// Options for the standalone create/edit form popup.
pub fn form_popup_options() -> PopupOptions {
    PopupOptions {
        offset: (0.0, 5.0),
        class_name: "poi-popup",
        close_button: false,
    }
}

/// Format an RFC 3339 timestamp as short numeric date-time. Falls back to
/// the raw string when it does not parse.
pub fn format_poi_date(raw: &str) -> String {
    let format =
        format_description!("[day padding:none]/[month padding:none]/[year] [hour]:[minute]");
    OffsetDateTime::parse(raw, &Rfc3339)
        .ok()
        .and_then(|stamp| stamp.format(&format).ok())
        .unwrap_or_else(|| raw.to_string())
}

// Edit/delete/close button row. Hidden until the permission check reveals it.
fn actions_markup() -> String {
    let button_style = "background:rgba(0,32,64,0.8);border:none;color:#fff;cursor:pointer;padding:8px;border-radius:0;width:32px;height:32px;display:flex;align-items:center;justify-content:center;";
    format!(
        r#"<div class="poi-actions" style="position:absolute;top:8px;right:8px;display:none;gap:4px;"><button class="edit-btn" style="{button_style}"><i class="mdi mdi-pencil"></i></button><button class="delete-btn" style="{button_style}"><i class="mdi mdi-delete"></i></button><button class="close-btn" style="{button_style}"><i class="mdi mdi-close"></i></button></div>"#
    )
}

/// Render the read-only detail view for a POI.
///
/// The actions row and the metadata row both start hidden; they are revealed
/// only after the asynchronous permission check resolves positively.
pub fn detail_template(poi: &Poi, t: &dyn Translator) -> String {
    let header = match &poi.image_url {
        Some(image_url) => format!(
            r#"<div style="position:relative;"><img src="{image_url}" style="width:100%;height:200px;object-fit:cover;border-radius:0;cursor:pointer;" onclick="window.open('{image_url}', '_blank')">{}</div>"#,
            actions_markup()
        ),
        None => actions_markup(),
    };

    let description = poi
        .description
        .as_deref()
        .map(|text| {
            format!(
                r#"<p style="margin:0;font-size:0.9rem;color:#ccc;max-height:125px;overflow:auto;">{text}</p>"#
            )
        })
        .unwrap_or_default();

    let unknown = t.t("common.unknown");
    let creator = poi
        .creator
        .as_ref()
        .map_or(unknown.clone(), |user| user.username.clone());
    let created = format!(
        "<div>{} {} {} {}</div>",
        t.t("poi.created"),
        format_poi_date(poi.created_at.as_deref().unwrap_or("")),
        t.t("poi.by"),
        creator
    );
    let updated = if poi.updated_at != poi.created_at {
        let updater = poi
            .updater
            .as_ref()
            .map_or(unknown, |user| user.username.clone());
        format!(
            "<div>{} {} {} {}</div>",
            t.t("poi.updated"),
            format_poi_date(poi.updated_at.as_deref().unwrap_or("")),
            t.t("poi.by"),
            updater
        )
    } else {
        String::new()
    };

    format!(
        r#"<div style="background:{POPUP_BACKGROUND};color:{POPUP_TEXT_COLOR};border-radius:0;padding:0;width:{POPUP_WIDTH}px;">{header}<div style="padding:16px;"><h3 style="margin:0 0 8px 0;font-size:1.1rem;">{name}</h3>{description}<div class="poi-metadata" style="display:none;margin-top:12px;font-size:0.8rem;color:#888;text-align:right;">{created}{updated}</div></div></div>"#,
        name = poi.name,
    )
}

/// Render the create/edit form. `poi` is `None` when creating; when editing,
/// its fields pre-fill the inputs and its category is pre-selected.
pub fn form_template(poi: Option<&Poi>, categories: &[Category], t: &dyn Translator) -> String {
    let category_options: String = categories
        .iter()
        .map(|category| {
            let selected = poi
                .is_some_and(|poi| poi.category_id == category.id)
                .then_some(" selected")
                .unwrap_or("");
            format!(
                r#"<option value="{}"{selected}>{}</option>"#,
                category.id, category.name
            )
        })
        .collect();

    let title = if poi.is_some() {
        t.t("poi.form.editTitle")
    } else {
        t.t("poi.form.title")
    };
    let name = poi.map(|p| p.name.as_str()).unwrap_or("");
    let description = poi.and_then(|p| p.description.as_deref()).unwrap_or("");
    let image_url = poi.and_then(|p| p.image_url.as_deref());
    let placeholder_display = if image_url.is_some() { "display:none;" } else { "" };
    let preview_display = if image_url.is_some() { "block" } else { "none" };

    format!(
        r#"<form class="poi-form" style="background:{POPUP_BACKGROUND};color:{POPUP_TEXT_COLOR};border-radius:0;padding:20px;"><input type="hidden" id="should-delete-image" value="false" /><div class="d-flex flex-column"><div class="d-flex flex-row align-center mb-2"><span style="font-weight:bold;font-size:1.2rem;">{title}</span></div><div class="mb-3"><hr style="border:0;border-top:1px solid #335;"></hr></div><div class="d-flex flex-row align-center mb-2"><label for="poi-name" style="width:90px;min-width:90px;">{name_label}</label><input id="poi-name" class="flex-grow-1 ml-2" type="text" value="{name}" placeholder="{name_label}" style="background:#001428;color:#fff;border:1px solid #335;border-radius:0;padding:6px;" /></div><div class="d-flex flex-row align-center mb-2"><label for="poi-category" style="width:90px;min-width:90px;">{category_label}</label><select id="poi-category" class="flex-grow-1 ml-2" style="background:#001428;color:#fff;border:1px solid #335;border-radius:0;padding:6px;"><option value="">{choose_category}</option>{category_options}</select></div><div class="d-flex flex-row align-center mb-2"><label for="poi-image" style="width:90px;min-width:90px;">{image_label}</label><div class="image-upload flex-grow-1 ml-2" style="position:relative;border:2px dashed #335;border-radius:0;background:#001428;min-height:80px;text-align:center;cursor:pointer;"><input id="poi-image" type="file" accept="image/*" class="file-input" style="position:absolute;width:100%;height:100%;top:0;left:0;opacity:0;cursor:pointer;z-index:1;" /><div class="upload-placeholder d-flex flex-column align-center justify-center pa-4" style="padding:16px;{placeholder_display}"><span style="color:#ccc;">{upload_placeholder}</span><small style="color:#888;">{upload_hint}</small></div><div class="image-preview" style="display:{preview_display};"><img src="{preview_src}" alt="Preview" id="image-preview" style="width:100%;height:150px;object-fit:cover;border-radius:0;" /><button type="button" class="remove-image" style="position:absolute;top:8px;right:8px;width:24px;height:24px;border-radius:0;background:rgba(0,0,0,0.5);color:#fff;border:none;cursor:pointer;font-size:16px;z-index:2;">&times;</button></div></div></div><div class="d-flex flex-row align-center mb-2"><label for="poi-description" style="width:90px;min-width:90px;">{description_label}</label><textarea id="poi-description" class="flex-grow-1 ml-2" rows="2" placeholder="{description_label}" style="background:#001428;color:#fff;border:1px solid #335;border-radius:0;padding:6px;">{description}</textarea></div><div class="d-flex flex-row justify-end gap-2 mt-4"><button type="button" class="cancel-btn" style="background:#335;color:#fff;border:none;border-radius:0;padding:8px 16px;cursor:pointer;">{cancel}</button><button type="button" class="save-btn" style="background:#FFD600;color:#002040;font-weight:bold;border:none;border-radius:0;padding:8px 16px;cursor:pointer;">{save}</button></div></div></form>"#,
        name_label = t.t("poi.form.name"),
        category_label = t.t("poi.form.category"),
        choose_category = t.t("poi.form.chooseCategory"),
        image_label = t.t("poi.form.image"),
        upload_placeholder = t.t("poi.form.uploadPlaceholder"),
        upload_hint = t.t("poi.form.uploadHint"),
        preview_src = image_url.unwrap_or(""),
        description_label = t.t("poi.form.description"),
        cancel = t.t("common.cancel"),
        save = t.t("common.save"),
    )
}
