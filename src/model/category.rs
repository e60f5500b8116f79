//! POI category model.

use crate::model::FieldUpdate;
use serde::{Deserialize, Serialize};

/// A POI category owned by a map.
///
/// Categories form a tree through `parent_id`; a parent chain always
/// terminates at a root category with `parent_id == None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub map_id: String,
    pub name: String,
    /// Icon identifier; markers fall back to a generic pin when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// CSS color; markers fall back to the default blue when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(
        default,
        rename = "parentCategoryId",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Payload for creating a category (id and timestamps are server-assigned).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub map_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "parentCategoryId", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// Partial update for a category; omitted fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Reparenting is tri-state: keep, detach to root, or move.
    #[serde(
        rename = "parentCategoryId",
        skip_serializing_if = "FieldUpdate::is_unchanged"
    )]
    pub parent_id: FieldUpdate<String>,
}
