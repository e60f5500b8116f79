//! Map metadata and per-map user roles.

use serde::{Deserialize, Serialize};

/// Immutable snapshot of a map as fetched from the backend.
///
/// One snapshot lives for the duration of a render session; navigating to
/// another map fetches a fresh one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapData {
    pub id: String,
    pub name: String,
    /// Width of the base image in pixels. Always > 0.
    pub image_width: u32,
    /// Height of the base image in pixels. Always > 0.
    pub image_height: u32,
    /// URL of the base image. Absent means the map cannot be displayed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub game_id: String,
    pub owner_id: String,
    #[serde(default)]
    pub public: bool,
    /// The caller's resolved role on this map, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_role: Option<UserRole>,
}

/// Per-user, per-map permission level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Owner,
    /// May edit every POI on the map.
    EditorAll,
    /// May edit only POIs they created.
    EditorOwn,
    Viewer,
    Contributor,
    Banned,
}

/// Role payload returned by the permission endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRoleData {
    pub role: UserRole,
    /// Id of the requesting user the role applies to.
    pub user_id: String,
}
