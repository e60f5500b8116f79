//! Role-based edit access predicate.
//!
//! The sole gate for showing popup action controls and metadata. A missing
//! role payload (not logged in, no role on this map, or a failed fetch) is
//! always a denial.

use crate::model::{UserRole, UserRoleData};

/// Whether the requesting user may edit/delete the POI created by
/// `creator_id`.
pub fn has_edit_access(role_data: Option<&UserRoleData>, creator_id: Option<&str>) -> bool {
    let Some(data) = role_data else {
        return false;
    };
    match data.role {
        UserRole::Owner | UserRole::EditorAll => true,
        UserRole::EditorOwn => creator_id.is_some_and(|creator| creator == data.user_id),
        UserRole::Viewer | UserRole::Contributor | UserRole::Banned => false,
    }
}
