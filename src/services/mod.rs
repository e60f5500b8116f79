//! Backend API clients and the session they authenticate with.

pub mod auth;
pub mod category;
pub mod http;
pub mod poi;

pub use auth::{AuthSession, AuthUser, TokenStore};
pub use category::{CategoryService, HttpCategoryService};
pub use http::ServiceError;
pub use poi::{HttpPoiService, PoiService, UploadedImage};
