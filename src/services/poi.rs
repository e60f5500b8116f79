//! POI service: CRUD, image upload, and the per-map role check.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;

use crate::model::{ImageFile, Poi, PoiPayload, UserRoleData};
use crate::services::auth::AuthSession;
use crate::services::http::{agent, authorize, into_json, ServiceError};

/// URLs returned by the image upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub url: String,
    pub thumbnail_url: String,
}

/// The backend POI endpoint set.
pub trait PoiService {
    fn list(&self, map_id: &str) -> Result<Vec<Poi>, ServiceError>;
    fn create(&self, map_id: &str, payload: &PoiPayload) -> Result<Poi, ServiceError>;
    fn update(&self, poi_id: &str, payload: &PoiPayload) -> Result<Poi, ServiceError>;
    fn delete(&self, poi_id: &str) -> Result<(), ServiceError>;
    fn upload_image(&self, map_id: &str, image: &ImageFile) -> Result<UploadedImage, ServiceError>;

    /// The caller's role on a map. Any failure (network, auth, missing
    /// role) collapses to `None`, which the access predicate treats as
    /// "no access"; it is never surfaced as a user-facing error.
    fn role(&self, map_id: &str) -> Option<UserRoleData>;
}

/// HTTP implementation against the backend API.
pub struct HttpPoiService {
    base_url: String,
    auth: Rc<RefCell<AuthSession>>,
}

impl HttpPoiService {
    pub fn new(base_url: impl Into<String>, auth: Rc<RefCell<AuthSession>>) -> Self {
        Self {
            base_url: base_url.into(),
            auth,
        }
    }

    fn token(&self) -> Option<String> {
        self.auth.borrow().token().map(str::to_string)
    }
}

impl PoiService for HttpPoiService {
    fn list(&self, map_id: &str) -> Result<Vec<Poi>, ServiceError> {
        let url = format!("{}/pois/map/{map_id}", self.base_url);
        let response = authorize(agent().get(&url), self.token().as_deref())
            .call()
            .map_err(ServiceError::from_ureq)?;
        into_json(response)
    }

    fn create(&self, map_id: &str, payload: &PoiPayload) -> Result<Poi, ServiceError> {
        let url = format!("{}/pois/map/{map_id}", self.base_url);
        let response = authorize(agent().post(&url), self.token().as_deref())
            .send_json(payload)
            .map_err(ServiceError::from_ureq)?;
        into_json(response)
    }

    fn update(&self, poi_id: &str, payload: &PoiPayload) -> Result<Poi, ServiceError> {
        let url = format!("{}/pois/{poi_id}", self.base_url);
        let response = authorize(agent().put(&url), self.token().as_deref())
            .send_json(payload)
            .map_err(ServiceError::from_ureq)?;
        into_json(response)
    }

    fn delete(&self, poi_id: &str) -> Result<(), ServiceError> {
        let url = format!("{}/pois/{poi_id}", self.base_url);
        authorize(agent().delete(&url), self.token().as_deref())
            .call()
            .map_err(ServiceError::from_ureq)?;
        Ok(())
    }

    fn upload_image(&self, map_id: &str, image: &ImageFile) -> Result<UploadedImage, ServiceError> {
        let url = format!("{}/pois/map/{map_id}/image", self.base_url);
        let boundary = multipart_boundary();
        let body = multipart_image_body(&boundary, image);
        let response = authorize(agent().post(&url), self.token().as_deref())
            .set(
                "Content-Type",
                &format!("multipart/form-data; boundary={boundary}"),
            )
            .send_bytes(&body)
            .map_err(ServiceError::from_ureq)?;
        into_json(response)
    }

    fn role(&self, map_id: &str) -> Option<UserRoleData> {
        let url = format!("{}/maps/{map_id}/role", self.base_url);
        let result = authorize(agent().get(&url), self.token().as_deref())
            .call()
            .map_err(ServiceError::from_ureq)
            .and_then(into_json::<UserRoleData>);
        match result {
            Ok(role) => Some(role),
            Err(err) => {
                log::warn!("role check failed for map {map_id}: {err}");
                None
            }
        }
    }
}

fn multipart_boundary() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    format!("----waymark{nanos:x}")
}

fn multipart_image_body(boundary: &str, image: &ImageFile) -> Vec<u8> {
    let mut body = Vec::with_capacity(image.bytes.len() + 256);
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
            image.name, image.mime
        )
        .as_bytes(),
    );
    body.extend_from_slice(&image.bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}
