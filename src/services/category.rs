//! Category service for per-map category management.

use std::cell::RefCell;
use std::rc::Rc;

use crate::model::{Category, CategoryPatch, NewCategory};
use crate::services::auth::AuthSession;
use crate::services::http::{agent, authorize, into_json, ServiceError};

/// The backend category endpoint set.
pub trait CategoryService {
    fn list(&self, map_id: &str) -> Result<Vec<Category>, ServiceError>;
    fn create(&self, map_id: &str, category: &NewCategory) -> Result<Category, ServiceError>;
    fn update(&self, category_id: &str, patch: &CategoryPatch) -> Result<Category, ServiceError>;
    fn delete(&self, category_id: &str) -> Result<(), ServiceError>;
}

/// HTTP implementation against the backend API.
pub struct HttpCategoryService {
    base_url: String,
    auth: Rc<RefCell<AuthSession>>,
}

impl HttpCategoryService {
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

impl CategoryService for HttpCategoryService {
    fn list(&self, map_id: &str) -> Result<Vec<Category>, ServiceError> {
        let url = format!("{}/maps/{map_id}/categories", self.base_url);
        let response = authorize(agent().get(&url), self.token().as_deref())
            .call()
            .map_err(ServiceError::from_ureq)?;
        into_json(response)
    }

    fn create(&self, map_id: &str, category: &NewCategory) -> Result<Category, ServiceError> {
        let url = format!("{}/maps/{map_id}/categories", self.base_url);
        let response = authorize(agent().post(&url), self.token().as_deref())
            .send_json(category)
            .map_err(ServiceError::from_ureq)?;
        into_json(response)
    }

    fn update(&self, category_id: &str, patch: &CategoryPatch) -> Result<Category, ServiceError> {
        let url = format!("{}/categories/{category_id}", self.base_url);
        let response = authorize(agent().put(&url), self.token().as_deref())
            .send_json(patch)
            .map_err(ServiceError::from_ureq)?;
        into_json(response)
    }

    fn delete(&self, category_id: &str) -> Result<(), ServiceError> {
        let url = format!("{}/categories/{category_id}", self.base_url);
        authorize(agent().delete(&url), self.token().as_deref())
            .call()
            .map_err(ServiceError::from_ureq)?;
        Ok(())
    }
}
