//! Authentication session store.
//!
//! Holds the bearer token and user snapshot for the running session and
//! persists them through a pluggable [`TokenStore`] (the browser
//! localStorage analog). The map core itself only reads the token
//! indirectly, through the service layer's header injection.

use serde::{Deserialize, Serialize};

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";

/// Key/value persistence for session data.
pub trait TokenStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// The logged-in user's snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Current authentication state.
#[derive(Debug, Default)]
pub struct AuthSession {
    token: Option<String>,
    user: Option<AuthUser>,
}

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    /// Display name, falling back to the username, then empty.
    pub fn display_name(&self) -> String {
        self.user
            .as_ref()
            .map(|user| {
                user.display_name
                    .clone()
                    .unwrap_or_else(|| user.username.clone())
            })
            .unwrap_or_default()
    }

    /// Record a successful login and persist it.
    pub fn login(&mut self, store: &mut dyn TokenStore, token: &str, user: AuthUser) {
        store.set(TOKEN_KEY, token);
        if let Ok(json) = serde_json::to_string(&user) {
            store.set(USER_KEY, &json);
        }
        self.token = Some(token.to_string());
        self.user = Some(user);
        log::debug!("session opened for {}", self.display_name());
    }

    /// Drop the session and its persisted copy.
    pub fn logout(&mut self, store: &mut dyn TokenStore) {
        store.remove(TOKEN_KEY);
        store.remove(USER_KEY);
        self.token = None;
        self.user = None;
        log::debug!("session closed");
    }

    /// Restore a persisted session at startup. A corrupt user snapshot is
    /// dropped; the token alone still counts as logged in.
    pub fn restore(&mut self, store: &dyn TokenStore) {
        let Some(token) = store.get(TOKEN_KEY) else {
            return;
        };
        self.token = Some(token);
        self.user = store
            .get(USER_KEY)
            .and_then(|json| serde_json::from_str(&json).ok());
    }
}

#[cfg(test)]
pub(crate) struct MemoryTokenStore(pub std::collections::HashMap<String, String>);

#[cfg(test)]
impl MemoryTokenStore {
    pub(crate) fn new() -> Self {
        Self(std::collections::HashMap::new())
    }
}

#[cfg(test)]
impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.0.remove(key);
    }
}
