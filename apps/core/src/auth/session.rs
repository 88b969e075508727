//! The logged-in state as an explicit value.
//!
//! `login` and `logout` return a new [`Session`] and keep the persisted
//! `currentUser` entry in step with it.

use tracing::{info, instrument, warn};

use super::{AuthenticationService, Role, User};
use crate::error::AppError;
use crate::storage::{KeyValueStore, CURRENT_USER_KEY};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(User),
}

impl Session {
    /// Rebuilds the session from the store. A corrupt entry is dropped.
    pub async fn restore(store: &dyn KeyValueStore) -> Result<Session, AppError> {
        let Some(raw) = store.get_item(CURRENT_USER_KEY).await? else {
            return Ok(Session::Anonymous);
        };

        match serde_json::from_str::<User>(&raw) {
            Ok(user) => {
                info!(user = %user.id, "session restored");
                Ok(Session::Authenticated(user))
            }
            Err(err) => {
                warn!(error = %err, "discarding unreadable stored user");
                store.remove_item(CURRENT_USER_KEY).await?;
                Ok(Session::Anonymous)
            }
        }
    }

    /// Checks the credentials and, on success, persists the user.
    ///
    /// On mismatch `self` is still the current session and the caller shows
    /// the `auth.error.invalidCredentials` message.
    #[instrument(skip(self, auth, store, password))]
    pub async fn login(
        &self,
        auth: &dyn AuthenticationService,
        store: &dyn KeyValueStore,
        email: &str,
        password: &str,
    ) -> Result<Session, AppError> {
        let user = auth
            .authenticate(email, password)
            .await
            .ok_or(AppError::AuthenticationFailure)?;

        store
            .set_item(CURRENT_USER_KEY, &serde_json::to_string(&user)?)
            .await?;
        Ok(Session::Authenticated(user))
    }

    pub async fn logout(&self, store: &dyn KeyValueStore) -> Result<Session, AppError> {
        store.remove_item(CURRENT_USER_KEY).await?;
        if let Some(user) = self.user() {
            info!(user = %user.id, "logged out");
        }
        Ok(Session::Anonymous)
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Session::Authenticated(user) => Some(user),
            Session::Anonymous => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user().map(|user| user.role)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }
}
