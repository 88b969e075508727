//! # Auth Module
//!
//! Users, roles and the credential check against the static user list.
//! The logged-in state itself is the [`Session`] value in `session`.

pub mod session;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};
use validator::Validate;

use crate::content::ContentProvider;
use crate::error::AppError;

pub use session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Counselor,
    CollegeAdmin,
    SystemAdmin,
    PeerVolunteer,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::CollegeAdmin | Role::SystemAdmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Student => "student",
            Role::Counselor => "counselor",
            Role::CollegeAdmin => "college_admin",
            Role::SystemAdmin => "system_admin",
            Role::PeerVolunteer => "peer_volunteer",
        };
        f.write_str(name)
    }
}

/// An authenticated user. Never carries a password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
}

/// One entry of the static credential list (`users.json`).
#[derive(Clone, Deserialize, Validate)]
pub struct CredentialRecord {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub institution: Option<String>,
}

impl CredentialRecord {
    /// The public part of the record.
    pub fn user(&self) -> User {
        User {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
            institution: self.institution.clone(),
        }
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Given an email and password, returns the matching user if any.
#[async_trait]
pub trait AuthenticationService: Send + Sync + 'static {
    async fn authenticate(&self, email: &str, password: &str) -> Option<User>;
}

/// Exact-match lookup in a fixed credential list. No hashing, no rate limiting.
pub struct StaticAuthenticationService {
    credentials: Vec<CredentialRecord>,
}

impl StaticAuthenticationService {
    pub fn new(credentials: Vec<CredentialRecord>) -> Result<Self, AppError> {
        for record in &credentials {
            record.validate()?;
        }
        debug!("Loaded {} credential records", credentials.len());
        Ok(Self { credentials })
    }

    pub fn from_content(content: &dyn ContentProvider) -> Result<Self, AppError> {
        Self::new(content.credentials().to_vec())
    }
}

#[async_trait]
impl AuthenticationService for StaticAuthenticationService {
    async fn authenticate(&self, email: &str, password: &str) -> Option<User> {
        let found = self
            .credentials
            .iter()
            .find(|record| record.email == email && record.password == password)
            .map(CredentialRecord::user);
        match &found {
            Some(user) => info!(user = %user.id, role = %user.role, "credentials accepted"),
            None => info!("credentials rejected"),
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::StaticContentProvider;

    #[tokio::test]
    async fn test_exact_match_only() {
        let content = StaticContentProvider::load().unwrap();
        let auth = StaticAuthenticationService::from_content(&content).unwrap();

        let user = auth
            .authenticate("student@college.edu", "student123")
            .await
            .unwrap();
        assert_eq!(user.role, Role::Student);

        assert!(auth.authenticate("Student@college.edu", "student123").await.is_none());
        assert!(auth.authenticate("student@college.edu", "student124").await.is_none());
    }

    #[test]
    fn test_serialized_user_has_no_password() {
        let content = StaticContentProvider::load().unwrap();
        let json = serde_json::to_string(&content.credentials()[0].user()).unwrap();
        assert!(!json.contains("password"));
        assert!(json.contains("\"role\":\"student\""));
    }

    #[test]
    fn test_invalid_email_rejected_at_load() {
        let record: CredentialRecord = serde_json::from_str(
            r#"{"id":"x","email":"not-an-email","password":"p","name":"X","role":"student"}"#,
        )
        .unwrap();
        assert!(matches!(
            StaticAuthenticationService::new(vec![record]),
            Err(AppError::Validation(_))
        ));
    }
}
