use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of a sign-in or sign-up attempt at the identity provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Complete,
    NeedsEmailVerification,
    Abandoned,
}

/// How the identity provider should verify an email address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStrategy {
    EmailCode,
}

/// Signed-in user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Display name, falling back to the email address.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(first: Option<&str>, last: Option<&str>) -> User {
        User {
            id: Uuid::new_v4(),
            email: "jo@example.com".to_string(),
            first_name: first.map(String::from),
            last_name: last.map(String::from),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_display_name_prefers_full_name() {
        assert_eq!(user(Some("Jo"), Some("Doe")).display_name(), "Jo Doe");
        assert_eq!(user(Some("Jo"), None).display_name(), "Jo");
        assert_eq!(user(None, None).display_name(), "jo@example.com");
    }

    #[test]
    fn test_session_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&SessionStatus::NeedsEmailVerification).unwrap(),
            r#""needs_email_verification""#
        );
    }
}
