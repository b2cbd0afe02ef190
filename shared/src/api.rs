use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::models::{SessionStatus, User, VerificationStrategy};

// ============================================================================
// Authentication API Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(email(message = "Invalid email address"))]
    pub identifier: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(length(min = 2, message = "First name must be at least 2 characters"))]
    pub first_name: String,

    #[validate(length(min = 2, message = "Last name must be at least 2 characters"))]
    pub last_name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendEmailCodeRequest {
    pub strategy: VerificationStrategy,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyEmailCodeRequest {
    #[validate(length(equal = 6, message = "Verification code must be 6 digits"))]
    pub code: String,
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub status: SessionStatus,
    pub created_session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: User,
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }
}

/// First validation message recorded for a field, for display under the
/// matching form input.
pub fn field_message(errors: &ValidationErrors, field: &str) -> Option<String> {
    errors
        .field_errors()
        .get(field)
        .and_then(|errors| errors.first())
        .and_then(|error| error.message.as_ref())
        .map(|message| message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_request_validation() {
        let valid = SignInRequest {
            identifier: "jo@example.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = SignInRequest {
            identifier: "not-an-email".to_string(),
            password: "secret1".to_string(),
        };
        assert!(bad_email.validate().is_err());

        let short_password = SignInRequest {
            identifier: "jo@example.com".to_string(),
            password: "abc".to_string(),
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_sign_up_request_validation() {
        let valid = SignUpRequest {
            first_name: "Jo".to_string(),
            last_name: "Doe".to_string(),
            email: "jo@example.com".to_string(),
            password: "longenough".to_string(),
        };
        assert!(valid.validate().is_ok());

        let short_name = SignUpRequest {
            first_name: "J".to_string(),
            ..valid.clone()
        };
        assert!(short_name.validate().is_err());

        let weak_password = SignUpRequest {
            password: "short".to_string(),
            ..valid
        };
        assert!(weak_password.validate().is_err());
    }

    #[test]
    fn test_field_message_picks_the_failing_field() {
        let request = SignInRequest {
            identifier: "not-an-email".to_string(),
            password: "secret1".to_string(),
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(
            field_message(&errors, "identifier").as_deref(),
            Some("Invalid email address")
        );
        assert_eq!(field_message(&errors, "password"), None);
    }

    #[test]
    fn test_verify_code_must_be_six_chars() {
        assert!(VerifyEmailCodeRequest {
            code: "123456".to_string()
        }
        .validate()
        .is_ok());
        assert!(VerifyEmailCodeRequest {
            code: "123".to_string()
        }
        .validate()
        .is_err());
    }
}
