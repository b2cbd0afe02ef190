//! Thin client for the external identity provider. The provider owns
//! accounts, email codes and sessions; this module only moves JSON.

use gloo_net::http::{Request, Response};
use shared::api::{
    ErrorResponse, SendEmailCodeRequest, SessionResponse, SignInRequest, SignUpRequest,
    UserResponse, VerifyEmailCodeRequest,
};
use shared::models::{User, VerificationStrategy};
use web_sys::RequestCredentials;

const API_BASE_URL: &str = "http://localhost:8080/v1";

pub struct IdentityService;

impl IdentityService {
    /// Create a session from email and password.
    pub async fn sign_in(request: SignInRequest) -> Result<SessionResponse, String> {
        let url = format!("{}/sign_in", API_BASE_URL);

        let response = Request::post(&url)
            .credentials(RequestCredentials::Include)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {:?}", e))?
            .send()
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        if !response.ok() {
            return Err(error_message(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {:?}", e))
    }

    /// Create a pending account; the session completes after email
    /// verification.
    pub async fn sign_up(request: SignUpRequest) -> Result<SessionResponse, String> {
        let url = format!("{}/sign_up", API_BASE_URL);

        let response = Request::post(&url)
            .credentials(RequestCredentials::Include)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {:?}", e))?
            .send()
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        if !response.ok() {
            return Err(error_message(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {:?}", e))
    }

    /// Ask the provider to email a fresh verification code.
    pub async fn send_email_code() -> Result<(), String> {
        let url = format!("{}/sign_up/send_code", API_BASE_URL);
        let request = SendEmailCodeRequest {
            strategy: VerificationStrategy::EmailCode,
        };

        let response = Request::post(&url)
            .credentials(RequestCredentials::Include)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {:?}", e))?
            .send()
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        if !response.ok() {
            return Err(error_message(response).await);
        }

        Ok(())
    }

    /// Submit an entered code; a rejected code can be resubmitted.
    pub async fn verify_email_code(code: String) -> Result<SessionResponse, String> {
        let url = format!("{}/sign_up/verify_code", API_BASE_URL);

        let response = Request::post(&url)
            .credentials(RequestCredentials::Include)
            .json(&VerifyEmailCodeRequest { code })
            .map_err(|e| format!("Failed to serialize request: {:?}", e))?
            .send()
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        if !response.ok() {
            return Err(error_message(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {:?}", e))
    }

    /// The signed-in user, or `None` without an established session.
    pub async fn current_user() -> Result<Option<User>, String> {
        let url = format!("{}/me", API_BASE_URL);

        let response = Request::get(&url)
            .credentials(RequestCredentials::Include)
            .send()
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        if response.status() == 401 {
            return Ok(None);
        }
        if !response.ok() {
            return Err(error_message(response).await);
        }

        let body: UserResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {:?}", e))?;
        Ok(Some(body.user))
    }

    pub async fn sign_out() -> Result<(), String> {
        let url = format!("{}/sign_out", API_BASE_URL);

        let response = Request::post(&url)
            .credentials(RequestCredentials::Include)
            .send()
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        if !response.ok() {
            return Err(error_message(response).await);
        }

        Ok(())
    }
}

async fn error_message(response: Response) -> String {
    let status = response.status();
    match response.json::<ErrorResponse>().await {
        Ok(body) => body.message,
        Err(_) => format!("HTTP error: {}", status),
    }
}
