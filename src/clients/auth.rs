use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, Result};

/// Authenticated user as reported by the managed auth provider
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    /// Custom role claims from the provider's app metadata
    pub roles: Vec<String>,
    pub access_token: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == "admin")
    }
}

/// Credential checks are delegated entirely to the managed provider;
/// this server never sees password hashes.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser>;

    /// Invalidate the provider-side session (used when the role check fails)
    async fn sign_out(&self, access_token: &str) -> Result<()>;
}

/// Supabase-shaped auth client (password grant)
pub struct SupabaseAuth {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SupabaseAuth {
    pub fn new(http: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            http,
            base_url,
            api_key,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SignInResponse {
    access_token: String,
    user: ProviderUser,
}

#[derive(Debug, Deserialize)]
struct ProviderUser {
    id: String,
    email: String,
    #[serde(default)]
    app_metadata: AppMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct AppMetadata {
    #[serde(default)]
    roles: Vec<String>,
}

#[async_trait]
impl AuthProvider for SupabaseAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser> {
        if self.base_url.is_empty() {
            return Err(AppError::ExternalService(
                "AUTH_BASE_URL is not configured".to_string(),
            ));
        }

        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("apikey", &self.api_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::BAD_REQUEST
            || response.status() == reqwest::StatusCode::UNAUTHORIZED
        {
            return Err(AppError::Unauthorized);
        }

        let body: SignInResponse = response.error_for_status()?.json().await?;

        Ok(AuthUser {
            id: body.user.id,
            email: body.user.email,
            roles: body.user.app_metadata.roles,
            access_token: body.access_token,
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<()> {
        let url = format!("{}/auth/v1/logout", self.base_url);
        self.http
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
