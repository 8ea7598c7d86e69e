use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::constants::{ADMIN_LOGIN_PATH, ADMIN_SESSION_COOKIE};
use crate::error::{AppError, Result};
use crate::security::{issue_session_token, verify_session_token};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Admin sign-in
///
/// Credentials are checked by the managed auth provider. A successful sign-in
/// is only accepted when the returned user carries the `admin` role claim;
/// otherwise the provider session is revoked and the request is rejected.
/// On success a signed session cookie is set (the original site's plain
/// boolean cookie was forgeable and has been replaced).
pub async fn admin_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<Value>)> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::InvalidInput(
            "Email and password are required".to_string(),
        ));
    }

    let user = state
        .auth
        .sign_in(payload.email.trim(), &payload.password)
        .await?;

    if !user.is_admin() {
        tracing::warn!("Sign-in without admin role for {}", user.email);
        if let Err(e) = state.auth.sign_out(&user.access_token).await {
            tracing::warn!("Provider sign-out after role check failed: {}", e);
        }
        return Err(AppError::Unauthorized);
    }

    let token = issue_session_token(
        &user.email,
        &state.config.admin_session_secret,
        state.config.admin_session_ttl_secs,
    );
    let cookie = Cookie::build((ADMIN_SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    tracing::info!("Admin session opened for {}", user.email);

    Ok((jar.add(cookie), Json(json!({ "success": true }))))
}

/// Clear the admin session cookie
pub async fn admin_logout(jar: CookieJar) -> (CookieJar, Json<Value>) {
    let cookie = Cookie::build((ADMIN_SESSION_COOKIE, "")).path("/").build();
    (jar.remove(cookie), Json(json!({ "success": true })))
}

/// Gate middleware for `/admin/*` paths
///
/// Requests under `/admin` (except the login page) must carry a valid,
/// unexpired session cookie; everything else passes through untouched.
/// Unauthenticated requests are redirected to the login page.
pub async fn admin_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    if !path.starts_with("/admin") || path == ADMIN_LOGIN_PATH {
        return next.run(request).await;
    }

    let session = jar
        .get(ADMIN_SESSION_COOKIE)
        .and_then(|c| verify_session_token(c.value(), &state.config.admin_session_secret));

    match session {
        Some(_email) => next.run(request).await,
        None => {
            tracing::info!("Unauthenticated request to {}, redirecting", path);
            Redirect::to(ADMIN_LOGIN_PATH).into_response()
        }
    }
}

/// Admin dashboard summary: pending lead counts per table
pub async fn admin_dashboard(State(state): State<AppState>) -> Result<Json<Value>> {
    let pending = state.store.pending_counts().await?;
    Ok(Json(json!({ "success": true, "pending": pending })))
}

/// Landing point for gate redirects; the actual login form lives in the
/// frontend
pub async fn admin_login_prompt() -> Json<Value> {
    Json(json!({ "success": false, "message": "Sign in required" }))
}
