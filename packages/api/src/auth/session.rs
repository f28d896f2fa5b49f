//! Per-visitor session data.

use dioxus::prelude::ServerFnError;
use tower_sessions::Session;

use crate::backend::{BackendClient, BackendCookies};
use crate::models::UserInfo;

/// Key for the logged-in user's email.
pub const SESSION_USER_EMAIL_KEY: &str = "user_email";

/// Key for the cookies the external API issued to this visitor.
pub const SESSION_BACKEND_COOKIES_KEY: &str = "backend_cookies";

pub(crate) fn session_error(e: tower_sessions::session::Error) -> ServerFnError {
    tracing::error!("Session store error: {}", e);
    ServerFnError::new(e.to_string())
}

/// Load the relayed cookies, empty when the visitor has none yet.
pub async fn load_backend_cookies(session: &Session) -> Result<BackendCookies, ServerFnError> {
    Ok(session
        .get::<BackendCookies>(SESSION_BACKEND_COOKIES_KEY)
        .await
        .map_err(session_error)?
        .unwrap_or_default())
}

pub async fn store_backend_cookies(
    session: &Session,
    cookies: &BackendCookies,
) -> Result<(), ServerFnError> {
    session
        .insert(SESSION_BACKEND_COOKIES_KEY, cookies)
        .await
        .map_err(session_error)
}

/// Email of the logged-in user, if any.
pub async fn session_email(session: &Session) -> Result<Option<String>, ServerFnError> {
    session
        .get::<String>(SESSION_USER_EMAIL_KEY)
        .await
        .map_err(session_error)
}

/// Fail with `"Login required"` for anonymous visitors.
pub async fn require_login(session: &Session) -> Result<String, ServerFnError> {
    session_email(session)
        .await?
        .ok_or_else(|| ServerFnError::new("Login required"))
}

/// Drop the identity but keep the relayed cookies.
pub async fn forget_identity(session: &Session) -> Result<(), ServerFnError> {
    session
        .remove::<String>(SESSION_USER_EMAIL_KEY)
        .await
        .map_err(session_error)?;
    Ok(())
}

/// Work out who the visitor is and record it in the session.
///
/// `GET /api/me` is asked first. When it answers 401 the identity cookie the API set at
/// login still names the user, so that is used instead. Any other failure is anonymous.
pub async fn resolve_identity(
    session: &Session,
    client: &BackendClient,
) -> Result<Option<UserInfo>, ServerFnError> {
    let mut cookies = load_backend_cookies(session).await?;

    // Nothing the external API could recognise us by.
    if cookies.is_empty() {
        forget_identity(session).await?;
        return Ok(None);
    }

    let user = match client.me(&mut cookies).await {
        Ok(Some(user)) => Some(user),
        Ok(None) => cookies.identity_email().map(UserInfo::from_email),
        Err(e) => {
            tracing::warn!("Identity lookup failed, treating visitor as anonymous: {}", e);
            None
        }
    };
    store_backend_cookies(session, &cookies).await?;

    match &user {
        Some(user) => session
            .insert(SESSION_USER_EMAIL_KEY, user.email.clone())
            .await
            .map_err(session_error)?,
        None => forget_identity(session).await?,
    }

    Ok(user)
}

/// Log out with the external API when possible, then drop the whole session.
///
/// The local session is flushed even if the external call fails.
pub async fn sign_out(session: &Session, client: Option<&BackendClient>) -> Result<(), ServerFnError> {
    let mut cookies = load_backend_cookies(session).await?;

    if let Some(client) = client.filter(|_| !cookies.is_empty()) {
        if let Err(e) = client.logout(&mut cookies).await {
            tracing::warn!("External logout failed: {}", e);
        }
    }

    session.flush().await.map_err(session_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendConfig;
    use axum::http::{header, HeaderMap, StatusCode};
    use axum::response::{IntoResponse, Response};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use std::sync::Arc;
    use std::time::Duration;
    use tower_sessions::MemoryStore;

    fn new_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn login_required(err: &ServerFnError) -> bool {
        matches!(err, ServerFnError::ServerError { message, .. } if message == "Login required")
    }

    // `/api/me` only knows visitors holding the `session=live` cookie; logout always fails.
    async fn stub_me(headers: HeaderMap) -> Response {
        let cookie = headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if cookie.contains("session=live") {
            Json(serde_json::json!({ "user": { "id": 7, "email": "api@example.com" } }))
                .into_response()
        } else {
            (StatusCode::UNAUTHORIZED, Json(serde_json::json!({ "user": null }))).into_response()
        }
    }

    async fn stub_logout() -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, "logout exploded").into_response()
    }

    async fn spawn_stub() -> BackendClient {
        let router = Router::new()
            .route("/api/me", get(stub_me))
            .route("/api/logout", post(stub_logout));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let config = BackendConfig::new(format!("http://{addr}"), Duration::from_secs(5)).unwrap();
        BackendClient::new(config).unwrap()
    }

    async fn unreachable_client() -> BackendClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = BackendConfig::new(format!("http://{addr}"), Duration::from_secs(2)).unwrap();
        BackendClient::new(config).unwrap()
    }

    async fn session_with_cookies(lines: &[&str]) -> Session {
        let session = new_session();
        let mut cookies = BackendCookies::new();
        for line in lines {
            cookies.apply_set_cookie(line);
        }
        store_backend_cookies(&session, &cookies).await.unwrap();
        session
    }

    #[tokio::test]
    async fn cookies_round_trip_through_the_session() {
        let session = new_session();
        assert!(load_backend_cookies(&session).await.unwrap().is_empty());

        let mut cookies = BackendCookies::new();
        cookies.apply_set_cookie("session=abc; HttpOnly");
        cookies.apply_set_cookie("user_email=jane@example.com");
        store_backend_cookies(&session, &cookies).await.unwrap();

        assert_eq!(load_backend_cookies(&session).await.unwrap(), cookies);
    }

    #[tokio::test]
    async fn require_login_rejects_a_session_without_email() {
        let session = new_session();
        let err = require_login(&session).await.unwrap_err();
        assert!(login_required(&err));

        session
            .insert(SESSION_USER_EMAIL_KEY, "jane@example.com".to_string())
            .await
            .unwrap();
        assert_eq!(require_login(&session).await.unwrap(), "jane@example.com");
    }

    #[tokio::test]
    async fn identity_cookie_counts_when_me_is_unauthorized() {
        let client = spawn_stub().await;
        let session = session_with_cookies(&["user_email=jane@example.com; Path=/"]).await;

        let user = resolve_identity(&session, &client).await.unwrap();
        assert_eq!(user.map(|u| u.email).as_deref(), Some("jane@example.com"));
        assert_eq!(require_login(&session).await.unwrap(), "jane@example.com");
    }

    #[tokio::test]
    async fn me_answer_wins_over_the_identity_cookie() {
        let client = spawn_stub().await;
        let session = session_with_cookies(&["session=live", "user_email=old@example.com"]).await;

        let user = resolve_identity(&session, &client).await.unwrap().unwrap();
        assert_eq!(user.email, "api@example.com");
        assert_eq!(user.id.as_deref(), Some("7"));
        assert_eq!(session_email(&session).await.unwrap().as_deref(), Some("api@example.com"));
    }

    #[tokio::test]
    async fn anonymous_visitor_loses_a_stale_email() {
        let client = spawn_stub().await;
        let session = session_with_cookies(&["session=stale"]).await;
        session
            .insert(SESSION_USER_EMAIL_KEY, "jane@example.com".to_string())
            .await
            .unwrap();

        assert_eq!(resolve_identity(&session, &client).await.unwrap(), None);
        assert_eq!(session_email(&session).await.unwrap(), None);
        assert!(login_required(&require_login(&session).await.unwrap_err()));
    }

    #[tokio::test]
    async fn unreachable_api_is_anonymous() {
        let client = unreachable_client().await;
        let session = session_with_cookies(&["user_email=jane@example.com"]).await;

        assert_eq!(resolve_identity(&session, &client).await.unwrap(), None);
        assert_eq!(session_email(&session).await.unwrap(), None);
    }

    #[tokio::test]
    async fn sign_out_flushes_even_when_external_logout_fails() {
        let client = spawn_stub().await;
        let session = session_with_cookies(&["session=live", "user_email=jane@example.com"]).await;
        session
            .insert(SESSION_USER_EMAIL_KEY, "jane@example.com".to_string())
            .await
            .unwrap();

        sign_out(&session, Some(&client)).await.unwrap();

        assert_eq!(session_email(&session).await.unwrap(), None);
        assert!(load_backend_cookies(&session).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sign_out_without_a_client_still_flushes() {
        let session = session_with_cookies(&["session=live"]).await;
        session
            .insert(SESSION_USER_EMAIL_KEY, "jane@example.com".to_string())
            .await
            .unwrap();

        sign_out(&session, None).await.unwrap();
        assert_eq!(session_email(&session).await.unwrap(), None);
    }
}
