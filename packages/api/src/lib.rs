//! # API crate: server functions for the DemandWork front end
//!
//! The front end owns no data: accounts, sessions, resumes, job listings and match
//! scoring all live behind the external Job/Account API. This crate is the seam between
//! the two. It defines every Dioxus server function the web views call, and each one
//! forwards to the external API through [`backend::BackendClient`], relaying the
//! visitor's cookies stored in their tower-session.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | `server` | Session keys and helpers for the identity + relayed cookies |
//! | [`backend`] | `server` | Typed HTTP client for the external API, cookie relay, errors |
//! | [`models`] | | `UserInfo`, `Job`, `SearchQuery`, `MatchScore`, `Profile` |
//! | [`validate`] | | Field checks shared by the browser and the server functions |
//!
//! ## Server functions exposed here
//!
//! Every public `async fn` below is compiled twice: once with the server logic (behind
//! `#[cfg(feature = "server")]`) and once as a thin client stub that forwards the call
//! over HTTP.
//!
//! - **Auth bridge**: `get_current_user`, `login`, `signup`, `logout`
//! - **Account**: `get_profile`, `update_profile`, `change_password`, `upload_resume`,
//!   `delete_resume`
//! - **Jobs**: `search_jobs`, `analyze_resume`

use dioxus::prelude::*;

pub mod auth;
#[cfg(feature = "server")]
pub mod backend;
pub mod models;
pub mod validate;

pub use models::{Job, MatchScore, Profile, SearchQuery, UserInfo};

#[cfg(feature = "server")]
fn backend_error(e: backend::BackendError) -> ServerFnError {
    tracing::warn!("External API call failed: {}", e);
    ServerFnError::new(e.to_string())
}

/// Look up the current identity with the external API.
///
/// Any failure is treated as anonymous.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    match backend::get_client().await {
        Ok(client) => auth::resolve_identity(&session, client).await,
        Err(e) => {
            tracing::warn!("External API unavailable, treating visitor as anonymous: {}", e);
            auth::forget_identity(&session).await?;
            Ok(None)
        }
    }
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    Ok(None)
}

/// Log in with email and password.
#[cfg(feature = "server")]
#[post("/api/auth/login", session: tower_sessions::Session)]
pub async fn login(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    let email = email.trim().to_string();
    validate::credentials(&email, &password).map_err(ServerFnError::new)?;

    let client = backend::get_client().await.map_err(backend_error)?;
    let mut cookies = auth::load_backend_cookies(&session).await?;

    let result = client.login(&mut cookies, &email, &password).await;
    auth::store_backend_cookies(&session, &cookies).await?;
    let user = result.map_err(backend_error)?;

    session
        .insert(auth::SESSION_USER_EMAIL_KEY, user.email.clone())
        .await
        .map_err(auth::session_error)?;

    tracing::info!("User logged in: {}", user.email);
    Ok(user)
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/login")]
pub async fn login(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Create an account. The visitor still has to log in afterwards.
#[cfg(feature = "server")]
#[post("/api/auth/signup", session: tower_sessions::Session)]
pub async fn signup(email: String, password: String) -> Result<(), ServerFnError> {
    let email = email.trim().to_string();
    validate::credentials(&email, &password).map_err(ServerFnError::new)?;

    let client = backend::get_client().await.map_err(backend_error)?;
    let mut cookies = auth::load_backend_cookies(&session).await?;

    let result = client.signup(&mut cookies, &email, &password).await;
    auth::store_backend_cookies(&session, &cookies).await?;
    result.map_err(backend_error)?;

    tracing::info!("Account created: {}", email);
    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/signup")]
pub async fn signup(email: String, password: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log out: tell the external API, then drop the whole session.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    let client = backend::get_client()
        .await
        .inspect_err(|e| tracing::warn!("External logout skipped: {}", e))
        .ok();
    auth::sign_out(&session, client).await
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}

/// Profile fields and resume URL of the logged-in user.
#[cfg(feature = "server")]
#[get("/api/account/profile", session: tower_sessions::Session)]
pub async fn get_profile() -> Result<Profile, ServerFnError> {
    let email = auth::require_login(&session).await?;

    let client = backend::get_client().await.map_err(backend_error)?;
    let mut cookies = auth::load_backend_cookies(&session).await?;

    let result = client.profile(&mut cookies).await;
    auth::store_backend_cookies(&session, &cookies).await?;
    let mut profile = result.map_err(backend_error)?;

    if profile.email.is_empty() {
        profile.email = email;
    }
    Ok(profile)
}

#[cfg(not(feature = "server"))]
#[get("/api/account/profile")]
pub async fn get_profile() -> Result<Profile, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Update first and last name.
#[cfg(feature = "server")]
#[post("/api/account/profile", session: tower_sessions::Session)]
pub async fn update_profile(first_name: String, last_name: String) -> Result<Profile, ServerFnError> {
    auth::require_login(&session).await?;

    let client = backend::get_client().await.map_err(backend_error)?;
    let mut cookies = auth::load_backend_cookies(&session).await?;

    let result = client
        .update_profile(&mut cookies, first_name.trim(), last_name.trim())
        .await;
    auth::store_backend_cookies(&session, &cookies).await?;
    result.map_err(backend_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/account/profile")]
pub async fn update_profile(first_name: String, last_name: String) -> Result<Profile, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Change the account password.
#[cfg(feature = "server")]
#[post("/api/account/password", session: tower_sessions::Session)]
pub async fn change_password(
    current_password: String,
    new_password: String,
) -> Result<(), ServerFnError> {
    auth::require_login(&session).await?;
    validate::password_change(&current_password, &new_password).map_err(ServerFnError::new)?;

    let client = backend::get_client().await.map_err(backend_error)?;
    let mut cookies = auth::load_backend_cookies(&session).await?;

    let result = client
        .change_password(&mut cookies, &current_password, &new_password)
        .await;
    auth::store_backend_cookies(&session, &cookies).await?;
    result.map_err(backend_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/account/password")]
pub async fn change_password(
    current_password: String,
    new_password: String,
) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Upload a resume file. Returns the new resume URL.
#[cfg(feature = "server")]
#[post("/api/account/resume", session: tower_sessions::Session)]
pub async fn upload_resume(
    file_name: String,
    contents: Vec<u8>,
) -> Result<Option<String>, ServerFnError> {
    auth::require_login(&session).await?;
    validate::resume_file(&file_name, contents.len()).map_err(ServerFnError::new)?;

    let client = backend::get_client().await.map_err(backend_error)?;
    let mut cookies = auth::load_backend_cookies(&session).await?;

    let result = client.upload_resume(&mut cookies, &file_name, contents).await;
    auth::store_backend_cookies(&session, &cookies).await?;
    result.map_err(backend_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/account/resume")]
pub async fn upload_resume(
    file_name: String,
    contents: Vec<u8>,
) -> Result<Option<String>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Remove the stored resume.
#[cfg(feature = "server")]
#[post("/api/account/resume/delete", session: tower_sessions::Session)]
pub async fn delete_resume() -> Result<(), ServerFnError> {
    auth::require_login(&session).await?;

    let client = backend::get_client().await.map_err(backend_error)?;
    let mut cookies = auth::load_backend_cookies(&session).await?;

    let result = client.delete_resume(&mut cookies).await;
    auth::store_backend_cookies(&session, &cookies).await?;
    result.map_err(backend_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/account/resume/delete")]
pub async fn delete_resume() -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Search job postings. Blank fields take the default query.
#[cfg(feature = "server")]
#[post("/api/jobs/search", session: tower_sessions::Session)]
pub async fn search_jobs(keywords: String, location: String) -> Result<Vec<Job>, ServerFnError> {
    let query = SearchQuery::from_form(&keywords, &location);

    let client = backend::get_client().await.map_err(backend_error)?;
    let mut cookies = auth::load_backend_cookies(&session).await?;

    let result = client.search_jobs(&mut cookies, &query).await;
    auth::store_backend_cookies(&session, &cookies).await?;
    let jobs = result.map_err(backend_error)?;

    tracing::debug!("Job search {:?} returned {} postings", query, jobs.len());
    Ok(jobs)
}

#[cfg(not(feature = "server"))]
#[post("/api/jobs/search")]
pub async fn search_jobs(keywords: String, location: String) -> Result<Vec<Job>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Score the user's resume against a job description.
#[cfg(feature = "server")]
#[post("/api/jobs/match-score", session: tower_sessions::Session)]
pub async fn analyze_resume(job_description: String) -> Result<MatchScore, ServerFnError> {
    auth::require_login(&session).await?;

    let client = backend::get_client().await.map_err(backend_error)?;
    let mut cookies = auth::load_backend_cookies(&session).await?;

    let result = client.analyze_resume(&mut cookies, &job_description).await;
    auth::store_backend_cookies(&session, &cookies).await?;
    result.map_err(backend_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/jobs/match-score")]
pub async fn analyze_resume(job_description: String) -> Result<MatchScore, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
