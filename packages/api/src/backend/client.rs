//! # Typed client for the external Job/Account API
//!
//! One method per external endpoint. Every call takes the visitor's [`BackendCookies`]
//! mutably: the cookies are sent as the `Cookie` header and any `Set-Cookie` in the
//! response is folded back in, so the caller only has to persist the set afterwards.
//!
//! Failures are never retried. Non-2xx responses become [`BackendError::Api`] with the
//! server's own message (see [`extract_error_message`]); transport failures become
//! [`BackendError::Network`].

use reqwest::header::COOKIE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::OnceCell;

use super::{extract_error_message, BackendConfig, BackendCookies, BackendError};
use crate::models::{Job, MatchScore, Profile, SearchQuery, UserInfo, UserPayload};

static CLIENT: OnceCell<BackendClient> = OnceCell::const_new();

/// Get or initialize the process-wide client.
/// Configuration is read from the environment on first use.
pub async fn get_client() -> Result<&'static BackendClient, BackendError> {
    CLIENT
        .get_or_try_init(|| async { BackendClient::new(BackendConfig::from_env()?) })
        .await
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    #[serde(default)]
    user: Option<UserPayload>,
}

#[derive(Debug, Deserialize)]
struct ProfileEnvelope {
    user: Profile,
}

#[derive(Debug, Deserialize)]
struct ResumeOwner {
    #[serde(default)]
    resume_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadEnvelope {
    user: ResumeOwner,
}

#[derive(Debug, Deserialize)]
struct ScoreEnvelope {
    #[serde(default)]
    score: Option<f64>,
}

/// HTTP client bound to one external API base URL.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    config: BackendConfig,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BackendError::Config(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Send `request` with the relayed cookies and absorb the ones that come back.
    async fn send(
        &self,
        request: RequestBuilder,
        cookies: &mut BackendCookies,
        fallback: &str,
    ) -> Result<Response, BackendError> {
        let request = match cookies.header_value() {
            Some(header) => request.header(COOKIE, header),
            None => request,
        };

        let response = request.send().await.map_err(BackendError::Network)?;
        cookies.absorb(response.headers());

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body, fallback);
        tracing::debug!(status = status.as_u16(), %message, "external API returned an error");
        Err(BackendError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Exchange credentials for a session. The API's session cookies land in `cookies`.
    pub async fn login(
        &self,
        cookies: &mut BackendCookies,
        email: &str,
        password: &str,
    ) -> Result<UserInfo, BackendError> {
        tracing::debug!("POST /api/login");
        let request = self
            .http
            .post(self.config.endpoint("/api/login"))
            .json(&json!({ "email": email, "password": password }));
        let envelope: UserEnvelope = self.send(request, cookies, "Login failed").await?.json().await?;

        Ok(envelope
            .user
            .map(UserInfo::from)
            .unwrap_or_else(|| UserInfo::from_email(email)))
    }

    pub async fn signup(
        &self,
        cookies: &mut BackendCookies,
        email: &str,
        password: &str,
    ) -> Result<(), BackendError> {
        tracing::debug!("POST /api/signup");
        let request = self
            .http
            .post(self.config.endpoint("/api/signup"))
            .json(&json!({ "email": email, "password": password }));
        self.send(request, cookies, "Signup failed").await?;
        Ok(())
    }

    pub async fn logout(&self, cookies: &mut BackendCookies) -> Result<(), BackendError> {
        tracing::debug!("POST /api/logout");
        let request = self.http.post(self.config.endpoint("/api/logout"));
        self.send(request, cookies, "Failed to logout").await?;
        Ok(())
    }

    /// Current identity. A 401 or a null `user` means anonymous.
    pub async fn me(&self, cookies: &mut BackendCookies) -> Result<Option<UserInfo>, BackendError> {
        tracing::debug!("GET /api/me");
        let request = self.http.get(self.config.endpoint("/api/me"));
        let response = match self.send(request, cookies, "Failed to load user").await {
            Ok(response) => response,
            Err(BackendError::Api { status, .. }) if status == StatusCode::UNAUTHORIZED.as_u16() => {
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        let envelope: UserEnvelope = response.json().await?;
        Ok(envelope.user.map(UserInfo::from))
    }

    pub async fn profile(&self, cookies: &mut BackendCookies) -> Result<Profile, BackendError> {
        tracing::debug!("GET /api/profile");
        let request = self.http.get(self.config.endpoint("/api/profile"));
        let envelope: ProfileEnvelope = self
            .send(request, cookies, "Failed to load profile")
            .await?
            .json()
            .await?;
        Ok(envelope.user)
    }

    /// Update first/last name. The response carries no resume URL.
    pub async fn update_profile(
        &self,
        cookies: &mut BackendCookies,
        first_name: &str,
        last_name: &str,
    ) -> Result<Profile, BackendError> {
        tracing::debug!("PUT /api/profile (names)");
        let request = self
            .http
            .put(self.config.endpoint("/api/profile"))
            .json(&json!({ "first_name": first_name, "last_name": last_name }));
        let envelope: ProfileEnvelope = self
            .send(request, cookies, "Failed to update profile")
            .await?
            .json()
            .await?;
        Ok(envelope.user)
    }

    pub async fn change_password(
        &self,
        cookies: &mut BackendCookies,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), BackendError> {
        tracing::debug!("PUT /api/profile (password)");
        let request = self.http.put(self.config.endpoint("/api/profile")).json(&json!({
            "current_password": current_password,
            "new_password": new_password,
        }));
        self.send(request, cookies, "Failed to update password").await?;
        Ok(())
    }

    /// Upload a resume as the multipart field `resume`. Returns the stored resume URL.
    pub async fn upload_resume(
        &self,
        cookies: &mut BackendCookies,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Option<String>, BackendError> {
        tracing::debug!(file_name, size = bytes.len(), "POST /api/upload-resume");
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(resume_mime_type(file_name))
            .map_err(|e| BackendError::Config(e.to_string()))?;
        let request = self
            .http
            .post(self.config.endpoint("/api/upload-resume"))
            .multipart(Form::new().part("resume", part));
        let envelope: UploadEnvelope = self
            .send(request, cookies, "Failed to upload resume")
            .await?
            .json()
            .await?;
        Ok(envelope.user.resume_url)
    }

    pub async fn delete_resume(&self, cookies: &mut BackendCookies) -> Result<(), BackendError> {
        tracing::debug!("DELETE /api/upload-resume");
        let request = self.http.delete(self.config.endpoint("/api/upload-resume"));
        self.send(request, cookies, "Failed to delete resume").await?;
        Ok(())
    }

    pub async fn search_jobs(
        &self,
        cookies: &mut BackendCookies,
        query: &SearchQuery,
    ) -> Result<Vec<Job>, BackendError> {
        tracing::debug!(keywords = %query.keywords, location = %query.location, "GET /api/jobs");
        let request = self.http.get(self.config.endpoint("/api/jobs")).query(&[
            ("keywords", query.keywords.as_str()),
            ("location", query.location.as_str()),
        ]);
        let body: serde_json::Value = self
            .send(request, cookies, "Failed to fetch jobs")
            .await?
            .json()
            .await?;

        if !body.is_array() {
            return Err(BackendError::InvalidResponse(
                "Invalid jobs data received".to_string(),
            ));
        }
        serde_json::from_value(body)
            .map_err(|_| BackendError::InvalidResponse("Invalid jobs data received".to_string()))
    }

    pub async fn analyze_resume(
        &self,
        cookies: &mut BackendCookies,
        job_description: &str,
    ) -> Result<MatchScore, BackendError> {
        tracing::debug!("POST /api/analyze-resume");
        let request = self
            .http
            .post(self.config.endpoint("/api/analyze-resume"))
            .json(&json!({ "job_description": job_description }));
        let envelope: ScoreEnvelope = self
            .send(request, cookies, "Failed to analyze resume")
            .await?
            .json()
            .await?;

        envelope
            .score
            .map(MatchScore::from_raw)
            .ok_or_else(|| BackendError::InvalidResponse("Failed to analyze resume".to_string()))
    }
}

fn resume_mime_type(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use axum::extract::Query;
    use axum::http::{header, HeaderMap, StatusCode};
    use axum::response::{AppendHeaders, IntoResponse, Response};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::Value;
    use std::collections::HashMap;
    use std::time::Duration;

    async fn stub_login(Json(body): Json<Value>) -> Response {
        if body["password"] == "correct-horse" {
            (
                AppendHeaders([
                    (header::SET_COOKIE, "session=s3cr3t; HttpOnly; Path=/"),
                    (header::SET_COOKIE, "user_email=jane@example.com; Path=/"),
                ]),
                Json(serde_json::json!({
                    "message": "Login successful",
                    "user": { "id": 1, "email": body["email"] }
                })),
            )
                .into_response()
        } else {
            (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "error": "Invalid credentials" })),
            )
                .into_response()
        }
    }

    async fn stub_me(headers: HeaderMap) -> Response {
        let cookie = headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if cookie.contains("user_email=jane@example.com") && cookie.contains("session=s3cr3t") {
            Json(serde_json::json!({ "user": { "id": 1, "email": "jane@example.com" } }))
                .into_response()
        } else {
            (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "user": null })),
            )
                .into_response()
        }
    }

    async fn stub_logout() -> Response {
        (
            AppendHeaders([(
                header::SET_COOKIE,
                "user_email=; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Max-Age=0; Path=/",
            )]),
            Json(serde_json::json!({ "message": "Logged out successfully" })),
        )
            .into_response()
    }

    async fn stub_jobs(Query(params): Query<HashMap<String, String>>) -> Response {
        match params.get("keywords").map(String::as_str) {
            Some("broken") => (StatusCode::BAD_GATEWAY, "upstream exploded").into_response(),
            Some("weird") => Json(serde_json::json!({ "results": [] })).into_response(),
            _ => Json(serde_json::json!([
                {
                    "id": 101,
                    "title": "Backend Developer",
                    "company": "Acme",
                    "location": params.get("location").cloned().unwrap_or_default(),
                    "description": "<p>Rust and Postgres</p>",
                    "salary": "USD 120,000 - 150,000",
                    "contract_type": "permanent",
                    "created": "2024-03-14T09:30:00Z",
                    "redirect_url": "https://jobs.example.com/101"
                },
                {
                    "id": "102",
                    "title": "Frontend Developer",
                    "company": null,
                    "location": "Remote",
                    "description": "<p>WASM</p>",
                    "salary": null,
                    "contract_type": null,
                    "created": "2024-03-10T12:00:00Z",
                    "redirect_url": "https://jobs.example.com/102"
                }
            ]))
            .into_response(),
        }
    }

    async fn stub_analyze(Json(body): Json<Value>) -> Json<Value> {
        if body["job_description"].as_str().unwrap_or_default().is_empty() {
            Json(serde_json::json!({}))
        } else {
            Json(serde_json::json!({ "score": 142.0 }))
        }
    }

    async fn stub_upload(headers: HeaderMap, body: Bytes) -> Response {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        let has_field = String::from_utf8_lossy(&body).contains("name=\"resume\"");
        if content_type.starts_with("multipart/form-data") && has_field {
            Json(serde_json::json!({
                "message": "Resume uploaded successfully",
                "user": { "id": 1, "email": "jane@example.com", "resume_url": "uploads/resumes/cv.pdf" }
            }))
            .into_response()
        } else {
            (StatusCode::BAD_REQUEST, Json(serde_json::json!({ "error": "No file part" })))
                .into_response()
        }
    }

    async fn stub_profile_put(Json(body): Json<Value>) -> Response {
        if body.get("current_password").is_some() {
            if body["current_password"] == "correct-horse" {
                Json(serde_json::json!({ "message": "Password updated" })).into_response()
            } else {
                (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({ "error": "Current password is incorrect" })),
                )
                    .into_response()
            }
        } else {
            Json(serde_json::json!({
                "message": "Profile updated successfully",
                "user": {
                    "id": 1,
                    "email": "jane@example.com",
                    "first_name": body["first_name"],
                    "last_name": body["last_name"]
                }
            }))
            .into_response()
        }
    }

    async fn spawn_stub() -> BackendClient {
        let router = Router::new()
            .route("/api/login", post(stub_login))
            .route("/api/me", get(stub_me))
            .route("/api/logout", post(stub_logout))
            .route("/api/jobs", get(stub_jobs))
            .route("/api/analyze-resume", post(stub_analyze))
            .route("/api/upload-resume", post(stub_upload))
            .route("/api/profile", axum::routing::put(stub_profile_put));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let config = BackendConfig::new(format!("http://{addr}"), Duration::from_secs(5)).unwrap();
        BackendClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn login_stores_cookies_and_relays_them() {
        let client = spawn_stub().await;
        let mut cookies = BackendCookies::new();

        let user = client
            .login(&mut cookies, "jane@example.com", "correct-horse")
            .await
            .unwrap();
        assert_eq!(user.email, "jane@example.com");
        assert_eq!(user.id.as_deref(), Some("1"));
        assert_eq!(cookies.get("session"), Some("s3cr3t"));

        let me = client.me(&mut cookies).await.unwrap();
        assert_eq!(me.map(|u| u.email).as_deref(), Some("jane@example.com"));
    }

    #[tokio::test]
    async fn failed_login_surfaces_server_message_verbatim() {
        let client = spawn_stub().await;
        let mut cookies = BackendCookies::new();

        let err = client
            .login(&mut cookies, "jane@example.com", "wrong-password")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(cookies.is_empty());
    }

    #[tokio::test]
    async fn anonymous_me_is_none() {
        let client = spawn_stub().await;
        let mut cookies = BackendCookies::new();
        assert_eq!(client.me(&mut cookies).await.unwrap(), None);
    }

    #[tokio::test]
    async fn logout_drops_the_identity_cookie() {
        let client = spawn_stub().await;
        let mut cookies = BackendCookies::new();
        client
            .login(&mut cookies, "jane@example.com", "correct-horse")
            .await
            .unwrap();

        client.logout(&mut cookies).await.unwrap();
        assert_eq!(cookies.get("user_email"), None);
        assert_eq!(client.me(&mut cookies).await.unwrap(), None);
    }

    #[tokio::test]
    async fn job_search_parses_mixed_ids() {
        let client = spawn_stub().await;
        let mut cookies = BackendCookies::new();

        let jobs = client
            .search_jobs(&mut cookies, &SearchQuery::from_form("rust", "Berlin"))
            .await
            .unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].id, "101");
        assert_eq!(jobs[0].location, "Berlin");
        assert_eq!(jobs[1].id, "102");
        assert_eq!(jobs[1].company_label(), "Unknown company");
    }

    #[tokio::test]
    async fn job_search_errors() {
        let client = spawn_stub().await;
        let mut cookies = BackendCookies::new();

        let err = client
            .search_jobs(&mut cookies, &SearchQuery::from_form("broken", ""))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "upstream exploded");

        let err = client
            .search_jobs(&mut cookies, &SearchQuery::from_form("weird", ""))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid jobs data received");
    }

    #[tokio::test]
    async fn analyze_resume_clamps_score() {
        let client = spawn_stub().await;
        let mut cookies = BackendCookies::new();

        let score = client
            .analyze_resume(&mut cookies, "<p>Rust</p>")
            .await
            .unwrap();
        assert_eq!(score.percent(), 100);

        let err = client.analyze_resume(&mut cookies, "").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to analyze resume");
    }

    #[tokio::test]
    async fn resume_upload_is_multipart() {
        let client = spawn_stub().await;
        let mut cookies = BackendCookies::new();

        let url = client
            .upload_resume(&mut cookies, "cv.pdf", b"%PDF-1.4".to_vec())
            .await
            .unwrap();
        assert_eq!(url.as_deref(), Some("uploads/resumes/cv.pdf"));
    }

    #[tokio::test]
    async fn profile_updates() {
        let client = spawn_stub().await;
        let mut cookies = BackendCookies::new();

        let profile = client
            .update_profile(&mut cookies, "Jane", "Doe")
            .await
            .unwrap();
        assert_eq!(profile.first_name.as_deref(), Some("Jane"));
        assert_eq!(profile.resume_url, None);

        let err = client
            .change_password(&mut cookies, "nope", "brand-new-password")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Current password is incorrect");

        client
            .change_password(&mut cookies, "correct-horse", "brand-new-password")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = BackendConfig::new(format!("http://{addr}"), Duration::from_secs(2)).unwrap();
        let client = BackendClient::new(config).unwrap();
        let mut cookies = BackendCookies::new();

        let err = client.signup(&mut cookies, "a@b.co", "password1").await.unwrap_err();
        assert!(matches!(err, BackendError::Network(_)));
        assert_eq!(err.to_string(), "Network error occurred");
    }

    #[test]
    fn mime_types_follow_extension() {
        assert_eq!(resume_mime_type("cv.PDF"), "application/pdf");
        assert_eq!(resume_mime_type("cv.doc"), "application/msword");
        assert_eq!(resume_mime_type("cv"), "application/octet-stream");
    }
}
