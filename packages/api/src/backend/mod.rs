//! # External API access (server only)
//!
//! The front end owns no data. Every account, session, resume and job listing lives
//! behind the external Job/Account API, and this module is the only place that talks
//! to it.
//!
//! - [`BackendConfig`]: base URL and timeout from `DEMANDWORK_API_URL` /
//!   `DEMANDWORK_API_TIMEOUT_SECS`.
//! - [`BackendClient`]: one typed method per external endpoint; a process-wide
//!   instance is created lazily by [`get_client`].
//! - [`BackendCookies`]: the cookies the external API issued to one visitor, relayed
//!   on each call.
//! - [`BackendError`]: non-2xx responses, transport failures and unparseable bodies.

mod client;
mod config;
mod cookies;
mod error;

pub use client::{get_client, BackendClient};
pub use config::BackendConfig;
pub use cookies::{BackendCookies, IDENTITY_COOKIE};
pub use error::{extract_error_message, BackendError};
