//! Session bookkeeping for the auth bridge.

#[cfg(feature = "server")]
mod session;

#[cfg(feature = "server")]
pub(crate) use session::session_error;
#[cfg(feature = "server")]
pub use session::{
    forget_identity, load_backend_cookies, require_login, resolve_identity, session_email,
    sign_out, store_backend_cookies, SESSION_BACKEND_COOKIES_KEY, SESSION_USER_EMAIL_KEY,
};
