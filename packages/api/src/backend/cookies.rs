//! # Cookie relay between a visitor's session and the external API
//!
//! The external API authenticates with its own cookies (a signed `session` cookie and a
//! `user_email` identity cookie). The browser never talks to that API directly, so the
//! server keeps the cookies it was issued in the visitor's tower-session and replays them
//! on every outbound call.
//!
//! [`BackendCookies::absorb`] folds `Set-Cookie` headers from a response into the set;
//! removal (empty value, non-positive `Max-Age`, or an `Expires` in the past) deletes the
//! entry. [`BackendCookies::header_value`] renders the `Cookie` request header.

use reqwest::header::{HeaderMap, SET_COOKIE};
use serde::{Deserialize, Serialize};
use tower_sessions::cookie::time::{Duration, OffsetDateTime};
use tower_sessions::cookie::Cookie;

/// Cookie the external API uses to name the logged-in user.
pub const IDENTITY_COOKIE: &str = "user_email";

/// Name/value pairs issued by the external API, in the order first seen.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackendCookies {
    entries: Vec<(String, String)>,
}

impl BackendCookies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set(&mut self, name: &str, value: &str) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((name.to_string(), value.to_string())),
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.entries.retain(|(n, _)| n != name);
    }

    /// Apply every `Set-Cookie` header in `headers`.
    pub fn absorb(&mut self, headers: &HeaderMap) {
        for value in headers.get_all(SET_COOKIE) {
            if let Ok(line) = value.to_str() {
                self.apply_set_cookie(line);
            }
        }
    }

    /// Apply a single `Set-Cookie` line. Unparseable lines are ignored.
    pub fn apply_set_cookie(&mut self, line: &str) {
        let Ok(cookie) = Cookie::parse(line) else {
            return;
        };
        let expired = cookie.max_age().is_some_and(|age| age <= Duration::ZERO)
            || cookie
                .expires_datetime()
                .is_some_and(|at| at <= OffsetDateTime::now_utc());

        let value = cookie.value_trimmed();
        if value.is_empty() || expired {
            self.remove(cookie.name());
        } else {
            self.set(cookie.name(), value);
        }
    }

    /// Email carried by the identity cookie, if the API issued one.
    pub fn identity_email(&self) -> Option<&str> {
        self.get(IDENTITY_COOKIE).filter(|email| !email.is_empty())
    }

    /// The `Cookie` request header, or `None` when nothing is held.
    pub fn header_value(&self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }
        Some(
            self.entries
                .iter()
                .map(|(n, v)| format!("{n}={v}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn absorbs_and_replays_cookies() {
        let mut headers = HeaderMap::new();
        headers.append(
            SET_COOKIE,
            HeaderValue::from_static("session=abc123; HttpOnly; Path=/"),
        );
        headers.append(
            SET_COOKIE,
            HeaderValue::from_static("user_email=jane@example.com; Path=/; SameSite=Lax"),
        );

        let mut cookies = BackendCookies::new();
        cookies.absorb(&headers);

        assert_eq!(cookies.get("user_email"), Some("jane@example.com"));
        assert_eq!(
            cookies.header_value().as_deref(),
            Some("session=abc123; user_email=jane@example.com")
        );
    }

    #[test]
    fn later_values_replace_earlier_ones_in_place() {
        let mut cookies = BackendCookies::new();
        cookies.apply_set_cookie("a=1");
        cookies.apply_set_cookie("b=2");
        cookies.apply_set_cookie("a=3");
        assert_eq!(cookies.header_value().as_deref(), Some("a=3; b=2"));
    }

    #[test]
    fn expired_cookies_are_removed() {
        let mut cookies = BackendCookies::new();
        cookies.apply_set_cookie("user_email=jane@example.com; Path=/");
        cookies.apply_set_cookie("session=abc; Path=/");

        cookies.apply_set_cookie(
            "user_email=; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Max-Age=0; Path=/",
        );
        assert_eq!(cookies.get("user_email"), None);

        cookies.apply_set_cookie("session=abc; Max-Age=0");
        assert!(cookies.is_empty());
        assert_eq!(cookies.header_value(), None);
    }

    #[test]
    fn any_past_expiry_removes_the_cookie() {
        let mut cookies = BackendCookies::new();
        cookies.apply_set_cookie("user_email=jane@example.com; Path=/");
        assert_eq!(cookies.identity_email(), Some("jane@example.com"));

        cookies.apply_set_cookie("user_email=deleted; Expires=Wed, 21 Oct 2015 07:28:00 GMT; Path=/");
        assert_eq!(cookies.get("user_email"), None);
        assert_eq!(cookies.identity_email(), None);
    }

    #[test]
    fn future_expiry_and_positive_max_age_keep_the_cookie() {
        let mut cookies = BackendCookies::new();
        cookies.apply_set_cookie("user_email=jane@example.com; Expires=Fri, 01 Jan 2100 00:00:00 GMT");
        cookies.apply_set_cookie("session=abc; Max-Age=3600; HttpOnly");
        assert_eq!(cookies.get("user_email"), Some("jane@example.com"));
        assert_eq!(cookies.get("session"), Some("abc"));
    }

    #[test]
    fn quoted_values_are_unwrapped() {
        let mut cookies = BackendCookies::new();
        cookies.apply_set_cookie("session=\"abc123\"; Path=/");
        assert_eq!(cookies.get("session"), Some("abc123"));
    }

    #[test]
    fn malformed_lines_are_ignored() {
        let mut cookies = BackendCookies::new();
        cookies.apply_set_cookie("garbage");
        cookies.apply_set_cookie("=value");
        assert!(cookies.is_empty());
    }
}
