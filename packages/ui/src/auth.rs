//! Authentication context and hooks for the UI.

use api::UserInfo;
use dioxus::prelude::*;

use crate::errors::error_message;
use crate::Icon;
use crate::icons::FaRightFromBracket;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<UserInfo>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl AuthState {
    pub fn signed_in(user: UserInfo) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            user: None,
            loading: false,
        }
    }

    /// Resolved and logged in.
    pub fn is_authenticated(&self) -> bool {
        !self.loading && self.user.is_some()
    }

    /// Resolved and not logged in.
    pub fn is_anonymous(&self) -> bool {
        !self.loading && self.user.is_none()
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that resolves the visitor's identity once per page load.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);

    let _ = use_resource(move || async move {
        match api::get_current_user().await {
            Ok(Some(user)) => auth_state.set(AuthState::signed_in(user)),
            Ok(None) => auth_state.set(AuthState::anonymous()),
            Err(e) => {
                tracing::error!("Authentication check failed: {}", e);
                auth_state.set(AuthState::anonymous());
            }
        }
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Full page load of `path`, dropping all client-side state.
pub fn reload_to(path: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!("Full reload to {} requested outside the browser", path);
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut auth_state = use_auth();
    let mut busy = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let onclick = move |_| async move {
        busy.set(true);
        error.set(None);
        match api::logout().await {
            Ok(()) => {
                auth_state.set(AuthState::anonymous());
                reload_to("/");
            }
            Err(e) => {
                tracing::error!("Logout failed: {}", e);
                error.set(Some(error_message(&e)));
                busy.set(false);
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            disabled: busy(),
            onclick: onclick,
            Icon { icon: FaRightFromBracket, width: 14, height: 14 }
            span { "{label}" }
        }
        if let Some(message) = error() {
            span { class: "logout-error", role: "alert", "{message}" }
        }
    }
}
