//! Login page view with email/password form.

use dioxus::prelude::*;
use ui::components::{Alert, Button, ButtonVariant, Input, Label};
use ui::{error_message, use_auth, AuthState};

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let mut auth = use_auth();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // If already logged in, go to the dashboard
    use_effect(move || {
        if auth().is_authenticated() {
            nav.replace(Route::Dashboard {});
        }
    });

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);

            let e = email().trim().to_string();
            let p = password();
            if let Err(msg) = api::validate::credentials(&e, &p) {
                error.set(Some(msg.to_string()));
                return;
            }

            loading.set(true);
            match api::login(e, p).await {
                Ok(user) => {
                    auth.set(AuthState::signed_in(user));
                    nav.push(Route::Dashboard {});
                }
                Err(e) => {
                    tracing::error!("Login failed: {}", e);
                    error.set(Some(error_message(&e)));
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        div {
            class: "auth-page",
            form {
                class: "panel auth-card",
                onsubmit: handle_login,

                h1 { class: "auth-title", "Welcome Back" }

                if let Some(err) = error() {
                    Alert { message: err }
                }

                div {
                    class: "field",
                    Label { r#for: "email", "Email" }
                    Input {
                        id: "email",
                        r#type: "email",
                        placeholder: "your@email.com",
                        autocomplete: "email",
                        value: email(),
                        oninput: move |v: String| email.set(v),
                    }
                }

                div {
                    class: "field",
                    Label { r#for: "password", "Password" }
                    Input {
                        id: "password",
                        r#type: "password",
                        placeholder: "••••••••",
                        autocomplete: "current-password",
                        value: password(),
                        oninput: move |v: String| password.set(v),
                    }
                }

                Button {
                    variant: ButtonVariant::Secondary,
                    class: "btn--block",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Logging in..." } else { "Log In" }
                }

                p {
                    class: "auth-footer",
                    "Don't have an account? "
                    Link { to: Route::Signup {}, "Sign up" }
                }
            }
        }
    }
}
