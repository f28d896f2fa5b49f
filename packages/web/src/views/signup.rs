//! Signup page view with email/password form.

use dioxus::prelude::*;
use ui::components::{Alert, Button, ButtonVariant, Input, Label};
use ui::{error_message, use_auth};

use crate::Route;

/// Signup page component. A created account is sent on to the login page.
#[component]
pub fn Signup() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    use_effect(move || {
        if auth().is_authenticated() {
            nav.replace(Route::Dashboard {});
        }
    });

    let handle_signup = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);

            let e = email().trim().to_string();
            let p = password();
            if let Err(msg) = api::validate::credentials(&e, &p) {
                error.set(Some(msg.to_string()));
                return;
            }
            if p != confirm_password() {
                error.set(Some("Passwords do not match".to_string()));
                return;
            }

            loading.set(true);
            match api::signup(e, p).await {
                Ok(()) => {
                    nav.push(Route::Login {});
                }
                Err(e) => {
                    tracing::error!("Signup failed: {}", e);
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
                onsubmit: handle_signup,

                h1 { class: "auth-title", "Create Account" }

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
                        placeholder: "At least 8 characters",
                        autocomplete: "new-password",
                        value: password(),
                        oninput: move |v: String| password.set(v),
                    }
                }

                div {
                    class: "field",
                    Label { r#for: "confirm-password", "Confirm password" }
                    Input {
                        id: "confirm-password",
                        r#type: "password",
                        autocomplete: "new-password",
                        value: confirm_password(),
                        oninput: move |v: String| confirm_password.set(v),
                    }
                }

                Button {
                    variant: ButtonVariant::Secondary,
                    class: "btn--block",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Creating account..." } else { "Sign Up" }
                }

                p {
                    class: "auth-footer",
                    "Already have an account? "
                    Link { to: Route::Login {}, "Log in" }
                }
            }
        }
    }
}
