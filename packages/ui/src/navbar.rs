use dioxus::prelude::*;

use crate::auth::{use_auth, LogoutButton};
use crate::Icon;
use crate::icons::FaBriefcase;

/// Persistent header. Shows nothing on the right until the identity lookup resolves.
#[component]
pub fn Navbar() -> Element {
    let auth = use_auth();
    let state = auth();

    rsx! {
        nav {
            class: "navbar",
            div {
                class: "navbar-inner",
                Link {
                    class: "navbar-brand",
                    to: "/",
                    Icon { icon: FaBriefcase, width: 20, height: 20 }
                    span { "DemandWork.AI" }
                }

                if !state.loading {
                    div {
                        class: "navbar-links",
                        if let Some(user) = state.user.as_ref() {
                            span { class: "navbar-welcome", "Welcome, {user.email}" }
                            Link { class: "navbar-link", to: "/dashboard", "Dashboard" }
                            Link { class: "navbar-link", to: "/account", "Account" }
                            LogoutButton { class: "btn btn--danger" }
                        } else {
                            Link { class: "navbar-link", to: "/about", "About" }
                            Link { class: "navbar-link", to: "/login", "Login" }
                            Link { class: "btn btn--primary", to: "/signup", "Sign Up" }
                        }
                    }
                }
            }
        }
    }
}
