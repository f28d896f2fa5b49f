use dioxus::prelude::*;
use ui::use_auth;

use crate::Route;

#[component]
pub fn Home() -> Element {
    let auth = use_auth();
    let state = auth();

    rsx! {
        section {
            class: "hero",
            h1 { class: "hero-title", "Find work that fits your resume" }
            p {
                class: "hero-subtitle",
                "Search live job postings and see how well your resume matches each one."
            }

            if !state.loading {
                div {
                    class: "hero-actions",
                    if state.user.is_some() {
                        Link { class: "btn btn--primary", to: Route::Dashboard {}, "Go to Dashboard" }
                    } else {
                        Link { class: "btn btn--primary", to: Route::Signup {}, "Get Started" }
                        Link { class: "btn btn--ghost", to: Route::Login {}, "I already have an account" }
                    }
                    Link { class: "btn btn--ghost", to: Route::About {}, "Learn more" }
                }
            }
        }
    }
}
