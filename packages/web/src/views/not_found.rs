use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");

    rsx! {
        div {
            class: "panel narrow",
            h1 { class: "page-title", "Page not found" }
            p { class: "muted", "Nothing lives at /{path}." }
            Link { class: "btn btn--secondary", to: Route::Home {}, "← Back to Home" }
        }
    }
}
