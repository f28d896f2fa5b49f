use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn About() -> Element {
    rsx! {
        div {
            class: "panel content",
            h1 {
                class: "page-title",
                "About "
                span { class: "brand-gradient", "DemandWork.ai" }
            }

            p {
                "DemandWork.ai is a job assistance platform that uses AI to streamline your career growth and job search."
            }

            h2 { "Our Mission" }
            p { "We help job seekers and employers connect by using artificial intelligence to:" }
            ul {
                li { "Match candidates with ideal opportunities" }
                li { "Automate resume optimization" }
                li { "Provide real-time interview coaching" }
                li { "Analyze market demand for skills" }
            }

            h2 { "The Technology" }
            div {
                class: "feature-grid",
                div {
                    class: "feature-card",
                    h3 { "AI-Powered Matching" }
                    p { "Language models that understand your skills and preferences" }
                }
                div {
                    class: "feature-card",
                    h3 { "Real-Time Search" }
                    p { "Fresh listings with a resume match score for every posting" }
                }
            }

            div {
                class: "content-footer",
                Link { class: "btn btn--secondary", to: Route::Home {}, "← Back to Home" }
            }
        }
    }
}
