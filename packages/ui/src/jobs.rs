//! Job list entries, the detail pane and the match score bar.

use api::{Job, MatchScore};
use dioxus::prelude::*;

use crate::Icon;
use crate::icons::{FaArrowUpRightFromSquare, FaBuilding, FaLocationDot};

/// One entry in the result list.
#[component]
pub fn JobCard(job: Job, selected: bool, on_select: EventHandler<String>) -> Element {
    let id = job.id.clone();
    let class = if selected {
        "job-card job-card--selected"
    } else {
        "job-card"
    };

    rsx! {
        div {
            class: "{class}",
            onclick: move |_| on_select.call(id.clone()),
            h3 { class: "job-card-title", "{job.title}" }
            p {
                class: "job-card-meta",
                "{job.company_label()} • {job.location}"
            }
            if let Some(salary) = job.salary.as_ref() {
                p { class: "job-card-salary", "{salary}" }
            }
            p { class: "job-card-posted", "Posted {job.posted_on()}" }
        }
    }
}

/// Full posting with apply link and match score.
#[component]
pub fn JobDetail(job: Job, score: Option<MatchScore>) -> Element {
    rsx! {
        div {
            class: "panel job-detail",
            div {
                class: "job-detail-header",
                div {
                    h2 { class: "job-detail-title", "{job.title}" }
                    p {
                        class: "job-detail-meta",
                        Icon { icon: FaBuilding, width: 14, height: 14 }
                        " {job.company_label()} "
                        Icon { icon: FaLocationDot, width: 14, height: 14 }
                        " {job.location}"
                    }
                    if let Some(salary) = job.salary.as_ref() {
                        p { class: "job-detail-salary", "{salary}" }
                    }
                }
                div {
                    class: "job-detail-actions",
                    if let Some(contract) = job.contract_type.as_ref() {
                        span { class: "badge", "{contract}" }
                    }
                    if !job.redirect_url.is_empty() {
                        a {
                            class: "btn btn--primary",
                            href: "{job.redirect_url}",
                            target: "_blank",
                            rel: "noopener noreferrer",
                            "Apply Now "
                            Icon { icon: FaArrowUpRightFromSquare, width: 12, height: 12 }
                        }
                    }
                }
            }

            section {
                class: "job-detail-section",
                h3 { "Job Description" }
                div {
                    class: "job-description",
                    dangerous_inner_html: "{job.description}",
                }
            }

            section {
                class: "job-detail-section job-detail-section--score",
                h3 { "Resume Match Score" }
                MatchScoreBar { score }
            }
        }
    }
}

#[component]
pub fn MatchScoreBar(score: Option<MatchScore>) -> Element {
    match score {
        Some(score) => {
            let percent = score.percent();
            rsx! {
                div {
                    class: "score-track",
                    div { class: "score-fill", style: "width: {percent}%;" }
                }
                p {
                    class: "score-caption",
                    "Your resume matches {percent}% of the job requirements"
                }
            }
        }
        None => rsx! {
            p { class: "score-caption", "Analyzing resume match..." }
        },
    }
}
