//! Job search dashboard: search form, result list and detail pane.

use api::models::{DEFAULT_KEYWORDS, DEFAULT_LOCATION};
use api::SearchQuery;
use dioxus::prelude::*;
use ui::components::{Alert, Button, ButtonVariant, Input};
use ui::icons::FaMagnifyingGlass;
use ui::{error_message, request_score, use_auth, Icon, JobBoard, JobCard, JobDetail};

use crate::Route;

#[component]
pub fn Dashboard() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    let mut board = use_signal(JobBoard::default);
    let mut query = use_signal(SearchQuery::default);
    let mut keywords = use_signal(|| DEFAULT_KEYWORDS.to_string());
    let mut location = use_signal(|| DEFAULT_LOCATION.to_string());
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| Option::<String>::None);

    use_effect(move || {
        if auth().is_anonymous() {
            nav.replace(Route::Login {});
        }
    });

    // Runs on first load and again whenever a search is submitted.
    let _search = use_resource(move || async move {
        let q = query();
        if !auth().is_authenticated() {
            return;
        }

        loading.set(true);
        error.set(None);
        match api::search_jobs(q.keywords, q.location).await {
            Ok(jobs) => {
                let first = board.write().load(jobs);
                if let Some(request) = first {
                    request_score(board, error, request);
                }
            }
            Err(e) => {
                tracing::error!("Fetch jobs error: {}", e);
                error.set(Some(error_message(&e)));
                board.write().clear();
            }
        }
        loading.set(false);
    });

    let handle_search = move |evt: FormEvent| {
        evt.prevent_default();
        query.set(SearchQuery::from_form(&keywords(), &location()));
    };

    let select_job = move |job_id: String| {
        let request = board.write().select(&job_id);
        if let Some(request) = request {
            request_score(board, error, request);
        }
    };

    let greeting = auth()
        .user
        .as_ref()
        .map(|u| u.handle().to_string())
        .unwrap_or_else(|| "there".to_string());
    let snapshot = board.read();

    if loading() && snapshot.is_empty() {
        return rsx! {
            div {
                class: "skeleton",
                div { class: "skeleton-bar skeleton-bar--wide" }
                div { class: "skeleton-bar" }
            }
        };
    }

    rsx! {
        div {
            class: "dashboard",

            if let Some(err) = error() {
                Alert {
                    message: err,
                    on_dismiss: move |_| error.set(None),
                }
            }

            form {
                class: "panel search-form",
                onsubmit: handle_search,
                h1 { class: "page-title", "Find Your Next Opportunity, {greeting}!" }
                p { class: "muted", "Discover jobs that match your skills and preferences" }

                div {
                    class: "search-row",
                    Input {
                        name: "keywords",
                        placeholder: "Job title or keywords",
                        value: keywords(),
                        oninput: move |v: String| keywords.set(v),
                    }
                    Input {
                        name: "location",
                        placeholder: "Location",
                        value: location(),
                        oninput: move |v: String| location.set(v),
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        r#type: "submit",
                        disabled: loading(),
                        Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                        if loading() { "Searching..." } else { "Search" }
                    }
                }
            }

            div {
                class: "dashboard-grid",

                div {
                    class: "job-list",
                    if snapshot.is_empty() && !loading() {
                        div {
                            class: "job-card job-card--empty",
                            p { class: "muted", "No jobs found. Try different search terms." }
                        }
                    } else {
                        for job in snapshot.jobs().iter().cloned() {
                            JobCard {
                                key: "{job.id}",
                                selected: snapshot.is_selected(&job.id),
                                job: job.clone(),
                                on_select: select_job,
                            }
                        }
                    }
                }

                if let Some(job) = snapshot.selected().cloned() {
                    div {
                        class: "job-detail-column",
                        JobDetail { job, score: snapshot.score() }
                    }
                } else {
                    div {
                        class: "job-detail-column job-detail-column--empty",
                        div {
                            class: "panel",
                            h3 { class: "muted", "Select a job to view details" }
                        }
                    }
                }
            }
        }
    }
}
