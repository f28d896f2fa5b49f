//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const UI_CSS: Asset = asset!("/assets/ui.css");

mod navbar;
pub use navbar::Navbar;

mod auth;
pub use auth::{reload_to, use_auth, AuthProvider, AuthState, LogoutButton};

mod errors;
pub use errors::error_message;

pub mod job_board;
pub use job_board::{request_score, JobBoard, ScoreRequest};

mod jobs;
pub use jobs::{JobCard, JobDetail, MatchScoreBar};
