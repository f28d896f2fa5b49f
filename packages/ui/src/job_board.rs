//! Dashboard state: the current result set, the selected posting and its match score.
//!
//! Every transition that changes the selected posting hands back a [`ScoreRequest`]; the
//! dashboard issues exactly one `analyze_resume` call per request it receives. Scores
//! are tagged with the job they were requested for, so a late answer for a posting the
//! user has since moved away from is dropped by [`JobBoard::record_score`].

use api::{Job, MatchScore};
use dioxus::prelude::*;

/// A match score that should be fetched for `job_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRequest {
    pub job_id: String,
    pub job_description: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobBoard {
    jobs: Vec<Job>,
    selected: Option<String>,
    score: Option<MatchScore>,
}

impl JobBoard {
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn selected(&self) -> Option<&Job> {
        let id = self.selected.as_deref()?;
        self.jobs.iter().find(|job| job.id == id)
    }

    pub fn is_selected(&self, job_id: &str) -> bool {
        self.selected.as_deref() == Some(job_id)
    }

    pub fn score(&self) -> Option<MatchScore> {
        self.score
    }

    /// Replace the result set and select its first posting.
    pub fn load(&mut self, jobs: Vec<Job>) -> Option<ScoreRequest> {
        self.jobs = jobs;
        self.selected = None;
        self.score = None;
        let first = self.jobs.first()?.id.clone();
        self.select(&first)
    }

    /// Drop everything, e.g. after a failed search.
    pub fn clear(&mut self) {
        self.jobs.clear();
        self.selected = None;
        self.score = None;
    }

    /// Select a posting from the current result set. Unknown ids change nothing.
    pub fn select(&mut self, job_id: &str) -> Option<ScoreRequest> {
        let job = self.jobs.iter().find(|job| job.id == job_id)?;
        let request = ScoreRequest {
            job_id: job.id.clone(),
            job_description: job.description.clone(),
        };
        self.selected = Some(request.job_id.clone());
        self.score = None;
        Some(request)
    }

    /// Store a score if it is for the posting still selected. Returns whether it was kept.
    pub fn record_score(&mut self, job_id: &str, score: MatchScore) -> bool {
        if self.is_selected(job_id) {
            self.score = Some(score);
            true
        } else {
            false
        }
    }
}

/// Spawn the single `analyze_resume` call for `request`.
pub fn request_score(
    mut board: Signal<JobBoard>,
    mut error: Signal<Option<String>>,
    request: ScoreRequest,
) {
    spawn(async move {
        match api::analyze_resume(request.job_description).await {
            Ok(score) => {
                board.write().record_score(&request.job_id, score);
            }
            Err(e) => {
                tracing::error!("Error analyzing resume: {}", e);
                if board.peek().is_selected(&request.job_id) {
                    error.set(Some("Failed to analyze resume match".to_string()));
                }
            }
        }
    });
}
