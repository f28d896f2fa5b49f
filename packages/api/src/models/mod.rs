//! Data models shared by the server functions and the UI.

mod job;
mod profile;
mod user;

pub use job::{Job, MatchScore, SearchQuery, DEFAULT_KEYWORDS, DEFAULT_LOCATION};
pub use profile::Profile;
pub use user::{UserInfo, UserPayload};
