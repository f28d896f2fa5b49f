use serde::{Deserialize, Serialize};

/// Profile fields editable from the account page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub resume_url: Option<String>,
}

impl Profile {
    /// File name of the current resume, without the upload prefix the API adds.
    pub fn resume_file_name(&self) -> Option<&str> {
        let url = self.resume_url.as_deref()?;
        let name = url.rsplit(['/', '\\']).next().unwrap_or(url);
        // Stored names look like `<uuid>_<original name>`.
        Some(match name.split_once('_') {
            Some((prefix, rest)) if prefix.len() == 36 && !rest.is_empty() => rest,
            _ => name,
        })
    }
}
