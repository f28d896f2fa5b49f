//! Trivial field checks run in the browser before submitting and again by the server
//! functions before anything is forwarded to the external API.

pub const MIN_PASSWORD_LEN: usize = 8;

/// File extensions the external API accepts for resumes.
pub const RESUME_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// Largest resume accepted, in bytes.
pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

/// Request body limit for the server functions. Resume bytes travel as a JSON array of
/// numbers, at most four characters per byte.
pub const MAX_REQUEST_BODY_BYTES: usize = MAX_RESUME_BYTES * 4 + 64 * 1024;

pub fn email(email: &str) -> Result<(), &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Email is required");
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err("Please enter a valid email"),
    }
}

pub fn password(password: &str) -> Result<(), &'static str> {
    if password.is_empty() {
        return Err("Password is required");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

/// Login and signup share the same checks.
pub fn credentials(email_value: &str, password_value: &str) -> Result<(), &'static str> {
    email(email_value)?;
    password(password_value)
}

pub fn password_change(current: &str, new: &str) -> Result<(), &'static str> {
    if current.is_empty() {
        return Err("Current password is required");
    }
    password(new)
}

pub fn resume_file(file_name: &str, size: usize) -> Result<(), &'static str> {
    if file_name.trim().is_empty() {
        return Err("No selected file");
    }
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if !RESUME_EXTENSIONS.contains(&ext.as_str()) {
        return Err("Invalid file type");
    }
    if size == 0 {
        return Err("The selected file is empty");
    }
    if size > MAX_RESUME_BYTES {
        return Err("The selected file is too large (max 5 MB)");
    }
    Ok(())
}
