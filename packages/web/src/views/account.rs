//! Account page: profile fields, resume upload and password change.

use api::Profile;
use dioxus::prelude::*;
use ui::components::{Alert, AlertKind, Button, ButtonVariant, Input, Label};
use ui::icons::{FaFileArrowUp, FaTrash};
use ui::{error_message, use_auth, Icon};

use crate::Route;

type Notice = Option<(AlertKind, String)>;

#[component]
pub fn Account() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    let mut profile = use_signal(Profile::default);
    let mut load_error = use_signal(|| Option::<String>::None);

    use_effect(move || {
        if auth().is_anonymous() {
            nav.replace(Route::Login {});
        }
    });

    let _loader = use_resource(move || async move {
        if !auth().is_authenticated() {
            return;
        }
        match api::get_profile().await {
            Ok(p) => profile.set(p),
            Err(e) => {
                tracing::error!("Failed to load profile: {}", e);
                load_error.set(Some(error_message(&e)));
            }
        }
    });

    let email = auth()
        .user
        .as_ref()
        .map(|u| u.email.clone())
        .unwrap_or_default();

    rsx! {
        div {
            class: "panel account",
            h1 { class: "page-title", "Account Settings" }

            if let Some(err) = load_error() {
                Alert { message: err }
            }

            div {
                class: "account-grid",
                div {
                    class: "account-main",
                    section {
                        class: "account-section",
                        h2 { "Account Information" }
                        div {
                            class: "field",
                            Label { r#for: "account-email", "Email" }
                            Input { id: "account-email", r#type: "email", readonly: true, value: email }
                        }
                    }
                    ProfileForm { profile }
                    PasswordForm {}
                }
                div {
                    class: "account-side",
                    ResumePanel { profile }
                }
            }
        }
    }
}

/// First and last name.
#[component]
fn ProfileForm(profile: Signal<Profile>) -> Element {
    let mut profile = profile;
    let mut first_name = use_signal(String::new);
    let mut last_name = use_signal(String::new);
    let mut notice = use_signal(|| Notice::None);
    let mut saving = use_signal(|| false);

    // Fill the fields once the profile arrives.
    use_effect(move || {
        let p = profile();
        first_name.set(p.first_name.unwrap_or_default());
        last_name.set(p.last_name.unwrap_or_default());
    });

    let handle_save = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            notice.set(None);
            saving.set(true);
            match api::update_profile(first_name(), last_name()).await {
                Ok(updated) => {
                    // The update response carries no resume URL; keep ours.
                    let mut current = profile();
                    current.first_name = updated.first_name;
                    current.last_name = updated.last_name;
                    profile.set(current);
                    notice.set(Some((AlertKind::Success, "Profile updated".to_string())));
                }
                Err(e) => {
                    tracing::error!("Failed to update profile: {}", e);
                    notice.set(Some((AlertKind::Error, error_message(&e))));
                }
            }
            saving.set(false);
        });
    };

    rsx! {
        form {
            class: "account-section",
            onsubmit: handle_save,
            h2 { "Profile" }

            if let Some((kind, message)) = notice() {
                Alert { kind, message }
            }

            div {
                class: "field-row",
                div {
                    class: "field",
                    Label { r#for: "first-name", "First name" }
                    Input {
                        id: "first-name",
                        autocomplete: "given-name",
                        value: first_name(),
                        oninput: move |v: String| first_name.set(v),
                    }
                }
                div {
                    class: "field",
                    Label { r#for: "last-name", "Last name" }
                    Input {
                        id: "last-name",
                        autocomplete: "family-name",
                        value: last_name(),
                        oninput: move |v: String| last_name.set(v),
                    }
                }
            }

            Button {
                variant: ButtonVariant::Primary,
                r#type: "submit",
                disabled: saving(),
                if saving() { "Saving..." } else { "Save Profile" }
            }
        }
    }
}

/// Current + new password. Fields are cleared after a successful change.
#[component]
fn PasswordForm() -> Element {
    let mut current_password = use_signal(String::new);
    let mut new_password = use_signal(String::new);
    let mut notice = use_signal(|| Notice::None);
    let mut saving = use_signal(|| false);

    let handle_change = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            notice.set(None);

            let current = current_password();
            let new = new_password();
            if let Err(msg) = api::validate::password_change(&current, &new) {
                notice.set(Some((AlertKind::Error, msg.to_string())));
                return;
            }

            saving.set(true);
            match api::change_password(current, new).await {
                Ok(()) => {
                    current_password.set(String::new());
                    new_password.set(String::new());
                    notice.set(Some((AlertKind::Success, "Password updated".to_string())));
                }
                Err(e) => {
                    tracing::error!("Failed to update password: {}", e);
                    notice.set(Some((AlertKind::Error, error_message(&e))));
                }
            }
            saving.set(false);
        });
    };

    rsx! {
        form {
            class: "account-section",
            onsubmit: handle_change,
            h2 { "Change Password" }

            if let Some((kind, message)) = notice() {
                Alert { kind, message }
            }

            div {
                class: "field",
                Label { r#for: "current-password", "Current Password" }
                Input {
                    id: "current-password",
                    r#type: "password",
                    placeholder: "Enter current password",
                    autocomplete: "current-password",
                    value: current_password(),
                    oninput: move |v: String| current_password.set(v),
                }
            }
            div {
                class: "field",
                Label { r#for: "new-password", "New Password" }
                Input {
                    id: "new-password",
                    r#type: "password",
                    placeholder: "At least 8 characters",
                    autocomplete: "new-password",
                    value: new_password(),
                    oninput: move |v: String| new_password.set(v),
                }
            }

            Button {
                variant: ButtonVariant::Primary,
                r#type: "submit",
                disabled: saving(),
                if saving() { "Saving..." } else { "Save Changes" }
            }
        }
    }
}

/// Resume upload and removal.
///
/// While an upload is in flight the chosen file name is shown in place of the stored
/// resume; on failure the previous resume is shown again.
#[component]
fn ResumePanel(profile: Signal<Profile>) -> Element {
    let mut profile = profile;
    let mut pending = use_signal(|| Option::<String>::None);
    let mut deleting = use_signal(|| false);
    let mut notice = use_signal(|| Notice::None);

    let handle_file = move |evt: FormEvent| {
        spawn(async move {
            notice.set(None);

            let Some(file) = evt.files().into_iter().next() else {
                notice.set(Some((AlertKind::Error, "No selected file".to_string())));
                return;
            };
            let file_name = file.name();

            let contents = match file.read_bytes().await {
                Ok(bytes) => bytes.to_vec(),
                Err(e) => {
                    tracing::error!("Failed to read {}: {}", file_name, e);
                    notice.set(Some((AlertKind::Error, "Could not read the selected file".to_string())));
                    return;
                }
            };
            if let Err(msg) = api::validate::resume_file(&file_name, contents.len()) {
                notice.set(Some((AlertKind::Error, msg.to_string())));
                return;
            }

            pending.set(Some(file_name.clone()));
            match api::upload_resume(file_name, contents).await {
                Ok(url) => {
                    profile.write().resume_url = url;
                    notice.set(Some((AlertKind::Success, "Resume uploaded successfully".to_string())));
                }
                Err(e) => {
                    tracing::error!("Resume upload failed: {}", e);
                    notice.set(Some((AlertKind::Error, error_message(&e))));
                }
            }
            pending.set(None);
        });
    };

    let handle_delete = move |_: MouseEvent| {
        spawn(async move {
            notice.set(None);
            deleting.set(true);
            match api::delete_resume().await {
                Ok(()) => {
                    profile.write().resume_url = None;
                    notice.set(Some((AlertKind::Success, "Resume removed".to_string())));
                }
                Err(e) => {
                    tracing::error!("Resume removal failed: {}", e);
                    notice.set(Some((AlertKind::Error, error_message(&e))));
                }
            }
            deleting.set(false);
        });
    };

    let current = profile();
    let busy = pending().is_some() || deleting();

    rsx! {
        section {
            class: "account-section resume-panel",
            h2 { "Resume" }

            if let Some((kind, message)) = notice() {
                Alert { kind, message }
            }

            if let Some(name) = pending() {
                p { class: "resume-current resume-current--pending", "Uploading {name}..." }
            } else if let Some(name) = current.resume_file_name() {
                // The stored path lives on the external API, not on this server.
                p {
                    class: "resume-current",
                    "Current resume: "
                    strong { "{name}" }
                }
            } else {
                p { class: "muted", "No resume uploaded yet." }
            }

            label {
                class: if busy { "btn btn--primary btn--block btn--disabled" } else { "btn btn--primary btn--block" },
                r#for: "resume-file",
                Icon { icon: FaFileArrowUp, width: 14, height: 14 }
                if pending().is_some() { "Uploading..." } else { "Upload Resume" }
            }
            input {
                id: "resume-file",
                class: "visually-hidden",
                r#type: "file",
                accept: ".pdf,.doc,.docx",
                disabled: busy,
                onchange: handle_file,
            }
            p { class: "muted small", "PDF, DOC or DOCX" }

            if current.resume_url.is_some() {
                Button {
                    variant: ButtonVariant::Danger,
                    class: "btn--block",
                    disabled: busy,
                    onclick: handle_delete,
                    Icon { icon: FaTrash, width: 14, height: 14 }
                    if deleting() { "Removing..." } else { "Remove Resume" }
                }
            }
        }
    }
}
