use dioxus::prelude::*;

/// The text to show the user for a failed server function call.
///
/// Messages raised by the server are shown verbatim; anything that never reached the
/// server (or came back mangled) gets the generic network message.
pub fn error_message(err: &ServerFnError) -> String {
    match err {
        ServerFnError::ServerError { message, .. } => message.clone(),
        other => {
            tracing::debug!("Request failed before reaching the server: {}", other);
            "Network error occurred".to_string()
        }
    }
}
