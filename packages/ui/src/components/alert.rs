use dioxus::prelude::*;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum AlertKind {
    #[default]
    Error,
    Success,
}

/// Inline message box. Shows a "Dismiss" button when `on_dismiss` is set.
#[component]
pub fn Alert(
    #[props(default)] kind: AlertKind,
    message: String,
    on_dismiss: Option<EventHandler<()>>,
) -> Element {
    let class = match kind {
        AlertKind::Error => "alert alert--error",
        AlertKind::Success => "alert alert--success",
    };

    rsx! {
        div {
            class: "{class}",
            role: "alert",
            span { "{message}" }
            if let Some(handler) = on_dismiss {
                button {
                    class: "alert-dismiss",
                    r#type: "button",
                    onclick: move |_| handler.call(()),
                    "Dismiss"
                }
            }
        }
    }
}
