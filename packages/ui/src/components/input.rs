use dioxus::prelude::*;

#[component]
pub fn Label(r#for: String, children: Element) -> Element {
    rsx! {
        label { class: "field-label", r#for: "{r#for}", {children} }
    }
}

/// Controlled text input. `oninput` receives the new value.
#[component]
pub fn Input(
    #[props(default)] id: String,
    #[props(default)] name: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default)] placeholder: String,
    #[props(default)] autocomplete: String,
    #[props(default)] readonly: bool,
    #[props(default)] class: String,
    value: String,
    oninput: Option<EventHandler<String>>,
) -> Element {
    rsx! {
        input {
            class: "field-input {class}",
            id: "{id}",
            name: "{name}",
            r#type: "{r#type}",
            placeholder: "{placeholder}",
            autocomplete: "{autocomplete}",
            readonly: readonly,
            value: "{value}",
            oninput: move |evt: FormEvent| {
                if let Some(handler) = &oninput {
                    handler.call(evt.value());
                }
            },
        }
    }
}
