//! Pill-style multi-select used by every filter dimension.

use dioxus::prelude::*;

/// One selectable entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    /// Optional color swatch next to the label; algorithm options carry
    /// their palette hue.
    pub swatch: Option<String>,
}

impl SelectOption {
    pub fn new<V: Into<String>, L: Into<String>>(value: V, label: L) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            swatch: None,
        }
    }

    pub fn with_swatch<S: Into<String>>(mut self, swatch: S) -> Self {
        self.swatch = Some(swatch.into());
        self
    }
}

/// Toggleable option pills for one filter dimension. Emits the toggled value;
/// the caller owns the membership state.
#[component]
pub fn MultiSelect(
    label: String,
    placeholder: String,
    options: Vec<SelectOption>,
    selected: Vec<String>,
    on_toggle: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: "multi-select",
            span { class: "multi-select__label", "{label}" }
            if options.is_empty() {
                span { class: "multi-select__placeholder", "{placeholder}" }
            } else {
                div { class: "multi-select__options",
                    for option in options.iter() {
                        {option_pill(option, selected.contains(&option.value), on_toggle)}
                    }
                }
            }
        }
    }
}

fn option_pill(option: &SelectOption, active: bool, on_toggle: EventHandler<String>) -> Element {
    let value = option.value.clone();
    let class = if active {
        "multi-select__option multi-select__option--active"
    } else {
        "multi-select__option"
    };

    rsx! {
        button {
            key: "{option.value}",
            r#type: "button",
            class: "{class}",
            onclick: move |_| on_toggle.call(value.clone()),
            if let Some(swatch) = option.swatch.as_ref() {
                span { class: "multi-select__swatch", style: "background: {swatch};" }
            }
            span { "{option.label}" }
        }
    }
}
