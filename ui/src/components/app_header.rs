//! Brand header for the viewer shell.

use dioxus::prelude::*;

const HEADER_CSS: Asset = asset!("/assets/styling/header.css");

#[component]
pub fn AppHeader() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: HEADER_CSS }

        header { class: "header",
            div { class: "header__inner",
                span { class: "header__mark", "Sweepview" }
                span { class: "header__subtitle", "Parameter-sweep data viewer" }
            }
        }
    }
}
