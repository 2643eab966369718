use dioxus::prelude::*;

use ui::components::AppHeader;
use ui::views::Viewer;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
    #[route("/")]
    Home {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(target_arch = "wasm32")]
    tracing_wasm::set_as_global_default();

    // Deployments that don't serve the API from the same origin set this at
    // build time; the default points at the local development server.
    if let Some(base) = option_env!("SWEEPVIEW_API_BASE") {
        ui::core::api::register_base_url(base);
    }

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        Router::<Route> {}
    }
}

#[component]
fn Home() -> Element {
    rsx! {
        Viewer {}
    }
}

/// Web shell wrapping every route with the brand header.
#[component]
fn Shell() -> Element {
    rsx! {
        AppHeader {}
        main { class: "shell__content",
            Outlet::<Route> {}
        }
    }
}
