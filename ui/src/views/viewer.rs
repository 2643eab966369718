//! The sweep viewer page: filter controls, chart, and results table.

use dioxus::prelude::*;
use futures_util::StreamExt;
use tracing::{debug, warn};

use crate::components::chart::SweepChart;
use crate::components::data_table::ResultsTable;
use crate::components::multi_select::{MultiSelect, SelectOption};
use crate::core::api;
use crate::core::filters::FilterSelection;
use crate::core::record::{self, LayerOption, SweepRecord};
use crate::core::series::{build_series, filter_records};
use crate::core::style::{ChartStyle, ALGORITHM_PALETTE};

/// Display names for the encoding-algorithm codes, as the dataset names them.
const ALGORITHM_NAMES: [&str; 3] = ["FOUR_DIM_HASH", "DESICION_TREE", "FULL_PQ"];

#[derive(Debug, Clone)]
enum ViewerEvent {
    LoadLayers,
    /// Layer selection changed; refetch (or clear) the result set. The
    /// generation number identifies the newest request so a late completion
    /// of a superseded fetch is dropped instead of overwriting fresher data.
    LayersChanged {
        layers: Vec<String>,
        generation: u64,
    },
}

#[component]
pub fn Viewer() -> Element {
    let mut layer_options = use_signal(Vec::<LayerOption>::new);
    let mut selection = use_signal(FilterSelection::empty);
    let mut all_data = use_signal(Vec::<SweepRecord>::new);
    let mut fetch_generation = use_signal(|| 0u64);
    let mut status_line = use_signal(|| Option::<String>::None);

    let coroutine = use_coroutine(move |mut rx: UnboundedReceiver<ViewerEvent>| async move {
        while let Some(event) = rx.next().await {
            match event {
                ViewerEvent::LoadLayers => match api::fetch_layers().await {
                    Ok(options) => layer_options.set(options),
                    Err(err) => {
                        warn!("layer list fetch failed: {err}");
                        status_line.set(Some(format!("Couldn't load layers: {err}")));
                    }
                },
                ViewerEvent::LayersChanged { layers, generation } => {
                    if layers.is_empty() {
                        if fetch_generation() == generation {
                            all_data.set(Vec::new());
                            status_line.set(None);
                        }
                        continue;
                    }

                    let result = api::fetch_records(&layers).await;
                    if fetch_generation() != generation {
                        debug!("dropping stale sweep fetch (generation {generation})");
                        continue;
                    }
                    match result {
                        Ok(records) => {
                            all_data.set(records);
                            status_line.set(None);
                        }
                        // The previous result set stays on screen; stale but
                        // consistent beats an empty chart.
                        Err(err) => {
                            warn!("sweep fetch failed: {err}");
                            status_line.set(Some(format!(
                                "Couldn't load results: {err} — showing the last successful fetch."
                            )));
                        }
                    }
                }
            }
        }
    });

    use_effect(move || {
        coroutine.send(ViewerEvent::LoadLayers);
    });

    // The chart input is a pure function of the loaded data and the active
    // selections; no state survives between recomputes.
    let series_set = use_memo(move || {
        let records = all_data.read();
        let active = selection.read();
        build_series(&records, &active, &ChartStyle::default())
    });
    let table_records = use_memo(move || {
        let records = all_data.read();
        let active = selection.read();
        filter_records(&records, &active)
    });

    let data = all_data.read();
    let active = selection.read();

    let layer_pills: Vec<SelectOption> = layer_options
        .read()
        .iter()
        .map(|layer| SelectOption::new(&*layer.layer_name_canonical, &*layer.layer_name))
        .collect();
    let c_pills: Vec<SelectOption> = record::distinct_cs(&data)
        .into_iter()
        .map(|c| SelectOption::new(c.to_string(), format!("C = {c}")))
        .collect();
    let k_pills: Vec<SelectOption> = record::distinct_ks(&data)
        .into_iter()
        .map(|k| SelectOption::new(k.to_string(), format!("K = {k}")))
        .collect();
    let algorithm_pills: Vec<SelectOption> = record::distinct_algorithms(&data)
        .into_iter()
        .map(|code| {
            let option = SelectOption::new(code.to_string(), algorithm_label(code));
            match ALGORITHM_PALETTE.get(code as usize) {
                Some(hue) => option.with_swatch(*hue),
                None => option,
            }
        })
        .collect();

    let selected_layers = active.layers.clone();
    let selected_cs: Vec<String> = active.cs.iter().map(u32::to_string).collect();
    let selected_ks: Vec<String> = active.ks.iter().map(u32::to_string).collect();
    let selected_algorithms: Vec<String> = active.algorithms.iter().map(u8::to_string).collect();

    let bad_label = if active.deactivate_bad {
        "Show bad ones"
    } else {
        "Remove bad ones"
    };
    let reference_label = if active.show_reference {
        "Hide reference"
    } else {
        "Show reference"
    };
    let status = status_line();

    rsx! {
        section { class: "page page-viewer",
            div { class: "viewer__filters",
                MultiSelect {
                    label: "Layers",
                    placeholder: "Loading layers…",
                    options: layer_pills,
                    selected: selected_layers,
                    on_toggle: move |value: String| {
                        selection.with_mut(|active| active.toggle_layer(&value));
                        let generation = fetch_generation() + 1;
                        fetch_generation.set(generation);
                        coroutine.send(ViewerEvent::LayersChanged {
                            layers: selection.read().layers.clone(),
                            generation,
                        });
                    },
                }
                MultiSelect {
                    label: "C",
                    placeholder: "Select layers to load C values",
                    options: c_pills,
                    selected: selected_cs,
                    on_toggle: move |value: String| {
                        if let Ok(c) = value.parse::<u32>() {
                            selection.with_mut(|active| active.toggle_c(c));
                        }
                    },
                }
                MultiSelect {
                    label: "K",
                    placeholder: "Select layers to load K values",
                    options: k_pills,
                    selected: selected_ks,
                    on_toggle: move |value: String| {
                        if let Ok(k) = value.parse::<u32>() {
                            selection.with_mut(|active| active.toggle_k(k));
                        }
                    },
                }
                MultiSelect {
                    label: "Encoding algorithm",
                    placeholder: "Select layers to load algorithms",
                    options: algorithm_pills,
                    selected: selected_algorithms,
                    on_toggle: move |value: String| {
                        if let Ok(code) = value.parse::<u8>() {
                            selection.with_mut(|active| active.toggle_algorithm(code));
                        }
                    },
                }
            }

            div { class: "viewer__toggles",
                button {
                    r#type: "button",
                    class: "viewer__toggle",
                    onclick: move |_| {
                        selection.with_mut(|active| active.deactivate_bad = !active.deactivate_bad);
                    },
                    "{bad_label}"
                }
                button {
                    r#type: "button",
                    class: "viewer__toggle",
                    onclick: move |_| {
                        selection.with_mut(|active| active.show_reference = !active.show_reference);
                    },
                    "{reference_label}"
                }
            }

            if let Some(message) = status {
                div { class: "viewer__status",
                    span { "⚠️ {message}" }
                    button {
                        r#type: "button",
                        class: "viewer__status-dismiss",
                        onclick: move |_| status_line.set(None),
                        "✕"
                    }
                }
            }

            SweepChart {
                series_set: series_set(),
                show_reference: active.show_reference,
            }

            ResultsTable { records: table_records() }
        }
    }
}

fn algorithm_label(code: u8) -> String {
    match ALGORITHM_NAMES.get(code as usize) {
        Some(name) => format!("Algo = {name} ({code})"),
        None => format!("Algo = {code}"),
    }
}
