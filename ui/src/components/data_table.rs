//! Sortable results table for the filtered sweep records.

use std::cmp::Ordering;

use dioxus::prelude::*;

use crate::core::format;
use crate::core::record::SweepRecord;

/// Sortable column identifiers, one per rendered column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableColumn {
    Layer,
    C,
    K,
    Algorithm,
    Accuracy,
    LSize,
    ScaledError,
    Mse,
    Mae,
}

impl TableColumn {
    pub const ALL: [TableColumn; 9] = [
        TableColumn::Layer,
        TableColumn::C,
        TableColumn::K,
        TableColumn::Algorithm,
        TableColumn::Accuracy,
        TableColumn::LSize,
        TableColumn::ScaledError,
        TableColumn::Mse,
        TableColumn::Mae,
    ];

    fn header(&self) -> &'static str {
        match self {
            TableColumn::Layer => "Layer Name",
            TableColumn::C => "C",
            TableColumn::K => "K",
            TableColumn::Algorithm => "Encoding",
            TableColumn::Accuracy => "Top-1 Accuracy [%]",
            TableColumn::LSize => "L_size [bytes]",
            TableColumn::ScaledError => "Scaled error",
            TableColumn::Mse => "MSE",
            TableColumn::Mae => "MAE",
        }
    }
}

#[component]
pub fn ResultsTable(records: Vec<SweepRecord>) -> Element {
    let mut sort_column = use_signal(|| TableColumn::LSize);
    let mut ascending = use_signal(|| true);

    // Only rows with a measured accuracy reach the table.
    let mut rows: Vec<SweepRecord> = records
        .iter()
        .filter(|record| record.top_1_accuracy_100.is_some())
        .cloned()
        .collect();
    sort_rows(&mut rows, sort_column(), ascending());

    let active_column = sort_column();
    let is_ascending = ascending();

    rsx! {
        section { class: "results-card results-table",
            div { class: "results-card__header",
                h2 { "Data" }
                if !rows.is_empty() {
                    span { class: "results-card__meta", "{rows.len()} rows" }
                }
            }

            if rows.is_empty() {
                p { class: "results-card__placeholder",
                    "Filtered results will appear here once something matches."
                }
            } else {
                table { class: "results-table__grid",
                    thead {
                        tr {
                            for column in TableColumn::ALL {
                                {
                                    let is_active = column == active_column;
                                    let indicator = if !is_active {
                                        ""
                                    } else if is_ascending {
                                        " ▲"
                                    } else {
                                        " ▼"
                                    };
                                    rsx! {
                                        th {
                                            button {
                                                r#type: "button",
                                                class: "results-table__sort",
                                                onclick: move |_| {
                                                    if sort_column() == column {
                                                        let flipped = !ascending();
                                                        ascending.set(flipped);
                                                    } else {
                                                        sort_column.set(column);
                                                        ascending.set(true);
                                                    }
                                                },
                                                "{column.header()}{indicator}"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                    tbody {
                        for record in rows.iter() {
                            {table_row(record)}
                        }
                    }
                }
            }
        }
    }
}

fn table_row(record: &SweepRecord) -> Element {
    let accuracy = record
        .top_1_accuracy_100
        .map(format::format_accuracy)
        .unwrap_or_else(|| format::MISSING.to_string());
    let l_size = record
        .l_size
        .map(format::format_l_size)
        .unwrap_or_else(|| format::MISSING.to_string());
    let algorithm = record
        .encoding_algorithm
        .map(|code| code.to_string())
        .unwrap_or_else(|| format::MISSING.to_string());

    rsx! {
        tr { key: "{record.id}",
            td { "{record.display_layer()}" }
            td { "{record.c}" }
            td { "{record.k}" }
            td { "{algorithm}" }
            td { "{accuracy}" }
            td { "{l_size}" }
            td { "{metric_cell(record.scaled_error)}" }
            td { "{metric_cell(record.mse)}" }
            td { "{metric_cell(record.mae)}" }
        }
    }
}

fn metric_cell(value: Option<f64>) -> String {
    value
        .map(format::format_exponential)
        .unwrap_or_else(|| format::MISSING.to_string())
}

/// Stable sort by the chosen column. Absent values order after present ones.
pub(crate) fn sort_rows(rows: &mut [SweepRecord], column: TableColumn, ascending: bool) {
    rows.sort_by(|a, b| {
        let ordering = match column {
            TableColumn::Layer => a.display_layer().cmp(b.display_layer()),
            TableColumn::C => a.c.cmp(&b.c),
            TableColumn::K => a.k.cmp(&b.k),
            TableColumn::Algorithm => a.encoding_algorithm.cmp(&b.encoding_algorithm),
            TableColumn::Accuracy => compare_metric(a.top_1_accuracy_100, b.top_1_accuracy_100),
            TableColumn::LSize => compare_sizes(a.l_size, b.l_size),
            TableColumn::ScaledError => compare_metric(a.scaled_error, b.scaled_error),
            TableColumn::Mse => compare_metric(a.mse, b.mse),
            TableColumn::Mae => compare_metric(a.mae, b.mae),
        };
        if ascending {
            ordering
        } else {
            ordering.reverse()
        }
    });
}

fn compare_metric(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_sizes(a: Option<u64>, b: Option<u64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
