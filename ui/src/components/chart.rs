//! SVG line chart for the sweep series.
//!
//! Log-scale X over the shared sample-count ticks, padded Y domain over the
//! visible accuracies, per-series stroke/dash/marker styling, and a per-tick
//! hover tooltip. Rendering is plain SVG; the positioning helpers are pure
//! and unit-tested.

use std::collections::HashSet;

use dioxus::prelude::*;

use crate::core::format;
use crate::core::series::{Series, SeriesSet};
use crate::core::style::Symbol;

const CHART_WIDTH: f64 = 720.0;
const CHART_HEIGHT: f64 = 420.0;
const PADDING: f64 = 48.0;

/// Resnet-50 baseline the sweep is measured against.
const REFERENCE_ACCURACY: f64 = 80.858;
const REFERENCE_LABEL: &str = "Resnet-50 80.858%";
/// Y-axis ceiling while the reference toggle is on, so the baseline stays in
/// frame.
const REFERENCE_CEILING: f64 = 81.0;
/// Slack added around the data extent on the Y axis.
const Y_MARGIN: f64 = 0.05;

/// Stroke for series that carry no derived color.
const DEFAULT_STROKE: &str = "#888888";

#[component]
pub fn SweepChart(series_set: SeriesSet, show_reference: bool) -> Element {
    let mut hovered_tick: Signal<Option<usize>> = use_signal(|| None);

    let SeriesSet { series, axis_ticks } = &series_set;

    if axis_ticks.is_empty() {
        return rsx! {
            section { class: "results-card chart",
                div { class: "results-card__header",
                    h2 { "Top-1 accuracy" }
                }
                p { class: "results-card__placeholder",
                    "Select layers and parameter values to plot the sweep."
                }
            }
        };
    }

    let x_domain = (axis_ticks[0], *axis_ticks.last().unwrap());
    let y_domain = y_domain(series, show_reference);
    let fractions: Vec<f64> = axis_ticks
        .iter()
        .map(|&tick| log_fraction(tick, x_domain))
        .collect();

    let inner_width = CHART_WIDTH - 2.0 * PADDING;
    let inner_height = CHART_HEIGHT - 2.0 * PADDING;
    let reference_visible = y_domain.0 <= REFERENCE_ACCURACY && REFERENCE_ACCURACY <= y_domain.1;

    let hovered = hovered_tick();
    let tooltip = hovered
        .and_then(|index| axis_ticks.get(index).copied())
        .and_then(|rows| tick_tooltip(series, rows).map(|lines| (rows, lines)))
        .filter(|(_, lines)| !lines.is_empty());

    rsx! {
        section { class: "results-card chart",
            div { class: "results-card__header",
                h2 { "Top-1 accuracy" }
                span { class: "results-card__meta", "{series.len()} series" }
            }

            div {
                class: "chart__plot",
                onmouseleave: move |_| hovered_tick.set(None),

                svg {
                    class: "chart__svg",
                    view_box: "0 0 {CHART_WIDTH} {CHART_HEIGHT}",
                    "preserveAspectRatio": "xMidYMid meet",

                    // Horizontal grid with Y labels.
                    for i in 0..5 {
                        {
                            let y = PADDING + inner_height * (i as f64 / 4.0);
                            let value = y_domain.1 - (y_domain.1 - y_domain.0) * (i as f64 / 4.0);
                            rsx! {
                                line {
                                    x1: "{PADDING}", y1: "{y}",
                                    x2: "{CHART_WIDTH - PADDING}", y2: "{y}",
                                    class: "chart__grid",
                                    "stroke-dasharray": "3 3",
                                }
                                text {
                                    x: "{PADDING - 6.0}", y: "{y + 3.0}",
                                    class: "chart__axis-label",
                                    "text-anchor": "end",
                                    "{format::format_axis(value)}"
                                }
                            }
                        }
                    }

                    // X ticks on the log-scale axis.
                    for (index, tick) in axis_ticks.iter().enumerate() {
                        {
                            let x = PADDING + inner_width * fractions[index];
                            rsx! {
                                line {
                                    x1: "{x}", y1: "{CHART_HEIGHT - PADDING}",
                                    x2: "{x}", y2: "{CHART_HEIGHT - PADDING + 4.0}",
                                    class: "chart__grid",
                                }
                                text {
                                    x: "{x}", y: "{CHART_HEIGHT - PADDING + 16.0}",
                                    class: "chart__axis-label",
                                    "text-anchor": "middle",
                                    "{tick}"
                                }
                            }
                        }
                    }

                    if reference_visible {
                        {
                            let y = y_position(REFERENCE_ACCURACY, y_domain);
                            rsx! {
                                line {
                                    x1: "{PADDING}", y1: "{y}",
                                    x2: "{CHART_WIDTH - PADDING}", y2: "{y}",
                                    class: "chart__reference",
                                }
                                text {
                                    x: "{CHART_WIDTH - PADDING}", y: "{y - 5.0}",
                                    class: "chart__reference-label",
                                    "text-anchor": "end",
                                    "{REFERENCE_LABEL}"
                                }
                            }
                        }
                    }

                    // One polyline per series; gap points are skipped so the
                    // stroke connects across missing ticks.
                    for line_series in series.iter() {
                        {
                            let stroke = line_series.color.as_deref().unwrap_or(DEFAULT_STROKE);
                            // A zero-length dash renders solid.
                            let dash = line_series.dash.unwrap_or("0");
                            let path = line_path(line_series, x_domain, y_domain);
                            rsx! {
                                path {
                                    key: "{line_series.name}",
                                    d: "{path}",
                                    class: "chart__line",
                                    fill: "none",
                                    stroke: "{stroke}",
                                    "stroke-width": "2",
                                    "stroke-dasharray": "{dash}",
                                }
                                for point in line_series.points.iter() {
                                    if let Some(value) = point.accuracy {
                                        {marker(
                                            line_series.symbol,
                                            x_position(point.rows, x_domain),
                                            y_position(value, y_domain),
                                            stroke,
                                        )}
                                    }
                                }
                            }
                        }
                    }

                    // Hover crosshair.
                    if let Some(index) = hovered {
                        {
                            let x = PADDING + inner_width * fractions[index];
                            rsx! {
                                line {
                                    x1: "{x}", y1: "{PADDING}",
                                    x2: "{x}", y2: "{CHART_HEIGHT - PADDING}",
                                    class: "chart__crosshair",
                                    "stroke-dasharray": "4 4",
                                }
                            }
                        }
                    }

                    // Transparent per-tick hover zones, drawn last so they
                    // sit above the data marks.
                    for index in 0..axis_ticks.len() {
                        {
                            let (start, end) = hover_bounds(&fractions, index);
                            let x = PADDING + inner_width * start;
                            let width = inner_width * (end - start);
                            rsx! {
                                rect {
                                    x: "{x}", y: "{PADDING}",
                                    width: "{width}", height: "{inner_height}",
                                    class: "chart__hover-zone",
                                    fill: "transparent",
                                    onmouseenter: move |_| hovered_tick.set(Some(index)),
                                }
                            }
                        }
                    }
                }

                if let Some((rows, lines)) = tooltip {
                    {
                        let index = hovered.unwrap_or_default();
                        let percent = fractions[index] * 100.0;
                        let style = if percent < 50.0 {
                            format!("left: calc({:.1}% + 16px);", percent.max(5.0))
                        } else {
                            format!("left: calc({:.1}% - 200px);", percent.min(95.0))
                        };
                        rsx! {
                            div { class: "chart__tooltip", style: "{style}",
                                p { class: "chart__tooltip-title", "Training Images {rows}" }
                                for line in lines.iter() {
                                    p {
                                        class: "chart__tooltip-line",
                                        style: "color: {line.color};",
                                        "{line.label}: {format::format_percent(line.value)}"
                                    }
                                }
                            }
                        }
                    }
                }
            }

            div { class: "chart__legend",
                for line_series in series.iter() {
                    {legend_entry(line_series)}
                }
            }
        }
    }
}

fn legend_entry(series: &Series) -> Element {
    let stroke = series.color.as_deref().unwrap_or(DEFAULT_STROKE);
    let dash = series.dash.unwrap_or("0");
    rsx! {
        div { class: "chart__legend-entry", key: "{series.name}",
            svg {
                class: "chart__legend-sample",
                view_box: "0 0 30 12",
                line {
                    x1: "0", y1: "6", x2: "30", y2: "6",
                    stroke: "{stroke}",
                    "stroke-width": "2",
                    "stroke-dasharray": "{dash}",
                }
                {marker(series.symbol, 15.0, 6.0, stroke)}
            }
            span { "{series.name}" }
        }
    }
}

/// Marker for one real data point. Unstyled series fall back to a small
/// circle in the default stroke.
fn marker(symbol: Option<Symbol>, x: f64, y: f64, color: &str) -> Element {
    match symbol {
        None | Some(Symbol::Circle) => rsx! {
            circle { cx: "{x}", cy: "{y}", r: "3", fill: "{color}" }
        },
        Some(Symbol::Cross) => rsx! {
            path {
                d: "M {x - 3.5} {y} L {x + 3.5} {y} M {x} {y - 3.5} L {x} {y + 3.5}",
                stroke: "{color}",
                "stroke-width": "2",
                fill: "none",
            }
        },
        Some(Symbol::Diamond) => rsx! {
            polygon {
                points: "{x},{y - 4.0} {x + 4.0},{y} {x},{y + 4.0} {x - 4.0},{y}",
                fill: "{color}",
            }
        },
        Some(Symbol::Square) => rsx! {
            rect {
                x: "{x - 3.0}", y: "{y - 3.0}",
                width: "6", height: "6",
                fill: "{color}",
            }
        },
        Some(Symbol::Star) => rsx! {
            polygon { points: "{star_points(x, y, 4.5, 1.8)}", fill: "{color}" }
        },
        Some(Symbol::Wye) => rsx! {
            path {
                d: "{wye_path(x, y, 4.0)}",
                stroke: "{color}",
                "stroke-width": "2",
                fill: "none",
            }
        },
    }
}

/// Ten-vertex polygon for a five-spike star.
fn star_points(cx: f64, cy: f64, outer: f64, inner: f64) -> String {
    use std::f64::consts::{FRAC_PI_2, PI};

    (0..10)
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            let angle = PI * (i as f64 / 5.0) - FRAC_PI_2;
            format!("{:.2},{:.2}", cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Three spokes at 120° apart, stem down.
fn wye_path(cx: f64, cy: f64, radius: f64) -> String {
    use std::f64::consts::PI;

    let mut path = String::new();
    for i in 0..3 {
        let angle = PI * (2.0 * i as f64 / 3.0 + 0.5);
        let x = cx + radius * angle.cos();
        let y = cy - radius * angle.sin();
        path.push_str(&format!("M {cx:.2} {cy:.2} L {x:.2} {y:.2} "));
    }
    path.trim_end().to_string()
}

/// Horizontal position of `rows` on the log-scale axis as a `0..=1`
/// fraction. A degenerate single-tick domain centers.
fn log_fraction(rows: u64, domain: (u64, u64)) -> f64 {
    let min = (domain.0.max(1)) as f64;
    let max = (domain.1.max(1)) as f64;
    if max <= min {
        return 0.5;
    }
    let value = (rows.max(1)) as f64;
    ((value.ln() - min.ln()) / (max.ln() - min.ln())).clamp(0.0, 1.0)
}

fn x_position(rows: u64, domain: (u64, u64)) -> f64 {
    PADDING + (CHART_WIDTH - 2.0 * PADDING) * log_fraction(rows, domain)
}

fn y_position(value: f64, domain: (f64, f64)) -> f64 {
    let (lower, upper) = domain;
    let span = upper - lower;
    let fraction = if span <= 0.0 {
        0.5
    } else {
        ((value - lower) / span).clamp(0.0, 1.0)
    };
    PADDING + (CHART_HEIGHT - 2.0 * PADDING) * (1.0 - fraction)
}

/// Y domain over the visible accuracies: data extent padded by `Y_MARGIN`,
/// with the upper bound pinned to the reference ceiling while the toggle is
/// on. No visible values fall back to the full percentage range.
fn y_domain(series: &[Series], show_reference: bool) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in series
        .iter()
        .flat_map(|s| s.points.iter().filter_map(|p| p.accuracy))
    {
        min = min.min(value);
        max = max.max(value);
    }

    if !min.is_finite() {
        return (0.0, if show_reference { REFERENCE_CEILING } else { 100.0 });
    }

    let lower = min - Y_MARGIN;
    let upper = if show_reference {
        REFERENCE_CEILING
    } else {
        max + Y_MARGIN
    };
    (lower, upper)
}

/// Polyline through the series' real points; synthetic gap points are
/// skipped so the stroke connects across gaps.
fn line_path(series: &Series, x_domain: (u64, u64), y_domain: (f64, f64)) -> String {
    let mut path = String::new();
    for point in &series.points {
        let Some(value) = point.accuracy else { continue };
        let x = x_position(point.rows, x_domain);
        let y = y_position(value, y_domain);
        if path.is_empty() {
            path.push_str(&format!("M {x:.1} {y:.1}"));
        } else {
            path.push_str(&format!(" L {x:.1} {y:.1}"));
        }
    }
    path
}

/// Hover-zone bounds for one tick: midpoints toward the neighbors, clamped
/// to the plot edges.
fn hover_bounds(fractions: &[f64], index: usize) -> (f64, f64) {
    let current = fractions[index];
    let start = if index == 0 {
        0.0
    } else {
        (fractions[index - 1] + current) / 2.0
    };
    let end = if index + 1 == fractions.len() {
        1.0
    } else {
        (current + fractions[index + 1]) / 2.0
    };
    (start, end)
}

/// One tooltip row for a hovered tick.
#[derive(Debug, Clone, PartialEq)]
struct TooltipLine {
    label: String,
    color: String,
    value: f64,
}

/// Tooltip payload for one axis tick, value-descending.
///
/// Returns `None` when the payload is ambiguous: the same record id showing
/// up twice at one tick is a data-integrity fault, and the tick then renders
/// no tooltip at all rather than overlapping labels.
fn tick_tooltip(series: &[Series], rows: u64) -> Option<Vec<TooltipLine>> {
    let mut lines = Vec::new();
    let mut seen_ids = HashSet::new();

    for one in series {
        for point in one.points.iter().filter(|p| p.rows == rows) {
            if let Some(id) = point.id {
                if !seen_ids.insert(id) {
                    return None;
                }
            }
            let Some(value) = point.accuracy else { continue };
            lines.push(TooltipLine {
                label: tooltip_label(one),
                color: one.color.clone().unwrap_or_else(|| DEFAULT_STROKE.to_string()),
                value,
            });
        }
    }

    lines.sort_by(|a, b| b.value.total_cmp(&a.value));
    Some(lines)
}

/// Compact `C-K-algorithm` label, the long form lives in the legend.
fn tooltip_label(series: &Series) -> String {
    let algorithm = series
        .key
        .algorithm
        .map(|code| code.to_string())
        .unwrap_or_else(|| "?".to_string());
    format!("{}-{}-{}", series.key.c, series.key.k, algorithm)
}
