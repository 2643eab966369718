//! Formatting helpers for table cells, tooltips, and axis labels.

/// Table cell absent-value placeholder.
pub const MISSING: &str = "—";

/// Accuracy table cell, three decimals.
pub fn format_accuracy(value: f64) -> String {
    format!("{value:.3}")
}

/// Tooltip percentage, two decimals.
pub fn format_percent(value: f64) -> String {
    format!("{value:.2} %")
}

/// Y-axis label, two decimals.
pub fn format_axis(value: f64) -> String {
    format!("{value:.2}")
}

/// Error-metric cell, exponential notation with three decimals.
pub fn format_exponential(value: f64) -> String {
    format!("{value:.3e}")
}

/// Encoded-layer size cell: raw bytes plus a floored KB rendering.
pub fn format_l_size(bytes: u64) -> String {
    format!("{bytes} ({} KB)", bytes / 1024)
}
