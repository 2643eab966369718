//! Wire-format data model for the parameter-sweep endpoints.

use std::collections::BTreeSet;

use serde::Deserialize;

/// One measurement row from the sweep result endpoint.
///
/// Only identity and configuration fields are required. Every metric is
/// optional so a sparse payload row degrades its own display instead of
/// failing the whole batch decode; unknown fields in the payload are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SweepRecord {
    pub id: i64,
    #[serde(default)]
    pub index: Option<i64>,
    /// Sample-count axis value (training set size for this measurement).
    pub rows: u64,
    #[serde(rename = "C")]
    pub c: u32,
    #[serde(rename = "K")]
    pub k: u32,
    #[serde(default)]
    pub encoding_algorithm: Option<u8>,
    pub layer_name_canonical: String,
    #[serde(default)]
    pub layer_name: String,
    #[serde(default)]
    pub top_1_accuracy_100: Option<f64>,
    #[serde(default)]
    pub top_5_accuracy: Option<f64>,
    #[serde(default)]
    pub mae: Option<f64>,
    #[serde(default)]
    pub mape: Option<f64>,
    #[serde(default)]
    pub mse: Option<f64>,
    #[serde(default)]
    pub scaled_error: Option<f64>,
    #[serde(default)]
    pub scaled_shift: Option<f64>,
    #[serde(default, rename = "L_size")]
    pub l_size: Option<u64>,
    #[serde(default)]
    pub total_time: Option<f64>,
}

impl SweepRecord {
    /// Display name for the table; the canonical key stands in when the
    /// payload carried no display string.
    pub fn display_layer(&self) -> &str {
        if self.layer_name.is_empty() {
            &self.layer_name_canonical
        } else {
            &self.layer_name
        }
    }
}

/// One entry from the layer-list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LayerOption {
    pub layer_name: String,
    pub layer_name_canonical: String,
}

/// Distinct C values across the loaded records, ascending.
pub fn distinct_cs(records: &[SweepRecord]) -> Vec<u32> {
    records.iter().map(|r| r.c).collect::<BTreeSet<_>>().into_iter().collect()
}

/// Distinct K values across the loaded records, ascending.
pub fn distinct_ks(records: &[SweepRecord]) -> Vec<u32> {
    records.iter().map(|r| r.k).collect::<BTreeSet<_>>().into_iter().collect()
}

/// Distinct algorithm codes across the loaded records, ascending. Records
/// without a code contribute nothing here; they are handled by the filter
/// rules instead.
pub fn distinct_algorithms(records: &[SweepRecord]) -> Vec<u8> {
    records
        .iter()
        .filter_map(|r| r.encoding_algorithm)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct sample-count values across the loaded records, ascending. This
/// is the shared X-axis domain.
pub fn distinct_rows(records: &[SweepRecord]) -> Vec<u64> {
    records.iter().map(|r| r.rows).collect::<BTreeSet<_>>().into_iter().collect()
}
