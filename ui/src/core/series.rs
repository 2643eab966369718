//! Groups flat sweep records into named, styled chart series.
//!
//! This is the one real transform in the viewer: filter the loaded records by
//! the active selections, group them by configuration tuple, derive each
//! group's visual encoding, and fill axis gaps with null points so the
//! renderer can span the shared sample-count domain without inventing data.

use std::collections::{BTreeSet, HashMap};

use crate::core::filters::FilterSelection;
use crate::core::record::{self, SweepRecord};
use crate::core::style::{ChartStyle, Symbol};

/// Composite grouping key. Exactly one series exists per distinct key among
/// the filtered records.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesKey {
    pub c: u32,
    pub k: u32,
    pub algorithm: Option<u8>,
    pub layer: String,
}

impl SeriesKey {
    fn of(record: &SweepRecord) -> Self {
        Self {
            c: record.c,
            k: record.k,
            algorithm: record.encoding_algorithm,
            layer: record.layer_name_canonical.clone(),
        }
    }

    /// Display name, e.g. `"C = 8, K = 16, Enc = 1, L = conv1"`. A record
    /// batch missing the algorithm code still needs a deterministic name.
    pub fn name(&self) -> String {
        let algorithm = self
            .algorithm
            .map(|code| code.to_string())
            .unwrap_or_else(|| "?".to_string());
        format!(
            "C = {}, K = {}, Enc = {}, L = {}",
            self.c, self.k, algorithm, self.layer
        )
    }
}

/// One plotted point. `accuracy` is `None` both for synthetic gap fills and
/// for records whose payload omitted the metric; `id` ties a real point back
/// to its source record for tooltip integrity checks.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub rows: u64,
    pub accuracy: Option<f64>,
    pub id: Option<i64>,
}

/// One renderable line.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub key: SeriesKey,
    pub name: String,
    /// Ascending by `rows`, spanning the full axis-tick domain after
    /// gap-filling.
    pub points: Vec<SeriesPoint>,
    pub color: Option<String>,
    pub symbol: Option<Symbol>,
    pub dash: Option<&'static str>,
}

/// Chart-ready output: ordered series plus the shared X-axis domain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesSet {
    pub series: Vec<Series>,
    pub axis_ticks: Vec<u64>,
}

/// Records passing the membership filters, ascending by `rows` (stable on
/// ties, so load order breaks them), with the bad-configuration family
/// removed when the toggle is set. Shared between the series builder and the
/// results table.
pub fn filter_records(records: &[SweepRecord], selection: &FilterSelection) -> Vec<SweepRecord> {
    let mut filtered: Vec<SweepRecord> = records
        .iter()
        .filter(|record| selection.accepts(record))
        .cloned()
        .collect();

    if selection.deactivate_bad {
        filtered.retain(|record| !FilterSelection::is_bad(record));
    }

    filtered.sort_by_key(|record| record.rows);
    filtered
}

/// Builds the chart series for the current selections.
///
/// Pure function of its arguments: same records, selection, and style always
/// produce structurally identical output, and nothing is retained between
/// calls. Empty input yields empty output, not an error.
pub fn build_series(
    records: &[SweepRecord],
    selection: &FilterSelection,
    style: &ChartStyle,
) -> SeriesSet {
    // The axis spans every loaded record, not just the filtered ones, so the
    // domain stays put while value filters toggle.
    let axis_ticks = record::distinct_rows(records);

    let filtered = filter_records(records, selection);

    // Ordered grouping: first-seen order of the filtered sequence, keyed by
    // the composite tuple rather than a concatenated string.
    let mut order: Vec<SeriesKey> = Vec::new();
    let mut groups: HashMap<SeriesKey, Vec<SweepRecord>> = HashMap::new();
    for record in filtered {
        let key = SeriesKey::of(&record);
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        groups.entry(key).or_default().push(record);
    }

    let series = order
        .into_iter()
        .map(|key| {
            let members = groups.remove(&key).unwrap_or_default();
            build_one(key, members, selection, style, &axis_ticks)
        })
        .collect();

    SeriesSet { series, axis_ticks }
}

fn build_one(
    key: SeriesKey,
    members: Vec<SweepRecord>,
    selection: &FilterSelection,
    style: &ChartStyle,
    axis_ticks: &[u64],
) -> Series {
    let (color, symbol, dash) = members
        .first()
        .map(|first| derive_style(first, selection, style))
        .unwrap_or((None, None, None));

    let mut points: Vec<SeriesPoint> = members
        .iter()
        .map(|record| SeriesPoint {
            rows: record.rows,
            accuracy: record.top_1_accuracy_100,
            id: Some(record.id),
        })
        .collect();

    // Gap-fill: one synthetic null point per axis tick this group misses,
    // then re-sort only when something was appended.
    let covered: BTreeSet<u64> = points.iter().map(|point| point.rows).collect();
    let mut filled = false;
    for &tick in axis_ticks {
        if !covered.contains(&tick) {
            points.push(SeriesPoint {
                rows: tick,
                accuracy: None,
                id: None,
            });
            filled = true;
        }
    }
    if filled {
        points.sort_by_key(|point| point.rows);
    }

    Series {
        name: key.name(),
        key,
        points,
        color,
        symbol,
        dash,
    }
}

/// Visual encoding from a group's first member. A member without an
/// algorithm code carries no derived styling at all; the series still
/// renders with renderer defaults.
fn derive_style(
    first: &SweepRecord,
    selection: &FilterSelection,
    style: &ChartStyle,
) -> (Option<String>, Option<Symbol>, Option<&'static str>) {
    let Some(algorithm) = first.encoding_algorithm else {
        return (None, None, None);
    };

    let color = style.color_for(algorithm, first.c);
    let symbol = style.symbol_for(first.k);
    let dash = selection
        .layer_position(&first.layer_name_canonical)
        .and_then(|position| style.dash_for(position, selection.layers.len()));

    (color, symbol, dash)
}
