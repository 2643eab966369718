//! End-to-end contract test for the series builder.
//!
//! Exercises the full transform the viewer runs on every filter change:
//! membership filtering, ordered grouping, style derivation, and gap-filling
//! against the shared axis-tick domain.

use ui::core::filters::FilterSelection;
use ui::core::record::SweepRecord;
use ui::core::series::{build_series, filter_records};
use ui::core::style::{ChartStyle, Symbol};

fn record(
    id: i64,
    rows: u64,
    c: u32,
    k: u32,
    algo: Option<u8>,
    layer: &str,
    accuracy: Option<f64>,
) -> SweepRecord {
    SweepRecord {
        id,
        index: None,
        rows,
        c,
        k,
        encoding_algorithm: algo,
        layer_name_canonical: layer.into(),
        layer_name: format!("Layer {layer}"),
        top_1_accuracy_100: accuracy,
        top_5_accuracy: None,
        mae: None,
        mape: None,
        mse: None,
        scaled_error: None,
        scaled_shift: None,
        l_size: Some(1024),
        total_time: None,
    }
}

/// A selection accepting every value present in the fixture.
fn accept_all(records: &[SweepRecord], layers: &[&str]) -> FilterSelection {
    let mut selection = FilterSelection::empty();
    for layer in layers {
        selection.toggle_layer(layer);
    }
    for record in records {
        if !selection.cs.contains(&record.c) {
            selection.toggle_c(record.c);
        }
        if !selection.ks.contains(&record.k) {
            selection.toggle_k(record.k);
        }
        if let Some(code) = record.encoding_algorithm {
            if !selection.algorithms.contains(&code) {
                selection.toggle_algorithm(code);
            }
        }
    }
    selection
}

#[test]
fn the_worked_example_end_to_end() {
    let records = vec![
        record(1, 100, 8, 16, Some(1), "L1", Some(70.0)),
        record(2, 200, 8, 16, Some(1), "L1", Some(75.0)),
        record(3, 100, 16, 8, Some(0), "L1", Some(60.0)),
    ];
    let selection = accept_all(&records, &["L1"]);
    let set = build_series(&records, &selection, &ChartStyle::default());

    assert_eq!(set.axis_ticks, vec![100, 200]);
    assert_eq!(set.series.len(), 2);

    let first = &set.series[0];
    assert_eq!(first.name, "C = 8, K = 16, Enc = 1, L = L1");
    assert_eq!(
        first
            .points
            .iter()
            .map(|p| (p.rows, p.accuracy))
            .collect::<Vec<_>>(),
        vec![(100, Some(70.0)), (200, Some(75.0))]
    );
    // Enc 1 at C = 8: base green, no darkening below C = 16.
    assert_eq!(first.color.as_deref(), Some("#007614"));
    assert_eq!(first.symbol, Some(Symbol::Diamond));
    // Single selected layer: solid stroke.
    assert_eq!(first.dash, None);

    let second = &set.series[1];
    assert_eq!(second.name, "C = 16, K = 8, Enc = 0, L = L1");
    assert_eq!(
        second
            .points
            .iter()
            .map(|p| (p.rows, p.accuracy))
            .collect::<Vec<_>>(),
        vec![(100, Some(60.0)), (200, None)]
    );
    assert_eq!(second.symbol, Some(Symbol::Cross));
}

#[test]
fn series_count_matches_distinct_tuples_and_axis_is_shared() {
    let records = vec![
        record(1, 100, 8, 16, Some(1), "a", Some(70.0)),
        record(2, 400, 8, 16, Some(1), "a", Some(72.0)),
        record(3, 200, 8, 16, Some(1), "b", Some(68.0)),
        record(4, 100, 16, 8, Some(0), "b", Some(61.0)),
        record(5, 800, 32, 4, Some(2), "a", Some(66.0)),
    ];
    let selection = accept_all(&records, &["a", "b"]);
    let set = build_series(&records, &selection, &ChartStyle::default());

    assert_eq!(set.series.len(), 4);
    assert_eq!(set.axis_ticks, vec![100, 200, 400, 800]);
    for series in &set.series {
        assert_eq!(series.points.len(), set.axis_ticks.len(), "{}", series.name);
        let rows: Vec<u64> = series.points.iter().map(|p| p.rows).collect();
        assert_eq!(rows, set.axis_ticks, "{}", series.name);
    }
}

#[test]
fn multi_layer_selection_rotates_dash_patterns() {
    let records = vec![
        record(1, 100, 8, 16, Some(1), "a", Some(70.0)),
        record(2, 100, 8, 16, Some(1), "b", Some(71.0)),
        record(3, 100, 8, 16, Some(1), "c", Some(72.0)),
        record(4, 100, 8, 16, Some(1), "d", Some(73.0)),
    ];
    let selection = accept_all(&records, &["a", "b", "c", "d"]);
    let set = build_series(&records, &selection, &ChartStyle::default());

    let dash_of = |layer: &str| {
        set.series
            .iter()
            .find(|s| s.key.layer == layer)
            .map(|s| s.dash)
            .unwrap()
    };
    assert_eq!(dash_of("a"), None);
    assert_eq!(dash_of("b"), Some("2 2"));
    assert_eq!(dash_of("c"), Some("4 1"));
    // Fourth layer wraps around to solid.
    assert_eq!(dash_of("d"), None);
}

#[test]
fn deactivate_bad_only_touches_the_bad_family() {
    let records = vec![
        record(1, 100, 8, 8, Some(0), "a", Some(40.0)),
        record(2, 100, 8, 16, Some(0), "a", Some(55.0)),
        record(3, 100, 8, 8, Some(2), "a", Some(64.0)),
    ];
    let mut selection = accept_all(&records, &["a"]);

    selection.deactivate_bad = true;
    let trimmed = build_series(&records, &selection, &ChartStyle::default());
    assert!(trimmed
        .series
        .iter()
        .all(|s| !(s.key.algorithm == Some(0) && s.key.k != 16)));
    assert_eq!(trimmed.series.len(), 2);

    selection.deactivate_bad = false;
    let full = build_series(&records, &selection, &ChartStyle::default());
    assert_eq!(full.series.len(), 3);
}

#[test]
fn builder_is_idempotent() {
    let records = vec![
        record(1, 100, 8, 16, Some(1), "a", Some(70.0)),
        record(2, 300, 16, 8, Some(0), "a", Some(60.0)),
    ];
    let selection = accept_all(&records, &["a"]);
    let style = ChartStyle::default();

    assert_eq!(
        build_series(&records, &selection, &style),
        build_series(&records, &selection, &style)
    );
}

#[test]
fn zero_layers_means_zero_everything() {
    // Deselecting the last layer clears the loaded data upstream, so the
    // builder sees an empty batch.
    let selection = FilterSelection::empty();
    let set = build_series(&[], &selection, &ChartStyle::default());
    assert!(set.series.is_empty());
    assert!(set.axis_ticks.is_empty());
    assert!(filter_records(&[], &selection).is_empty());
}
