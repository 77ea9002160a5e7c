//! End-to-end tests of the parallel apply surface: every dispatch flavor,
//! ordering guarantees, and invariance across worker and chunk counts.

use parapply::prelude::*;

fn sample_frame() -> DataFrame {
    DataFrame::from_rows(
        vec!["a", "b", "c"],
        vec![
            vec![Value::from(1), Value::from(2), Value::from(3)],
            vec![Value::from(4), Value::from(5), Value::from(6)],
            vec![Value::from(7), Value::from(8), Value::from(9)],
        ],
    )
    .expect("rows are rectangular")
}

fn grouped_frame() -> DataFrame {
    DataFrame::from_rows(
        vec!["g", "x"],
        vec![
            vec![Value::from("a"), Value::from(1)],
            vec![Value::from("b"), Value::from(2)],
            vec![Value::from("a"), Value::from(3)],
            vec![Value::from("b"), Value::from(4)],
            vec![Value::from("b"), Value::from(5)],
        ],
    )
    .expect("rows are rectangular")
}

#[test]
fn test_row_sum_yields_labeled_vector_in_index_order() {
    let df = sample_frame();
    let out = df
        .apply_parallel(|row| row.sum(), ApplyOptions::new().num_processes(2))
        .expect("dispatch succeeds");

    let series = out.into_series().expect("scalar results produce a series");
    assert_eq!(
        series.values(),
        &[Value::Int(6), Value::Int(15), Value::Int(24)]
    );
    assert_eq!(
        series.index().labels(),
        &[Label::scalar(0), Label::scalar(1), Label::scalar(2)]
    );
}

#[test]
fn test_worker_count_does_not_change_output() {
    let df = sample_frame();
    let one = df
        .apply_parallel(|row| row.sum(), ApplyOptions::new().num_processes(1))
        .unwrap();
    let four = df
        .apply_parallel(|row| row.sum(), ApplyOptions::new().num_processes(4))
        .unwrap();
    assert_eq!(one, four);
}

#[test]
fn test_chunk_count_does_not_change_output() {
    let df = sample_frame();
    let baseline = df
        .apply_parallel(|row| row.sum(), ApplyOptions::new().num_processes(2))
        .unwrap();
    for n_chunks in [2, 3, 8] {
        let chunked = df
            .apply_parallel(
                |row| row.sum(),
                ApplyOptions::new().num_processes(2).n_chunks(n_chunks),
            )
            .unwrap();
        assert_eq!(chunked, baseline, "n_chunks={} changed the output", n_chunks);
    }
}

#[test]
fn test_series_identity_round_trips() {
    let series = Series::from_values(vec![10, 20, 30])
        .with_name("x")
        .with_index(Index::named(
            "idx",
            vec![Label::scalar("p"), Label::scalar("q"), Label::scalar("r")],
        ))
        .unwrap();

    let out = series
        .apply_parallel(|v| v, ApplyOptions::new().num_processes(2))
        .unwrap();

    let result = out.into_series().unwrap();
    assert_eq!(result.values(), series.values());
    assert_eq!(result.index(), series.index());
}

#[test]
fn test_series_single_element_containers_flatten() {
    let series = Series::from_values(vec![1, 2, 3]);
    let out = series
        .apply_parallel(
            |v| Series::new(vec![v]),
            ApplyOptions::new().num_processes(2),
        )
        .unwrap();

    let result = out.into_series().expect("flattened to a plain series");
    assert_eq!(
        result.values(),
        &[Value::Int(1), Value::Int(2), Value::Int(3)]
    );
}

#[test]
fn test_column_dispatch_scalars_indexed_by_column_names() {
    let df = sample_frame();
    let out = df
        .apply_parallel(
            |col| col.sum(),
            ApplyOptions::new().num_processes(2).axis(Axis::Columns),
        )
        .unwrap();

    let series = out.into_series().unwrap();
    assert_eq!(
        series.index().labels(),
        &[Label::scalar("a"), Label::scalar("b"), Label::scalar("c")]
    );
    assert_eq!(
        series.values(),
        &[Value::Int(12), Value::Int(15), Value::Int(18)]
    );
}

#[test]
fn test_row_dispatch_vector_results_build_frame() {
    let df = sample_frame();
    let out = df
        .apply_parallel(
            |row| {
                Series::new(vec![row.sum(), Value::from(row.len())])
                    .with_index(Index::from_labels(vec![
                        Label::scalar("sum"),
                        Label::scalar("len"),
                    ]))
                    .unwrap()
            },
            ApplyOptions::new().num_processes(2),
        )
        .unwrap();

    let frame = out.into_frame().expect("vector results build a frame");
    assert_eq!(frame.columns(), &["sum".to_string(), "len".to_string()]);
    assert_eq!(frame.n_rows(), 3);
    assert_eq!(frame.cell(2, 0), Some(&Value::Int(24)));
    assert_eq!(frame.cell(2, 1), Some(&Value::Int(3)));
    // Output rows follow the original index.
    assert_eq!(frame.index().labels()[0], Label::scalar(0));
}

#[test]
fn test_group_count_scenario() {
    let grouped = grouped_frame().groupby(&["g"]).unwrap();
    let out = grouped
        .apply_parallel(
            |group| group.n_rows(),
            ApplyOptions::new().num_processes(2).result_column("len"),
        )
        .unwrap();

    let frame = out.into_frame().unwrap();
    assert_eq!(frame.columns(), &["len".to_string()]);
    assert_eq!(frame.index().names()[0].as_deref(), Some("g"));
    assert_eq!(frame.index().labels()[0], Label::scalar("a"));
    assert_eq!(frame.cell(0, 0), Some(&Value::Int(2)));
    assert_eq!(frame.index().labels()[1], Label::scalar("b"));
    assert_eq!(frame.cell(1, 0), Some(&Value::Int(3)));
}

#[test]
fn test_group_identity_round_trips_with_key_levels() {
    let df = grouped_frame();
    let grouped = df.groupby(&["g"]).unwrap();
    let out = grouped
        .apply_parallel(|group| group, ApplyOptions::new().num_processes(2))
        .unwrap();

    let frame = out.into_frame().unwrap();
    assert_eq!(frame.columns(), df.columns());
    assert_eq!(frame.n_rows(), df.n_rows());
    assert_eq!(frame.index().levels(), 2);
    assert_eq!(frame.index().names()[0].as_deref(), Some("g"));

    // Rows are regrouped: all of group "a" first, then group "b", each row
    // keeping its original label as the inner level.
    let expected_labels = vec![
        Label::composite(vec![Value::from("a"), Value::from(0)]),
        Label::composite(vec![Value::from("a"), Value::from(2)]),
        Label::composite(vec![Value::from("b"), Value::from(1)]),
        Label::composite(vec![Value::from("b"), Value::from(3)]),
        Label::composite(vec![Value::from("b"), Value::from(4)]),
    ];
    assert_eq!(frame.index().labels(), expected_labels.as_slice());
    // First "a" row carries x = 1, first "b" row x = 2.
    assert_eq!(frame.cell(0, 1), Some(&Value::Int(1)));
    assert_eq!(frame.cell(2, 1), Some(&Value::Int(2)));
}

#[test]
fn test_group_vector_results_one_row_per_group() {
    let grouped = grouped_frame().groupby(&["g"]).unwrap();
    let out = grouped
        .apply_parallel(
            |group| {
                let x = group.column("x").unwrap();
                Series::new(vec![x.sum(), Value::from(x.len())])
                    .with_index(Index::from_labels(vec![
                        Label::scalar("total"),
                        Label::scalar("count"),
                    ]))
                    .unwrap()
            },
            ApplyOptions::new().num_processes(2),
        )
        .unwrap();

    let frame = out.into_frame().unwrap();
    assert_eq!(frame.columns(), &["total".to_string(), "count".to_string()]);
    assert_eq!(frame.index().names()[0].as_deref(), Some("g"));
    assert_eq!(frame.cell(0, 0), Some(&Value::Int(4)));
    assert_eq!(frame.cell(1, 0), Some(&Value::Int(11)));
}

#[test]
fn test_composite_group_keys() {
    let df = DataFrame::from_rows(
        vec!["g", "h", "x"],
        vec![
            vec![Value::from("a"), Value::from(1), Value::from(10)],
            vec![Value::from("a"), Value::from(2), Value::from(20)],
            vec![Value::from("a"), Value::from(1), Value::from(30)],
        ],
    )
    .unwrap();

    let out = df
        .groupby(&["g", "h"])
        .unwrap()
        .apply_parallel(|group| group.n_rows(), ApplyOptions::new().num_processes(2))
        .unwrap();

    let frame = out.into_frame().unwrap();
    assert_eq!(frame.index().levels(), 2);
    assert_eq!(frame.index().names()[1].as_deref(), Some("h"));
    assert_eq!(
        frame.index().labels()[0],
        Label::composite(vec![Value::from("a"), Value::from(1)])
    );
    assert_eq!(frame.cell(0, 0), Some(&Value::Int(2)));
    assert_eq!(frame.cell(1, 0), Some(&Value::Int(1)));
}

#[test]
fn test_closure_capture_forwards_extra_arguments() {
    let offset = 100i64;
    let df = sample_frame();
    let out = df
        .apply_parallel(
            move |row| match row.sum() {
                Value::Int(v) => Value::Int(v + offset),
                other => other,
            },
            ApplyOptions::new().num_processes(2),
        )
        .unwrap();

    let series = out.into_series().unwrap();
    assert_eq!(series.values()[0], Value::Int(106));
}

#[test]
fn test_applied_serializes() {
    let df = sample_frame();
    let out = df
        .apply_parallel(|row| row.sum(), ApplyOptions::new().num_processes(1))
        .unwrap();

    let json = serde_json::to_string(&out).expect("applied output serializes");
    let back: Applied = serde_json::from_str(&json).expect("applied output deserializes");
    assert_eq!(back, out);
}
