// File: crates/chart-core/tests/aggregate.rs
// Purpose: Block reducers and candlestick summaries.

use chart_core::{aggregate, aggregate_candlestick, Aggregation, Candle};

#[test]
fn empty_input_is_a_gap_for_every_kind() {
    for kind in Aggregation::ALL {
        assert_eq!(aggregate(&[], kind), None, "{kind}");
    }
    assert_eq!(aggregate_candlestick(&[]), None);
}

#[test]
fn min_mean_max_are_ordered() {
    let samples = [
        vec![3.0],
        vec![1.0, 2.0, 9.0],
        vec![-4.5, 0.25, 0.25, 7.0, -1.0],
        vec![1e9, -1e9, 3.0],
        vec![f64::MAX, f64::MAX],
        vec![f64::MAX, f64::MAX / 2.0, -f64::MAX],
    ];
    for s in &samples {
        let lo = aggregate(s, Aggregation::Min).unwrap();
        let mean = aggregate(s, Aggregation::Mean).unwrap();
        let hi = aggregate(s, Aggregation::Max).unwrap();
        assert!(lo <= mean && mean <= hi, "{s:?}: {lo} {mean} {hi}");
    }
}

#[test]
fn median_averages_middle_pair_on_even_length() {
    assert_eq!(aggregate(&[4.0, 1.0, 3.0, 2.0], Aggregation::Median), Some(2.5));
    assert_eq!(aggregate(&[5.0, 1.0, 3.0], Aggregation::Median), Some(3.0));
}

#[test]
fn median_does_not_reorder_caller_samples() {
    let samples = vec![9.0, 1.0, 5.0];
    let _ = aggregate(&samples, Aggregation::Median);
    assert_eq!(samples, vec![9.0, 1.0, 5.0]);
}

#[test]
fn first_and_last_follow_input_order() {
    let samples = [7.0, 1.0, 9.0, 4.0];
    assert_eq!(aggregate(&samples, Aggregation::First), Some(7.0));
    assert_eq!(aggregate(&samples, Aggregation::Last), Some(4.0));
}

#[test]
fn candlestick_single_sample_is_flat() {
    let k = aggregate_candlestick(&[3.5]).unwrap();
    assert_eq!(k, Candle { o: 3.5, h: 3.5, l: 3.5, c: 3.5 });
}

#[test]
fn candlestick_open_close_positional_high_low_by_value() {
    let k = aggregate_candlestick(&[4.0, 9.0, 1.0, 6.0]).unwrap();
    assert_eq!(k, Candle { o: 4.0, h: 9.0, l: 1.0, c: 6.0 });
}

#[test]
fn mean_and_median_of_huge_samples_do_not_overflow() {
    assert_eq!(aggregate(&[f64::MAX, f64::MAX], Aggregation::Mean), Some(f64::MAX));
    assert_eq!(aggregate(&[f64::MAX, -f64::MAX], Aggregation::Mean), Some(0.0));
    assert_eq!(aggregate(&[f64::MAX, f64::MAX], Aggregation::Median), Some(f64::MAX));
}

#[test]
fn non_finite_samples_are_skipped_by_every_kind() {
    let samples = [f64::NAN, 1.0, f64::INFINITY, 2.0, f64::NEG_INFINITY];
    assert_eq!(aggregate(&samples, Aggregation::Mean), Some(1.5));
    assert_eq!(aggregate(&samples, Aggregation::Min), Some(1.0));
    assert_eq!(aggregate(&samples, Aggregation::Max), Some(2.0));
    assert_eq!(aggregate(&samples, Aggregation::Median), Some(1.5));
    assert_eq!(aggregate(&samples, Aggregation::First), Some(1.0));
    assert_eq!(aggregate(&samples, Aggregation::Last), Some(2.0));
    assert_eq!(aggregate(&samples, Aggregation::Candlestick), Some(2.0));
}

#[test]
fn all_non_finite_block_is_a_gap() {
    let samples = [f64::NAN, f64::INFINITY, f64::NEG_INFINITY];
    for kind in Aggregation::ALL {
        assert_eq!(aggregate(&samples, kind), None, "{kind}");
    }
    assert_eq!(aggregate_candlestick(&samples), None);
    assert_eq!(aggregate_candlestick(&[f64::NAN]), None);
}

#[test]
fn candlestick_ignores_non_finite_samples() {
    let k = aggregate_candlestick(&[f64::NAN, 4.0, f64::INFINITY, 1.0, 6.0, f64::NAN]).unwrap();
    assert_eq!(k, Candle { o: 4.0, h: 6.0, l: 1.0, c: 6.0 });
    assert!(k.l <= k.h);
}

#[test]
fn aggregation_names_round_trip() {
    for kind in Aggregation::ALL {
        assert_eq!(kind.as_str().parse::<Aggregation>().unwrap(), kind);
    }
    assert_eq!("MEDIAN".parse::<Aggregation>().unwrap(), Aggregation::Median);
    assert!("average".parse::<Aggregation>().is_err());
}

#[test]
fn candle_serializes_with_long_names() {
    let json = serde_json::to_value(Candle { o: 1.0, h: 2.0, l: 0.5, c: 1.5 }).unwrap();
    assert_eq!(json, serde_json::json!({"open": 1.0, "high": 2.0, "low": 0.5, "close": 1.5}));
}
