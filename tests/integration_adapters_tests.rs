use approx::{assert_abs_diff_eq, assert_relative_eq};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use isotonic_rs::prelude::*;

// ============================================================================
// Helper Functions
// ============================================================================

const REFERENCE_LABELS: [f64; 12] = [1.0, 2.0, 3.0, 3.0, 1.0, 6.0, 7.0, 8.0, 11.0, 9.0, 10.0, 12.0];

fn positions(n: usize) -> Vec<f64> {
    (1..=n).map(|i| i as f64).collect()
}

fn reference_model() -> IsotonicModel<f64> {
    Isotonic::new()
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&positions(12), &REFERENCE_LABELS, None)
        .unwrap()
}

// Distinct x with integer labels and weights keep every pooled sum exact,
// so levels are bit-identical across split points.
fn random_integer_data(seed: u64, n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut x: Vec<f64> = (0..n).map(|i| i as f64).collect();
    x.shuffle(&mut rng);
    let y: Vec<f64> = (0..n).map(|_| rng.random_range(-30i32..30) as f64).collect();
    let w: Vec<f64> = (0..n).map(|_| rng.random_range(1i32..4) as f64).collect();
    (x, y, w)
}

// Labels in tenths are not exactly representable, so the partial sums of
// each partitioning round differently.
fn random_tenths_data(seed: u64, n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let x: Vec<f64> = (0..n).map(|_| rng.random_range(0i32..150) as f64).collect();
    let y: Vec<f64> = (0..n).map(|_| rng.random_range(0i32..10) as f64 * 0.1).collect();
    let w: Vec<f64> = (0..n)
        .map(|_| [1.0, 0.3, 2.0][rng.random_range(0usize..3)])
        .collect();
    (x, y, w)
}

// ============================================================================
// Batch Reference Tests
// ============================================================================

#[test]
fn test_batch_reference_fit() {
    let model = reference_model();

    assert_eq!(
        model.boundaries(),
        &[1.0, 2.0, 3.0, 5.0, 6.0, 7.0, 8.0, 9.0, 11.0, 12.0]
    );
    let expected = [1.0, 2.0, 7.0 / 3.0, 7.0 / 3.0, 6.0, 7.0, 8.0, 10.0, 10.0, 12.0];
    assert_eq!(model.predictions().len(), expected.len());
    for (p, e) in model.predictions().iter().zip(expected.iter()) {
        assert_abs_diff_eq!(*p, *e, epsilon = 1e-14);
    }
}

#[test]
fn test_batch_reference_predictions() {
    let model = reference_model();

    let predictions = model.predict_batch(&[0.0, 1.0, 9.5, 12.0, 13.0]).unwrap();
    let expected = [1.0, 1.0, 10.0, 12.0, 12.0];
    for (p, e) in predictions.iter().zip(expected.iter()) {
        assert_abs_diff_eq!(*p, *e, epsilon = 1e-14);
    }
}

#[test]
fn test_batch_predictions_interpolate_between_pools() {
    let model = reference_model();

    // Between boundary 5 (7/3) and 6 (6)
    assert_relative_eq!(model.predict(5.5).unwrap(), (7.0 / 3.0 + 6.0) / 2.0);
    // Inside the 3..5 pool
    assert_eq!(model.predict(4.0).unwrap(), 7.0 / 3.0);
    // Exactly at a boundary
    assert_eq!(model.predict(8.0).unwrap(), 8.0);
}

#[test]
fn test_batch_predict_nan_and_infinite_queries() {
    let model = reference_model();

    assert!(model.predict(f64::NAN).unwrap().is_nan());
    assert_eq!(model.predict(f64::NEG_INFINITY).unwrap(), 1.0);
    assert_eq!(model.predict(f64::INFINITY).unwrap(), 12.0);
}

#[test]
fn test_batch_antitonic_mirrors_isotonic() {
    let x = positions(12);
    let negated: Vec<f64> = REFERENCE_LABELS.iter().map(|y| -y).collect();

    let iso = reference_model();
    let anti = Isotonic::new()
        .antitonic()
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&x, &negated, None)
        .unwrap();

    assert!(!anti.is_isotonic());
    assert_eq!(anti.boundaries(), iso.boundaries());
    for (a, i) in anti.predictions().iter().zip(iso.predictions().iter()) {
        assert_eq!(*a, -*i);
    }
    assert!(anti.predictions().windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_batch_unsorted_input_and_duplicates() {
    // x = 2 appears three times with mean label 3; x = 1 has label 5
    let x = [2.0, 3.0, 1.0, 2.0, 2.0];
    let y = [1.0, 6.0, 5.0, 3.0, 5.0];

    let model = Isotonic::new()
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&x, &y, None)
        .unwrap();

    // 5 at x = 1 violates 3 (weight 3) at x = 2: (5 + 9) / 4 = 3.5
    assert_eq!(model.boundaries(), &[1.0, 2.0, 3.0]);
    assert_eq!(model.predictions(), &[3.5, 3.5, 6.0]);
}

#[test]
fn test_batch_weights_shift_pooled_level() {
    let x = [1.0, 2.0];
    let y = [4.0, 0.0];

    let model = Isotonic::new()
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&x, &y, Some(&[1.0, 3.0][..]))
        .unwrap();

    assert_eq!(model.predictions(), &[1.0, 1.0]);
}

#[test]
fn test_batch_single_point() {
    let model = Isotonic::new()
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&[3.0], &[7.0], None)
        .unwrap();

    assert_eq!(model.boundaries(), &[3.0]);
    assert_eq!(model.predict(-1.0).unwrap(), 7.0);
    assert_eq!(model.predict(100.0).unwrap(), 7.0);
}

#[test]
fn test_batch_f32() {
    let model = Isotonic::new()
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&[1.0f32, 2.0, 3.0], &[2.0, 1.0, 3.0], None)
        .unwrap();

    assert_eq!(model.predictions(), &[1.5f32, 1.5, 3.0]);
}

#[test]
fn test_batch_huge_labels_stay_finite() {
    let processor = Isotonic::new().adapter(Batch).build().unwrap();

    // Opposite labels at the same x cancel even though w * y overflows
    let model = processor
        .fit(&[1.0, 1.0, 2.0], &[1e300, -1e300, 5.0], Some(&[1e10, 1e10, 1.0][..]))
        .unwrap();
    assert_eq!(model.boundaries(), &[1.0, 2.0]);
    assert_eq!(model.predictions(), &[0.0, 5.0]);

    // Pooling a huge label with a small one
    let model: IsotonicModel<f64> = processor
        .fit(&[1.0, 2.0], &[1e300, 0.0], Some(&[1e10, 1.0][..]))
        .unwrap();
    let expected = 1e300 * (1e10 / (1e10 + 1.0));
    for p in model.predictions() {
        assert!(p.is_finite());
        assert_relative_eq!(*p, expected, max_relative = 1e-12);
    }
    let rebuilt = IsotonicModel::new(
        model.boundaries().to_vec(),
        model.predictions().to_vec(),
        model.is_isotonic(),
    )
    .unwrap();
    assert_eq!(rebuilt, model);

    // Same result when the pool straddles a partition cut
    let split = Isotonic::new()
        .partitions(2)
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&[1.0, 2.0], &[1e300, 0.0], Some(&[1e10, 1.0][..]))
        .unwrap();
    assert_eq!(split, model);
}

#[test]
fn test_batch_rejects_overflowing_total_weight() {
    let processor = Isotonic::new().adapter(Batch).build().unwrap();

    assert!(matches!(
        processor.fit(&[1.0, 2.0], &[1.0, 0.0], Some(&[f64::MAX, f64::MAX][..])),
        Err(IsotonicError::InvalidNumericValue(_))
    ));
}

// ============================================================================
// Partitioning Tests
// ============================================================================

#[test]
fn test_partition_count_does_not_change_model() {
    let (x, y, w) = random_integer_data(2024, 400);

    let reference = Isotonic::new()
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&x, &y, Some(&w[..]))
        .unwrap();

    for partitions in [2, 3, 8, 50, 1000] {
        for reduction in [Sequential, Balanced] {
            let model = Isotonic::new()
                .partitions(partitions)
                .reduction(reduction)
                .adapter(Batch)
                .build()
                .unwrap()
                .fit(&x, &y, Some(&w[..]))
                .unwrap();
            assert_eq!(model, reference, "partitions={} {:?}", partitions, reduction);
        }
    }
}

#[test]
fn test_partition_count_does_not_change_model_on_inexact_labels() {
    for seed in 0..40 {
        let (x, y, w) = random_tenths_data(seed, 200);
        let fit_with = |partitions: usize, reduction| {
            Isotonic::new()
                .partitions(partitions)
                .reduction(reduction)
                .adapter(Batch)
                .build()
                .unwrap()
                .fit(&x, &y, Some(&w[..]))
                .unwrap()
        };

        let reference = fit_with(1, Sequential);
        for partitions in [2, 3, 7, 13] {
            for reduction in [Sequential, Balanced] {
                let model = fit_with(partitions, reduction);
                assert_eq!(
                    model.boundaries(),
                    reference.boundaries(),
                    "seed={} partitions={} {:?}",
                    seed,
                    partitions,
                    reduction
                );
                assert_eq!(
                    model.predictions(),
                    reference.predictions(),
                    "seed={} partitions={} {:?}",
                    seed,
                    partitions,
                    reduction
                );
            }
        }
    }
}

#[test]
fn test_parallel_flag_does_not_change_model() {
    let (x, y, w) = random_integer_data(99, 2000);

    let serial = Isotonic::new()
        .partitions(16)
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&x, &y, Some(&w[..]))
        .unwrap();
    let parallel = Isotonic::new()
        .partitions(16)
        .reduction(Balanced)
        .parallel(true)
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&x, &y, Some(&w[..]))
        .unwrap();

    assert_eq!(serial, parallel);
}

#[test]
fn test_large_predict_batch_preserves_order() {
    let (x, y, w) = random_integer_data(5, 1000);
    let model = Isotonic::new()
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&x, &y, Some(&w[..]))
        .unwrap();

    let queries: Vec<f64> = (0..10_000).map(|i| i as f64 * 0.05 - 10.0).collect();
    let batch = model.predict_batch(&queries).unwrap();

    assert_eq!(batch.len(), queries.len());
    for (q, p) in queries.iter().zip(batch.iter()) {
        assert_eq!(model.predict(*q).unwrap(), *p);
    }
    assert!(batch.windows(2).all(|w| w[0] <= w[1] + 1e-9));
}

// ============================================================================
// Streaming Tests
// ============================================================================

#[test]
fn test_streaming_matches_batch() {
    let mut x = positions(12);
    x.iter_mut().for_each(|v| *v *= 2.0);

    let batch = Isotonic::new()
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&x, &REFERENCE_LABELS, None)
        .unwrap();

    for chunk_size in 1..=12 {
        let mut processor = Isotonic::new().adapter(Streaming).build().unwrap();
        for (xs, ys) in x.chunks(chunk_size).zip(REFERENCE_LABELS.chunks(chunk_size)) {
            processor.process_chunk(xs, ys, None).unwrap();
        }
        let streamed = processor.finalize().unwrap();
        assert_eq!(streamed, batch, "chunk size {}", chunk_size);
    }
}

#[test]
fn test_streaming_duplicate_x_across_chunks() {
    let mut processor = Isotonic::new().adapter(Streaming).build().unwrap();

    // x = 2 spans three chunks; together its labels average to 3
    processor.process_chunk(&[1.0, 2.0], &[5.0, 1.0], None).unwrap();
    processor.process_chunk(&[2.0], &[3.0], None).unwrap();
    processor.process_chunk(&[2.0, 3.0], &[5.0, 6.0], None).unwrap();
    let streamed = processor.finalize().unwrap();

    let batch = Isotonic::new()
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&[2.0, 3.0, 1.0, 2.0, 2.0], &[1.0, 6.0, 5.0, 3.0, 5.0], None)
        .unwrap();

    assert_eq!(streamed, batch);
    assert_eq!(streamed.predictions(), &[3.5, 3.5, 6.0]);
}

#[test]
fn test_streaming_unordered_chunk_is_rejected() {
    let mut processor = Isotonic::new().adapter(Streaming).build().unwrap();
    processor.process_chunk(&[1.0, 5.0], &[1.0, 2.0], None).unwrap();

    let err = processor.process_chunk(&[3.0, 6.0], &[1.0, 1.0], None).unwrap_err();
    assert_eq!(
        err,
        IsotonicError::UnorderedPartition {
            previous: 5.0,
            next: 3.0
        }
    );
    assert!(err.is_invalid_input());

    // The rejected chunk left no trace; a well-ordered one is still accepted
    processor.process_chunk(&[6.0], &[3.0], None).unwrap();
    assert_eq!(processor.chunks_seen(), 2);
    assert_eq!(processor.points_seen(), 3);

    let model = processor.finalize().unwrap();
    assert_eq!(model.boundaries(), &[1.0, 5.0, 6.0]);
}

#[test]
fn test_streaming_summary_and_reset() {
    let mut processor = Isotonic::new().adapter(Streaming).build().unwrap();

    let summary = processor
        .process_chunk(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0], None)
        .unwrap();
    // The last group is held back until the next chunk or finalize
    assert_eq!(summary, ChunkSummary { points: 3, pools: 1 });

    processor.reset();
    assert_eq!(processor.points_seen(), 0);
    assert_eq!(processor.finalize(), Err(IsotonicError::EmptyInput));
}

#[test]
fn test_streaming_antitonic_with_weights() {
    let mut processor = Isotonic::new()
        .isotonic(false)
        .adapter(Streaming)
        .build()
        .unwrap();

    processor
        .process_chunk(&[1.0, 2.0], &[1.0, 4.0], Some(&[3.0, 1.0][..]))
        .unwrap();
    processor.process_chunk(&[3.0], &[0.0], None).unwrap();
    let model = processor.finalize().unwrap();

    // (1 * 3 + 4 * 1) / 4 = 1.75 across x = 1..2, then 0
    assert!(!model.is_isotonic());
    assert_eq!(model.boundaries(), &[1.0, 2.0, 3.0]);
    assert_eq!(model.predictions(), &[1.75, 1.75, 0.0]);
}

#[test]
fn test_streaming_rejects_overflowing_total_weight() {
    let mut processor = Isotonic::new().adapter(Streaming).build().unwrap();
    processor
        .process_chunk(&[1.0], &[1.0], Some(&[f64::MAX][..]))
        .unwrap();

    assert!(matches!(
        processor.process_chunk(&[2.0], &[0.0], Some(&[f64::MAX][..])),
        Err(IsotonicError::InvalidNumericValue(_))
    ));
    assert_eq!(processor.chunks_seen(), 1);

    let model = processor.finalize().unwrap();
    assert_eq!(model.predictions(), &[1.0]);
}

#[test]
fn test_streaming_finalize_resets_processor() {
    let mut processor = Isotonic::new().adapter(Streaming).build().unwrap();
    processor.process_chunk(&[1.0], &[1.0], None).unwrap();
    processor.finalize().unwrap();

    // Reusable for a second, independent fit
    processor.process_chunk(&[0.0], &[9.0], None).unwrap();
    let model = processor.finalize().unwrap();
    assert_eq!(model.boundaries(), &[0.0]);
    assert_eq!(model.predictions(), &[9.0]);
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn test_invalid_input_errors() {
    let processor = Isotonic::new().adapter(Batch).build().unwrap();

    assert_eq!(
        processor.fit::<f64>(&[], &[], None),
        Err(IsotonicError::EmptyInput)
    );
    assert_eq!(
        processor.fit(&[1.0, 2.0], &[1.0], None),
        Err(IsotonicError::MismatchedInputs { x_len: 2, y_len: 1 })
    );
    assert!(matches!(
        processor.fit(&[1.0, 2.0], &[1.0, 2.0], Some(&[1.0, -1.0][..])),
        Err(IsotonicError::InvalidWeight { index: 1, .. })
    ));
    assert!(matches!(
        processor.fit(&[1.0, f64::NAN], &[1.0, 2.0], None),
        Err(IsotonicError::InvalidNumericValue(_))
    ));
}

#[test]
fn test_builder_errors() {
    assert_eq!(
        Isotonic::new().partitions(0).adapter(Batch).build().unwrap_err(),
        IsotonicError::InvalidPartitions(0)
    );
    assert_eq!(
        Isotonic::new()
            .partitions(2)
            .partitions(3)
            .adapter(Batch)
            .build()
            .unwrap_err(),
        IsotonicError::DuplicateParameter {
            parameter: "partitions"
        }
    );
    assert!(matches!(
        Isotonic::new()
            .isotonic(true)
            .antitonic()
            .adapter(Streaming)
            .build::<f64>(),
        Err(IsotonicError::DuplicateParameter {
            parameter: "isotonic"
        })
    ));
}

#[test]
fn test_builder_config_is_forwarded() {
    let processor = Isotonic::new()
        .antitonic()
        .partitions(4)
        .reduction(Balanced)
        .adapter(Batch)
        .build()
        .unwrap();

    let config = processor.config();
    assert!(!config.isotonic);
    assert_eq!(config.partitions, 4);
    assert_eq!(config.reduction, Balanced);
    assert!(!config.parallel);
}

// ============================================================================
// Convenience Function Tests
// ============================================================================

#[test]
fn test_fit_from_triples() {
    let triples: Vec<(f64, f64, f64)> = REFERENCE_LABELS
        .iter()
        .enumerate()
        .map(|(i, &y)| ((i + 1) as f64, y, 1.0))
        .collect();

    let model = fit(&triples, true).unwrap();
    assert_eq!(model, reference_model());
}

#[test]
fn test_fit_from_points() {
    let points = [
        WeightedPoint::new(1.0, 3.0, 1.0),
        WeightedPoint::new(2.0, 1.0, 1.0),
    ];

    let model = fit(&points, false).unwrap();
    assert_eq!(model.predictions(), &[3.0, 1.0]);

    assert_eq!(
        fit::<f64, WeightedPoint<f64>>(&[], true),
        Err(IsotonicError::EmptyInput)
    );
}
