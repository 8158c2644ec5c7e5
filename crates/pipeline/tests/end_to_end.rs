//! Full-session pipeline run on a synthetic recording

use feature_engine::{FaultLabels, FEATURE_DIMENSION, MODEL_INPUT_DIMENSION};
use pipeline::{ExportFormat, FeatureDataset, Pipeline, PipelineConfig};
use segmenter::{ConditionLabel, LabelSchedule, SegmenterConfig, WINDOW_LEN};
use std::f64::consts::PI;

const SESSION_WINDOWS: usize = 220;

/// Deterministic recording whose windows all differ
fn recording(windows: usize, tail: usize) -> Vec<f64> {
    let len = windows * WINDOW_LEN + tail;
    (0..len)
        .map(|i| {
            let t = i as f64 / 12_800.0;
            let w = (i / WINDOW_LEN) as f64;
            (2.0 * PI * 19.6667 * t).sin() * (1.0 + 0.01 * w)
                + 0.3 * (2.0 * PI * 157.0 * t).sin()
                + 0.05 * ((i * 7919 % 1009) as f64 / 1009.0 - 0.5)
        })
        .collect()
}

fn session_dataset() -> FeatureDataset {
    let pipeline = Pipeline::new(&PipelineConfig::default()).unwrap();
    pipeline.run(&recording(SESSION_WINDOWS, 3)).unwrap()
}

#[test]
fn test_full_session() {
    let dataset = session_dataset();

    let report = dataset.report();
    assert_eq!(report.windows_formed, SESSION_WINDOWS);
    assert_eq!(report.tail_discarded, 3);
    assert_eq!(report.excluded, 40);
    assert_eq!(report.duplicates, 0);
    assert_eq!(dataset.len(), 180);

    let counts = dataset.label_counts();
    let expected = [
        (ConditionLabel::BearFault, 20),
        (ConditionLabel::BearWarning, 20),
        (ConditionLabel::MisFault, 20),
        (ConditionLabel::Normal, 40),
        (ConditionLabel::RotorFault, 20),
        (ConditionLabel::UnbalFault, 20),
        (ConditionLabel::UnbalWarning, 20),
        (ConditionLabel::VaneFault, 20),
    ];
    assert_eq!(counts.len(), expected.len());
    for (label, count) in expected {
        assert_eq!(counts.get(&label), Some(&count), "{label}");
    }
    assert!(!counts.contains_key(&ConditionLabel::MisWarning));
    assert!(!counts.contains_key(&ConditionLabel::CaviFault));
}

#[test]
fn test_labels_follow_window_position() {
    let dataset = session_dataset();
    let schedule = LabelSchedule::default();

    let mut previous = None;
    for record in dataset.records() {
        assert_eq!(record.end_sample, ((record.window_index + 1) * WINDOW_LEN) as u64);
        assert_eq!(schedule.label_for(record.end_sample), Some(record.label));
        assert_eq!(record.features.labels, FaultLabels::from(record.label));
        if let Some(prev) = previous {
            assert!(record.window_index > prev);
        }
        previous = Some(record.window_index);

        let labels = &record.features.labels;
        assert_eq!(labels.normal + labels.anomaly, 1);
        assert!(labels.severities().iter().filter(|&&s| s > 0).count() <= 1);
    }

    // Window 100 ends at sample 1,292,800: first window of the normal band
    let first_normal = dataset
        .records()
        .iter()
        .find(|r| r.label == ConditionLabel::Normal)
        .unwrap();
    assert_eq!(first_normal.window_index, 100);

    let training = dataset.training_subset();
    assert_eq!(training.len(), 40);
    assert!(training.records().iter().all(|r| r.features.labels.real_normal == 1));
}

#[test]
fn test_rows_are_complete() {
    let dataset = session_dataset();
    assert_eq!(dataset.sentinel_count(), 0);
    for input in dataset.model_inputs() {
        assert_eq!(input.len(), MODEL_INPUT_DIMENSION);
        assert!(input.iter().all(|v| v.is_finite()));
    }

    let mut csv = Vec::new();
    dataset.export(ExportFormat::Csv, &mut csv).unwrap();
    let text = String::from_utf8(csv).unwrap();
    assert_eq!(text.lines().count(), dataset.len() + 1);
    assert!(text
        .lines()
        .all(|line| line.split(',').count() == FEATURE_DIMENSION));

    // 1x harmonic sits at bin 20 of a one-second window
    let harmonic = &dataset.records()[0].features.spectral.harmonics[0];
    assert_eq!((harmonic.bin, harmonic.freq_hz), (20, 20));
}

#[test]
fn test_repeated_and_constant_windows() {
    let window_len = 1024;
    let config = PipelineConfig {
        segmenter: SegmenterConfig {
            window_len,
            excluded: Vec::new(),
            schedule: LabelSchedule::uniform(ConditionLabel::Normal),
        },
        workers: 2,
        ..Default::default()
    };
    let pipeline = Pipeline::new(&config).unwrap();

    let tone: Vec<f64> = (0..window_len).map(|i| (i as f64 * 0.2).sin()).collect();
    let mut stream = Vec::new();
    stream.extend_from_slice(&tone);
    stream.extend(std::iter::repeat(0.0).take(window_len * 3));
    stream.extend_from_slice(&tone);
    stream.extend(std::iter::repeat(1.0).take(5));

    let dataset = pipeline.run(&stream).unwrap();
    assert_eq!(dataset.report().windows_formed, 5);
    assert_eq!(dataset.report().duplicates, 3);
    assert_eq!(dataset.report().tail_discarded, 5);

    let indices: Vec<usize> = dataset.records().iter().map(|r| r.window_index).collect();
    assert_eq!(indices, vec![0, 1]);

    // The all-zero window yields undefined statistics but is kept
    assert!(dataset.records()[1].features.sentinel_count() > 0);
    assert!(dataset.sentinel_count() > 0);
}
