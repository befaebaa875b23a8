use super::{parse_level, poison_file, poison_records, rows_to_poison, validate_level, PoisonError};
use crate::logic::dataset::{read_dataset, read_from, write_dataset, DatasetRecord};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::tempdir;
use std::fs;

const SPECIES: [&str; 3] = ["setosa", "versicolor", "virginica"];

/// 150 rows, 50 per species, like the real Iris file
fn iris_like() -> Vec<DatasetRecord> {
    (0..150)
        .map(|i| DatasetRecord {
            sepal_length: 4.0 + (i % 30) as f64 * 0.1,
            sepal_width: 2.0 + (i % 20) as f64 * 0.1,
            petal_length: 1.0 + (i % 50) as f64 * 0.1,
            petal_width: 0.1 + (i % 25) as f64 * 0.1,
            species: SPECIES[i / 50].to_string(),
        })
        .collect()
}

fn changed_rows(before: &[DatasetRecord], after: &[DatasetRecord]) -> Vec<usize> {
    before
        .iter()
        .zip(after)
        .enumerate()
        .filter(|(_, (a, b))| a.species != b.species)
        .map(|(i, _)| i)
        .collect()
}

#[test]
fn test_level_validation() {
    assert!(validate_level(0.0).is_ok());
    assert!(validate_level(1.0).is_ok());
    assert!(matches!(validate_level(-0.1), Err(PoisonError::InvalidLevel(_))));
    assert!(matches!(validate_level(1.01), Err(PoisonError::InvalidLevel(_))));
    assert!(matches!(validate_level(f64::NAN), Err(PoisonError::InvalidLevel(_))));
}

#[test]
fn test_rows_to_poison_floors() {
    assert_eq!(rows_to_poison(150, 0.1), 15);
    assert_eq!(rows_to_poison(150, 0.05), 7);
    assert_eq!(rows_to_poison(150, 0.0), 0);
    assert_eq!(rows_to_poison(150, 1.0), 150);
    assert_eq!(rows_to_poison(0, 0.5), 0);
}

#[test]
fn test_ten_percent_of_iris_changes_fifteen_labels() {
    let original = iris_like();
    let mut poisoned = original.clone();
    let mut rng = StdRng::seed_from_u64(42);

    let report = poison_records(&mut poisoned, 0.1, &mut rng).unwrap();

    assert_eq!(poisoned.len(), 150);
    assert_eq!(report.poisoned_count(), 15);
    assert_eq!(changed_rows(&original, &poisoned), report.poisoned_rows);
}

#[test]
fn test_every_level_changes_exactly_floor_rows() {
    let original = iris_like();

    for step in 0..=20 {
        let level = step as f64 / 20.0;
        let mut poisoned = original.clone();
        let mut rng = StdRng::seed_from_u64(step);

        poison_records(&mut poisoned, level, &mut rng).unwrap();

        let changed = changed_rows(&original, &poisoned);
        assert_eq!(poisoned.len(), original.len());
        assert_eq!(changed.len(), rows_to_poison(150, level), "level {}", level);

        for i in changed {
            assert_ne!(poisoned[i].species, original[i].species);
            assert!(SPECIES.contains(&poisoned[i].species.as_str()));
        }
    }
}

#[test]
fn test_features_are_never_modified() {
    let original = iris_like();
    let mut poisoned = original.clone();
    poison_records(&mut poisoned, 1.0, &mut StdRng::seed_from_u64(7)).unwrap();

    for (a, b) in original.iter().zip(&poisoned) {
        assert_eq!(a.features(), b.features());
    }
}

#[test]
fn test_zero_level_is_identity() {
    let original = iris_like();
    let mut poisoned = original.clone();
    let report = poison_records(&mut poisoned, 0.0, &mut StdRng::seed_from_u64(1)).unwrap();

    assert_eq!(report.poisoned_count(), 0);
    assert_eq!(poisoned, original);
}

#[test]
fn test_single_label_dataset_cannot_be_poisoned() {
    let mut records: Vec<_> = iris_like().into_iter().take(10).collect();
    let result = poison_records(&mut records, 0.5, &mut StdRng::seed_from_u64(3));
    assert!(matches!(result, Err(PoisonError::NotEnoughLabels { labels: 1, rows: 5 })));
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let mut a = iris_like();
    let mut b = iris_like();
    poison_records(&mut a, 0.3, &mut StdRng::seed_from_u64(99)).unwrap();
    poison_records(&mut b, 0.3, &mut StdRng::seed_from_u64(99)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_poison_file_leaves_source_untouched() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("iris.csv");
    let dest = dir.path().join("out").join("iris_poisoned.csv");
    write_dataset(&source, &iris_like()).unwrap();
    let source_bytes = fs::read(&source).unwrap();

    let report = poison_file(&source, &dest, 0.1, Some(5)).unwrap();

    assert_eq!(fs::read(&source).unwrap(), source_bytes);
    let written = read_dataset(&dest).unwrap();
    assert_eq!(written.len(), 150);
    assert_eq!(changed_rows(&iris_like(), &written).len(), 15);
    assert_eq!(report.labels, SPECIES);
}

#[test]
fn test_poison_file_zero_level_copies() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("iris.csv");
    let dest = dir.path().join("copy.csv");
    write_dataset(&source, &iris_like()).unwrap();

    poison_file(&source, &dest, 0.0, None).unwrap();

    assert_eq!(fs::read(&dest).unwrap(), fs::read(&source).unwrap());
}

#[test]
fn test_invalid_level_fails_before_io() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("does-not-exist.csv");
    let dest = dir.path().join("out.csv");

    let result = poison_file(&source, &dest, 1.5, None);

    assert!(matches!(result, Err(PoisonError::InvalidLevel(_))));
    assert!(!dest.exists());
}

#[test]
fn test_missing_source_is_a_dataset_error() {
    let dir = tempdir().unwrap();
    let result = poison_file(&dir.path().join("nope.csv"), &dir.path().join("out.csv"), 0.1, None);
    assert!(matches!(result, Err(PoisonError::Dataset(_))));
}

#[test]
fn test_parsed_sample_round_trip() {
    let csv = "sepal_length,sepal_width,petal_length,petal_width,species\n5.1,3.5,1.4,0.2,setosa\n7.0,3.2,4.7,1.4,versicolor\n";
    let mut records = read_from(csv.as_bytes()).unwrap();
    let report = poison_records(&mut records, 1.0, &mut StdRng::seed_from_u64(0)).unwrap();

    assert_eq!(report.poisoned_rows, vec![0, 1]);
    assert_eq!(records[0].species, "versicolor");
    assert_eq!(records[1].species, "setosa");
}

#[test]
fn test_parse_level_accepts_fractions_only() {
    assert_eq!(parse_level("0.05").unwrap(), 0.05);
    assert_eq!(parse_level(" 1 ").unwrap(), 1.0);
    assert!(matches!(parse_level("1.5"), Err(PoisonError::InvalidLevel(_))));
    assert!(matches!(parse_level("-0.2"), Err(PoisonError::InvalidLevel(_))));
    assert!(matches!(parse_level("ten"), Err(PoisonError::UnparsableLevel(_))));
}

#[test]
fn test_output_over_source_is_rejected() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("iris.csv");
    write_dataset(&source, &iris_like()).unwrap();
    let source_bytes = fs::read(&source).unwrap();

    let result = poison_file(&source, &source, 0.5, Some(1));
    assert!(matches!(result, Err(PoisonError::SameFile(_))));

    // Same file reached through a different spelling
    let aliased = dir.path().join(".").join("iris.csv");
    let result = poison_file(&source, &aliased, 0.5, Some(1));
    assert!(matches!(result, Err(PoisonError::SameFile(_))));

    assert_eq!(fs::read(&source).unwrap(), source_bytes);
}

#[test]
fn test_unseeded_run_still_changes_floor_rows() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("iris.csv");
    let dest = dir.path().join("poisoned.csv");
    write_dataset(&source, &iris_like()).unwrap();

    let report = poison_file(&source, &dest, 0.2, None).unwrap();

    assert_eq!(report.poisoned_count(), 30);
    assert_eq!(changed_rows(&iris_like(), &read_dataset(&dest).unwrap()).len(), 30);
}
