//! Tests for model artifacts and the inference helpers

use std::collections::BTreeMap;

use ndarray::{array, Array2};
use tempfile::tempdir;

use super::{
    predict_record, AccuracyThreshold, Classifier, InferenceError, ModelArtifact, ModelError,
    PredictionResult,
};
use crate::logic::features::{FeatureRecord, FeatureTable};

const LOGREG_JSON: &str = r#"{
    "model_type": "logistic_regression",
    "feature_names": ["sepal_length", "sepal_width", "petal_length", "petal_width"],
    "classes": ["setosa", "versicolor", "virginica"],
    "coefficients": [
        [-0.42, 0.97, -2.40, -1.03],
        [0.53, -0.32, -0.20, -0.94],
        [-0.11, -0.65, 2.60, 1.97]
    ],
    "intercepts": [9.85, 2.24, -12.09]
}"#;

const NB_JSON: &str = r#"{
    "model_type": "gaussian_nb",
    "feature_names": ["sepal_length", "sepal_width", "petal_length", "petal_width"],
    "classes": ["setosa", "versicolor", "virginica"],
    "class_prior": [0.3333, 0.3333, 0.3334],
    "theta": [
        [5.006, 3.428, 1.462, 0.246],
        [5.936, 2.770, 4.260, 1.326],
        [6.588, 2.974, 5.552, 2.026]
    ],
    "var": [
        [0.122, 0.141, 0.030, 0.011],
        [0.261, 0.097, 0.216, 0.038],
        [0.396, 0.102, 0.298, 0.074]
    ]
}"#;

fn setosa() -> FeatureRecord {
    FeatureRecord::new(5.1, 3.5, 1.4, 0.2)
}

fn versicolor() -> FeatureRecord {
    FeatureRecord::new(6.0, 2.7, 4.2, 1.3)
}

fn virginica() -> FeatureRecord {
    FeatureRecord::new(6.9, 3.1, 5.8, 2.3)
}

fn assert_probabilities_valid(result: &PredictionResult, classes: &[String]) {
    let keys: Vec<&String> = result.confidence_scores.keys().collect();
    let mut expected: Vec<&String> = classes.iter().collect();
    expected.sort();
    assert_eq!(keys, expected);

    let total: f64 = result.confidence_scores.values().sum();
    assert!((total - 1.0).abs() < 1e-9, "probabilities sum to {}", total);
    for p in result.confidence_scores.values() {
        assert!((0.0..=1.0).contains(p));
    }
}

// ============================================================================
// ARTIFACT LOADING
// ============================================================================

#[test]
fn test_load_logistic_regression() {
    let model = ModelArtifact::from_json(LOGREG_JSON).unwrap();
    assert_eq!(model.model_type(), "logistic_regression");
    assert_eq!(model.classes(), ["setosa", "versicolor", "virginica"]);
}

#[test]
fn test_load_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.json");
    std::fs::write(&path, NB_JSON).unwrap();

    let model = ModelArtifact::load(&path).unwrap();
    assert_eq!(model.model_type(), "gaussian_nb");
}

#[test]
fn test_missing_model_file() {
    let dir = tempdir().unwrap();
    let err = ModelArtifact::load(&dir.path().join("model.json")).unwrap_err();
    assert!(matches!(err, ModelError::NotFound(_)));
}

#[test]
fn test_unknown_model_type_is_rejected() {
    let json = LOGREG_JSON.replace("logistic_regression", "random_forest");
    assert!(matches!(ModelArtifact::from_json(&json), Err(ModelError::Parse(_))));
}

#[test]
fn test_wrong_feature_names_are_rejected() {
    let json = LOGREG_JSON.replace("petal_width", "petal_depth");
    assert!(matches!(ModelArtifact::from_json(&json), Err(ModelError::Invalid(_))));
}

#[test]
fn test_coefficient_shape_is_checked() {
    let json = LOGREG_JSON.replace("[9.85, 2.24, -12.09]", "[9.85, 2.24]");
    assert!(matches!(ModelArtifact::from_json(&json), Err(ModelError::Invalid(_))));
}

#[test]
fn test_duplicate_classes_are_rejected() {
    let json = NB_JSON.replace(r#""setosa", "versicolor", "virginica""#, r#""setosa", "setosa", "virginica""#);
    assert!(matches!(ModelArtifact::from_json(&json), Err(ModelError::Invalid(_))));
}

#[test]
fn test_non_positive_variance_is_rejected() {
    let json = NB_JSON.replace("0.122", "0.0");
    assert!(matches!(ModelArtifact::from_json(&json), Err(ModelError::Invalid(_))));
}

// ============================================================================
// INFERENCE
// ============================================================================

#[test]
fn test_logistic_regression_predictions() {
    let model = ModelArtifact::from_json(LOGREG_JSON).unwrap();

    for (record, expected) in [(setosa(), "setosa"), (versicolor(), "versicolor"), (virginica(), "virginica")] {
        let result = predict_record(&model, &record).unwrap();
        assert_eq!(result.predicted_species, expected);
        assert_probabilities_valid(&result, model.classes());
    }
}

#[test]
fn test_naive_bayes_predictions() {
    let model = ModelArtifact::from_json(NB_JSON).unwrap();

    for (record, expected) in [(setosa(), "setosa"), (versicolor(), "versicolor"), (virginica(), "virginica")] {
        let result = predict_record(&model, &record).unwrap();
        assert_eq!(result.predicted_species, expected);
        assert_probabilities_valid(&result, model.classes());
    }
}

#[test]
fn test_predicted_label_has_highest_probability() {
    let model = ModelArtifact::from_json(LOGREG_JSON).unwrap();
    let result = predict_record(&model, &versicolor()).unwrap();

    let best = result
        .confidence_scores
        .iter()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
        .map(|(k, _)| k.clone())
        .unwrap();
    assert_eq!(best, result.predicted_species);
}

#[test]
fn test_binary_logistic_regression() {
    let json = r#"{
        "model_type": "logistic_regression",
        "feature_names": ["sepal_length", "sepal_width", "petal_length", "petal_width"],
        "classes": ["setosa", "other"],
        "coefficients": [[0.0, 0.0, 3.0, 0.0]],
        "intercepts": [-7.5]
    }"#;
    let model = ModelArtifact::from_json(json).unwrap();

    let small = predict_record(&model, &setosa()).unwrap();
    assert_eq!(small.predicted_species, "setosa");
    let large = predict_record(&model, &virginica()).unwrap();
    assert_eq!(large.predicted_species, "other");
    assert!(large.confidence_scores["other"] > 0.5);
}

#[test]
fn test_batch_prediction() {
    let model = ModelArtifact::from_json(NB_JSON).unwrap();
    let table = FeatureTable::from_records(&[setosa(), virginica(), versicolor()]);

    let labels = model.predict(&table).unwrap();
    assert_eq!(labels, vec!["setosa", "virginica", "versicolor"]);

    let proba = model.predict_proba(&table).unwrap();
    assert_eq!(proba.dim(), (3, 3));
}

#[test]
fn test_column_mismatch_is_an_inference_error() {
    let model = ModelArtifact::from_json(LOGREG_JSON).unwrap();
    let cols = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
    let table = FeatureTable::with_columns(cols, array![[1.0, 2.0, 3.0, 4.0]]);

    assert!(matches!(
        model.predict_proba(&table),
        Err(InferenceError::FeatureMismatch { .. })
    ));
}

// ============================================================================
// STUB CLASSIFIERS
// ============================================================================

struct FixedClassifier {
    classes: Vec<String>,
    row: Vec<f64>,
}

impl Classifier for FixedClassifier {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict_proba(&self, table: &FeatureTable) -> Result<Array2<f64>, InferenceError> {
        let mut out = Array2::zeros((table.n_rows(), self.row.len()));
        for mut r in out.rows_mut() {
            for (cell, v) in r.iter_mut().zip(&self.row) {
                *cell = *v;
            }
        }
        Ok(out)
    }
}

fn classes(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_predict_record_zips_classes_with_probabilities() {
    let stub = FixedClassifier {
        classes: classes(&["b", "a"]),
        row: vec![0.25, 0.75],
    };
    let result = predict_record(&stub, &setosa()).unwrap();

    let mut expected = BTreeMap::new();
    expected.insert("b".to_string(), 0.25);
    expected.insert("a".to_string(), 0.75);
    assert_eq!(result.confidence_scores, expected);
    assert_eq!(result.predicted_species, "a");
}

#[test]
fn test_argmax_tie_picks_first_class() {
    let stub = FixedClassifier {
        classes: classes(&["x", "y"]),
        row: vec![0.5, 0.5],
    };
    assert_eq!(predict_record(&stub, &setosa()).unwrap().predicted_species, "x");
}

#[test]
fn test_probability_count_mismatch_is_rejected() {
    let stub = FixedClassifier {
        classes: classes(&["x", "y", "z"]),
        row: vec![0.5, 0.5],
    };
    assert!(matches!(
        predict_record(&stub, &setosa()),
        Err(InferenceError::ShapeMismatch { classes: 3, probabilities: 2 })
    ));
}

#[test]
fn test_out_of_range_probability_is_rejected() {
    let stub = FixedClassifier {
        classes: classes(&["x", "y"]),
        row: vec![1.5, -0.5],
    };
    assert!(matches!(
        predict_record(&stub, &setosa()),
        Err(InferenceError::InvalidProbability(_))
    ));
}

#[test]
fn test_softmax_rows_normalizes() {
    let proba = super::inference::softmax_rows(array![[1.0, 1.0], [1000.0, 0.0]]);
    assert!((proba[[0, 0]] - 0.5).abs() < 1e-12);
    assert!((proba[[1, 0]] - 1.0).abs() < 1e-12);
    assert!(proba.iter().all(|p| p.is_finite()));
}

// ============================================================================
// THRESHOLD
// ============================================================================

#[test]
fn test_threshold_is_inclusive() {
    let threshold = AccuracyThreshold::default();
    assert!(threshold.passes(0.85));
    assert!(threshold.passes(0.9333));
    assert!(!threshold.passes(0.8499));
    assert!((threshold.shortfall(0.80) - 0.05).abs() < 1e-12);
    assert_eq!(threshold.shortfall(0.95), 0.0);
}

#[test]
fn test_threshold_range() {
    assert!(AccuracyThreshold::new(0.0).is_some());
    assert!(AccuracyThreshold::new(1.0).is_some());
    assert!(AccuracyThreshold::new(1.2).is_none());
    assert!(AccuracyThreshold::new(f64::NAN).is_none());
}
