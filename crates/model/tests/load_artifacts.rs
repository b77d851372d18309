use std::fs;
use std::path::Path;

use model::{
    ArtifactPaths, ArtifactStore, FeatureExtractor, ModelError, MultiLabelModel,
    DEFAULT_CLASSIFIER_FILE, DEFAULT_LABELS_FILE, DEFAULT_VECTORIZER_FILE,
};
use serde_json::json;

fn write_artifacts(dir: &Path, coef: serde_json::Value, classes: serde_json::Value) {
    let vectorizer = json!({
        "vocabulary": {"alien": 0, "spaceship": 1, "love": 2, "wedding": 3},
        "idf": [1.5, 2.0, 1.2, 2.5],
        "ngram_range": [1, 1],
        "sublinear_tf": false,
        "norm": "l2"
    });
    let classifier = json!({
        "coef": coef,
        "intercept": [-0.4, -0.4]
    });
    let labels = json!({ "classes": classes });

    fs::write(dir.join(DEFAULT_VECTORIZER_FILE), vectorizer.to_string()).unwrap();
    fs::write(dir.join(DEFAULT_CLASSIFIER_FILE), classifier.to_string()).unwrap();
    fs::write(dir.join(DEFAULT_LABELS_FILE), labels.to_string()).unwrap();
}

#[test]
fn loads_and_scores_from_directory() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    write_artifacts(
        dir.path(),
        json!([[1.0, 1.0, 0.0, 0.0], [0.0, 0.0, 1.0, 1.0]]),
        json!(["Science Fiction", "Romance"]),
    );

    let store = ArtifactStore::load_dir(dir.path())?;
    assert_eq!(store.vectorizer().dim(), 4);
    assert_eq!(store.labels().classes(), &["Science Fiction", "Romance"]);

    let features = store.vectorizer().transform("alien spaceship")?;
    let scores = store.classifier().decision_function(&features)?;
    assert!(scores[0] > 0.0);
    assert!(scores[1] < 0.0);
    assert_eq!(store.classifier().predict(&features)?, vec![true, false]);
    Ok(())
}

#[test]
fn rejects_classifier_wider_than_vocabulary() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(
        dir.path(),
        json!([[1.0, 1.0, 0.0, 0.0, 9.0], [0.0, 0.0, 1.0, 1.0, 9.0]]),
        json!(["Science Fiction", "Romance"]),
    );

    let err = ArtifactStore::load_dir(dir.path()).unwrap_err();
    assert!(matches!(err, ModelError::DimensionMismatch { .. }));
}

#[test]
fn rejects_label_count_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(
        dir.path(),
        json!([[1.0, 1.0, 0.0, 0.0], [0.0, 0.0, 1.0, 1.0]]),
        json!(["Science Fiction", "Romance", "Drama"]),
    );

    let err = ArtifactStore::load_dir(dir.path()).unwrap_err();
    assert!(matches!(err, ModelError::DimensionMismatch { .. }));
}

#[test]
fn malformed_json_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(
        dir.path(),
        json!([[1.0, 1.0, 0.0, 0.0], [0.0, 0.0, 1.0, 1.0]]),
        json!(["Science Fiction", "Romance"]),
    );
    fs::write(dir.path().join(DEFAULT_LABELS_FILE), "{ not json").unwrap();

    let err = ArtifactStore::load_dir(dir.path()).unwrap_err();
    assert!(matches!(err, ModelError::Parse { .. }));
    assert!(err.to_string().contains(DEFAULT_LABELS_FILE));
}

#[test]
fn custom_file_names() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(
        dir.path(),
        json!([[1.0, 1.0, 0.0, 0.0], [0.0, 0.0, 1.0, 1.0]]),
        json!(["Science Fiction", "Romance"]),
    );
    let renamed = dir.path().join("svm_v2.json");
    fs::rename(dir.path().join(DEFAULT_CLASSIFIER_FILE), &renamed).unwrap();

    let paths = ArtifactPaths {
        classifier: renamed,
        ..ArtifactPaths::in_dir(dir.path())
    };
    assert!(ArtifactStore::load(&paths).is_ok());
    assert!(ArtifactStore::load_dir(dir.path()).is_err());
}
