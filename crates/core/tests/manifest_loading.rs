use std::fs;

use asmid_core::manifest::{load_manifest, parse_manifest, ManifestSample, TrainingManifest};
use asmid_core::CentroidClassifier;
use tempfile::tempdir;

#[test]
fn yaml_manifest_resolves_paths_inline_code_and_repeats() {
    let dir = tempdir().expect("tempdir");
    fs::create_dir_all(dir.path().join("c")).expect("mkdir");
    fs::write(dir.path().join("c/alloc.s"), "call malloc\ncall free\n").expect("write sample");
    let manifest_path = dir.path().join("corpus.yaml");
    fs::write(
        &manifest_path,
        "name: tiny\nsamples:\n  - label: C\n    path: c/alloc.s\n    repeat: 3\n  - label: Go\n    code: |\n      call runtime.newobject\n",
    )
    .expect("write manifest");

    let manifest = load_manifest(&manifest_path).expect("load");
    assert_eq!(manifest.name, "tiny");
    let samples = manifest.resolve_samples(dir.path()).expect("resolve");
    assert_eq!(samples.len(), 4);
    assert_eq!(samples.iter().filter(|(label, _)| label == "C").count(), 3);
    assert_eq!(samples[3], ("Go".to_string(), "call runtime.newobject\n".to_string()));

    let mut classifier = CentroidClassifier::new();
    classifier.train_samples(&samples).expect("train");
    assert_eq!(classifier.predict("call malloc\ncall free\n").expect("predict"), "C");
}

#[test]
fn json_manifest_parses() {
    let body = r#"{"name":"j","samples":[{"label":"Python","code":"call Py_INCREF"}]}"#;
    let manifest = parse_manifest(body, "json").expect("parse");
    assert_eq!(manifest.samples[0].label, "Python");
    assert_eq!(manifest.samples[0].repeat_count(), 1);
}

#[test]
fn unsupported_extension_is_rejected() {
    let err = parse_manifest("name: x", "toml").unwrap_err();
    assert!(err.to_string().contains("Unsupported manifest format"));
}

#[test]
fn validation_rejects_bad_samples() {
    let sample = |label: &str, path: Option<&str>, code: Option<&str>, repeat: Option<usize>| {
        ManifestSample {
            label: label.to_string(),
            path: path.map(str::to_string),
            code: code.map(str::to_string),
            repeat,
        }
    };
    let manifest = |samples: Vec<ManifestSample>| TrainingManifest {
        name: "m".into(),
        description: None,
        samples,
    };

    assert!(manifest(vec![]).validate().is_err());
    assert!(manifest(vec![sample("", None, Some("ret"), None)]).validate().is_err());
    assert!(manifest(vec![sample("C", Some("a.s"), Some("ret"), None)]).validate().is_err());
    assert!(manifest(vec![sample("C", None, None, None)]).validate().is_err());
    assert!(manifest(vec![sample("C", None, Some("ret"), Some(0))]).validate().is_err());
    assert!(manifest(vec![sample("C", None, Some("ret"), Some(2))]).validate().is_ok());

    let unnamed = TrainingManifest { name: " ".into(), ..manifest(vec![]) };
    assert!(unnamed.validate().unwrap_err().to_string().contains("name is required"));
}

#[test]
fn missing_sample_file_reports_path() {
    let dir = tempdir().expect("tempdir");
    let manifest = parse_manifest(
        "name: m\nsamples:\n  - label: C\n    path: nowhere.s\n",
        "yaml",
    )
    .expect("parse");
    let err = manifest.resolve_samples(dir.path()).unwrap_err();
    assert!(format!("{err:#}").contains("nowhere.s"));
}

#[test]
fn missing_manifest_file_is_an_error() {
    let dir = tempdir().expect("tempdir");
    assert!(load_manifest(&dir.path().join("absent.yaml")).is_err());
}
