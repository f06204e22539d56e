use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use asmid_core::manifest::load_manifest;
use asmid_core::CentroidClassifier;
use chrono::Utc;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{format_percent, read_assembly, sha256_bytes};

/// Result of classifying one assembly file against a manifest-trained model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub manifest: String,
    pub input: String,
    pub input_sha256: String,
    pub generated_at: String,
    pub label: String,
    pub confidences: BTreeMap<String, f64>,
}

/// Train from `manifest_path` and classify the assembly at `input_path`.
pub fn classify_file(manifest_path: &Path, input_path: &Path) -> Result<ClassificationReport> {
    let manifest = load_manifest(manifest_path)?;
    let base_dir = manifest_path.parent().unwrap_or_else(|| Path::new("."));
    let samples = manifest.resolve_samples(base_dir)?;
    debug!("Manifest '{}' resolved to {} training samples", manifest.name, samples.len());

    let mut classifier = CentroidClassifier::new();
    classifier
        .train_samples(&samples)
        .with_context(|| format!("Failed to train from manifest {}", manifest_path.display()))?;

    let assembly = read_assembly(input_path)?;
    let prediction = classifier
        .classify(&assembly)
        .with_context(|| format!("Failed to classify {}", input_path.display()))?;

    Ok(ClassificationReport {
        manifest: manifest.name,
        input: input_path.display().to_string(),
        input_sha256: sha256_bytes(assembly.as_bytes()),
        generated_at: Utc::now().to_rfc3339(),
        label: prediction.label,
        confidences: prediction.confidences,
    })
}

/// Classify an assembly file and print the best label plus confidences.
pub fn classify_command(manifest: &str, input: &str, json: bool) -> Result<()> {
    let report = classify_file(Path::new(manifest), Path::new(input))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Input: {} (sha256: {})", report.input, report.input_sha256);
    println!("Manifest: {}", report.manifest);
    println!("Predicted: {}", report.label);
    println!("Confidences:");
    for (label, value) in &report.confidences {
        println!("  {}: {}", label, format_percent(*value));
    }

    Ok(())
}
