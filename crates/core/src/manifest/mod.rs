//! Training manifests: which labeled assembly samples to train on.
//!
//! A manifest is YAML (`.yaml` / `.yml`) or JSON (`.json`). Each sample names a
//! label and either a path to an assembly file (relative to the manifest's
//! directory) or inline assembly.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

/// One labeled sample in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestSample {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// How many times to feed this sample into training. Defaults to 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<usize>,
}

impl ManifestSample {
    pub fn repeat_count(&self) -> usize {
        self.repeat.unwrap_or(1)
    }
}

/// Serializable description of a training corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingManifest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub samples: Vec<ManifestSample>,
}

impl TrainingManifest {
    /// Check required fields before any file is read.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(anyhow!("Manifest name is required"));
        }
        if self.samples.is_empty() {
            return Err(anyhow!("Manifest '{}' must list at least one sample", self.name));
        }
        for (idx, sample) in self.samples.iter().enumerate() {
            if sample.label.trim().is_empty() {
                return Err(anyhow!("Sample #{idx} in manifest '{}': label is required", self.name));
            }
            match (&sample.path, &sample.code) {
                (Some(_), Some(_)) => {
                    return Err(anyhow!(
                        "Sample #{idx} ({}) sets both path and code; pick one",
                        sample.label
                    ))
                }
                (None, None) => {
                    return Err(anyhow!(
                        "Sample #{idx} ({}) needs either a path or inline code",
                        sample.label
                    ))
                }
                _ => {}
            }
            if sample.repeat == Some(0) {
                return Err(anyhow!("Sample #{idx} ({}) has repeat = 0", sample.label));
            }
        }
        Ok(())
    }

    /// Read every sample's assembly and expand `repeat` into `(label, assembly)` pairs.
    ///
    /// Relative sample paths are resolved against `base_dir`.
    pub fn resolve_samples(&self, base_dir: &Path) -> Result<Vec<(String, String)>> {
        self.validate()?;

        let mut resolved = Vec::new();
        for sample in &self.samples {
            let assembly = match (&sample.path, &sample.code) {
                (Some(path), _) => {
                    let full = resolve_path(base_dir, path);
                    fs::read_to_string(&full).with_context(|| {
                        format!("Failed to read assembly sample {}", full.display())
                    })?
                }
                (None, Some(code)) => code.clone(),
                (None, None) => {
                    return Err(anyhow!("Sample ({}) has no assembly source", sample.label))
                }
            };
            for _ in 0..sample.repeat_count() {
                resolved.push((sample.label.clone(), assembly.clone()));
            }
        }
        Ok(resolved)
    }
}

fn resolve_path(base_dir: &Path, path: &str) -> PathBuf {
    let candidate = Path::new(path);
    if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        base_dir.join(candidate)
    }
}

/// Parse a manifest body in the given format (`yaml`, `yml`, or `json`).
pub fn parse_manifest(body: &str, format: &str) -> Result<TrainingManifest> {
    let manifest: TrainingManifest = match format {
        "json" => serde_json::from_str(body).context("Failed to parse manifest JSON")?,
        "yaml" | "yml" => serde_yaml::from_str(body).context("Failed to parse manifest YAML")?,
        other => return Err(anyhow!("Unsupported manifest format '{}'", other)),
    };
    manifest.validate()?;
    Ok(manifest)
}

/// Load and validate a manifest from disk, choosing the format by extension.
pub fn load_manifest(path: &Path) -> Result<TrainingManifest> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default().to_lowercase();
    let body = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest {}", path.display()))?;
    parse_manifest(&body, &ext).with_context(|| format!("Invalid manifest {}", path.display()))
}
