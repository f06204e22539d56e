use std::path::Path;

use anyhow::Result;
use asmid_core::features::{AsmProfile, FeatureExtractor, FINGERPRINT_SLOTS};
use serde::Serialize;

use crate::read_assembly;

/// One named fingerprint slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotValue {
    pub slot: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FingerprintReport {
    pub input: String,
    pub slots: Vec<SlotValue>,
    pub profile: AsmProfile,
}

/// Extract the fingerprint and full counter profile of an assembly file.
pub fn fingerprint_file(input_path: &Path) -> Result<FingerprintReport> {
    let assembly = read_assembly(input_path)?;
    let profile = FeatureExtractor::new().profile(&assembly);
    let fingerprint = profile.fingerprint();

    let slots = FINGERPRINT_SLOTS
        .iter()
        .zip(fingerprint.as_slice())
        .map(|(slot, value)| SlotValue { slot: slot.to_string(), value: *value })
        .collect();

    Ok(FingerprintReport { input: input_path.display().to_string(), slots, profile })
}

/// Print the named fingerprint slots of an assembly file.
pub fn fingerprint_command(input: &str, json: bool) -> Result<()> {
    let report = fingerprint_file(Path::new(input))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Fingerprint of {}:", report.input);
    for slot in &report.slots {
        println!("  {:<18} {}", slot.slot, slot.value);
    }

    Ok(())
}
