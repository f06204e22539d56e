use anyhow::{Context, Result};
use asmid_core::demo::{demo_training_data, DEMO_SNIPPETS};
use asmid_core::{CentroidClassifier, Prediction};
use serde::Serialize;

use crate::format_percent;

/// One demo snippet together with what the classifier made of it.
#[derive(Debug, Clone, Serialize)]
pub struct DemoOutcome {
    pub expected: String,
    pub prediction: Prediction,
}

impl DemoOutcome {
    pub fn is_correct(&self) -> bool {
        self.expected == self.prediction.label
    }
}

/// Train on the built-in corpus and classify each of its snippets.
pub fn run_demo(copies: usize) -> Result<Vec<DemoOutcome>> {
    let mut classifier = CentroidClassifier::new();
    classifier.train(&demo_training_data(copies)).context("Failed to train demo classifier")?;

    let mut outcomes = Vec::with_capacity(DEMO_SNIPPETS.len());
    for (label, assembly) in DEMO_SNIPPETS {
        let prediction = classifier
            .classify(assembly)
            .with_context(|| format!("Failed to classify the {label} demo snippet"))?;
        outcomes.push(DemoOutcome { expected: label.to_string(), prediction });
    }
    Ok(outcomes)
}

/// Run the built-in four-language demonstration.
pub fn demo_command(copies: usize, json: bool) -> Result<()> {
    let outcomes = run_demo(copies)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
        return Ok(());
    }

    println!("asmid v{}", asmid_core::version());
    println!("Trained on {} copies of {} demo snippets.", copies, DEMO_SNIPPETS.len());
    println!();
    for outcome in &outcomes {
        println!("Sample ({} code):", outcome.expected);
        println!("  Predicted: {}", outcome.prediction.label);
        println!("  Confidences:");
        for (label, value) in &outcome.prediction.confidences {
            println!("    {}: {}", label, format_percent(*value));
        }
        println!();
    }

    let correct = outcomes.iter().filter(|o| o.is_correct()).count();
    println!("Correct: {}/{}", correct, outcomes.len());

    Ok(())
}
