use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use asmid_core::features::strip_directives;

use crate::read_assembly;

/// Strip blank, comment, and directive lines from raw compiler output.
///
/// Writes to `output` when given, otherwise to stdout.
pub fn clean_command(input: &str, output: Option<String>) -> Result<()> {
    let raw = read_assembly(Path::new(input))?;
    let cleaned = strip_directives(&raw);

    match output {
        Some(out) => {
            fs::write(&out, &cleaned)
                .with_context(|| format!("Failed to write cleaned assembly to {}", out))?;
            println!("Wrote {} instruction lines to {}", cleaned.lines().count(), out);
        }
        None => print!("{}", cleaned),
    }

    Ok(())
}
