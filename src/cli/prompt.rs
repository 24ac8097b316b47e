//! Operator input resolution.
//!
//! Prompts for the source and output directories, trims surrounding quote
//! characters (shells quote dragged-and-dropped paths), and validates each
//! path before the pipeline runs. In interactive mode an invalid path is
//! reported and re-prompted; in single-shot mode it is an error.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};
use crate::pipeline::manifest::MANIFEST_FILE_NAME;

/// Validated source and output directories for one attempt.
#[derive(Debug)]
pub struct ResolvedInputs {
    /// Application directory containing the manifest
    pub source_dir: PathBuf,
    /// Existing directory receiving the artifacts
    pub output_dir: PathBuf,
}

/// Strips whitespace and surrounding quote characters from a raw path.
pub fn trim_quotes(input: &str) -> &str {
    input.trim().trim_matches(['"', '\''])
}

/// The source directory must directly contain the manifest file.
pub fn validate_source(path: &Path) -> std::result::Result<(), String> {
    if path.join(MANIFEST_FILE_NAME).is_file() {
        Ok(())
    } else {
        Err(format!(
            "{MANIFEST_FILE_NAME} not found in {}",
            path.display()
        ))
    }
}

/// The output directory must already exist.
pub fn validate_output(path: &Path) -> std::result::Result<(), String> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(format!("output directory {} does not exist", path.display()))
    }
}

/// Resolves both directories, prompting for whichever was not seeded.
///
/// Seeds come from the CLI flags on the first attempt; retries pass `None`
/// so the operator is asked for both paths again.
pub fn resolve_inputs(
    seed_source: Option<PathBuf>,
    seed_output: Option<PathBuf>,
    interactive: bool,
) -> Result<ResolvedInputs> {
    let source_dir = resolve_field(
        seed_source,
        interactive,
        "Application source directory",
        validate_source,
    )?;
    let output_dir = resolve_field(
        seed_output,
        interactive,
        "Output directory",
        validate_output,
    )?;
    Ok(ResolvedInputs {
        source_dir,
        output_dir,
    })
}

fn resolve_field(
    seed: Option<PathBuf>,
    interactive: bool,
    label: &str,
    validate: fn(&Path) -> std::result::Result<(), String>,
) -> Result<PathBuf> {
    let mut candidate = seed;
    loop {
        let path = match candidate.take() {
            Some(path) => path,
            None => PathBuf::from(prompt(label)?),
        };
        match validate(&path) {
            Ok(()) => return Ok(path),
            Err(reason) => {
                if !interactive {
                    return Err(CliError::InvalidArguments { reason }.into());
                }
                eprintln!("{reason}");
            }
        }
    }
}

/// Reads one line from stdin after printing `label`.
fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush().map_err(input_unavailable)?;

    let mut line = String::new();
    let bytes = io::stdin()
        .read_line(&mut line)
        .map_err(input_unavailable)?;
    if bytes == 0 {
        // Stdin closed; there is no operator left to re-prompt.
        return Err(CliError::InputUnavailable {
            reason: "stdin closed".to_string(),
        }
        .into());
    }
    Ok(trim_quotes(&line).to_string())
}

fn input_unavailable(e: io::Error) -> CliError {
    CliError::InputUnavailable {
        reason: e.to_string(),
    }
}
