//! Command line interface for the packager.
//!
//! Wraps the pipeline in the operator retry loop: prompt for paths, run an
//! attempt, and on failure report it and re-prompt for both paths. The loop
//! ends on full pipeline success. When both paths are supplied as flags the
//! tool instead runs a single attempt and exits non-zero on failure.

mod args;
mod prompt;

pub use args::Args;
pub use prompt::{ResolvedInputs, resolve_inputs, trim_quotes, validate_output, validate_source};

use crate::error::{CliError, Result};
use crate::pipeline;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    run_with_args(args).await
}

/// Runs the retry loop for the given arguments.
///
/// Split from [`run`] so tests can drive it without touching the real
/// command line.
pub async fn run_with_args(args: Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let interactive = args.source.is_none() || args.output.is_none();
    let mut seed_source = args.source;
    let mut seed_output = args.output;

    // The loop continues purely on the outcome of the latest attempt.
    loop {
        let inputs = resolve_inputs(seed_source.take(), seed_output.take(), interactive)?;

        match pipeline::run(&inputs.source_dir, &inputs.output_dir, &args.kits_root).await {
            Ok(package) => {
                println!("Signed package written to {}", package.display());
                return Ok(0);
            }
            Err(e) => {
                eprintln!("{e}");
                if !interactive {
                    return Ok(1);
                }
                eprintln!("Attempt failed; enter the paths again.");
            }
        }
    }
}
