//! The four packaging and signing stages.
//!
//! Pack -> CreateCert -> ConvertCert -> Sign, an explicit state machine:
//! each stage runs only if the previous stage exited 0 and its tool exists,
//! and the first failure aborts the sequence. There is no rollback; whatever
//! earlier stages wrote stays on disk.

use std::io;
use std::path::{Path, PathBuf};

use super::error::{Error, Result};
use super::process;
use super::toolchain::{Tool, Toolchain};
use super::Session;

/// One stage of the packaging pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Package the source directory into the .appx archive
    Pack,
    /// Generate the self-signed certificate keyed to the publisher
    CreateCert,
    /// Combine private key and certificate into a PKCS#12 container
    ConvertCert,
    /// Authenticode-sign the archive with the container
    Sign,
}

impl Stage {
    /// Execution order. Later stages depend on the artifacts of earlier ones.
    pub const SEQUENCE: [Self; 4] = [Self::Pack, Self::CreateCert, Self::ConvertCert, Self::Sign];

    /// SDK tool that implements this stage.
    pub const fn tool(self) -> Tool {
        match self {
            Self::Pack => Tool::MakeAppx,
            Self::CreateCert => Tool::MakeCert,
            Self::ConvertCert => Tool::Pvk2Pfx,
            Self::Sign => Tool::SignTool,
        }
    }

    /// Builds the argument vector for this stage.
    ///
    /// Arguments are passed straight to the child without shell
    /// interpretation, so values containing spaces (notably the publisher
    /// identity) need no quoting.
    pub fn arguments(self, session: &Session) -> Vec<String> {
        fn path_arg(path: &Path) -> String {
            path.display().to_string()
        }

        match self {
            // makeappx pack /d <source> /p <out>/<name>.appx /l /o
            // /l keeps localized packages intact, /o overwrites the archive.
            Self::Pack => vec![
                "pack".into(),
                "/d".into(),
                path_arg(&session.source_dir),
                "/p".into(),
                path_arg(&session.package_path()),
                "/l".into(),
                "/o".into(),
            ],
            // Self-signed end-entity cert: SHA-256, 2048-bit key, zero chain
            // depth, code-signing EKU, validity starting 2000-01-01.
            Self::CreateCert => vec![
                "-n".into(),
                session.publisher.clone(),
                "-r".into(),
                "-a".into(),
                "sha256".into(),
                "-len".into(),
                "2048".into(),
                "-cy".into(),
                "end".into(),
                "-h".into(),
                "0".into(),
                "-eku".into(),
                "1.3.6.1.5.5.7.3.3".into(),
                "-b".into(),
                "01/01/2000".into(),
                "-sv".into(),
                path_arg(&session.pvk_path()),
                path_arg(&session.cer_path()),
            ],
            Self::ConvertCert => vec![
                "-pvk".into(),
                path_arg(&session.pvk_path()),
                "-spc".into(),
                path_arg(&session.cer_path()),
                "-pfx".into(),
                path_arg(&session.pfx_path()),
            ],
            // /as appends the signature instead of replacing existing ones.
            Self::Sign => vec![
                "sign".into(),
                "/fd".into(),
                "SHA256".into(),
                "/as".into(),
                "/f".into(),
                path_arg(&session.pfx_path()),
                path_arg(&session.package_path()),
            ],
        }
    }

    /// Outputs of this stage that must be deleted before its tool runs.
    ///
    /// `makeappx` overwrites via `/o`, so Pack has none; the certificate
    /// tools refuse or mangle pre-existing files, so theirs are removed.
    pub fn stale_outputs(self, session: &Session) -> Vec<PathBuf> {
        match self {
            Self::Pack | Self::Sign => Vec::new(),
            Self::CreateCert => vec![session.pvk_path(), session.cer_path()],
            Self::ConvertCert => vec![session.pfx_path()],
        }
    }
}

/// Removes a stale artifact if present. Absence is not an error.
async fn remove_stale(path: &Path) -> Result<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            log::debug!("removed stale artifact {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Runs all four stages in order, aborting on the first failure.
///
/// Each tool is resolved lazily right before its stage, so a missing later
/// tool is only reported once the earlier stages have run.
pub async fn run_all(session: &Session, toolchain: &Toolchain) -> Result<()> {
    for stage in Stage::SEQUENCE {
        let tool = toolchain.require(stage.tool())?;
        for stale in stage.stale_outputs(session) {
            remove_stale(&stale).await?;
        }

        println!("Running {}...", stage.tool());
        let output = process::run_tool(&tool, &stage.arguments(session), &session.output_dir).await?;
        if !output.status.success() {
            return Err(Error::StageFailed {
                tool: stage.tool(),
                code: output.status.code(),
            });
        }
        log::info!("{} completed", stage.tool());
    }
    Ok(())
}
