//! Packaging and signing pipeline.
//!
//! One attempt = one [`Session`]: derive the package name from the source
//! directory, read the publisher identity from the manifest, locate the
//! newest installed SDK, then run the four stages in order. Any failure
//! aborts the attempt; the caller decides whether to retry.

mod error;
pub mod manifest;
pub mod process;
pub mod stages;
pub mod toolchain;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};

use toolchain::Toolchain;

/// State of one packaging attempt.
///
/// Created fresh per attempt and discarded afterwards, whether the attempt
/// succeeded or aborted.
#[derive(Clone, Debug)]
pub struct Session {
    /// Application directory to be packaged
    pub source_dir: PathBuf,
    /// Directory receiving the .appx/.pvk/.cer/.pfx artifacts
    pub output_dir: PathBuf,
    /// Artifact base name, the final component of the source directory
    pub package_base_name: String,
    /// Publisher identity from the manifest, subject of the signing cert
    pub publisher: String,
}

impl Session {
    /// Builds a session for one attempt.
    ///
    /// Derives the package base name from the source directory's final path
    /// component and reads the publisher identity from the manifest. The
    /// publisher is guaranteed non-empty on success, so the signing stages
    /// never run with an empty certificate subject.
    pub fn new(source_dir: &Path, output_dir: &Path) -> Result<Self> {
        let package_base_name = source_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| Error::InvalidSource(source_dir.to_path_buf()))?;
        let publisher = manifest::read_publisher(&source_dir.join(manifest::MANIFEST_FILE_NAME))?;

        Ok(Self {
            source_dir: source_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            package_base_name,
            publisher,
        })
    }

    /// Path of the packed archive.
    pub fn package_path(&self) -> PathBuf {
        self.artifact("appx")
    }

    /// Path of the private key file written by the certificate stage.
    pub fn pvk_path(&self) -> PathBuf {
        self.artifact("pvk")
    }

    /// Path of the certificate file written by the certificate stage.
    pub fn cer_path(&self) -> PathBuf {
        self.artifact("cer")
    }

    /// Path of the PKCS#12 container consumed by the signing stage.
    pub fn pfx_path(&self) -> PathBuf {
        self.artifact("pfx")
    }

    fn artifact(&self, extension: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{extension}", self.package_base_name))
    }
}

/// Runs one full packaging attempt.
///
/// Returns the path of the signed archive on success. On failure the
/// artifacts written by earlier stages are left in place.
pub async fn run(source_dir: &Path, output_dir: &Path, kits_root: &Path) -> Result<PathBuf> {
    let session = Session::new(source_dir, output_dir)?;
    log::info!(
        "packaging {} for publisher {}",
        session.package_base_name,
        session.publisher
    );

    let toolchain = Toolchain::locate(kits_root, toolchain::host_arch())?;
    stages::run_all(&session, &toolchain).await?;

    Ok(session.package_path())
}
