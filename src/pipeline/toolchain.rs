//! Windows 10 SDK toolchain discovery.
//!
//! Locates the highest-versioned SDK installed under the kits bin root and
//! resolves the architecture-specific directory holding the four packaging
//! and signing executables.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use super::error::{Error, Result};

/// Default kits bin root on a stock Windows 10 SDK installation.
pub const DEFAULT_KITS_ROOT: &str = r"C:\Program Files (x86)\Windows Kits\10\bin";

/// Where to get the SDK when discovery fails.
pub const KITS_DOWNLOAD_URL: &str =
    "https://developer.microsoft.com/windows/downloads/windows-sdk/";

/// The four SDK executables the pipeline depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    /// `makeappx` - packages a directory into an .appx archive
    MakeAppx,
    /// `makecert` - generates the self-signed signing certificate
    MakeCert,
    /// `pvk2pfx` - bundles key and certificate into a PKCS#12 container
    Pvk2Pfx,
    /// `signtool` - authenticode-signs the archive
    SignTool,
}

impl Tool {
    /// Bare tool name without platform suffix.
    pub const fn stem(self) -> &'static str {
        match self {
            Self::MakeAppx => "makeappx",
            Self::MakeCert => "makecert",
            Self::Pvk2Pfx => "pvk2pfx",
            Self::SignTool => "signtool",
        }
    }

    /// File name as found in the SDK tool directory (`.exe` on Windows).
    pub fn file_name(self) -> String {
        format!("{}{}", self.stem(), std::env::consts::EXE_SUFFIX)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stem())
    }
}

/// A directory name that did not parse as an SDK version.
#[derive(Error, Debug)]
#[error("not a kits version: {0}")]
pub struct ParseVersionError(String);

/// Four-component SDK version (major.minor.build.revision).
///
/// Ordering is numeric per component, so `10.0.9.0` sorts below
/// `10.0.10240.0` where a lexical comparison would not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct KitsVersion {
    major: u64,
    minor: u64,
    build: u64,
    revision: u64,
}

impl FromStr for KitsVersion {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split('.').collect();
        // At least major.minor, at most four components; anything else is
        // not a version directory (e.g. "x64").
        if fields.len() < 2 || fields.len() > 4 {
            return Err(ParseVersionError(s.to_string()));
        }
        let mut parts = [0u64; 4];
        for (i, field) in fields.iter().enumerate() {
            parts[i] = field
                .parse()
                .map_err(|_| ParseVersionError(s.to_string()))?;
        }
        Ok(Self {
            major: parts[0],
            minor: parts[1],
            build: parts[2],
            revision: parts[3],
        })
    }
}

impl fmt::Display for KitsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

/// Tool directory architecture for the current host.
pub fn host_arch() -> &'static str {
    match std::env::consts::ARCH {
        "x86_64" => "x64",
        "aarch64" => "arm64",
        "x86" => "x86",
        other => other,
    }
}

/// A resolved SDK installation.
#[derive(Clone, Debug)]
pub struct Toolchain {
    /// Kits bin root that was searched
    root: PathBuf,
    /// Version of the selected SDK directory
    version: KitsVersion,
    /// Architecture-specific directory holding the executables
    tool_dir: PathBuf,
}

impl Toolchain {
    /// Selects the highest-versioned SDK directory under `root`.
    ///
    /// Subdirectory names that do not parse as versions are skipped; an
    /// unreadable or version-free root is reported as [`Error::KitsNotFound`]
    /// with the SDK download URL.
    pub fn locate(root: &Path, arch: &str) -> Result<Self> {
        let entries = std::fs::read_dir(root).map_err(|_| Error::KitsNotFound {
            root: root.to_path_buf(),
        })?;

        let mut best: Option<(KitsVersion, String)> = None;
        for entry in entries {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            match name.parse::<KitsVersion>() {
                Ok(version) => {
                    log::debug!("SDK candidate {version} at {name}");
                    if best.as_ref().is_none_or(|(b, _)| version > *b) {
                        best = Some((version, name));
                    }
                }
                Err(_) => log::debug!("skipping non-version directory {name}"),
            }
        }

        let (version, dir_name) = best.ok_or_else(|| Error::KitsNotFound {
            root: root.to_path_buf(),
        })?;
        let tool_dir = root.join(&dir_name).join(arch);
        log::info!(
            "using Windows 10 SDK {version} tools at {}",
            tool_dir.display()
        );

        Ok(Self {
            root: root.to_path_buf(),
            version,
            tool_dir,
        })
    }

    /// Returns the kits root this toolchain was resolved from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the selected SDK version.
    pub fn version(&self) -> KitsVersion {
        self.version
    }

    /// Resolves `tool` inside the tool directory, failing with a remediation
    /// message if the executable is absent.
    ///
    /// Checked lazily by the stage runner right before each stage, so a
    /// missing later tool surfaces only after the earlier stages ran.
    pub fn require(&self, tool: Tool) -> Result<PathBuf> {
        let path = self.tool_dir.join(tool.file_name());
        if path.is_file() {
            Ok(path)
        } else {
            Err(Error::ToolMissing { tool, path })
        }
    }
}
