//! Command line argument parsing and validation.

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::toolchain::DEFAULT_KITS_ROOT;

/// Windows Store app packager and signer
#[derive(Parser, Debug)]
#[command(
    name = "appx_packager",
    version,
    about = "Packages, self-signs, and authenticode-signs a Windows Store app bundle",
    long_about = "Packages an application directory into an .appx archive, generates a \
self-signed certificate for the publisher named in AppxManifest.xml, converts it to a \
PKCS#12 container, and authenticode-signs the archive, using the makeappx/makecert/\
pvk2pfx/signtool executables of the newest installed Windows 10 SDK.

When --source or --output is omitted the tool prompts for it and re-prompts after any \
failed attempt. With both flags given it runs exactly one attempt and exits non-zero \
on failure."
)]
pub struct Args {
    /// Application source directory (must contain AppxManifest.xml)
    #[arg(short = 's', long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Output directory for the .appx/.pvk/.cer/.pfx artifacts (must exist)
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Windows 10 SDK bin root holding the versioned toolchain directories
    #[arg(long, env = "APPX_KITS_ROOT", value_name = "DIR", default_value = DEFAULT_KITS_ROOT)]
    pub kits_root: PathBuf,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.kits_root.as_os_str().is_empty() {
            return Err("Kits root cannot be empty".to_string());
        }
        for (flag, value) in [("--source", &self.source), ("--output", &self.output)] {
            if let Some(path) = value {
                if path.as_os_str().is_empty() {
                    return Err(format!("{flag} cannot be empty"));
                }
            }
        }
        Ok(())
    }
}
