//! Shared fixtures: a fake SDK tree populated with shell-script stand-ins
//! for the four SDK executables.

#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use appx_packager::pipeline::manifest::MANIFEST_FILE_NAME;
use appx_packager::pipeline::toolchain::host_arch;

/// Writes the file named by the argument following `/p`, like `makeappx pack`.
pub const MAKEAPPX_STUB: &str = r#"prev=""
for a in "$@"; do
  [ "$prev" = "/p" ] && printf appx > "$a"
  prev="$a"
done
exit 0"#;

/// Writes the key file named by `-sv` and the certificate named last,
/// like `makecert`.
pub const MAKECERT_STUB: &str = r#"prev=""
last=""
for a in "$@"; do
  [ "$prev" = "-sv" ] && printf key > "$a"
  prev="$a"
  last="$a"
done
printf cert > "$last"
exit 0"#;

/// Writes the container named by `-pfx`, like `pvk2pfx`.
pub const PVK2PFX_STUB: &str = r#"prev=""
for a in "$@"; do
  [ "$prev" = "-pfx" ] && printf pfx > "$a"
  prev="$a"
done
exit 0"#;

/// Signs in place, so nothing to write.
pub const SIGNTOOL_STUB: &str = "exit 0";

/// A fake kits root with one versioned SDK directory.
pub struct StubKits {
    root: tempfile::TempDir,
    tool_dir: PathBuf,
}

impl StubKits {
    /// Creates the versioned tool directory without any executables.
    pub fn empty(version: &str) -> Self {
        let root = tempfile::tempdir().unwrap();
        let tool_dir = root.path().join(version).join(host_arch());
        std::fs::create_dir_all(&tool_dir).unwrap();
        Self { root, tool_dir }
    }

    /// Creates a toolchain whose four stubs behave like the real tools.
    pub fn working(version: &str) -> Self {
        let kits = Self::empty(version);
        kits.add_tool("makeappx", MAKEAPPX_STUB);
        kits.add_tool("makecert", MAKECERT_STUB);
        kits.add_tool("pvk2pfx", PVK2PFX_STUB);
        kits.add_tool("signtool", SIGNTOOL_STUB);
        kits
    }

    /// Installs one executable stub with the given shell body.
    pub fn add_tool(&self, name: &str, body: &str) {
        let path = self.tool_dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }
}

/// A source directory whose manifest names `publisher`.
pub fn source_dir(publisher: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(MANIFEST_FILE_NAME),
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<Package xmlns="http://schemas.microsoft.com/appx/manifest/foundation/windows10">
  <Identity Name="Test.App" Publisher="{publisher}" Version="1.0.0.0" />
</Package>"#
        ),
    )
    .unwrap();
    dir
}

/// Base name the pipeline derives for a source directory.
pub fn base_name(source: &Path) -> String {
    source.file_name().unwrap().to_string_lossy().into_owned()
}
