//! Binary tests for the single-shot (non-interactive) CLI mode.

#![cfg(unix)]

mod common;

use assert_cmd::Command;
use common::{StubKits, base_name, source_dir};

fn packager() -> Command {
    Command::cargo_bin("appx_packager").unwrap()
}

#[test]
fn signs_a_package_end_to_end() {
    let source = source_dir("CN=Acme");
    let output = tempfile::tempdir().unwrap();
    let kits = StubKits::working("10.0.22621.0");

    packager()
        .arg("--source")
        .arg(source.path())
        .arg("--output")
        .arg(output.path())
        .arg("--kits-root")
        .arg(kits.root())
        .assert()
        .success()
        .stdout(predicates::str::contains("Signed package written to"));

    let name = base_name(source.path());
    for ext in ["appx", "pvk", "cer", "pfx"] {
        assert!(output.path().join(format!("{name}.{ext}")).is_file());
    }
}

#[test]
fn rejects_a_source_without_manifest() {
    let source = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let kits = StubKits::working("10.0.22621.0");

    packager()
        .arg("--source")
        .arg(source.path())
        .arg("--output")
        .arg(output.path())
        .arg("--kits-root")
        .arg(kits.root())
        .assert()
        .failure()
        .stderr(predicates::str::contains("AppxManifest.xml"));
}

#[test]
fn rejects_a_missing_output_directory() {
    let source = source_dir("CN=Acme");
    let output = tempfile::tempdir().unwrap();
    let missing = output.path().join("missing");
    let kits = StubKits::working("10.0.22621.0");

    packager()
        .arg("--source")
        .arg(source.path())
        .arg("--output")
        .arg(&missing)
        .arg("--kits-root")
        .arg(kits.root())
        .assert()
        .failure()
        .stderr(predicates::str::contains("does not exist"));
}

#[test]
fn interactive_mode_reprompts_until_the_source_is_valid() {
    let bad_source = tempfile::tempdir().unwrap();
    let source = source_dir("CN=Acme");
    let output = tempfile::tempdir().unwrap();
    let kits = StubKits::working("10.0.22621.0");

    // First a source without a manifest, then the real one as a quoted
    // drag-and-drop style path, then the output directory.
    let stdin = format!(
        "{}\n\"{}\"\n{}\n",
        bad_source.path().display(),
        source.path().display(),
        output.path().display()
    );

    packager()
        .arg("--kits-root")
        .arg(kits.root())
        .write_stdin(stdin)
        .assert()
        .success()
        .stdout(predicates::str::contains("Signed package written to"))
        .stderr(predicates::str::contains("AppxManifest.xml"));

    let name = base_name(source.path());
    for ext in ["appx", "pvk", "cer", "pfx"] {
        assert!(output.path().join(format!("{name}.{ext}")).is_file());
    }
}

#[test]
fn interactive_mode_reprompts_after_a_failed_attempt() {
    let source = source_dir("CN=Acme");
    let output = tempfile::tempdir().unwrap();

    let kits = StubKits::empty("10.0.22621.0");
    kits.add_tool("makeappx", "exit 1");
    kits.add_tool("makecert", common::MAKECERT_STUB);
    kits.add_tool("pvk2pfx", common::PVK2PFX_STUB);
    kits.add_tool("signtool", common::SIGNTOOL_STUB);

    // One valid pair of paths; the attempt fails in the pack stage, the
    // loop re-prompts, and the closed stdin ends the run non-zero.
    let stdin = format!(
        "{}\n{}\n",
        source.path().display(),
        output.path().display()
    );

    packager()
        .arg("--kits-root")
        .arg(kits.root())
        .write_stdin(stdin)
        .assert()
        .failure()
        .stderr(predicates::str::contains("makeappx"))
        .stderr(predicates::str::contains("enter the paths again"));
}

#[test]
fn reports_the_failing_tool_and_exits_nonzero() {
    let source = source_dir("CN=Acme");
    let output = tempfile::tempdir().unwrap();

    let kits = StubKits::empty("10.0.22621.0");
    kits.add_tool("makeappx", common::MAKEAPPX_STUB);
    kits.add_tool("makecert", "exit 2");
    kits.add_tool("pvk2pfx", "exit 0");
    kits.add_tool("signtool", "exit 0");

    packager()
        .arg("--source")
        .arg(source.path())
        .arg("--output")
        .arg(output.path())
        .arg("--kits-root")
        .arg(kits.root())
        .assert()
        .failure()
        .code(1)
        .stderr(predicates::str::contains("makecert"));
}
