//! Windows Store app packaging and signing pipeline.
//!
//! Packages an application directory into an `.appx` archive, generates a
//! self-signed certificate for the publisher named in the app manifest,
//! converts it to a PKCS#12 container, and authenticode-signs the archive.
//! The four stages are carried out by the `makeappx`, `makecert`, `pvk2pfx`,
//! and `signtool` executables of the newest installed Windows 10 SDK, run in
//! strict order with abort on the first failure.
//!
//! Usable as a CLI tool (interactive retry loop) or as a library via
//! [`pipeline::run`].

pub mod cli;
pub mod error;
pub mod pipeline;

// Re-export commonly used types
pub use error::{CliError, PackagerError, Result};
