//! Appx manifest reading.
//!
//! Pulls the publisher identity out of `AppxManifest.xml`. Only the first
//! `Identity` element in document order is consulted; the scan stops as soon
//! as one is seen.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;

use super::error::{Error, Result};

/// Fixed manifest file name expected directly inside the source directory.
pub const MANIFEST_FILE_NAME: &str = "AppxManifest.xml";

/// Reads the `Publisher` attribute of the first `Identity` element.
///
/// Fails with [`Error::PublisherMissing`] when the first `Identity` element
/// carries no non-empty `Publisher` attribute, or when no `Identity` element
/// exists at all.
pub fn read_publisher(manifest_path: &Path) -> Result<String> {
    let xml = std::fs::read_to_string(manifest_path)?;
    let mut reader = Reader::from_str(&xml);

    loop {
        let event = reader
            .read_event()
            .map_err(|e| Error::ManifestParse(e.to_string()))?;
        match event {
            Event::Start(element) | Event::Empty(element)
                if element.local_name().as_ref() == b"Identity" =>
            {
                for attribute in element.attributes() {
                    let attribute =
                        attribute.map_err(|e| Error::ManifestParse(e.to_string()))?;
                    if attribute.key.local_name().as_ref() == b"Publisher" {
                        let value = attribute
                            .unescape_value()
                            .map_err(|e| Error::ManifestParse(e.to_string()))?;
                        if value.is_empty() {
                            return Err(Error::PublisherMissing);
                        }
                        return Ok(value.into_owned());
                    }
                }
                // First Identity element wins; a missing attribute on it is
                // fatal even if a later element would have one.
                return Err(Error::PublisherMissing);
            }
            Event::Eof => return Err(Error::PublisherMissing),
            _ => {}
        }
    }
}
