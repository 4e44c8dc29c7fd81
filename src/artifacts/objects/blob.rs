//! File content blob
//!
//! Blobs hold the raw bytes of a file. The digest is computed over those bytes
//! alone, with no header, so a blob's ID equals the digest of the file it was
//! read from.

use bytes::Bytes;
use derive_new::new;

/// Line substituted for content that cannot be decoded as UTF-8 text
pub const BINARY_CONTENT_MARKER: &str = "[BINARY FILE - CANNOT DISPLAY CONTENT]";

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// The content as text, if it is valid UTF-8
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.content).ok()
    }

    pub fn is_binary(&self) -> bool {
        self.text().is_none()
    }

    /// Split the content into lines with terminators stripped.
    ///
    /// Binary content yields the single [`BINARY_CONTENT_MARKER`] line.
    pub fn lines(&self) -> Vec<String> {
        match self.text() {
            Some(text) => text.lines().map(str::to_string).collect(),
            None => vec![BINARY_CONTENT_MARKER.to_string()],
        }
    }
}

impl From<Vec<u8>> for Blob {
    fn from(data: Vec<u8>) -> Self {
        Blob::new(Bytes::from(data))
    }
}
