use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies the image to display: a remote URL or a local catalog name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageDescriptor {
    uri: String,
    is_remote: bool,
}

impl ImageDescriptor {
    pub fn new(uri: impl Into<String>, is_remote: bool) -> Self {
        Self {
            uri: uri.into(),
            is_remote,
        }
    }

    pub fn remote(uri: impl Into<String>) -> Self {
        Self::new(uri, true)
    }

    pub fn local(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    /// Treat `http://` and `https://` URIs as remote, anything else as a
    /// local resource name.
    pub fn from_uri(uri: impl Into<String>) -> Self {
        let uri = uri.into();
        let lower = uri.to_ascii_lowercase();
        let is_remote = lower.starts_with("http://") || lower.starts_with("https://");
        Self::new(uri, is_remote)
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn is_remote(&self) -> bool {
        self.is_remote
    }
}

impl fmt::Display for ImageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_remote { "remote" } else { "local" };
        write!(f, "{} ({kind})", self.uri)
    }
}
