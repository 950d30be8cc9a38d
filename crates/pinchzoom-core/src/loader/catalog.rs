use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::config::LoaderConfig;
use crate::consts::DEFAULT_RESOURCE_EXTENSIONS;
use crate::error::LoadError;

/// Bundled images addressable by name.
///
/// Names resolve first against in-memory entries, then as relative paths
/// under the root directory. A name without an extension tries each
/// configured extension in order.
#[derive(Clone, Debug)]
pub struct ResourceCatalog {
    root: Option<PathBuf>,
    extensions: Vec<String>,
    entries: HashMap<String, Arc<[u8]>>,
}

impl Default for ResourceCatalog {
    fn default() -> Self {
        Self {
            root: None,
            extensions: DEFAULT_RESOURCE_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            entries: HashMap::new(),
        }
    }
}

impl ResourceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            ..Self::default()
        }
    }

    pub fn from_config(config: &LoaderConfig) -> Self {
        Self {
            root: config.resource_dir.clone(),
            extensions: config.resource_extensions.clone(),
            entries: HashMap::new(),
        }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Register encoded image bytes under `name`.
    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) {
        self.entries.insert(name.into(), bytes.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name) || self.locate(name).is_some()
    }

    /// Encoded bytes for `name`.
    pub fn resolve(&self, name: &str) -> Result<Vec<u8>, LoadError> {
        if let Some(bytes) = self.entries.get(name) {
            return Ok(bytes.to_vec());
        }
        let path = self
            .locate(name)
            .ok_or_else(|| LoadError::ResourceNotFound(name.to_string()))?;
        std::fs::read(&path)
            .map_err(|e| LoadError::ResourceNotFound(format!("{}: {e}", path.display())))
    }

    fn locate(&self, name: &str) -> Option<PathBuf> {
        let root = self.root.as_ref()?;
        let relative = Path::new(name);
        if name.is_empty()
            || !relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)))
        {
            return None;
        }

        let direct = root.join(relative);
        if direct.is_file() {
            return Some(direct);
        }
        if relative.extension().is_some() {
            return None;
        }
        self.extensions
            .iter()
            .map(|ext| direct.with_extension(ext))
            .find(|p| p.is_file())
    }
}
