use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use crate::models::DEFAULT_TEMPLATE;

/// Report template compiled into the binary
const BUNDLED_INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Source of read-only template assets, looked up by identifier
pub trait AssetProvider {
    /// Text of the asset, or `None` if there is no such asset
    fn load(&self, id: &str) -> Option<String>;
}

impl<A: AssetProvider + ?Sized> AssetProvider for &A {
    fn load(&self, id: &str) -> Option<String> {
        (**self).load(id)
    }
}

impl<A: AssetProvider + ?Sized> AssetProvider for std::sync::Arc<A> {
    fn load(&self, id: &str) -> Option<String> {
        (**self).load(id)
    }
}

/// Templates shipped with the crate
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledAssets;

impl AssetProvider for BundledAssets {
    fn load(&self, id: &str) -> Option<String> {
        match id {
            DEFAULT_TEMPLATE => Some(BUNDLED_INDEX_HTML.to_string()),
            _ => None,
        }
    }
}

/// Templates read from a directory on disk, e.g. a frontend build output
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetProvider for DirectoryAssets {
    fn load(&self, id: &str) -> Option<String> {
        let relative = Path::new(id);
        // Identifiers stay inside the root
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return None;
        }
        std::fs::read_to_string(self.root.join(relative)).ok()
    }
}

/// Templates held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssets {
    assets: HashMap<String, String>,
}

impl InMemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_asset(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.assets.insert(id.into(), text.into());
        self
    }
}

impl AssetProvider for InMemoryAssets {
    fn load(&self, id: &str) -> Option<String> {
        self.assets.get(id).cloned()
    }
}
