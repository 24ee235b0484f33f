use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

/// `fixtures/` at the workspace root.
const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../../fixtures");

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../../../fixtures/manifest.json"))
        .expect("fixtures/manifest.json is valid JSON")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    documents: HashMap<String, DocumentEntry>,
}

#[derive(Debug, Deserialize)]
struct DocumentEntry {
    /// Path of the `.bvh` file, relative to `fixtures/`.
    path: String,
    #[serde(flatten)]
    shape: Shape,
}

impl DocumentEntry {
    fn file(&self) -> PathBuf {
        Path::new(FIXTURES_DIR).join(&self.path)
    }
}

/// Counts a fixture document is known to have once parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Shape {
    pub joints: usize,
    pub channels: usize,
    pub frames: usize,
}

fn entry(name: &str) -> Result<&'static DocumentEntry> {
    MANIFEST
        .documents
        .get(name)
        .ok_or_else(|| anyhow!("no BVH fixture named '{name}' in fixtures/manifest.json"))
}

pub mod documents {
    use super::*;

    /// Fixture names, sorted.
    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.documents.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Raw BVH text of the fixture.
    pub fn text(name: &str) -> Result<String> {
        let file = entry(name)?.file();
        fs::read_to_string(&file)
            .with_context(|| format!("failed to read BVH fixture {}", file.display()))
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        Ok(entry(name)?.file())
    }

    pub fn shape(name: &str) -> Result<Shape> {
        Ok(entry(name)?.shape)
    }
}
