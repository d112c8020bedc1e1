//! `manifest.json` data model
//!
//! Lists, per state, the relative path of the icon generated for each size. A consumer picks
//! an icon by looking up `states[state][size]`, which is the same shape as the path map a
//! browser extension hands to its action API.

use crate::sink::DirectorySink;
use anyhow::{Context, Result};
use serde::{Serialize, Serializer};
use std::{collections::BTreeMap, path::Path};

pub const MANIFEST_FILE: &str = "manifest.json";

/// Root structure of `manifest.json`
#[derive(Serialize, Debug, Clone)]
pub struct IconManifest {
    /// States in configuration order, each mapping size to path
    #[serde(serialize_with = "serialize_states")]
    pub states: Vec<ManifestState>,

    /// Versioning and authorship information
    pub info: Info,
}

/// Icons generated for one state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestState {
    pub name: String,

    /// Size in pixels to path relative to the manifest
    pub icons: BTreeMap<u32, String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct Info {
    /// The format version of the manifest (currently 1)
    pub version: u8,

    /// The tool that wrote the manifest
    pub author: String,
}

fn serialize_states<S: Serializer>(
    states: &[ManifestState],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_map(states.iter().map(|state| (&state.name, &state.icons)))
}

impl IconManifest {
    pub fn new(author: String) -> Self {
        Self {
            states: Vec::new(),
            info: Info { version: 1, author },
        }
    }

    /// Record an icon, creating the state entry on first use.
    pub fn add_icon(&mut self, state: &str, size: u32) {
        let path = DirectorySink::relative_path(state, size);
        match self.states.iter_mut().find(|s| s.name == state) {
            Some(entry) => {
                entry.icons.insert(size, path);
            }
            None => self.states.push(ManifestState {
                name: state.to_string(),
                icons: BTreeMap::from([(size, path)]),
            }),
        }
    }

    pub fn icon_path(&self, state: &str, size: u32) -> Option<&str> {
        self.states
            .iter()
            .find(|s| s.name == state)
            .and_then(|s| s.icons.get(&size))
            .map(String::as_str)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize manifest.json")
    }
}

/// Write `manifest.json` into `dir`
pub fn write_manifest(dir: &Path, manifest: &IconManifest) -> Result<()> {
    let json = manifest.to_json()?;
    std::fs::write(dir.join(MANIFEST_FILE), json).context("Failed to write manifest.json")
}
