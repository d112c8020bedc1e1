//! Destinations for encoded icons.

use crate::error::GenerateError;
use crate::raster::IconAsset;
use std::{
    collections::BTreeMap,
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// State names become directory names, so they must be a single plain path component.
pub fn is_valid_state_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn check_state_name(name: &str) -> Result<(), GenerateError> {
    if is_valid_state_name(name) {
        Ok(())
    } else {
        Err(GenerateError::InvalidState {
            name: name.to_string(),
        })
    }
}

pub trait AssetSink {
    fn write(&mut self, asset: &IconAsset) -> Result<(), GenerateError>;
}

/// Writes each asset to `<root>/<state>/icon<size>.png`.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of an icon relative to the sink root, with `/` separators.
    pub fn relative_path(state: &str, size: u32) -> String {
        format!("{state}/icon{size}.png")
    }

    pub fn path_for(&self, state: &str, size: u32) -> PathBuf {
        self.root.join(state).join(format!("icon{size}.png"))
    }

    /// Remove the directories of the given states. The root itself is left in place.
    pub fn clean<'a>(&self, states: impl IntoIterator<Item = &'a str>) -> Result<(), GenerateError> {
        for state in states {
            check_state_name(state)?;
            let dir = self.root.join(state);
            if !dir.exists() {
                continue;
            }
            std::fs::remove_dir_all(&dir).map_err(|source| GenerateError::SinkWrite {
                path: dir.clone(),
                source,
            })?;
            debug!("Removed {}", dir.display());
        }
        Ok(())
    }
}

impl AssetSink for DirectorySink {
    fn write(&mut self, asset: &IconAsset) -> Result<(), GenerateError> {
        check_state_name(&asset.state)?;
        let path = self.path_for(&asset.state, asset.size);
        let sink_err = |source| GenerateError::SinkWrite {
            path: path.clone(),
            source,
        };

        if let Some(dir) = path.parent() {
            create_dir_all(dir).map_err(sink_err)?;
        }

        let mut out_file = BufWriter::new(File::create(&path).map_err(sink_err)?);
        out_file.write_all(&asset.bytes).map_err(sink_err)?;
        out_file.flush().map_err(sink_err)?;

        info!(
            "✓ Generated {}",
            Self::relative_path(&asset.state, asset.size)
        );
        Ok(())
    }
}

/// Keeps encoded icons in memory, keyed by `(state, size)`.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    assets: BTreeMap<(String, u32), Vec<u8>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, state: &str, size: u32) -> Option<&[u8]> {
        self.assets
            .get(&(state.to_string(), size))
            .map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = (&str, u32)> {
        self.assets.keys().map(|(state, size)| (state.as_str(), *size))
    }
}

impl AssetSink for MemorySink {
    fn write(&mut self, asset: &IconAsset) -> Result<(), GenerateError> {
        self.assets
            .insert((asset.state.clone(), asset.size), asset.bytes.clone());
        Ok(())
    }
}
