use crate::error::GenerateError;
use crate::geometry::GeometryParams;
use crate::raster::BadgeColor;
use crate::sink::is_valid_state_name;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{collections::HashSet, path::Path};
use tracing::warn;

pub const DEFAULT_SIZES: [u32; 3] = [16, 48, 128];

/// A named visual variant and the color of its badge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StateSpec {
    pub name: String,
    pub color: BadgeColor,
}

impl StateSpec {
    pub fn new(name: impl Into<String>, color: BadgeColor) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// Which icons to generate: every state at every size.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IconConfig {
    #[serde(default = "default_sizes")]
    pub sizes: Vec<u32>,

    #[serde(default = "default_states")]
    pub states: Vec<StateSpec>,
}

fn default_sizes() -> Vec<u32> {
    DEFAULT_SIZES.to_vec()
}

fn default_states() -> Vec<StateSpec> {
    vec![
        StateSpec::new("enabled", BadgeColor::new(76, 175, 80)),
        StateSpec::new("disabled", BadgeColor::new(158, 158, 158)),
    ]
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            sizes: default_sizes(),
            states: default_states(),
        }
    }
}

impl IconConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Check names and sizes and drop repeated sizes, keeping the first occurrence.
    pub fn validate(mut self) -> Result<Self> {
        if self.sizes.is_empty() {
            anyhow::bail!("At least one icon size is required");
        }
        if self.states.is_empty() {
            anyhow::bail!("At least one state is required");
        }

        let mut seen = HashSet::new();
        self.sizes.retain(|&size| {
            let first = seen.insert(size);
            if !first {
                warn!("Ignoring duplicate size {size}");
            }
            first
        });
        for &size in &self.sizes {
            GeometryParams::for_size(size)?;
        }

        let mut names = HashSet::new();
        for state in &self.states {
            validate_state_name(&state.name)?;
            if !names.insert(state.name.as_str()) {
                anyhow::bail!("State '{}' is defined more than once", state.name);
            }
        }

        Ok(self)
    }

    /// `(state, size)` pairs in generation order: states as configured, then sizes.
    pub fn plan(&self) -> Vec<(&StateSpec, u32)> {
        self.states
            .iter()
            .flat_map(|state| self.sizes.iter().map(move |&size| (state, size)))
            .collect()
    }
}

fn validate_state_name(name: &str) -> Result<()> {
    if name.is_empty() {
        anyhow::bail!("State name must not be empty");
    }
    if !is_valid_state_name(name) {
        return Err(GenerateError::InvalidState {
            name: name.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Parse a `NAME=COLOR` command line argument.
pub fn parse_state_arg(arg: &str) -> Result<StateSpec> {
    let (name, color) = arg
        .split_once('=')
        .with_context(|| format!("Expected NAME=COLOR, got '{arg}'"))?;
    let name = name.trim();
    validate_state_name(name)?;
    let color = color
        .parse()
        .with_context(|| format!("Invalid color for state '{name}'"))?;
    Ok(StateSpec::new(name, color))
}
