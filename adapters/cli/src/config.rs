//! TOML scene configuration merged with command-line overrides.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use clap::ValueEnum;
use meadow_core::{
    GenerationMode, MapConfig, PathLayout, PathPlan, TileWeights, DEFAULT_MAP_HEIGHT,
    DEFAULT_MAP_WIDTH,
};
use serde::Deserialize;

/// Interior fill strategy selectable from the file or the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ModeName {
    /// Modulo-placed trees and flowers on grass.
    Landmarks,
    /// Independent weighted sampling per tile.
    Weighted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum PathName {
    Standard,
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum PathSetting {
    Named(PathName),
    Layout(PathLayout),
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
struct MapSection {
    width: Option<u32>,
    height: Option<u32>,
    mode: Option<ModeName>,
    seed: Option<u64>,
    weights: Option<TileWeights>,
    path: Option<PathSetting>,
}

/// Parsed contents of a scene configuration file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    #[serde(default)]
    map: MapSection,
}

/// Values supplied on the command line; each one wins over the file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Overrides {
    pub(crate) width: Option<u32>,
    pub(crate) height: Option<u32>,
    pub(crate) mode: Option<ModeName>,
    pub(crate) seed: Option<u64>,
}

impl FileConfig {
    /// Reads and parses the configuration file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scene config at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse scene config at {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("invalid scene config toml")
    }

    /// Merges the file with command-line overrides into a generator config.
    pub(crate) fn resolve(&self, overrides: Overrides) -> MapConfig {
        let section = &self.map;
        let width = overrides
            .width
            .or(section.width)
            .unwrap_or(DEFAULT_MAP_WIDTH);
        let height = overrides
            .height
            .or(section.height)
            .unwrap_or(DEFAULT_MAP_HEIGHT);
        let mode_name = overrides
            .mode
            .or(section.mode)
            .unwrap_or(ModeName::Landmarks);

        let mode = match mode_name {
            ModeName::Landmarks => GenerationMode::Landmarks,
            ModeName::Weighted => GenerationMode::Weighted {
                seed: overrides.seed.or(section.seed).unwrap_or_default(),
                weights: section.weights.unwrap_or_default(),
            },
        };

        let path = match section.path {
            Some(PathSetting::Named(PathName::Standard)) => PathPlan::Standard,
            Some(PathSetting::Named(PathName::None)) => PathPlan::Absent,
            Some(PathSetting::Layout(layout)) => PathPlan::Custom(layout),
            None => match mode_name {
                ModeName::Landmarks => PathPlan::Standard,
                ModeName::Weighted => PathPlan::Absent,
            },
        };

        MapConfig {
            width,
            height,
            mode,
            path,
        }
    }
}
