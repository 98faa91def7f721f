//! Procedural tile map generation.
//!
//! Rules are applied in increasing precedence, each later rule overwriting
//! the tiles written by earlier ones:
//!
//! 1. interior fill (landmarks or weighted sampling, [`TileKind::Grass`] as fallback),
//! 2. the outer ring forced to [`TileKind::Water`],
//! 3. path cells forced to [`TileKind::DirtPath`], including where a path
//!    reaches the outer ring.

use log::debug;
use meadow_core::{
    GenerationMode, MapConfig, MapDimensions, MapError, PathLayout, PathPlan, TileCoord, TileKind,
    TileWeights,
};
use rand::{
    distributions::{Distribution, WeightedIndex},
    SeedableRng,
};
use rand_chacha::ChaCha8Rng;

use crate::map::TileMap;

const TREE_SPACING: u32 = 10;
const FLOWER_SPACING: u32 = 8;

/// Generates a landmark-filled map with the standard paths.
pub fn generate(width: u32, height: u32) -> Result<TileMap, MapError> {
    generate_with(&MapConfig::landmarks(width, height))
}

/// Generates a map according to the provided configuration.
pub fn generate_with(config: &MapConfig) -> Result<TileMap, MapError> {
    let dimensions = MapDimensions::new(config.width, config.height)?;
    let mut map = match config.mode {
        GenerationMode::Landmarks => fill_landmarks(dimensions),
        GenerationMode::Weighted { seed, weights } => fill_weighted(dimensions, seed, &weights)?,
    };
    finish(&mut map, config.path);
    debug!(
        "generated {}x{} map using {:?}",
        dimensions.width(),
        dimensions.height(),
        config.mode
    );
    Ok(map)
}

pub(crate) fn default_map() -> TileMap {
    let mut map = fill_landmarks(MapDimensions::DEFAULT);
    finish(&mut map, PathPlan::Standard);
    map
}

/// Kind assigned to an interior tile by the landmark rule.
#[must_use]
pub fn landmark_kind(tile: TileCoord) -> TileKind {
    if tile.x() % TREE_SPACING == 0 && tile.y() % TREE_SPACING == 0 {
        TileKind::Tree
    } else if tile.x() % FLOWER_SPACING == 0 && tile.y() % FLOWER_SPACING == 0 {
        TileKind::Flower
    } else {
        TileKind::Grass
    }
}

fn fill_landmarks(dimensions: MapDimensions) -> TileMap {
    TileMap::from_fn(dimensions, landmark_kind)
}

fn fill_weighted(
    dimensions: MapDimensions,
    seed: u64,
    weights: &TileWeights,
) -> Result<TileMap, MapError> {
    let distribution = WeightedIndex::new(
        TileKind::GENERATED
            .iter()
            .map(|kind| weights.weight(*kind)),
    )
    .map_err(|_| MapError::DegenerateWeights)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Ok(TileMap::from_fn(dimensions, |_| {
        TileKind::GENERATED[distribution.sample(&mut rng)]
    }))
}

fn finish(map: &mut TileMap, plan: PathPlan) {
    let dimensions = map.dimensions();
    apply_border(map, dimensions);
    if let Some(layout) = plan.resolve(dimensions) {
        carve_paths(map, dimensions, &layout);
    }
}

fn apply_border(map: &mut TileMap, dimensions: MapDimensions) {
    let last_column = dimensions.width() - 1;
    let last_row = dimensions.height() - 1;
    for x in 0..dimensions.width() {
        map.set(TileCoord::new(x, 0), TileKind::Water);
        map.set(TileCoord::new(x, last_row), TileKind::Water);
    }
    for y in 0..dimensions.height() {
        map.set(TileCoord::new(0, y), TileKind::Water);
        map.set(TileCoord::new(last_column, y), TileKind::Water);
    }
}

fn carve_paths(map: &mut TileMap, dimensions: MapDimensions, layout: &PathLayout) {
    if layout.row < dimensions.height() && !layout.columns.is_empty() {
        let end = layout.columns.end.min(dimensions.width() - 1);
        for x in layout.columns.start..=end {
            map.set(TileCoord::new(x, layout.row), TileKind::DirtPath);
        }
    }
    if layout.column < dimensions.width() && !layout.rows.is_empty() {
        let end = layout.rows.end.min(dimensions.height() - 1);
        for y in layout.rows.start..=end {
            map.set(TileCoord::new(layout.column, y), TileKind::DirtPath);
        }
    }
}
