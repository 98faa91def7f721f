#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Meadow scenes.
//!
//! This crate defines the vocabulary that connects adapters, the authoritative
//! world, and pure systems. Adapters submit [`Command`] values describing
//! desired mutations, the world executes those commands via its `apply` entry
//! point, and then broadcasts [`Event`] values for systems to react to. The
//! terrain vocabulary ([`TileKind`], [`TileCoord`], [`MapDimensions`]) and the
//! generation parameters ([`MapConfig`]) live here so every crate agrees on
//! what a tile is and where it sits.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Meadow.";

/// Edge length of a single square tile measured in world units.
pub const TILE_LENGTH: u32 = 32;

/// Width of the tile world observed in the walker scene.
pub const DEFAULT_MAP_WIDTH: u32 = 40;

/// Height of the tile world observed in the walker scene.
pub const DEFAULT_MAP_HEIGHT: u32 = 30;

/// Largest number of tiles a single map may hold.
pub const MAX_MAP_CELLS: u64 = 1 << 24;

/// Terrain type carried by a single tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TileKind {
    /// Impassable water, used for the outer ring of every map.
    Water,
    /// Decorative flower that the player may pick.
    Flower,
    /// Impassable tree landmark.
    Tree,
    /// Open grass, the fallback terrain.
    Grass,
    /// Walkable dirt path.
    DirtPath,
    /// Ground left behind after a flower was picked.
    Cleared,
}

impl TileKind {
    /// Kinds the generator is allowed to produce.
    pub const GENERATED: [TileKind; 5] = [
        TileKind::Water,
        TileKind::Flower,
        TileKind::Tree,
        TileKind::Grass,
        TileKind::DirtPath,
    ];

    /// Reports whether the kind participates in collision resolution.
    #[must_use]
    pub const fn blocks_movement(self) -> bool {
        matches!(self, Self::Water | Self::Tree)
    }

    /// Reports whether the player can interact with the kind.
    #[must_use]
    pub const fn is_interactable(self) -> bool {
        matches!(self, Self::Flower)
    }
}

/// Location of a single tile expressed as column (`x`) and row (`y`) indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    x: u32,
    y: u32,
}

impl TileCoord {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Maps a world-space position onto the tile containing it.
    ///
    /// Returns `None` for negative or non-finite positions, and for positions
    /// too large to be represented as a tile index.
    #[must_use]
    pub fn from_world(x: f32, y: f32) -> Option<Self> {
        Some(Self::new(world_axis_to_tile(x)?, world_axis_to_tile(y)?))
    }

    /// World-space position of the tile's upper-left corner.
    #[must_use]
    pub fn world_origin(&self) -> (f32, f32) {
        let length = TILE_LENGTH as f32;
        (self.x as f32 * length, self.y as f32 * length)
    }

    /// World-space position of the tile's centre.
    #[must_use]
    pub fn world_center(&self) -> (f32, f32) {
        let half = TILE_LENGTH as f32 * 0.5;
        let (x, y) = self.world_origin();
        (x + half, y + half)
    }
}

fn world_axis_to_tile(value: f32) -> Option<u32> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let tile = (value / TILE_LENGTH as f32).floor();
    if tile > u32::MAX as f32 {
        return None;
    }
    Some(tile as u32)
}

/// Validated extent of a tile map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MapDimensions {
    width: u32,
    height: u32,
}

impl MapDimensions {
    /// Extent of the walker scene's world.
    pub const DEFAULT: MapDimensions = MapDimensions {
        width: DEFAULT_MAP_WIDTH,
        height: DEFAULT_MAP_HEIGHT,
    };

    /// Creates a new dimension descriptor.
    ///
    /// Zero-sized axes and maps holding more than [`MAX_MAP_CELLS`] tiles are
    /// rejected.
    pub fn new(width: u32, height: u32) -> Result<Self, MapError> {
        if width == 0 || height == 0 {
            return Err(MapError::InvalidDimensions { width, height });
        }
        let cells = u64::from(width) * u64::from(height);
        if cells > MAX_MAP_CELLS || usize::try_from(cells).is_err() {
            return Err(MapError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of tiles covered by the dimensions.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Reports whether the coordinate lies inside the map.
    #[must_use]
    pub const fn contains(&self, tile: TileCoord) -> bool {
        tile.x < self.width && tile.y < self.height
    }

    /// Reports whether the coordinate lies on the outer ring of the map.
    #[must_use]
    pub const fn is_border(&self, tile: TileCoord) -> bool {
        self.contains(tile)
            && (tile.x == 0 || tile.y == 0 || tile.x == self.width - 1 || tile.y == self.height - 1)
    }

    /// Row-major storage index of the coordinate, if it lies inside the map.
    #[must_use]
    pub fn index(&self, tile: TileCoord) -> Option<usize> {
        if !self.contains(tile) {
            return None;
        }
        Some(tile.y as usize * self.width as usize + tile.x as usize)
    }

    /// Coordinate stored at the provided row-major index.
    #[must_use]
    pub fn coord(&self, index: usize) -> Option<TileCoord> {
        if index >= self.cell_count() {
            return None;
        }
        let width = self.width as usize;
        Some(TileCoord::new((index % width) as u32, (index / width) as u32))
    }
}

/// Inclusive run of tile indices along one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathSpan {
    /// First index covered by the span.
    pub start: u32,
    /// Last index covered by the span. A span with `end < start` is empty.
    pub end: u32,
}

impl PathSpan {
    /// Creates a new inclusive span.
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Reports whether the index falls within the span.
    #[must_use]
    pub const fn contains(&self, value: u32) -> bool {
        self.start <= value && value <= self.end
    }

    /// Reports whether the span covers no indices.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// Designated row and column forced to [`TileKind::DirtPath`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathLayout {
    /// Row index carrying the horizontal path.
    pub row: u32,
    /// Columns covered by the horizontal path.
    pub columns: PathSpan,
    /// Column index carrying the vertical path.
    pub column: u32,
    /// Rows covered by the vertical path.
    pub rows: PathSpan,
}

impl PathLayout {
    /// Distance kept between the standard path ends and the map edge.
    pub const EDGE_MARGIN: u32 = 5;

    /// Standard cross-shaped layout centred on the map.
    ///
    /// The horizontal path runs along `height / 2` from column 5 to
    /// `width - 6`, the vertical one along `width / 2` from row 5 to
    /// `height - 6`. Maps narrower than eleven tiles get an empty span.
    #[must_use]
    pub fn standard(dimensions: MapDimensions) -> Self {
        let far_edge = Self::EDGE_MARGIN + 1;
        Self {
            row: dimensions.height() / 2,
            columns: PathSpan::new(
                Self::EDGE_MARGIN,
                dimensions.width().saturating_sub(far_edge),
            ),
            column: dimensions.width() / 2,
            rows: PathSpan::new(
                Self::EDGE_MARGIN,
                dimensions.height().saturating_sub(far_edge),
            ),
        }
    }

    /// Reports whether the coordinate is part of either path.
    #[must_use]
    pub const fn contains(&self, tile: TileCoord) -> bool {
        (tile.y == self.row && self.columns.contains(tile.x))
            || (tile.x == self.column && self.rows.contains(tile.y))
    }
}

/// Relative sampling weights used by weighted-random generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileWeights {
    /// Weight assigned to [`TileKind::Water`].
    pub water: u32,
    /// Weight assigned to [`TileKind::Flower`].
    pub flower: u32,
    /// Weight assigned to [`TileKind::Tree`].
    pub tree: u32,
    /// Weight assigned to [`TileKind::Grass`].
    pub grass: u32,
    /// Weight assigned to [`TileKind::DirtPath`].
    pub dirt_path: u32,
}

impl TileWeights {
    /// Weight attached to the provided kind. [`TileKind::Cleared`] is never sampled.
    #[must_use]
    pub const fn weight(&self, kind: TileKind) -> u32 {
        match kind {
            TileKind::Water => self.water,
            TileKind::Flower => self.flower,
            TileKind::Tree => self.tree,
            TileKind::Grass => self.grass,
            TileKind::DirtPath => self.dirt_path,
            TileKind::Cleared => 0,
        }
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> u64 {
        TileKind::GENERATED
            .iter()
            .map(|kind| u64::from(self.weight(*kind)))
            .sum()
    }

    /// Normalised probability of sampling the provided kind.
    #[must_use]
    pub fn share(&self, kind: TileKind) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        f64::from(self.weight(kind)) / total as f64
    }
}

impl Default for TileWeights {
    fn default() -> Self {
        Self {
            water: 1,
            flower: 5,
            tree: 2,
            grass: 20,
            dirt_path: 10,
        }
    }
}

/// Strategy used to fill the interior of a map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenerationMode {
    /// Grass base with modulo-placed trees and flowers.
    Landmarks,
    /// Independent per-tile sampling from a weighted distribution.
    Weighted {
        /// Seed that makes the sampled map reproducible.
        seed: u64,
        /// Relative weights of each generated kind.
        weights: TileWeights,
    },
}

/// Selects which path cells are carved into a generated map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathPlan {
    /// Use [`PathLayout::standard`] for the map's dimensions.
    Standard,
    /// Carve no paths.
    Absent,
    /// Carve the provided layout.
    Custom(PathLayout),
}

impl PathPlan {
    /// Resolves the plan into a concrete layout for the provided dimensions.
    #[must_use]
    pub fn resolve(&self, dimensions: MapDimensions) -> Option<PathLayout> {
        match self {
            Self::Standard => Some(PathLayout::standard(dimensions)),
            Self::Absent => None,
            Self::Custom(layout) => Some(*layout),
        }
    }
}

/// Parameters consumed by the tile map generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MapConfig {
    /// Requested number of tile columns.
    pub width: u32,
    /// Requested number of tile rows.
    pub height: u32,
    /// Interior fill strategy.
    pub mode: GenerationMode,
    /// Paths carved after the border is applied.
    pub path: PathPlan,
}

impl MapConfig {
    /// Landmark-filled map with the standard cross of paths.
    #[must_use]
    pub const fn landmarks(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            mode: GenerationMode::Landmarks,
            path: PathPlan::Standard,
        }
    }

    /// Weighted-random map using the default weights and no paths.
    #[must_use]
    pub fn weighted(width: u32, height: u32, seed: u64) -> Self {
        Self {
            width,
            height,
            mode: GenerationMode::Weighted {
                seed,
                weights: TileWeights::default(),
            },
            path: PathPlan::Absent,
        }
    }

    /// Replaces the path plan.
    #[must_use]
    pub const fn with_path(mut self, path: PathPlan) -> Self {
        self.path = path;
        self
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self::landmarks(DEFAULT_MAP_WIDTH, DEFAULT_MAP_HEIGHT)
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the current map with a freshly generated one.
    GenerateMap {
        /// Parameters handed to the generator.
        config: MapConfig,
    },
    /// Picks the flower growing on the provided tile.
    PickFlower {
        /// Tile the player interacted with.
        tile: TileCoord,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a new map replaced the previous one.
    MapGenerated {
        /// Extent of the generated map.
        dimensions: MapDimensions,
        /// Strategy used to fill the interior.
        mode: GenerationMode,
    },
    /// Reports that a generation request was rejected; the previous map stays active.
    MapGenerationRejected {
        /// Specific reason the request failed.
        reason: MapError,
    },
    /// Confirms that a flower was picked and its tile cleared.
    FlowerPicked {
        /// Tile that held the flower.
        tile: TileCoord,
    },
    /// Reports that an interaction request was rejected.
    InteractionRejected {
        /// Tile targeted by the interaction.
        tile: TileCoord,
        /// Specific reason the interaction failed.
        reason: MapError,
    },
}

/// Errors raised by tile map construction, queries and mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum MapError {
    /// One of the requested axes was zero or the map holds too many tiles.
    #[error("map dimensions {width}x{height} are invalid")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// Weighted generation was requested with every weight set to zero.
    #[error("weighted generation requires at least one positive weight")]
    DegenerateWeights,
    /// A coordinate fell outside the map.
    #[error("tile ({}, {}) lies outside the {}x{} map", .tile.x(), .tile.y(), .dimensions.width(), .dimensions.height())]
    OutOfBounds {
        /// Offending coordinate.
        tile: TileCoord,
        /// Extent of the queried map.
        dimensions: MapDimensions,
    },
    /// The targeted tile does not support the interaction.
    #[error("tile ({}, {}) holds {kind:?}, which cannot be interacted with", .tile.x(), .tile.y())]
    InvalidInteraction {
        /// Targeted coordinate.
        tile: TileCoord,
        /// Kind found on the tile.
        kind: TileKind,
    },
}

#[cfg(test)]
mod tests {
    use super::{
        MapConfig, MapDimensions, MapError, PathLayout, PathSpan, TileCoord, TileKind,
        TileWeights, MAX_MAP_CELLS, TILE_LENGTH,
    };
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn blocking_table_matches_terrain_rules() {
        assert!(TileKind::Water.blocks_movement());
        assert!(TileKind::Tree.blocks_movement());
        assert!(!TileKind::Grass.blocks_movement());
        assert!(!TileKind::Flower.blocks_movement());
        assert!(!TileKind::DirtPath.blocks_movement());
        assert!(!TileKind::Cleared.blocks_movement());
    }

    #[test]
    fn only_flowers_are_interactable() {
        for kind in TileKind::GENERATED {
            assert_eq!(kind.is_interactable(), kind == TileKind::Flower);
        }
        assert!(!TileKind::Cleared.is_interactable());
    }

    #[test]
    fn world_positions_floor_into_tiles() {
        assert_eq!(TileCoord::from_world(0.0, 0.0), Some(TileCoord::new(0, 0)));
        assert_eq!(TileCoord::from_world(31.9, 32.0), Some(TileCoord::new(0, 1)));
        assert_eq!(TileCoord::from_world(650.0, 485.0), Some(TileCoord::new(20, 15)));
        assert_eq!(TileCoord::from_world(-0.5, 10.0), None);
        assert_eq!(TileCoord::from_world(f32::NAN, 10.0), None);
    }

    #[test]
    fn tile_centre_maps_back_to_same_tile() {
        let tile = TileCoord::new(7, 3);
        let (x, y) = tile.world_center();
        assert_eq!(TileCoord::from_world(x, y), Some(tile));
        assert_eq!(tile.world_origin(), (7.0 * TILE_LENGTH as f32, 3.0 * TILE_LENGTH as f32));
    }

    #[test]
    fn dimensions_reject_zero_axes() {
        assert_eq!(
            MapDimensions::new(0, 5),
            Err(MapError::InvalidDimensions {
                width: 0,
                height: 5
            })
        );
        assert!(MapDimensions::new(3, 0).is_err());
        assert!(MapDimensions::new(1, 1).is_ok());
    }

    #[test]
    fn dimensions_reject_oversized_maps() {
        assert_eq!(
            MapDimensions::new(100_000, 100_000),
            Err(MapError::InvalidDimensions {
                width: 100_000,
                height: 100_000
            })
        );
        assert!(MapDimensions::new(u32::MAX, u32::MAX).is_err());
        assert!(MapDimensions::new(4_096, 4_096).is_ok());
        assert!(MapDimensions::new(4_097, 4_096).is_err());
        assert_eq!(4_096 * 4_096, MAX_MAP_CELLS);
    }

    #[test]
    fn dimensions_index_is_row_major() {
        let dimensions = MapDimensions::new(4, 3).expect("valid dimensions");
        assert_eq!(dimensions.index(TileCoord::new(1, 2)), Some(9));
        assert_eq!(dimensions.coord(9), Some(TileCoord::new(1, 2)));
        assert_eq!(dimensions.index(TileCoord::new(4, 0)), None);
        assert_eq!(dimensions.coord(12), None);
    }

    #[test]
    fn border_detection_covers_outer_ring_only() {
        let dimensions = MapDimensions::new(5, 4).expect("valid dimensions");
        assert!(dimensions.is_border(TileCoord::new(0, 2)));
        assert!(dimensions.is_border(TileCoord::new(4, 1)));
        assert!(dimensions.is_border(TileCoord::new(2, 3)));
        assert!(!dimensions.is_border(TileCoord::new(2, 2)));
        assert!(!dimensions.is_border(TileCoord::new(9, 9)));
    }

    #[test]
    fn standard_path_matches_observed_walker_layout() {
        let dimensions = MapDimensions::new(40, 30).expect("valid dimensions");
        let layout = PathLayout::standard(dimensions);
        assert_eq!(layout.row, 15);
        assert_eq!(layout.columns, PathSpan::new(5, 34));
        assert_eq!(layout.column, 20);
        assert_eq!(layout.rows, PathSpan::new(5, 24));
        assert!(layout.contains(TileCoord::new(5, 15)));
        assert!(layout.contains(TileCoord::new(20, 24)));
        assert!(!layout.contains(TileCoord::new(35, 15)));
        assert!(!layout.contains(TileCoord::new(20, 4)));
    }

    #[test]
    fn standard_path_is_empty_on_narrow_maps() {
        let dimensions = MapDimensions::new(6, 6).expect("valid dimensions");
        let layout = PathLayout::standard(dimensions);
        assert!(layout.columns.is_empty());
        assert!(layout.rows.is_empty());
    }

    #[test]
    fn default_weights_share_sums_to_one() {
        let weights = TileWeights::default();
        assert_eq!(weights.total(), 38);
        let sum: f64 = TileKind::GENERATED
            .iter()
            .map(|kind| weights.share(*kind))
            .sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert_eq!(weights.share(TileKind::Cleared), 0.0);
    }

    #[test]
    fn map_error_messages_name_the_tile() {
        let dimensions = MapDimensions::new(40, 30).expect("valid dimensions");
        let error = MapError::OutOfBounds {
            tile: TileCoord::new(40, 2),
            dimensions,
        };
        assert_eq!(error.to_string(), "tile (40, 2) lies outside the 40x30 map");
    }

    #[test]
    fn map_config_round_trips_through_bincode() {
        assert_round_trip(&MapConfig::weighted(12, 9, 7));
        assert_round_trip(&MapConfig::default());
    }

    #[test]
    fn map_error_round_trips_through_bincode() {
        assert_round_trip(&MapError::InvalidInteraction {
            tile: TileCoord::new(3, 4),
            kind: TileKind::Grass,
        });
    }
}
