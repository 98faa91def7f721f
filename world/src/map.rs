//! Dense storage for a generated tile map.

use meadow_core::{MapDimensions, MapError, TileCoord, TileKind};

/// Rectangular grid of terrain kinds stored in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileMap {
    dimensions: MapDimensions,
    tiles: Vec<TileKind>,
}

impl TileMap {
    #[cfg(test)]
    pub(crate) fn filled(dimensions: MapDimensions, kind: TileKind) -> Self {
        Self {
            dimensions,
            tiles: vec![kind; dimensions.cell_count()],
        }
    }

    pub(crate) fn from_fn(
        dimensions: MapDimensions,
        mut kind_at: impl FnMut(TileCoord) -> TileKind,
    ) -> Self {
        let tiles = (0..dimensions.cell_count())
            .filter_map(|index| dimensions.coord(index))
            .map(&mut kind_at)
            .collect();
        Self { dimensions, tiles }
    }

    /// Extent of the map.
    #[must_use]
    pub const fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.dimensions.width()
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.dimensions.height()
    }

    /// Returns the kind stored at the provided tile.
    ///
    /// Coordinates outside `[0, width) x [0, height)` yield
    /// [`MapError::OutOfBounds`].
    pub fn tile_at(&self, tile: TileCoord) -> Result<TileKind, MapError> {
        let index = self.index(tile)?;
        Ok(self.tiles[index])
    }

    /// Reports whether the tile blocks movement.
    pub fn is_blocking_at(&self, tile: TileCoord) -> Result<bool, MapError> {
        self.tile_at(tile).map(TileKind::blocks_movement)
    }

    /// Clears a picked flower, returning the kind that was removed.
    ///
    /// Only [`TileKind::Flower`] tiles can be cleared; any other kind yields
    /// [`MapError::InvalidInteraction`] and leaves the map untouched.
    pub fn clear_tile(&mut self, tile: TileCoord) -> Result<TileKind, MapError> {
        let index = self.index(tile)?;
        let kind = self.tiles[index];
        if !kind.is_interactable() {
            return Err(MapError::InvalidInteraction { tile, kind });
        }
        self.tiles[index] = TileKind::Cleared;
        Ok(kind)
    }

    /// Iterates over every tile in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (TileCoord, TileKind)> + '_ {
        let dimensions = self.dimensions;
        self.tiles
            .iter()
            .enumerate()
            .filter_map(move |(index, kind)| dimensions.coord(index).map(|tile| (tile, *kind)))
    }

    /// Number of tiles holding the provided kind.
    #[must_use]
    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|candidate| **candidate == kind).count()
    }

    /// Collision flags in row-major order, one per tile.
    #[must_use]
    pub fn blocking_mask(&self) -> Vec<bool> {
        self.tiles.iter().map(|kind| kind.blocks_movement()).collect()
    }

    pub(crate) fn set(&mut self, tile: TileCoord, kind: TileKind) {
        if let Some(index) = self.dimensions.index(tile) {
            self.tiles[index] = kind;
        }
    }

    fn index(&self, tile: TileCoord) -> Result<usize, MapError> {
        self.dimensions.index(tile).ok_or(MapError::OutOfBounds {
            tile,
            dimensions: self.dimensions,
        })
    }
}

/// Looks up the static blocking table for a terrain kind.
#[must_use]
pub const fn is_blocking(kind: TileKind) -> bool {
    kind.blocks_movement()
}
