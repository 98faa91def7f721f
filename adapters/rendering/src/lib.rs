#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Meadow adapters.
//!
//! A rendering or physics host never reads the tile map directly. It builds a
//! [`TileLayer`] that pairs every tile with its world-space placement, the
//! sprite to draw and whether the tile takes part in collision resolution.

use std::{error::Error, fmt, time::Duration};

use anyhow::Result as AnyResult;
use glam::Vec2;
use meadow_core::{MapError, TileCoord, TileKind, TILE_LENGTH};
use meadow_world::TileMap;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color from floating point channels clamped to 0.0..=1.0.
    #[must_use]
    pub fn opaque(red: f32, green: f32, blue: f32) -> Self {
        Self {
            red: red.clamp(0.0, 1.0),
            green: green.clamp(0.0, 1.0),
            blue: blue.clamp(0.0, 1.0),
            alpha: 1.0,
        }
    }

    /// Channels scaled back to bytes.
    #[must_use]
    pub fn to_rgb_u8(self) -> (u8, u8, u8) {
        (
            channel_to_u8(self.red),
            channel_to_u8(self.green),
            channel_to_u8(self.blue),
        )
    }
}

fn channel_to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Texture reference for each drawable terrain kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    /// Water tile texture.
    Water,
    /// Flower tile texture.
    Flower,
    /// Tree tile texture.
    Tree,
    /// Grass tile texture.
    Grass,
    /// Dirt path tile texture.
    DirtPath,
}

impl SpriteKey {
    /// Sprite drawn for the provided kind; cleared ground draws nothing.
    #[must_use]
    pub const fn for_kind(kind: TileKind) -> Option<Self> {
        match kind {
            TileKind::Water => Some(Self::Water),
            TileKind::Flower => Some(Self::Flower),
            TileKind::Tree => Some(Self::Tree),
            TileKind::Grass => Some(Self::Grass),
            TileKind::DirtPath => Some(Self::DirtPath),
            TileKind::Cleared => None,
        }
    }
}

/// Renderable, collidable description of a single tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileInstance {
    /// Grid coordinate of the tile.
    pub coord: TileCoord,
    /// Terrain kind the instance was built from.
    pub kind: TileKind,
    /// World-space position of the tile's upper-left corner.
    pub position: Vec2,
    /// Sprite to draw, if any.
    pub sprite: Option<SpriteKey>,
    /// Whether the physics host should create a collider for the tile.
    pub collides: bool,
    /// Whether the player can interact with the tile.
    pub interactable: bool,
}

impl TileInstance {
    fn new(coord: TileCoord, kind: TileKind, tile_length: f32) -> Self {
        Self {
            coord,
            kind,
            position: Vec2::new(coord.x() as f32, coord.y() as f32) * tile_length,
            sprite: SpriteKey::for_kind(kind),
            collides: kind.blocks_movement(),
            interactable: kind.is_interactable(),
        }
    }
}

/// Tile layer handed to the rendering and physics host.
#[derive(Clone, Debug, PartialEq)]
pub struct TileLayer {
    columns: u32,
    rows: u32,
    tile_length: f32,
    tiles: Vec<TileInstance>,
}

impl TileLayer {
    /// Builds a layer using the canonical tile edge length.
    #[must_use]
    pub fn from_map(map: &TileMap) -> Self {
        Self::build(map, TILE_LENGTH as f32)
    }

    /// Builds a layer with a custom tile edge length.
    ///
    /// Returns an error when the length is not a positive finite number.
    pub fn with_tile_length(map: &TileMap, tile_length: f32) -> Result<Self, RenderingError> {
        if !tile_length.is_finite() || tile_length <= 0.0 {
            return Err(RenderingError::InvalidTileLength { tile_length });
        }
        Ok(Self::build(map, tile_length))
    }

    fn build(map: &TileMap, tile_length: f32) -> Self {
        Self {
            columns: map.width(),
            rows: map.height(),
            tile_length,
            tiles: map
                .iter()
                .map(|(coord, kind)| TileInstance::new(coord, kind, tile_length))
                .collect(),
        }
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a single tile in world units.
    #[must_use]
    pub const fn tile_length(&self) -> f32 {
        self.tile_length
    }

    /// Total extent of the layer in world units.
    #[must_use]
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.columns as f32, self.rows as f32) * self.tile_length
    }

    /// Every tile instance in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &TileInstance> {
        self.tiles.iter()
    }

    /// Tile instances that need a collider.
    pub fn colliders(&self) -> impl Iterator<Item = &TileInstance> {
        self.tiles.iter().filter(|tile| tile.collides)
    }

    /// Tile instance stored at the provided coordinate.
    #[must_use]
    pub fn get(&self, coord: TileCoord) -> Option<&TileInstance> {
        self.index(coord).and_then(|index| self.tiles.get(index))
    }

    /// Resolves the tile beneath a world-space position.
    #[must_use]
    pub fn tile_under(&self, position: Vec2) -> Option<TileCoord> {
        if !position.is_finite() || position.x < 0.0 || position.y < 0.0 {
            return None;
        }
        let scaled = (position / self.tile_length).floor();
        let coord = TileCoord::new(scaled.x as u32, scaled.y as u32);
        self.index(coord).map(|_| coord)
    }

    /// Rebuilds a single instance after the map was mutated.
    pub fn refresh(&mut self, map: &TileMap, coord: TileCoord) -> Result<(), MapError> {
        let kind = map.tile_at(coord)?;
        let tile_length = self.tile_length;
        if let Some(index) = self.index(coord) {
            self.tiles[index] = TileInstance::new(coord, kind, tile_length);
        }
        Ok(())
    }

    fn index(&self, coord: TileCoord) -> Option<usize> {
        if coord.x() < self.columns && coord.y() < self.rows {
            Some(coord.y() as usize * self.columns as usize + coord.x() as usize)
        } else {
            None
        }
    }
}

/// Ambient lighting for the day/night cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lighting {
    /// Intensity of the light following the player, in 0.0..=1.0.
    pub brightness: f32,
    /// Ambient color applied to the whole scene.
    pub ambient: Color,
}

impl Lighting {
    /// Samples the cycle after `elapsed` scene time.
    #[must_use]
    pub fn at(elapsed: Duration) -> Self {
        let seconds = elapsed.as_secs_f32();
        let brightness = 0.5 + (seconds * 0.5).sin() * 0.5;
        let lift = brightness * 100.0;
        Self {
            brightness,
            ambient: Color::opaque(
                (100.0 + lift) / 255.0,
                (100.0 + lift) / 255.0,
                (150.0 + lift) / 255.0,
            ),
        }
    }
}

/// Rendering backend capable of presenting Meadow tile layers.
pub trait RenderingBackend {
    /// Presents a single frame of the provided layer under the given lighting.
    fn present(&mut self, layer: &TileLayer, lighting: Lighting) -> AnyResult<()>;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Tile length must be a positive finite number.
    InvalidTileLength {
        /// Provided length that failed validation.
        tile_length: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTileLength { tile_length } => {
                write!(f, "tile length must be positive (received {tile_length})")
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;
    use meadow_world::generate;

    fn walker_layer() -> (TileMap, TileLayer) {
        let map = generate(40, 30).expect("walker dimensions are valid");
        let layer = TileLayer::from_map(&map);
        (map, layer)
    }

    #[test]
    fn layer_covers_every_tile() {
        let (map, layer) = walker_layer();
        assert_eq!(layer.iter().count(), map.dimensions().cell_count());
        assert_eq!(layer.world_size(), Vec2::new(1280.0, 960.0));
    }

    #[test]
    fn colliders_follow_blocking_table() {
        let (map, layer) = walker_layer();
        let expected = map.iter().filter(|(_, kind)| kind.blocks_movement()).count();
        assert_eq!(layer.colliders().count(), expected);
        for tile in layer.colliders() {
            assert!(matches!(tile.kind, TileKind::Water | TileKind::Tree));
        }
    }

    #[test]
    fn instances_are_placed_on_tile_corners() {
        let (_, layer) = walker_layer();
        let tile = layer.get(TileCoord::new(10, 10)).expect("inside layer");
        assert_eq!(tile.position, Vec2::new(320.0, 320.0));
        assert_eq!(tile.sprite, Some(SpriteKey::Tree));
        assert!(tile.collides);
    }

    #[test]
    fn tile_under_matches_core_conversion() {
        let (_, layer) = walker_layer();
        let position = Vec2::new(650.0, 490.0);
        assert_eq!(
            layer.tile_under(position),
            TileCoord::from_world(position.x, position.y)
        );
        assert_eq!(layer.tile_under(Vec2::new(1280.0, 10.0)), None);
        assert_eq!(layer.tile_under(Vec2::new(-3.0, 10.0)), None);
    }

    #[test]
    fn refresh_reflects_picked_flower() {
        let (mut map, mut layer) = walker_layer();
        let flower = TileCoord::new(8, 8);
        assert!(layer.get(flower).expect("inside layer").interactable);

        let _ = map.clear_tile(flower).expect("flower can be picked");
        layer.refresh(&map, flower).expect("inside map");

        let tile = layer.get(flower).expect("inside layer");
        assert_eq!(tile.kind, TileKind::Cleared);
        assert_eq!(tile.sprite, None);
        assert!(!tile.interactable);
        assert!(!tile.collides);
    }

    #[test]
    fn refresh_outside_map_is_rejected() {
        let (map, mut layer) = walker_layer();
        let outside = TileCoord::new(40, 29);

        assert_eq!(
            layer.refresh(&map, outside),
            Err(MapError::OutOfBounds {
                tile: outside,
                dimensions: map.dimensions(),
            })
        );
        assert_eq!(layer.iter().count(), map.dimensions().cell_count());
        assert!(layer.get(outside).is_none());
    }

    #[test]
    fn custom_tile_length_must_be_positive() {
        let map = generate(5, 5).expect("valid");
        assert_eq!(
            TileLayer::with_tile_length(&map, 0.0),
            Err(RenderingError::InvalidTileLength { tile_length: 0.0 })
        );
        let layer = TileLayer::with_tile_length(&map, 48.0).expect("positive length");
        assert_eq!(layer.tile_under(Vec2::new(100.0, 50.0)), Some(TileCoord::new(2, 1)));
    }

    #[test]
    fn lighting_starts_at_half_brightness() {
        let lighting = Lighting::at(Duration::ZERO);
        assert!((lighting.brightness - 0.5).abs() < 1e-6);
        assert_eq!(lighting.ambient.to_rgb_u8(), (150, 150, 200));
    }

    #[test]
    fn lighting_peaks_at_full_brightness() {
        let peak = Duration::from_secs_f32(std::f32::consts::PI);
        let lighting = Lighting::at(peak);
        assert!((lighting.brightness - 1.0).abs() < 1e-4);
        assert_eq!(lighting.ambient.to_rgb_u8(), (200, 200, 250));
    }
}
