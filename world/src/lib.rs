#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative tile world state management for Meadow.

mod generation;
mod map;

use log::warn;
use meadow_core::{Command, Event, MapConfig, WELCOME_BANNER};

pub use generation::{generate, generate_with, landmark_kind};
pub use map::{is_blocking, TileMap};

/// Represents the authoritative state of the walker scene.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: MapConfig,
    map: TileMap,
}

impl World {
    /// Creates a new world holding the default 40x30 landmark map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            banner: WELCOME_BANNER,
            config: MapConfig::default(),
            map: generation::default_map(),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::GenerateMap { config } => match generate_with(&config) {
            Ok(map) => {
                let dimensions = map.dimensions();
                world.map = map;
                world.config = config;
                out_events.push(Event::MapGenerated {
                    dimensions,
                    mode: config.mode,
                });
            }
            Err(reason) => {
                warn!("map generation rejected: {reason}");
                out_events.push(Event::MapGenerationRejected { reason });
            }
        },
        Command::PickFlower { tile } => match world.map.clear_tile(tile) {
            Ok(_) => out_events.push(Event::FlowerPicked { tile }),
            Err(reason) => {
                warn!("flower pick rejected: {reason}");
                out_events.push(Event::InteractionRejected { tile, reason });
            }
        },
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use meadow_core::{MapConfig, MapDimensions, MapError, TileCoord, TileKind};

    use super::{TileMap, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the active tile map.
    #[must_use]
    pub fn tile_map(world: &World) -> &TileMap {
        &world.map
    }

    /// Configuration that produced the active map.
    #[must_use]
    pub fn map_config(world: &World) -> &MapConfig {
        &world.config
    }

    /// Extent of the active map.
    #[must_use]
    pub fn dimensions(world: &World) -> MapDimensions {
        world.map.dimensions()
    }

    /// Kind stored at the provided tile.
    pub fn tile_at(world: &World, tile: TileCoord) -> Result<TileKind, MapError> {
        world.map.tile_at(tile)
    }

    /// Reports whether the provided tile blocks movement.
    pub fn is_blocking_at(world: &World, tile: TileCoord) -> Result<bool, MapError> {
        world.map.is_blocking_at(tile)
    }

    /// Resolves the tile beneath a world-space position.
    ///
    /// Returns `None` when the position lies outside the map.
    #[must_use]
    pub fn tile_under(world: &World, x: f32, y: f32) -> Option<(TileCoord, TileKind)> {
        let tile = TileCoord::from_world(x, y)?;
        world.map.tile_at(tile).ok().map(|kind| (tile, kind))
    }

    /// Number of flowers still growing on the map.
    #[must_use]
    pub fn flowers_remaining(world: &World) -> usize {
        world.map.count(TileKind::Flower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meadow_core::{GenerationMode, MapError, TileCoord, TileKind};

    #[test]
    fn new_world_holds_default_map() {
        let world = World::new();
        let dimensions = query::dimensions(&world);
        assert_eq!(dimensions.width(), 40);
        assert_eq!(dimensions.height(), 30);
        assert_eq!(query::map_config(&world), &MapConfig::default());
        assert_eq!(query::welcome_banner(&world), WELCOME_BANNER);
    }

    #[test]
    fn apply_replaces_map_on_generation() {
        let mut world = World::new();
        let mut events = Vec::new();
        let config = MapConfig::weighted(12, 8, 99);

        apply(&mut world, Command::GenerateMap { config }, &mut events);

        let dimensions = query::dimensions(&world);
        assert_eq!(dimensions.width(), 12);
        assert_eq!(dimensions.height(), 8);
        assert_eq!(
            events,
            vec![Event::MapGenerated {
                dimensions,
                mode: config.mode,
            }]
        );
        assert!(matches!(
            query::map_config(&world).mode,
            GenerationMode::Weighted { seed: 99, .. }
        ));
    }

    #[test]
    fn apply_keeps_previous_map_when_generation_fails() {
        let mut world = World::new();
        let before = query::tile_map(&world).clone();
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::GenerateMap {
                config: MapConfig::landmarks(0, 10),
            },
            &mut events,
        );

        assert_eq!(query::tile_map(&world), &before);
        assert_eq!(
            events,
            vec![Event::MapGenerationRejected {
                reason: MapError::InvalidDimensions {
                    width: 0,
                    height: 10,
                },
            }]
        );
    }

    #[test]
    fn picking_a_flower_clears_it() {
        let mut world = World::new();
        let flower = TileCoord::new(8, 8);
        assert_eq!(query::tile_at(&world, flower), Ok(TileKind::Flower));
        let remaining = query::flowers_remaining(&world);
        let mut events = Vec::new();

        apply(&mut world, Command::PickFlower { tile: flower }, &mut events);

        assert_eq!(events, vec![Event::FlowerPicked { tile: flower }]);
        assert_eq!(query::tile_at(&world, flower), Ok(TileKind::Cleared));
        assert_eq!(query::flowers_remaining(&world), remaining - 1);
    }

    #[test]
    fn picking_grass_is_rejected() {
        let mut world = World::new();
        let tile = TileCoord::new(3, 3);
        let mut events = Vec::new();

        apply(&mut world, Command::PickFlower { tile }, &mut events);

        assert_eq!(
            events,
            vec![Event::InteractionRejected {
                tile,
                reason: MapError::InvalidInteraction {
                    tile,
                    kind: TileKind::Grass,
                },
            }]
        );
        assert_eq!(query::tile_at(&world, tile), Ok(TileKind::Grass));
    }

    #[test]
    fn picking_outside_the_map_is_rejected() {
        let mut world = World::new();
        let before = query::tile_map(&world).clone();
        let tile = TileCoord::new(40, 0);
        let mut events = Vec::new();

        apply(&mut world, Command::PickFlower { tile }, &mut events);

        assert_eq!(
            events,
            vec![Event::InteractionRejected {
                tile,
                reason: MapError::OutOfBounds {
                    tile,
                    dimensions: query::dimensions(&world),
                },
            }]
        );
        assert_eq!(query::tile_map(&world), &before);
    }

    #[test]
    fn oversized_maps_are_rejected() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::GenerateMap {
                config: MapConfig::landmarks(100_000, 100_000),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::MapGenerationRejected {
                reason: MapError::InvalidDimensions {
                    width: 100_000,
                    height: 100_000,
                },
            }]
        );
        assert_eq!(query::dimensions(&world).width(), 40);
    }

    #[test]
    fn tile_under_converts_world_positions() {
        let world = World::new();
        assert_eq!(
            query::tile_under(&world, 650.0, 490.0),
            Some((TileCoord::new(20, 15), TileKind::DirtPath))
        );
        assert_eq!(query::tile_under(&world, 5000.0, 10.0), None);
        assert_eq!(query::tile_under(&world, -1.0, 10.0), None);
    }
}
