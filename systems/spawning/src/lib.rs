#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system for platformer collectibles and hazards.

use meadow_system_session::Phase;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

const COIN_COUNT: usize = 12;
const COIN_SCALE: f32 = 0.5;
const STAR_SPACING: f32 = 70.0;
const STAR_START_X: f32 = 12.0;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    rng_seed: u64,
    bomb_chance: f64,
    bomb_spread: u32,
    bomb_drop_y: f32,
    bomb_speed: u32,
    bomb_fall_speed: f32,
    coin_x: (i32, i32),
    coin_y: (i32, i32),
    star_bounce: (f32, f32),
}

impl Config {
    /// Creates a configuration with the platformer defaults and the provided seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self {
            rng_seed,
            bomb_chance: 0.005,
            bomb_spread: 400,
            bomb_drop_y: 16.0,
            bomb_speed: 200,
            bomb_fall_speed: 20.0,
            coin_x: (50, 1550),
            coin_y: (0, 500),
            star_bounce: (0.4, 0.8),
        }
    }

    /// Probability that a bomb drops on any single frame.
    ///
    /// Values are clamped to `0.0..=1.0`; `NaN` disables bombs.
    #[must_use]
    pub fn with_bomb_chance(mut self, chance: f64) -> Self {
        self.bomb_chance = if chance.is_nan() {
            0.0
        } else {
            chance.clamp(0.0, 1.0)
        };
        self
    }

    /// Maximum horizontal distance between the player and a new bomb.
    #[must_use]
    pub const fn with_bomb_spread(mut self, spread: u32) -> Self {
        self.bomb_spread = spread;
        self
    }

    /// Maximum horizontal speed given to a new bomb.
    #[must_use]
    pub const fn with_bomb_speed(mut self, speed: u32) -> Self {
        self.bomb_speed = speed;
        self
    }

    /// Inclusive area coins are scattered across.
    pub fn with_coin_area(mut self, x: (i32, i32), y: (i32, i32)) -> Result<Self, ConfigError> {
        if x.0 > x.1 {
            return Err(ConfigError::EmptyRange { setting: "coin x" });
        }
        if y.0 > y.1 {
            return Err(ConfigError::EmptyRange { setting: "coin y" });
        }
        self.coin_x = x;
        self.coin_y = y;
        Ok(self)
    }

    /// Range the star bounce coefficient is drawn from.
    ///
    /// Equal bounds give every star the same bounce.
    pub fn with_star_bounce(mut self, min: f32, max: f32) -> Result<Self, ConfigError> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(ConfigError::EmptyRange {
                setting: "star bounce",
            });
        }
        self.star_bounce = (min, max);
        Ok(self)
    }

    /// Probability that a bomb drops on any single frame.
    #[must_use]
    pub const fn bomb_chance(&self) -> f64 {
        self.bomb_chance
    }
}

/// Errors raised when a spawning configuration would be unusable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A range setting has no values to draw from.
    #[error("{setting} range is empty")]
    EmptyRange {
        /// Name of the rejected setting.
        setting: &'static str,
    },
}

/// Collectible placed in the world when the scene is built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Collectible {
    /// Horizontal world position.
    pub x: f32,
    /// Vertical world position.
    pub y: f32,
    /// Sprite scale factor.
    pub scale: f32,
    /// Vertical bounce coefficient applied by the physics host.
    pub bounce: f32,
}

/// Request to drop a new bomb into the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BombSpawn {
    /// Horizontal world position.
    pub x: f32,
    /// Vertical world position.
    pub y: f32,
    /// Initial horizontal velocity.
    pub velocity_x: f32,
    /// Initial vertical velocity.
    pub velocity_y: f32,
    /// Bounce coefficient; bombs keep all their energy.
    pub bounce: f32,
}

/// Pure system that lays out collectibles and drops bombs while playing.
#[derive(Debug)]
pub struct Spawning {
    config: Config,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Scatters the scene's coins at random positions.
    pub fn coin_layout(&mut self) -> Vec<Collectible> {
        let (min_x, max_x) = self.config.coin_x;
        let (min_y, max_y) = self.config.coin_y;
        (0..COIN_COUNT)
            .map(|_| Collectible {
                x: self.rng.gen_range(min_x..=max_x) as f32,
                y: self.rng.gen_range(min_y..=max_y) as f32,
                scale: COIN_SCALE,
                bounce: 0.0,
            })
            .collect()
    }

    /// Lines up one batch of stars along the top of the world.
    pub fn star_layout(&mut self) -> Vec<Collectible> {
        let (min_bounce, max_bounce) = self.config.star_bounce;
        (0..meadow_system_session::STAR_BATCH)
            .map(|index| Collectible {
                x: STAR_START_X + STAR_SPACING * index as f32,
                y: 0.0,
                scale: 1.0,
                bounce: if min_bounce < max_bounce {
                    self.rng.gen_range(min_bounce..max_bounce)
                } else {
                    min_bounce
                },
            })
            .collect()
    }

    /// Rolls for a bomb drop on the current frame.
    pub fn handle(&mut self, phase: Phase, player_x: f32, out: &mut Vec<BombSpawn>) {
        if phase != Phase::Playing {
            return;
        }

        if self.rng.gen::<f64>() >= self.config.bomb_chance {
            return;
        }

        let spread = i64::from(self.config.bomb_spread);
        let speed = i64::from(self.config.bomb_speed);
        let offset = self.rng.gen_range(-spread..=spread) as f32;
        let velocity_x = self.rng.gen_range(-speed..=speed) as f32;
        out.push(BombSpawn {
            x: player_x + offset,
            y: self.config.bomb_drop_y,
            velocity_x,
            velocity_y: self.config.bomb_fall_speed,
            bounce: 1.0,
        });
    }
}
