//! Scripted platformer run that drives the pure systems without an engine.
//!
//! The player runs back and forth across the level, touching every
//! collectible it passes. A bomb that drops within reach of the player counts
//! as a hit; the run is then restarted on the next frame.

use std::time::Duration;

use log::{debug, info};
use meadow_rendering::Lighting;
use meadow_system_controller::{ControlInput, Controller};
use meadow_system_session::{Intent, Phase, Session, SessionEvent};
use meadow_system_spawning::{BombSpawn, Collectible, Config, Spawning};

const FRAME: Duration = Duration::from_micros(16_667);
const LEVEL_WIDTH: f32 = 1600.0;
const PLAYER_START_X: f32 = 100.0;
const PICKUP_REACH: f32 = 16.0;
const BOMB_REACH: f32 = 24.0;

/// Totals gathered over a replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ReplaySummary {
    pub(crate) frames: u32,
    pub(crate) best_score: u32,
    pub(crate) final_score: u32,
    pub(crate) bombs: u32,
    pub(crate) restarts: u32,
    pub(crate) star_batches: u32,
}

struct Level {
    coins: Vec<Collectible>,
    stars: Vec<Collectible>,
    coins_taken: Vec<bool>,
    stars_taken: Vec<bool>,
}

impl Level {
    fn build(spawning: &mut Spawning) -> Self {
        let coins = spawning.coin_layout();
        let stars = spawning.star_layout();
        Self {
            coins_taken: vec![false; coins.len()],
            stars_taken: vec![false; stars.len()],
            coins,
            stars,
        }
    }

    fn pickups(&mut self, player_x: f32) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        for (coin, taken) in self.coins.iter().zip(self.coins_taken.iter_mut()) {
            if !*taken && (coin.x - player_x).abs() <= PICKUP_REACH {
                *taken = true;
                events.push(SessionEvent::CoinCollected);
            }
        }
        for (star, taken) in self.stars.iter().zip(self.stars_taken.iter_mut()) {
            if !*taken && (star.x - player_x).abs() <= PICKUP_REACH {
                *taken = true;
                events.push(SessionEvent::StarCollected);
            }
        }
        events
    }

    fn respawn_stars(&mut self) {
        self.stars_taken.fill(false);
    }
}

/// Runs the scripted session for `frames` frames.
pub(crate) fn run(frames: u32, seed: u64) -> ReplaySummary {
    let controller = Controller::default();
    let mut spawning = Spawning::new(Config::new(seed));
    let mut session = Session::new();
    let mut level = Level::build(&mut spawning);
    let mut summary = ReplaySummary::default();
    let mut player_x = PLAYER_START_X;
    let mut heading_right = true;
    let mut elapsed = Duration::ZERO;
    let mut bombs: Vec<BombSpawn> = Vec::new();

    for frame in 0..frames {
        summary.frames = frame + 1;
        elapsed += FRAME;

        let mut events = Vec::new();
        match session.phase() {
            Phase::Loading => events.push(SessionEvent::AssetsReady),
            Phase::GameOver => events.push(SessionEvent::RestartRequested),
            Phase::Playing => {
                let input = ControlInput {
                    left: !heading_right,
                    right: heading_right,
                    grounded: true,
                    ..ControlInput::default()
                };
                if let Some(output) = controller.handle(session.phase(), input) {
                    player_x += output.velocity_x * FRAME.as_secs_f32();
                }
                if player_x >= LEVEL_WIDTH || player_x <= 0.0 {
                    player_x = player_x.clamp(0.0, LEVEL_WIDTH);
                    heading_right = !heading_right;
                }

                events.extend(level.pickups(player_x));

                bombs.clear();
                spawning.handle(session.phase(), player_x, &mut bombs);
                for bomb in &bombs {
                    summary.bombs += 1;
                    if (bomb.x - player_x).abs() <= BOMB_REACH {
                        events.push(SessionEvent::HazardHit);
                    }
                }
            }
        }

        for event in events {
            for intent in session.apply(event) {
                debug!("frame {frame}: {intent:?}");
                match intent {
                    Intent::RespawnStars => {
                        summary.star_batches += 1;
                        level.respawn_stars();
                    }
                    Intent::RestartScene => {
                        summary.restarts += 1;
                        player_x = PLAYER_START_X;
                        heading_right = true;
                        level = Level::build(&mut spawning);
                    }
                    Intent::ShowGameOver => {
                        let lighting = Lighting::at(elapsed);
                        info!(
                            "run ended at frame {frame} with score {} (brightness {:.2})",
                            session.score(),
                            lighting.brightness
                        );
                    }
                    _ => {}
                }
            }
            summary.best_score = summary.best_score.max(session.score());
        }
    }

    summary.final_score = session.score();
    summary
}
