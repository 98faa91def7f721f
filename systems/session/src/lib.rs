#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure scene lifecycle system that tracks score and game-over state.
//!
//! Scene hosts report what happened through [`SessionEvent`] values. The
//! [`transition`] function maps the current [`Session`] and one event to the
//! next session plus the side effects the host should perform, expressed as
//! [`Intent`] values. No sound is played and no UI is touched here.

use log::debug;
use meadow_core::Event;

/// Points awarded for collecting a coin.
pub const COIN_POINTS: u32 = 10;
/// Points awarded for collecting a star.
pub const STAR_POINTS: u32 = 20;
/// Points awarded for picking a flower in the walker scene.
pub const FLOWER_POINTS: u32 = 5;
/// Number of stars in a single batch; collecting all of them respawns the batch.
pub const STAR_BATCH: u32 = 12;

const COIN_PARTICLES: u32 = 10;
const STAR_PARTICLES: u32 = 20;

/// Lifecycle phase of a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Assets are still loading; gameplay events are ignored.
    Loading,
    /// The player is in control.
    Playing,
    /// A hazard ended the run; only a restart is accepted.
    GameOver,
}

/// Named occurrences reported by the scene host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionEvent {
    /// Every asset required by the scene finished loading.
    AssetsReady,
    /// The player overlapped a coin.
    CoinCollected,
    /// The player overlapped a star.
    StarCollected,
    /// The player picked a flower tile.
    FlowerPicked,
    /// The player collided with a hazard.
    HazardHit,
    /// The player asked to start over.
    RestartRequested,
}

impl SessionEvent {
    /// Translates a world event into the session event it implies, if any.
    #[must_use]
    pub fn from_world_event(event: &Event) -> Option<Self> {
        match event {
            Event::FlowerPicked { .. } => Some(Self::FlowerPicked),
            _ => None,
        }
    }
}

/// Sound effects the host may play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sound {
    /// Played when a collectible is picked up.
    Collect,
    /// Played when the player jumps.
    Jump,
    /// Played when the run ends.
    GameOver,
}

/// Side effects requested from the scene host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Fade out the loading screen.
    HideLoadingScreen,
    /// Refresh the score display.
    ShowScore {
        /// Score to display.
        score: u32,
    },
    /// Play a sound effect.
    PlaySound(Sound),
    /// Emit a burst of particles at the collected item.
    EmitParticles {
        /// Number of particles in the burst.
        count: u32,
    },
    /// Re-enable every star of the batch at the top of the world.
    RespawnStars,
    /// Freeze the physics simulation.
    PausePhysics,
    /// Tint the player sprite to signal the hit.
    TintPlayer,
    /// Show the player's idle facing frame.
    PlayerIdle,
    /// Show the game-over banner and restart button.
    ShowGameOver,
    /// Hide the game-over banner and restart button.
    HideGameOver,
    /// Rebuild the scene from scratch.
    RestartScene,
}

/// Explicit per-scene state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Session {
    phase: Phase,
    score: u32,
    stars_remaining: u32,
}

impl Session {
    /// Creates a session waiting for its assets.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: Phase::Loading,
            score: 0,
            stars_remaining: STAR_BATCH,
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Points accumulated during the current run.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Stars of the current batch that have not been collected yet.
    #[must_use]
    pub const fn stars_remaining(&self) -> u32 {
        self.stars_remaining
    }

    /// Applies the event in place and returns the requested side effects.
    pub fn apply(&mut self, event: SessionEvent) -> Vec<Intent> {
        let Transition { next, intents } = transition(self, event);
        if next.phase != self.phase {
            debug!("session {:?} -> {:?} on {:?}", self.phase, next.phase, event);
        }
        *self = next;
        intents
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of feeding one event into a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Session after the event was applied.
    pub next: Session,
    /// Side effects the host should perform, in order.
    pub intents: Vec<Intent>,
}

/// Computes the session that follows `session` after `event`.
///
/// Events that do not apply to the current phase leave the session unchanged
/// and request no side effects.
#[must_use]
pub fn transition(session: &Session, event: SessionEvent) -> Transition {
    let mut next = *session;
    let mut intents = Vec::new();

    match (session.phase, event) {
        (Phase::Loading, SessionEvent::AssetsReady) => {
            next.phase = Phase::Playing;
            intents.push(Intent::HideLoadingScreen);
            intents.push(Intent::ShowScore { score: next.score });
        }
        (Phase::Playing, SessionEvent::CoinCollected) => {
            next.score = next.score.saturating_add(COIN_POINTS);
            intents.push(Intent::PlaySound(Sound::Collect));
            intents.push(Intent::ShowScore { score: next.score });
            intents.push(Intent::EmitParticles {
                count: COIN_PARTICLES,
            });
        }
        (Phase::Playing, SessionEvent::StarCollected) => {
            next.score = next.score.saturating_add(STAR_POINTS);
            next.stars_remaining = next.stars_remaining.saturating_sub(1);
            intents.push(Intent::PlaySound(Sound::Collect));
            intents.push(Intent::ShowScore { score: next.score });
            intents.push(Intent::EmitParticles {
                count: STAR_PARTICLES,
            });
            if next.stars_remaining == 0 {
                next.stars_remaining = STAR_BATCH;
                intents.push(Intent::RespawnStars);
            }
        }
        (Phase::Playing, SessionEvent::FlowerPicked) => {
            next.score = next.score.saturating_add(FLOWER_POINTS);
            intents.push(Intent::PlaySound(Sound::Collect));
            intents.push(Intent::ShowScore { score: next.score });
        }
        (Phase::Playing, SessionEvent::HazardHit) => {
            next.phase = Phase::GameOver;
            intents.push(Intent::PausePhysics);
            intents.push(Intent::TintPlayer);
            intents.push(Intent::PlayerIdle);
            intents.push(Intent::PlaySound(Sound::GameOver));
            intents.push(Intent::ShowGameOver);
        }
        (Phase::GameOver, SessionEvent::RestartRequested) => {
            next = Session::new();
            intents.push(Intent::HideGameOver);
            intents.push(Intent::ShowScore { score: 0 });
            intents.push(Intent::RestartScene);
        }
        _ => {}
    }

    Transition { next, intents }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing() -> Session {
        let mut session = Session::new();
        let _ = session.apply(SessionEvent::AssetsReady);
        session
    }

    #[test]
    fn new_session_waits_for_assets() {
        let session = Session::new();
        assert_eq!(session.phase(), Phase::Loading);
        assert_eq!(session.score(), 0);
        assert_eq!(session.stars_remaining(), STAR_BATCH);
    }

    #[test]
    fn transition_does_not_mutate_input() {
        let session = playing();
        let outcome = transition(&session, SessionEvent::CoinCollected);
        assert_eq!(session.score(), 0);
        assert_eq!(outcome.next.score(), COIN_POINTS);
    }

    #[test]
    fn last_star_respawns_batch() {
        let mut session = playing();
        for _ in 0..STAR_BATCH - 1 {
            let intents = session.apply(SessionEvent::StarCollected);
            assert!(!intents.contains(&Intent::RespawnStars));
        }
        assert_eq!(session.stars_remaining(), 1);

        let intents = session.apply(SessionEvent::StarCollected);
        assert_eq!(intents.last(), Some(&Intent::RespawnStars));
        assert_eq!(session.stars_remaining(), STAR_BATCH);
        assert_eq!(session.score(), STAR_POINTS * STAR_BATCH);
    }

    #[test]
    fn flower_pick_translates_from_world_event() {
        let event = Event::FlowerPicked {
            tile: meadow_core::TileCoord::new(8, 8),
        };
        assert_eq!(
            SessionEvent::from_world_event(&event),
            Some(SessionEvent::FlowerPicked)
        );
        let rejected = Event::MapGenerationRejected {
            reason: meadow_core::MapError::DegenerateWeights,
        };
        assert_eq!(SessionEvent::from_world_event(&rejected), None);
    }
}
