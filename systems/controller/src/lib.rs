#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure player controller that maps per-frame input onto movement intents.

use meadow_system_session::{Phase, Sound};

/// Tuning parameters for the platformer player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControllerConfig {
    /// Horizontal speed applied while a direction is held, in world units per second.
    pub run_speed: f32,
    /// Upward speed applied when a jump starts, in world units per second.
    pub jump_speed: f32,
    /// Touches above this screen-space line request a jump.
    pub touch_jump_line: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            run_speed: 160.0,
            jump_speed: 330.0,
            touch_jump_line: 400.0,
        }
    }
}

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlInput {
    /// Left direction held.
    pub left: bool,
    /// Right direction held.
    pub right: bool,
    /// Up direction held.
    pub up: bool,
    /// Jump (space) held.
    pub jump: bool,
    /// The player's body rests on a surface.
    pub grounded: bool,
    /// Screen-space height of a touch that began on this frame, if any.
    pub touch_y: Option<f32>,
}

/// Animation the host should play on the player sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Animation {
    /// Looping walk cycle facing left.
    Left,
    /// Idle frame facing the camera.
    Turn,
    /// Looping walk cycle facing right.
    Right,
}

/// Movement requested for the current frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlOutput {
    /// Horizontal velocity to assign.
    pub velocity_x: f32,
    /// Vertical velocity to assign, when a jump starts.
    pub velocity_y: Option<f32>,
    /// Animation to play.
    pub animation: Animation,
    /// Sounds to play.
    pub sounds: Vec<Sound>,
}

/// Player controller system.
#[derive(Clone, Debug, Default)]
pub struct Controller {
    config: ControllerConfig,
}

impl Controller {
    /// Creates a controller using the provided tuning.
    #[must_use]
    pub const fn new(config: ControllerConfig) -> Self {
        Self { config }
    }

    /// Tuning in use.
    #[must_use]
    pub const fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Maps a frame of input to movement, or `None` outside active play.
    #[must_use]
    pub fn handle(&self, phase: Phase, input: ControlInput) -> Option<ControlOutput> {
        if phase != Phase::Playing {
            return None;
        }

        let (velocity_x, animation) = if input.left {
            (-self.config.run_speed, Animation::Left)
        } else if input.right {
            (self.config.run_speed, Animation::Right)
        } else {
            (0.0, Animation::Turn)
        };

        let touch_jump = input
            .touch_y
            .map_or(false, |y| y < self.config.touch_jump_line);
        let wants_jump = input.up || input.jump || touch_jump;

        let mut sounds = Vec::new();
        let velocity_y = if wants_jump && input.grounded {
            sounds.push(Sound::Jump);
            Some(-self.config.jump_speed)
        } else {
            None
        };

        Some(ControlOutput {
            velocity_x,
            velocity_y,
            animation,
            sounds,
        })
    }
}
