//! Collaborator contracts surrounding the movement core.
//!
//! Each trait is one external surface from the system boundary: raw input,
//! HUD text binding, audio playback, sprite visibility, scene loading, and
//! the game-over flow. Hosts implement these; the runtime only ever talks
//! through them. Null implementations are provided for tests and headless
//! runs.
use scavenge_core::EntityId;

/// Identifies a fire-and-forget audio clip. Cues with two recorded
/// variations (move, chop, eat, drink) get one entry per variation; the
/// runtime picks between them at random.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ClipId {
    MoveA,
    MoveB,
    ChopA,
    ChopB,
    EatA,
    EatB,
    DrinkA,
    DrinkB,
    GameOver,
}

/// Supplies the per-tick `(dx, dy)` move intent, each axis in `{-1, 0, 1}`.
/// Polled only while the turn gate is up and input is not locked.
pub trait InputSource {
    fn poll(&mut self) -> Option<(i32, i32)>;
}

/// Receives the formatted food-total strings to render.
pub trait HudSink {
    fn set_food_label(&mut self, label: &str);
}

/// Receives fire-and-forget audio cues.
pub trait AudioSink {
    fn play(&mut self, clip: ClipId);

    /// Called once when the run ends.
    fn stop_music(&mut self) {}
}

/// Receives sprite visibility toggles from the flash sequence.
pub trait VfxSink {
    fn set_dimmed(&mut self, entity: EntityId, dimmed: bool);
}

/// Receives the delayed reload request once the player reaches the exit.
pub trait SceneSink {
    fn restart_level(&mut self);
}

/// Receives the single terminal-state signal; owns all subsequent flow.
pub trait GameOverSink {
    fn game_over(&mut self, days: u32);
}

pub struct NullInput;

impl InputSource for NullInput {
    fn poll(&mut self) -> Option<(i32, i32)> {
        None
    }
}

pub struct NullHud;

impl HudSink for NullHud {
    fn set_food_label(&mut self, _label: &str) {}
}

pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _clip: ClipId) {}
}

pub struct NullVfx;

impl VfxSink for NullVfx {
    fn set_dimmed(&mut self, _entity: EntityId, _dimmed: bool) {}
}

pub struct NullScene;

impl SceneSink for NullScene {
    fn restart_level(&mut self) {}
}

pub struct NullGameOver;

impl GameOverSink for NullGameOver {
    fn game_over(&mut self, _days: u32) {}
}
