//! Runtime orchestration for the deterministic grid survival simulation.
//!
//! This crate wires the pure engine from `scavenge-core` into a cooperative
//! per-tick update loop and the narrow collaborator ports around it: input,
//! HUD text, audio cues, the sprite flash, scene transitions, and food
//! persistence. The core decides *what* happened; everything here decides
//! *who gets told about it*.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`ports`] declares the collaborator contracts
//! - [`events`] translates engine outcomes into dispatchable events
//! - [`effects`] keeps the timed flash sequence
//! - [`store`] provides food persistence across level sessions
pub mod effects;
pub mod error;
pub mod events;
pub mod ports;
pub mod sfx;
pub mod store;

pub mod runtime;

pub use effects::{FlashCommand, FlashSequence};
pub use error::RuntimeError;
pub use events::GameEvent;
pub use ports::{
    AudioSink, ClipId, GameOverSink, HudSink, InputSource, NullAudio, NullGameOver, NullHud,
    NullInput, NullScene, NullVfx, SceneSink, VfxSink,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use store::{FileFoodStore, FoodStore, InMemoryFoodStore, StoreError};
