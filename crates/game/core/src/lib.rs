//! Deterministic movement, turn, and resource logic for the grid survival game.
//!
//! `scavenge-core` defines the canonical rules (collision probing, obstacle
//! reactions, food accounting, the turn gate) and exposes pure APIs with no
//! I/O, clocks, or logging. All state mutation flows through
//! [`engine::GameEngine`]; the runtime layer observes the typed outcomes and
//! drives collaborators (HUD, audio, scene loading) from them.
pub mod action;
pub mod config;
pub mod engine;
pub mod state;

pub use action::{MoveAction, MoveError, MoveOutcome, ObstacleKind, ObstacleReactor, Reaction};
pub use config::GameConfig;
pub use engine::{
    DamageOutcome, EnemyStepOutcome, GameEngine, PickupError, PickupOutcome, StepError,
    StepOutcome, SteppedOn,
};
pub use state::{
    ActorState, Direction, EnemyState, EntitiesState, EntityId, GameState, ItemState, PickupKind,
    PlayerState, Position, PropKind, PropState, TurnState,
};
