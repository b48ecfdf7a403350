//! Authoritative game state representation.
//!
//! This module owns the data structures that describe entities and turn
//! bookkeeping. Runtime layers query this state but mutate it exclusively
//! through the engine.
pub mod common;
pub mod entities;
pub mod turn;

pub use common::{Direction, EntityId, Position};
pub use entities::{
    ActorState, EnemyState, EntitiesState, ItemState, ObstacleKind, PickupKind, PlayerState,
    PropKind, PropState,
};
pub use turn::TurnState;

/// Canonical snapshot of the deterministic game state for one level session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Turn bookkeeping.
    pub turn: TurnState,
    /// All entities tracked on the grid: player, enemies, props, items.
    pub entities: EntitiesState,
}

impl GameState {
    /// Creates a fresh state from the provided sub-components.
    pub fn new(entities: EntitiesState) -> Self {
        Self {
            turn: TurnState::new(),
            entities,
        }
    }
}
