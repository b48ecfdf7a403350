//! Engine outcomes translated into dispatchable events.
//!
//! The core returns typed outcome structs; the extractor flattens them into
//! the [`GameEvent`] stream the runtime feeds to collaborator ports. Event
//! order within one attempt mirrors the presentation order: food label
//! first, then the move/chop feedback, then triggers, then the terminal
//! signal.
mod extractor;

pub use extractor::{from_damage, from_enemy_step, from_pickup, from_player_step};

use scavenge_core::{EntityId, PickupKind, Position};

/// High-level occurrences extracted from engine outcomes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// The player displaced into open space.
    PlayerMoved { from: Position, to: Position },

    /// The player chopped a wall; `destroyed` marks the finishing hit.
    WallChopped { entity: EntityId, destroyed: bool },

    /// The food total changed. `delta` is `None` for the plain per-move
    /// display and `Some(signed amount)` for pickup/damage deltas.
    FoodChanged { delta: Option<i32>, total: i32 },

    /// The player collected a pickup.
    PickupCollected {
        kind: PickupKind,
        points: i32,
        total: i32,
    },

    /// An enemy attack landed on the player.
    PlayerHit { loss: i32, total: i32 },

    /// An enemy displaced into open space.
    EnemyMoved { entity: EntityId, to: Position },

    /// The player stepped into the exit zone.
    ExitReached,

    /// The food total depleted; signalled exactly once per run.
    GameOver,
}
