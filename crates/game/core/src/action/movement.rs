use crate::action::react::{ObstacleReactor, Reaction};
use crate::state::{Direction, EntityId, GameState, ObstacleKind, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("actor {0} not found")]
    ActorNotFound(EntityId),
}

/// Outcome of a single-step move attempt. Collisions are defined results,
/// not errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveOutcome {
    /// Destination was free; the actor displaced into it.
    Moved { from: Position, to: Position },
    /// Destination held the caller's declared obstacle kind; the actor
    /// stayed put and the blocker's reaction was dispatched.
    Blocked { entity: EntityId, reaction: Reaction },
    /// Destination held a blocker the caller has no interaction rule for;
    /// collision denied with no reaction.
    Obstructed,
}

/// Movement intent materialised into a single-step attempt.
///
/// `target` is the obstacle kind this mover knows how to react to, and
/// `damage` the interaction payload delivered when it blocks the way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub actor: EntityId,
    pub direction: Direction,
    pub target: ObstacleKind,
    pub damage: i32,
}

impl MoveAction {
    pub fn new(actor: EntityId, direction: Direction, target: ObstacleKind, damage: i32) -> Self {
        Self {
            actor,
            direction,
            target,
            damage,
        }
    }

    /// Probes one cell along `direction` and either displaces the actor or
    /// dispatches the blocker's reaction.
    ///
    /// Facing is updated from the attempted direction before probing; it is
    /// a pure intent update independent of the outcome.
    pub fn attempt(&self, state: &mut GameState) -> Result<MoveOutcome, MoveError> {
        let actor = state
            .entities
            .grid_actor_mut(self.actor)
            .ok_or(MoveError::ActorNotFound(self.actor))?;
        actor.facing = Some(self.direction);

        let from = actor.position;
        let to = from.offset(self.direction);

        let Some((entity, kind)) = state.entities.blocker_at(to) else {
            let actor = state
                .entities
                .grid_actor_mut(self.actor)
                .ok_or(MoveError::ActorNotFound(self.actor))?;
            actor.position = to;
            return Ok(MoveOutcome::Moved { from, to });
        };

        if kind != self.target {
            return Ok(MoveOutcome::Obstructed);
        }

        let reaction = match kind {
            ObstacleKind::Wall => state
                .entities
                .prop_mut(entity)
                .map(|prop| prop.receive_damage(self.damage)),
            ObstacleKind::Player => Some(state.entities.player.receive_damage(self.damage)),
            // No reactor registered for these kinds; treat as a plain collision.
            ObstacleKind::Boundary | ObstacleKind::Enemy => None,
        };

        match reaction {
            Some(reaction) => Ok(MoveOutcome::Blocked { entity, reaction }),
            None => Ok(MoveOutcome::Obstructed),
        }
    }
}
