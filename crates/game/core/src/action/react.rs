use crate::state::{PlayerState, PropKind, PropState};

/// Result of dispatching an interaction onto a blocking entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Reaction {
    /// A wall absorbed the hit; `destroyed` is true on the hit that
    /// deactivated it.
    WallDamaged { remaining: i32, destroyed: bool },
    /// The target was already destroyed when the reaction arrived. A single
    /// tick may not have cleared it from the grid yet, so this is a defined
    /// no-op rather than a fault.
    AlreadyDestroyed,
    /// The player absorbed an attack. Game-over evaluation happens in the
    /// engine wrapper, not here.
    PlayerHit { loss: i32, food_after: i32 },
}

/// Capability interface implemented by every obstacle kind a mover can
/// declare as its interaction target.
pub trait ObstacleReactor {
    /// Applies the attacker's interaction payload and mutates durability or
    /// resource state. Must be idempotent once the target is destroyed.
    fn receive_damage(&mut self, amount: i32) -> Reaction;
}

impl ObstacleReactor for PropState {
    fn receive_damage(&mut self, amount: i32) -> Reaction {
        if !self.is_active {
            return Reaction::AlreadyDestroyed;
        }
        match &mut self.kind {
            PropKind::Wall { hits } => {
                *hits -= amount;
                let destroyed = *hits <= 0;
                if destroyed {
                    self.is_active = false;
                }
                Reaction::WallDamaged {
                    remaining: *hits,
                    destroyed,
                }
            }
            // Boundaries and the exit have no durability; hitting them does
            // nothing.
            PropKind::Boundary | PropKind::Exit => Reaction::AlreadyDestroyed,
        }
    }
}

impl ObstacleReactor for PlayerState {
    fn receive_damage(&mut self, amount: i32) -> Reaction {
        self.food -= amount;
        Reaction::PlayerHit {
            loss: amount,
            food_after: self.food,
        }
    }
}
