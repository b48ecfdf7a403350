//! Action domain - obstacle-aware movement and the reactions it dispatches.
//!
//! The one algorithmic idea here is generic dispatch over obstacle kind: a
//! single probe/displace routine serves every actor, and only the reaction
//! for "destination holds the kind I interact with" differs by caller. The
//! player runs it with target [`ObstacleKind::Wall`] (chop), enemies with
//! target [`ObstacleKind::Player`] (attack).
pub mod movement;
pub mod react;

pub use crate::state::ObstacleKind;
pub use movement::{MoveAction, MoveError, MoveOutcome};
pub use react::{ObstacleReactor, Reaction};
