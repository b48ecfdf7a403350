//! Sound-cue selection helpers.
use rand::Rng;

use crate::ports::ClipId;

/// Picks one of the two recorded variations of a cue at even odds, so
/// repeated actions do not sound mechanical.
pub fn randomize<R: Rng>(rng: &mut R, first: ClipId, second: ClipId) -> ClipId {
    if rng.gen_bool(0.5) { first } else { second }
}
