/// Turn bookkeeping for the single player/world alternation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// The turn gate: the player may attempt exactly one move while this is
    /// set. Every completed attempt drops it; only the turn collaborator
    /// (the runtime's world phase) raises it again.
    pub players_turn: bool,
}

impl TurnState {
    pub fn new() -> Self {
        Self { players_turn: true }
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}
