//! Timed visual-feedback sequencing.
mod flash;

pub use flash::{FlashCommand, FlashSequence};
