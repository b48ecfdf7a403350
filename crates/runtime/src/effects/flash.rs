use std::time::Duration;

use scavenge_core::EntityId;

/// One visibility toggle issued by the flash sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlashCommand {
    pub entity: EntityId,
    pub dimmed: bool,
}

/// Tick-driven hit-feedback flash: alternates a sprite between dimmed and
/// full visibility `cycles` times, holding each state for `interval`.
///
/// The sequence never blocks the update tick; it is advanced from the
/// ambient scheduler and can be cancelled or superseded at any point. In
/// every terminal path the sprite ends fully visible.
#[derive(Clone, Debug)]
pub struct FlashSequence {
    entity: EntityId,
    remaining_cycles: u32,
    interval: Duration,
    dimmed: bool,
    next_toggle: Duration,
}

impl FlashSequence {
    /// Starts a new sequence at `now`. The initial dim command is returned
    /// so the caller applies it on the same tick the damage landed.
    pub fn start(
        entity: EntityId,
        cycles: u32,
        interval: Duration,
        now: Duration,
    ) -> (Self, FlashCommand) {
        let sequence = Self {
            entity,
            remaining_cycles: cycles.max(1),
            interval,
            dimmed: true,
            next_toggle: now + interval,
        };
        (sequence, FlashCommand { entity, dimmed: true })
    }

    /// A sequence is done once it has restored visibility after its final
    /// cycle.
    pub fn is_done(&self) -> bool {
        self.remaining_cycles == 0 && !self.dimmed
    }

    /// Advances the sequence to `now`, returning every toggle that came due.
    /// Multiple phases elapse in one call when ticks arrive late.
    pub fn advance(&mut self, now: Duration) -> Vec<FlashCommand> {
        let mut commands = Vec::new();
        while !self.is_done() && now >= self.next_toggle {
            if self.dimmed {
                self.dimmed = false;
                self.remaining_cycles -= 1;
            } else {
                self.dimmed = true;
            }
            self.next_toggle += self.interval;
            commands.push(FlashCommand {
                entity: self.entity,
                dimmed: self.dimmed,
            });
        }
        commands
    }

    /// Cancels the sequence mid-flight. The returned command restores full
    /// visibility so a superseded flash never leaks a stuck dimmed sprite.
    pub fn cancel(self) -> FlashCommand {
        FlashCommand {
            entity: self.entity,
            dimmed: false,
        }
    }
}
