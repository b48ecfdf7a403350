//! Terminal adapters for the runtime's collaborator ports.
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::rc::Rc;

use scavenge_core::{EntityId, GameState, PickupKind, Position, PropKind};
use scavenge_runtime::{AudioSink, ClipId, GameOverSink, HudSink, InputSource, SceneSink, VfxSink};

use crate::level::SIZE;

/// Queue-backed input shared between the read loop and the runtime.
#[derive(Clone, Default)]
pub struct QueuedInput(Rc<RefCell<VecDeque<(i32, i32)>>>);

impl QueuedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, intent: (i32, i32)) {
        self.0.borrow_mut().push_back(intent);
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl InputSource for QueuedInput {
    fn poll(&mut self) -> Option<(i32, i32)> {
        self.0.borrow_mut().pop_front()
    }
}

/// Prints the food label where a HUD text binding would render it.
pub struct ConsoleHud;

impl HudSink for ConsoleHud {
    fn set_food_label(&mut self, label: &str) {
        println!("{label}");
    }
}

/// Names the cue instead of playing it.
pub struct LoggedAudio;

impl AudioSink for LoggedAudio {
    fn play(&mut self, clip: ClipId) {
        tracing::debug!(%clip, "audio cue");
    }

    fn stop_music(&mut self) {
        tracing::debug!("music stopped");
    }
}

/// Reports flash toggles to the log; a terminal has no sprite alpha.
pub struct LoggedVfx;

impl VfxSink for LoggedVfx {
    fn set_dimmed(&mut self, entity: EntityId, dimmed: bool) {
        tracing::debug!(%entity, dimmed, "flash toggle");
    }
}

/// Latches the reload request so the main loop can install the next floor.
#[derive(Clone, Default)]
pub struct ReloadFlag(Rc<RefCell<bool>>);

impl ReloadFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> bool {
        self.0.replace(false)
    }
}

impl SceneSink for ReloadFlag {
    fn restart_level(&mut self) {
        self.0.replace(true);
    }
}

pub struct ConsoleGameOver;

impl GameOverSink for ConsoleGameOver {
    fn game_over(&mut self, days: u32) {
        println!("After {days} days, you starved.");
    }
}

/// Draws the floor top row first so `w` moves toward the top of the screen.
pub fn render(state: &GameState, day: u32) {
    println!("Day {day}");
    for y in (0..SIZE).rev() {
        let mut row = String::with_capacity(SIZE as usize);
        for x in 0..SIZE {
            row.push(glyph(state, Position::new(x, y)));
        }
        println!("{row}");
    }
}

fn glyph(state: &GameState, position: Position) -> char {
    let entities = &state.entities;
    if entities.player.position() == position {
        return '@';
    }
    if entities.enemies.iter().any(|e| e.position() == position) {
        return 'z';
    }
    if let Some(prop) = entities
        .props
        .iter()
        .find(|p| p.is_active && p.position == position)
    {
        return match prop.kind {
            PropKind::Wall { .. } => '+',
            PropKind::Boundary => '#',
            PropKind::Exit => '>',
        };
    }
    if let Some(item) = entities.item_at(position) {
        return match item.kind {
            PickupKind::Food => '*',
            PickupKind::Soda => '!',
        };
    }
    '.'
}

/// Reads one command off stdin. `None` means quit, on either `q` or EOF.
pub fn read_command() -> io::Result<Option<(i32, i32)>> {
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        line.clear();
        if io::stdin().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        match line.trim() {
            "w" => return Ok(Some((0, 1))),
            "s" => return Ok(Some((0, -1))),
            "a" => return Ok(Some((-1, 0))),
            "d" => return Ok(Some((1, 0))),
            "q" => return Ok(None),
            "" => continue,
            other => println!("unknown command {other:?}; move with w/a/s/d, quit with q"),
        }
    }
}
