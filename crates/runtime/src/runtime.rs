//! The cooperative per-tick orchestrator.
//!
//! [`Runtime`] owns the game state, the collaborator ports, and the
//! scheduling concerns the core deliberately knows nothing about: polling
//! input while the turn gate is up, running the world phase, sequencing the
//! hit flash, and the delayed exit transition. Movement and resource
//! mutation are synchronous and complete within a single tick; the flash is
//! the only time-extended piece.
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, trace};

use scavenge_core::{
    Direction, EntityId, EntitiesState, GameConfig, GameEngine, GameState, PickupKind, Position,
    StepError, SteppedOn,
};

use crate::effects::{FlashCommand, FlashSequence};
use crate::error::Result;
use crate::events::{self, GameEvent};
use crate::ports::{
    AudioSink, ClipId, GameOverSink, HudSink, InputSource, NullAudio, NullGameOver, NullHud,
    NullInput, NullScene, NullVfx, SceneSink, VfxSink,
};
use crate::sfx;
use crate::store::{FoodStore, InMemoryFoodStore};

/// Timing knobs owned by the runtime rather than the rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Dim/restore cycles of the hit flash.
    pub flash_cycles: u32,
    /// Hold time of each flash phase.
    pub flash_interval: Duration,
    /// Delay between entering the exit and requesting the level reload.
    pub restart_delay: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            flash_cycles: 3,
            flash_interval: Duration::from_millis(100),
            restart_delay: Duration::from_secs(1),
        }
    }
}

/// Builder wiring state, rules, and collaborator ports into a [`Runtime`].
pub struct RuntimeBuilder {
    entities: EntitiesState,
    game_config: GameConfig,
    config: RuntimeConfig,
    input: Box<dyn InputSource>,
    hud: Box<dyn HudSink>,
    audio: Box<dyn AudioSink>,
    vfx: Box<dyn VfxSink>,
    scene: Box<dyn SceneSink>,
    game_over: Box<dyn GameOverSink>,
    store: Box<dyn FoodStore>,
    sfx_seed: u64,
}

impl RuntimeBuilder {
    pub fn new(entities: EntitiesState) -> Self {
        Self {
            entities,
            game_config: GameConfig::default(),
            config: RuntimeConfig::default(),
            input: Box::new(NullInput),
            hud: Box::new(NullHud),
            audio: Box::new(NullAudio),
            vfx: Box::new(NullVfx),
            scene: Box::new(NullScene),
            game_over: Box::new(NullGameOver),
            store: Box::new(InMemoryFoodStore::new()),
            sfx_seed: 0,
        }
    }

    pub fn with_game_config(mut self, game_config: GameConfig) -> Self {
        self.game_config = game_config;
        self
    }

    pub fn with_config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_input(mut self, input: impl InputSource + 'static) -> Self {
        self.input = Box::new(input);
        self
    }

    pub fn with_hud(mut self, hud: impl HudSink + 'static) -> Self {
        self.hud = Box::new(hud);
        self
    }

    pub fn with_audio(mut self, audio: impl AudioSink + 'static) -> Self {
        self.audio = Box::new(audio);
        self
    }

    pub fn with_vfx(mut self, vfx: impl VfxSink + 'static) -> Self {
        self.vfx = Box::new(vfx);
        self
    }

    pub fn with_scene(mut self, scene: impl SceneSink + 'static) -> Self {
        self.scene = Box::new(scene);
        self
    }

    pub fn with_game_over(mut self, game_over: impl GameOverSink + 'static) -> Self {
        self.game_over = Box::new(game_over);
        self
    }

    pub fn with_store(mut self, store: impl FoodStore + 'static) -> Self {
        self.store = Box::new(store);
        self
    }

    /// Seeds the sound-variation picker; fixed seed keeps replays stable.
    pub fn with_sfx_seed(mut self, seed: u64) -> Self {
        self.sfx_seed = seed;
        self
    }

    /// Builds the runtime. The player's food total is restored from the
    /// persistence collaborator when a save exists.
    pub fn build(self) -> Result<Runtime> {
        let mut state = GameState::new(self.entities);
        let food = self
            .store
            .load()?
            .unwrap_or(self.game_config.starting_food);
        state.entities.player.food = food;

        let mut runtime = Runtime {
            state,
            game_config: self.game_config,
            config: self.config,
            input: self.input,
            hud: self.hud,
            audio: self.audio,
            vfx: self.vfx,
            scene: self.scene,
            game_over: self.game_over,
            store: self.store,
            rng: StdRng::seed_from_u64(self.sfx_seed),
            flash: None,
            pending_restart: None,
            input_locked: false,
            run_over: false,
            day: 1,
        };
        runtime.refresh_food_label();
        Ok(runtime)
    }
}

/// Drives the simulation one cooperative tick at a time.
pub struct Runtime {
    state: GameState,
    game_config: GameConfig,
    config: RuntimeConfig,
    input: Box<dyn InputSource>,
    hud: Box<dyn HudSink>,
    audio: Box<dyn AudioSink>,
    vfx: Box<dyn VfxSink>,
    scene: Box<dyn SceneSink>,
    game_over: Box<dyn GameOverSink>,
    store: Box<dyn FoodStore>,
    rng: StdRng,
    flash: Option<FlashSequence>,
    pending_restart: Option<Duration>,
    input_locked: bool,
    run_over: bool,
    day: u32,
}

impl Runtime {
    pub fn builder(entities: EntitiesState) -> RuntimeBuilder {
        RuntimeBuilder::new(entities)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn is_run_over(&self) -> bool {
        self.run_over
    }

    /// Advances one frame of the cooperative schedule.
    pub fn tick(&mut self, now: Duration) -> Result<()> {
        self.advance_flash(now);
        self.fire_due_restart(now)?;

        if self.run_over {
            return Ok(());
        }

        if self.state.turn.players_turn {
            self.player_phase(now)?;
        } else {
            self.world_phase(now)?;
        }
        Ok(())
    }

    /// Swaps in the next level, carrying the food total through the
    /// persistence collaborator. Called by the scene collaborator after it
    /// honored the reload request.
    pub fn install_level(&mut self, entities: EntitiesState) -> Result<()> {
        self.clear_flash();
        self.pending_restart = None;
        self.input_locked = false;
        self.day += 1;

        let food = self
            .store
            .load()?
            .unwrap_or(self.game_config.starting_food);
        self.state = GameState::new(entities);
        self.state.entities.player.food = food;
        self.refresh_food_label();
        info!(day = self.day, food, "level installed");
        Ok(())
    }

    fn player_phase(&mut self, now: Duration) -> Result<()> {
        if self.input_locked {
            return Ok(());
        }
        let Some((dx, dy)) = self.input.poll() else {
            return Ok(());
        };

        let mut engine = GameEngine::new(&mut self.state, &self.game_config);
        let step = match engine.player_step(dx, dy) {
            Ok(step) => step,
            // Idle input carries no direction; wait for a real intent.
            Err(StepError::NoDirection) => return Ok(()),
            Err(StepError::NotPlayersTurn) => unreachable!("gated by players_turn"),
            Err(StepError::Move(err)) => return Err(err.into()),
        };
        trace!(?step, "player step");

        for event in events::from_player_step(&step) {
            self.dispatch(event, now);
        }

        if let Some(SteppedOn::Pickup(item)) = step.stepped_on
            && !self.run_over
        {
            let mut engine = GameEngine::new(&mut self.state, &self.game_config);
            if let Ok(pickup) = engine.collect_pickup(item) {
                for event in events::from_pickup(&pickup) {
                    self.dispatch(event, now);
                }
            }
        }
        Ok(())
    }

    /// The world phase: every enemy takes its pursuit step, then the turn
    /// gate is handed back to the player.
    fn world_phase(&mut self, now: Duration) -> Result<()> {
        let enemies: Vec<EntityId> = self
            .state
            .entities
            .enemies
            .iter()
            .map(|e| e.actor.id)
            .collect();

        for enemy in enemies {
            if self.run_over {
                break;
            }
            let Some(enemy_state) = self.state.entities.enemy(enemy) else {
                continue;
            };
            let direction =
                pursue_direction(enemy_state.position(), self.state.entities.player.position());

            let mut engine = GameEngine::new(&mut self.state, &self.game_config);
            let step = engine.enemy_step(enemy, direction)?;
            for event in events::from_enemy_step(enemy, &step) {
                self.dispatch(event, now);
            }
        }

        if !self.run_over {
            GameEngine::new(&mut self.state, &self.game_config).begin_player_turn();
        }
        Ok(())
    }

    fn dispatch(&mut self, event: GameEvent, now: Duration) {
        match event {
            GameEvent::FoodChanged { delta, total } => {
                self.hud.set_food_label(&format_food(delta, total));
            }
            GameEvent::PlayerMoved { from, to } => {
                debug!(?from, ?to, "player moved");
                let clip = sfx::randomize(&mut self.rng, ClipId::MoveA, ClipId::MoveB);
                self.audio.play(clip);
            }
            GameEvent::WallChopped { entity, destroyed } => {
                debug!(%entity, destroyed, "wall chopped");
                let clip = sfx::randomize(&mut self.rng, ClipId::ChopA, ClipId::ChopB);
                self.audio.play(clip);
            }
            GameEvent::PickupCollected { kind, points, .. } => {
                debug!(%kind, points, "pickup collected");
                let clip = match kind {
                    PickupKind::Food => sfx::randomize(&mut self.rng, ClipId::EatA, ClipId::EatB),
                    PickupKind::Soda => {
                        sfx::randomize(&mut self.rng, ClipId::DrinkA, ClipId::DrinkB)
                    }
                };
                self.audio.play(clip);
            }
            GameEvent::PlayerHit { loss, total } => {
                debug!(loss, total, "player hit");
                self.start_flash(EntityId::PLAYER, now);
            }
            GameEvent::EnemyMoved { entity, to } => {
                trace!(%entity, ?to, "enemy moved");
            }
            GameEvent::ExitReached => {
                info!(day = self.day, "exit reached");
                self.input_locked = true;
                self.pending_restart = Some(now + self.config.restart_delay);
            }
            GameEvent::GameOver => {
                info!(day = self.day, "out of food");
                self.audio.play(ClipId::GameOver);
                self.audio.stop_music();
                self.game_over.game_over(self.day);
                self.input_locked = true;
                self.run_over = true;
            }
        }
    }

    /// Starting a new flash supersedes an in-flight one; the old sequence is
    /// cancelled into the visible state first so alpha changes never stack.
    fn start_flash(&mut self, entity: EntityId, now: Duration) {
        self.clear_flash();
        let (sequence, initial) = FlashSequence::start(
            entity,
            self.config.flash_cycles,
            self.config.flash_interval,
            now,
        );
        self.apply_flash(initial);
        self.flash = Some(sequence);
    }

    fn advance_flash(&mut self, now: Duration) {
        let Some(mut flash) = self.flash.take() else {
            return;
        };
        for command in flash.advance(now) {
            self.apply_flash(command);
        }
        if !flash.is_done() {
            self.flash = Some(flash);
        }
    }

    fn clear_flash(&mut self) {
        if let Some(flash) = self.flash.take() {
            self.apply_flash(flash.cancel());
        }
    }

    fn apply_flash(&mut self, command: FlashCommand) {
        self.vfx.set_dimmed(command.entity, command.dimmed);
    }

    fn fire_due_restart(&mut self, now: Duration) -> Result<()> {
        if let Some(deadline) = self.pending_restart
            && now >= deadline
        {
            self.pending_restart = None;
            let food = self.state.entities.player.food;
            self.store.save(food)?;
            info!(day = self.day, food, "requesting level reload");
            self.scene.restart_level();
        }
        Ok(())
    }

    fn refresh_food_label(&mut self) {
        let food = self.state.entities.player.food;
        self.hud.set_food_label(&format_food(None, food));
    }
}

/// Greedy one-axis pursuit: close the horizontal gap first, the vertical
/// gap once aligned.
fn pursue_direction(enemy: Position, player: Position) -> Direction {
    if enemy.x == player.x {
        if player.y > enemy.y {
            Direction::Up
        } else {
            Direction::Down
        }
    } else if player.x > enemy.x {
        Direction::Right
    } else {
        Direction::Left
    }
}

/// The two HUD formats: plain `"Food: n"` per move, delta-prefixed
/// `"+k Food: n"` / `"-k Food: n"` for pickups and damage.
fn format_food(delta: Option<i32>, total: i32) -> String {
    match delta {
        None => format!("Food: {total}"),
        Some(delta) if delta < 0 => format!("-{} Food: {total}", -delta),
        Some(delta) => format!("+{delta} Food: {total}"),
    }
}
