use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use scavenge_core::{
    EnemyState, EntitiesState, EntityId, ItemState, PickupKind, PlayerState, Position, PropKind,
    PropState,
};
use scavenge_runtime::{
    AudioSink, ClipId, FoodStore, GameOverSink, HudSink, InputSource, Runtime, SceneSink,
    StoreError, VfxSink,
};

#[derive(Default)]
struct Record {
    labels: Vec<String>,
    clips: Vec<ClipId>,
    dims: Vec<(EntityId, bool)>,
    restarts: u32,
    game_overs: Vec<u32>,
}

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Record>>);

impl HudSink for Recorder {
    fn set_food_label(&mut self, label: &str) {
        self.0.borrow_mut().labels.push(label.to_string());
    }
}

impl AudioSink for Recorder {
    fn play(&mut self, clip: ClipId) {
        self.0.borrow_mut().clips.push(clip);
    }
}

impl VfxSink for Recorder {
    fn set_dimmed(&mut self, entity: EntityId, dimmed: bool) {
        self.0.borrow_mut().dims.push((entity, dimmed));
    }
}

impl SceneSink for Recorder {
    fn restart_level(&mut self) {
        self.0.borrow_mut().restarts += 1;
    }
}

impl GameOverSink for Recorder {
    fn game_over(&mut self, days: u32) {
        self.0.borrow_mut().game_overs.push(days);
    }
}

struct ScriptedInput(VecDeque<(i32, i32)>);

impl ScriptedInput {
    fn new(moves: impl IntoIterator<Item = (i32, i32)>) -> Self {
        Self(moves.into_iter().collect())
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Option<(i32, i32)> {
        self.0.pop_front()
    }
}

#[derive(Clone, Default)]
struct SharedStore(Rc<RefCell<Option<i32>>>);

impl SharedStore {
    fn with_food(food: i32) -> Self {
        Self(Rc::new(RefCell::new(Some(food))))
    }

    fn stored(&self) -> Option<i32> {
        *self.0.borrow()
    }
}

impl FoodStore for SharedStore {
    fn load(&self) -> Result<Option<i32>, StoreError> {
        Ok(*self.0.borrow())
    }

    fn save(&mut self, food: i32) -> Result<(), StoreError> {
        *self.0.borrow_mut() = Some(food);
        Ok(())
    }
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn player(food: i32) -> (EntitiesState, SharedStore) {
    (
        EntitiesState::new(PlayerState::new(Position::ORIGIN, 0)),
        SharedStore::with_food(food),
    )
}

#[test]
fn move_into_open_cell_updates_hud_and_plays_move_clip() {
    let recorder = Recorder::default();
    let (entities, store) = player(10);
    let mut runtime = Runtime::builder(entities)
        .with_input(ScriptedInput::new([(1, 0)]))
        .with_hud(recorder.clone())
        .with_audio(recorder.clone())
        .with_store(store)
        .build()
        .unwrap();

    runtime.tick(ms(0)).unwrap();

    assert_eq!(
        runtime.state().entities.player.position(),
        Position::new(1, 0)
    );
    assert_eq!(runtime.state().entities.player.food, 9);
    assert!(!runtime.state().turn.players_turn);

    let record = recorder.0.borrow();
    // Initial label from build, then the per-move update.
    assert_eq!(record.labels, vec!["Food: 10", "Food: 9"]);
    assert_eq!(record.clips.len(), 1);
    assert!(matches!(record.clips[0], ClipId::MoveA | ClipId::MoveB));
}

#[test]
fn empty_world_phase_hands_the_turn_back() {
    let (entities, store) = player(10);
    let mut runtime = Runtime::builder(entities)
        .with_input(ScriptedInput::new([(1, 0)]))
        .with_store(store)
        .build()
        .unwrap();

    runtime.tick(ms(0)).unwrap();
    assert!(!runtime.state().turn.players_turn);

    runtime.tick(ms(16)).unwrap();
    assert!(runtime.state().turn.players_turn);
}

#[test]
fn chopping_a_wall_costs_food_without_moving() {
    let recorder = Recorder::default();
    let (mut entities, store) = player(5);
    entities.props.push(PropState::new(
        EntityId(10),
        Position::new(1, 0),
        PropKind::Wall { hits: 2 },
    ));
    let mut runtime = Runtime::builder(entities)
        .with_input(ScriptedInput::new([(1, 0)]))
        .with_hud(recorder.clone())
        .with_audio(recorder.clone())
        .with_store(store)
        .build()
        .unwrap();

    runtime.tick(ms(0)).unwrap();

    assert_eq!(runtime.state().entities.player.position(), Position::ORIGIN);
    assert_eq!(runtime.state().entities.player.food, 4);
    assert_eq!(
        runtime.state().entities.prop(EntityId(10)).unwrap().kind,
        PropKind::Wall { hits: 1 }
    );

    let record = recorder.0.borrow();
    assert_eq!(record.labels.last().unwrap(), "Food: 4");
    assert!(matches!(
        record.clips.last().unwrap(),
        ClipId::ChopA | ClipId::ChopB
    ));
}

#[test]
fn diagonal_intent_resolves_horizontally() {
    let (entities, store) = player(10);
    let mut runtime = Runtime::builder(entities)
        .with_input(ScriptedInput::new([(1, 1)]))
        .with_store(store)
        .build()
        .unwrap();

    runtime.tick(ms(0)).unwrap();

    assert_eq!(
        runtime.state().entities.player.position(),
        Position::new(1, 0)
    );
}

#[test]
fn pickup_shows_delta_prefixed_label_and_plays_eat_clip() {
    let recorder = Recorder::default();
    let (mut entities, store) = player(40);
    entities.items.push(ItemState::new(
        EntityId(8),
        Position::new(1, 0),
        PickupKind::Food,
        10,
    ));
    let mut runtime = Runtime::builder(entities)
        .with_input(ScriptedInput::new([(1, 0)]))
        .with_hud(recorder.clone())
        .with_audio(recorder.clone())
        .with_store(store)
        .build()
        .unwrap();

    runtime.tick(ms(0)).unwrap();

    assert_eq!(runtime.state().entities.player.food, 49);
    assert!(!runtime.state().entities.items[0].is_active);

    let record = recorder.0.borrow();
    assert_eq!(record.labels.last().unwrap(), "+10 Food: 49");
    assert!(matches!(
        record.clips.last().unwrap(),
        ClipId::EatA | ClipId::EatB
    ));
}

#[test]
fn enemy_attack_flashes_the_player_and_ends_visible() {
    let recorder = Recorder::default();
    let (mut entities, store) = player(15);
    // Wall above keeps the player in place; the adjacent enemy attacks.
    entities.props.push(PropState::new(
        EntityId(10),
        Position::new(0, 1),
        PropKind::Wall { hits: 50 },
    ));
    entities
        .enemies
        .push(EnemyState::new(EntityId(3), Position::new(1, 0), 10));
    let mut runtime = Runtime::builder(entities)
        .with_input(ScriptedInput::new([(0, 1)]))
        .with_hud(recorder.clone())
        .with_vfx(recorder.clone())
        .with_store(store)
        .build()
        .unwrap();

    runtime.tick(ms(0)).unwrap(); // player chops the wall
    runtime.tick(ms(16)).unwrap(); // world phase: enemy attacks

    assert_eq!(runtime.state().entities.player.food, 4);
    {
        let record = recorder.0.borrow();
        assert_eq!(record.labels.last().unwrap(), "-10 Food: 4");
        assert_eq!(record.dims.first(), Some(&(EntityId::PLAYER, true)));
    }

    // Let the flash run out; the sprite must end fully visible.
    for t in [116, 216, 316, 416, 516, 616, 716] {
        runtime.tick(ms(t)).unwrap();
    }
    let record = recorder.0.borrow();
    assert_eq!(record.dims.last(), Some(&(EntityId::PLAYER, false)));
    let dim_count = record.dims.iter().filter(|(_, dimmed)| *dimmed).count();
    let restore_count = record.dims.iter().filter(|(_, dimmed)| !*dimmed).count();
    assert_eq!(dim_count, 3);
    assert_eq!(restore_count, 3);
}

#[test]
fn second_hit_supersedes_the_flash_without_stacking() {
    let recorder = Recorder::default();
    let (mut entities, store) = player(50);
    // Wall above keeps the player in place; the adjacent enemy lands its
    // second hit while the first flash is still mid-flight.
    entities.props.push(PropState::new(
        EntityId(10),
        Position::new(0, 1),
        PropKind::Wall { hits: 50 },
    ));
    entities
        .enemies
        .push(EnemyState::new(EntityId(3), Position::new(1, 0), 5));
    let mut runtime = Runtime::builder(entities)
        .with_input(ScriptedInput::new([(0, 1), (0, 1), (0, 1)]))
        .with_vfx(recorder.clone())
        .with_store(store)
        .build()
        .unwrap();

    runtime.tick(ms(0)).unwrap(); // player chops
    runtime.tick(ms(10)).unwrap(); // world phase: first hit starts the flash
    runtime.tick(ms(20)).unwrap(); // player chops
    runtime.tick(ms(30)).unwrap(); // world phase: enemy sits this one out
    runtime.tick(ms(40)).unwrap(); // player chops
    runtime.tick(ms(80)).unwrap(); // world phase: second hit mid-flight

    {
        // The cancel-restore of the first sequence precedes the new dim.
        let record = recorder.0.borrow();
        assert_eq!(
            record.dims,
            vec![
                (EntityId::PLAYER, true),
                (EntityId::PLAYER, false),
                (EntityId::PLAYER, true),
            ]
        );
    }

    // Let the superseding flash run out.
    for t in [180, 280, 380, 480, 580, 680] {
        runtime.tick(ms(t)).unwrap();
    }

    let record = recorder.0.borrow();
    // Toggles alternate strictly; a superseded flash never dims twice in a
    // row, and the sprite ends fully visible.
    for pair in record.dims.windows(2) {
        assert_ne!(pair[0].1, pair[1].1);
    }
    assert_eq!(record.dims.last(), Some(&(EntityId::PLAYER, false)));
    assert_eq!(record.dims.iter().filter(|(_, dimmed)| *dimmed).count(), 4);
}

#[test]
fn starving_signals_game_over_exactly_once() {
    let recorder = Recorder::default();
    let (entities, store) = player(1);
    let mut runtime = Runtime::builder(entities)
        .with_input(ScriptedInput::new([(1, 0), (1, 0), (1, 0)]))
        .with_hud(recorder.clone())
        .with_audio(recorder.clone())
        .with_game_over(recorder.clone())
        .with_store(store)
        .build()
        .unwrap();

    runtime.tick(ms(0)).unwrap();

    assert!(runtime.is_run_over());
    // Respawn bookkeeping: the stored total is reset for the next run.
    assert_eq!(runtime.state().entities.player.food, 100);

    // Further ticks change nothing.
    runtime.tick(ms(16)).unwrap();
    runtime.tick(ms(32)).unwrap();
    assert_eq!(
        runtime.state().entities.player.position(),
        Position::new(1, 0)
    );

    let record = recorder.0.borrow();
    assert_eq!(record.game_overs, vec![1]);
    assert_eq!(record.labels.last().unwrap(), "Food: 0");
    assert_eq!(record.clips.last(), Some(&ClipId::GameOver));
}

#[test]
fn exit_schedules_a_delayed_reload_and_persists_food() {
    let recorder = Recorder::default();
    let (mut entities, store) = player(10);
    entities.props.push(PropState::new(
        EntityId(9),
        Position::new(1, 0),
        PropKind::Exit,
    ));
    let mut runtime = Runtime::builder(entities)
        .with_input(ScriptedInput::new([(1, 0), (1, 0)]))
        .with_scene(recorder.clone())
        .with_store(store.clone())
        .build()
        .unwrap();

    runtime.tick(ms(0)).unwrap();
    assert_eq!(recorder.0.borrow().restarts, 0);

    // Input is locked while the transition is pending.
    runtime.tick(ms(500)).unwrap();
    runtime.tick(ms(600)).unwrap();
    assert_eq!(
        runtime.state().entities.player.position(),
        Position::new(1, 0)
    );
    assert_eq!(recorder.0.borrow().restarts, 0);

    runtime.tick(ms(1100)).unwrap();
    assert_eq!(recorder.0.borrow().restarts, 1);
    assert_eq!(store.stored(), Some(9));

    // The scene collaborator hands the next level back.
    runtime
        .install_level(EntitiesState::new(PlayerState::new(Position::ORIGIN, 0)))
        .unwrap();
    assert_eq!(runtime.day(), 2);
    assert_eq!(runtime.state().entities.player.food, 9);
    assert!(runtime.state().turn.players_turn);
}

#[test]
fn enemies_pursue_on_alternating_world_phases() {
    let (mut entities, store) = player(50);
    entities
        .enemies
        .push(EnemyState::new(EntityId(3), Position::new(4, 0), 10));
    let mut runtime = Runtime::builder(entities)
        .with_input(ScriptedInput::new([(0, 1), (0, -1), (0, 1), (0, -1)]))
        .with_store(store)
        .build()
        .unwrap();

    // Two full player/world rounds: the enemy steps, then sits one out.
    runtime.tick(ms(0)).unwrap();
    runtime.tick(ms(16)).unwrap();
    assert_eq!(
        runtime.state().entities.enemy(EntityId(3)).unwrap().position(),
        Position::new(3, 0)
    );

    runtime.tick(ms(32)).unwrap();
    runtime.tick(ms(48)).unwrap();
    assert_eq!(
        runtime.state().entities.enemy(EntityId(3)).unwrap().position(),
        Position::new(3, 0)
    );

    runtime.tick(ms(64)).unwrap();
    runtime.tick(ms(80)).unwrap();
    assert_eq!(
        runtime.state().entities.enemy(EntityId(3)).unwrap().position(),
        Position::new(2, 0)
    );
}
