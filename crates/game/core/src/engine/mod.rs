//! The authoritative reducer for [`GameState`].
//!
//! [`GameEngine`] wraps the generic move attempt with the player-specific
//! turn pipeline (food cost, game-over detection, turn release) and exposes
//! the remaining state transitions: external damage, pickup collection, and
//! the world-phase enemy step. Every operation returns a typed outcome the
//! runtime translates into collaborator calls; the engine itself performs no
//! side effects.
use crate::action::{MoveAction, MoveError, MoveOutcome, Reaction};
use crate::config::GameConfig;
use crate::state::{Direction, EntityId, GameState, ObstacleKind, PickupKind, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepError {
    /// The turn gate is down; the attempt touched neither position nor food.
    #[error("not the player's turn")]
    NotPlayersTurn,

    /// A `(0, 0)` intent carries no direction to attempt.
    #[error("move intent has no direction")]
    NoDirection,

    #[error(transparent)]
    Move(#[from] MoveError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PickupError {
    #[error("item {0} not found")]
    ItemNotFound(EntityId),

    #[error("item {0} was already collected")]
    AlreadyCollected(EntityId),
}

/// Non-blocking trigger found under the player after a successful step.
/// Consuming it (collecting the pickup, scheduling the level transition)
/// belongs to the owning context, not the move itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SteppedOn {
    Pickup(EntityId),
    Exit,
}

/// Outcome of one player move attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepOutcome {
    pub outcome: MoveOutcome,
    /// Observed food total after the unconditional move cost. On the step
    /// that ends the game this still reports the depleted value; the stored
    /// total has already been reset to the respawn value.
    pub food: i32,
    pub stepped_on: Option<SteppedOn>,
    /// True on the exact step that depleted the food total.
    pub game_over: bool,
}

/// Outcome of external damage applied to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageOutcome {
    pub loss: i32,
    pub food: i32,
    pub game_over: bool,
}

/// Outcome of collecting a pickup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PickupOutcome {
    pub kind: PickupKind,
    pub points: i32,
    pub food: i32,
}

/// Outcome of one enemy world-phase step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyStepOutcome {
    /// `None` when the enemy sat out this phase (every-other-turn cadence).
    pub outcome: Option<MoveOutcome>,
    /// Set when the enemy was blocked into the player and landed an attack.
    pub player_hit: Option<DamageOutcome>,
}

/// Game engine that executes move attempts and resource transitions.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
    config: &'a GameConfig,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState, config: &'a GameConfig) -> Self {
        Self { state, config }
    }

    /// Attempts one player move from a raw `(dx, dy)` intent.
    ///
    /// The move cost is charged before the outcome is known: chopping a wall
    /// costs exactly as much food as walking. Whatever happens, the turn
    /// gate drops when the attempt completes.
    pub fn player_step(&mut self, dx: i32, dy: i32) -> Result<StepOutcome, StepError> {
        if !self.state.turn.players_turn {
            return Err(StepError::NotPlayersTurn);
        }
        let direction = Direction::from_input(dx, dy).ok_or(StepError::NoDirection)?;

        self.state.entities.player.food -= self.config.move_cost;

        let action = MoveAction::new(
            EntityId::PLAYER,
            direction,
            ObstacleKind::Wall,
            self.config.wall_damage,
        );
        let outcome = action.attempt(self.state)?;

        let stepped_on = match outcome {
            MoveOutcome::Moved { to, .. } => self.trigger_under(to),
            _ => None,
        };

        // HUD shows the observed total, even when the reset to the respawn
        // value lands on the same step.
        let food = self.state.entities.player.food;
        let game_over = self.check_game_over();
        self.state.turn.players_turn = false;

        Ok(StepOutcome {
            outcome,
            food,
            stepped_on,
            game_over,
        })
    }

    /// Applies external damage to the player (an enemy attack). Does not
    /// touch the turn gate.
    pub fn damage_player(&mut self, amount: i32) -> DamageOutcome {
        self.state.entities.player.food -= amount;
        let food = self.state.entities.player.food;
        let game_over = self.check_game_over();
        DamageOutcome {
            loss: amount,
            food,
            game_over,
        }
    }

    /// Collects a pickup the player is standing on, deactivating it exactly
    /// once. Food only increases here, so no game-over check is needed.
    pub fn collect_pickup(&mut self, item: EntityId) -> Result<PickupOutcome, PickupError> {
        let entry = self
            .state
            .entities
            .item_mut(item)
            .ok_or(PickupError::ItemNotFound(item))?;
        if !entry.is_active {
            return Err(PickupError::AlreadyCollected(item));
        }
        entry.is_active = false;

        let (kind, points) = (entry.kind, entry.points);
        self.state.entities.player.food += points;

        Ok(PickupOutcome {
            kind,
            points,
            food: self.state.entities.player.food,
        })
    }

    /// Runs one enemy step toward the player: the generic move attempt with
    /// target [`ObstacleKind::Player`]. A blocked-into player takes this
    /// enemy's damage; displacement and attack alternate with the enemy's
    /// every-other-phase cadence.
    pub fn enemy_step(
        &mut self,
        enemy: EntityId,
        direction: Direction,
    ) -> Result<EnemyStepOutcome, MoveError> {
        let (damage, skip) = {
            let enemy_state = self
                .state
                .entities
                .enemy(enemy)
                .ok_or(MoveError::ActorNotFound(enemy))?;
            (enemy_state.damage, enemy_state.skip_next)
        };

        if skip {
            if let Some(enemy_state) = self.state.entities.enemy_mut(enemy) {
                enemy_state.skip_next = false;
            }
            return Ok(EnemyStepOutcome {
                outcome: None,
                player_hit: None,
            });
        }

        let action = MoveAction::new(enemy, direction, ObstacleKind::Player, damage);
        let outcome = action.attempt(self.state)?;

        // The reaction already subtracted the food; finish the damage
        // pipeline (game-over evaluation) here.
        let player_hit = match outcome {
            MoveOutcome::Blocked {
                reaction: Reaction::PlayerHit { loss, food_after },
                ..
            } => Some(DamageOutcome {
                loss,
                food: food_after,
                game_over: self.check_game_over(),
            }),
            _ => None,
        };

        if let Some(enemy_state) = self.state.entities.enemy_mut(enemy) {
            enemy_state.skip_next = true;
        }

        Ok(EnemyStepOutcome {
            outcome: Some(outcome),
            player_hit,
        })
    }

    /// Raises the turn gate. Only the turn collaborator (the runtime's world
    /// phase) calls this.
    pub fn begin_player_turn(&mut self) {
        self.state.turn.players_turn = true;
    }

    /// Current food total, read by the persistence collaborator at level
    /// boundaries.
    pub fn player_food(&self) -> i32 {
        self.state.entities.player.food
    }

    /// Restores a food total handed back by the persistence collaborator.
    pub fn set_player_food(&mut self, food: i32) {
        self.state.entities.player.food = food;
    }

    fn trigger_under(&self, position: Position) -> Option<SteppedOn> {
        if self.state.entities.exit_at(position) {
            return Some(SteppedOn::Exit);
        }
        self.state
            .entities
            .item_at(position)
            .map(|item| SteppedOn::Pickup(item.id))
    }

    /// Evaluates the terminal condition. Food at or below zero signals game
    /// over and resets the counter to the respawn value, which also makes a
    /// second signal impossible without another full depletion.
    fn check_game_over(&mut self) -> bool {
        if self.state.entities.player.food <= 0 {
            self.state.entities.player.food = self.config.respawn_food;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EnemyState, EntitiesState, ItemState, PlayerState, PropKind, PropState};

    fn wall(id: u32, x: i32, y: i32, hits: i32) -> PropState {
        PropState::new(EntityId(id), Position::new(x, y), PropKind::Wall { hits })
    }

    fn state(food: i32) -> GameState {
        GameState::new(EntitiesState::new(PlayerState::new(Position::ORIGIN, food)))
    }

    #[test]
    fn step_into_open_cell_moves_and_charges_food() {
        let config = GameConfig::default();
        let mut state = state(10);
        let mut engine = GameEngine::new(&mut state, &config);

        let step = engine.player_step(1, 0).unwrap();

        assert_eq!(
            step.outcome,
            MoveOutcome::Moved {
                from: Position::ORIGIN,
                to: Position::new(1, 0),
            }
        );
        assert_eq!(step.food, 9);
        assert!(!step.game_over);
        assert_eq!(state.entities.player.position(), Position::new(1, 0));
        assert_eq!(state.entities.player.food, 9);
    }

    #[test]
    fn blocked_step_chops_wall_and_still_charges_food() {
        let config = GameConfig::default();
        let mut state = state(5);
        state.entities.props.push(wall(10, 1, 0, 2));
        let mut engine = GameEngine::new(&mut state, &config);

        let step = engine.player_step(1, 0).unwrap();

        assert!(matches!(
            step.outcome,
            MoveOutcome::Blocked {
                entity: EntityId(10),
                reaction: Reaction::WallDamaged {
                    remaining: 1,
                    destroyed: false,
                },
            }
        ));
        assert_eq!(step.food, 4);
        assert_eq!(state.entities.player.position(), Position::ORIGIN);
        assert_eq!(
            state.entities.prop(EntityId(10)).unwrap().kind,
            PropKind::Wall { hits: 1 }
        );
    }

    #[test]
    fn cost_is_charged_once_per_attempt_regardless_of_outcome() {
        let config = GameConfig::default();
        let mut state = state(10);
        state.entities.props.push(wall(10, 1, 0, 100));
        state
            .entities
            .enemies
            .push(EnemyState::new(EntityId(3), Position::new(0, 1), 10));

        // Moved, blocked, and obstructed attempts each cost exactly one.
        for (dx, dy, expected_food) in [(1, 0, 9), (0, 1, 8), (-1, 0, 7)] {
            let mut engine = GameEngine::new(&mut state, &config);
            engine.begin_player_turn();
            let step = engine.player_step(dx, dy).unwrap();
            assert_eq!(step.food, expected_food);
        }
    }

    #[test]
    fn depleting_food_signals_game_over_once_and_resets() {
        let config = GameConfig::default();
        let mut state = state(1);
        let mut engine = GameEngine::new(&mut state, &config);

        let step = engine.player_step(1, 0).unwrap();

        assert_eq!(step.food, 0);
        assert!(step.game_over);
        assert_eq!(state.entities.player.food, 100);

        // The next depletion is a fresh run, not a duplicate signal.
        let mut engine = GameEngine::new(&mut state, &config);
        engine.begin_player_turn();
        assert!(!engine.player_step(1, 0).unwrap().game_over);
    }

    #[test]
    fn turn_gate_blocks_second_attempt_without_any_effect() {
        let config = GameConfig::default();
        let mut state = state(10);
        let mut engine = GameEngine::new(&mut state, &config);

        engine.player_step(1, 0).unwrap();
        assert!(!state.turn.players_turn);

        let mut engine = GameEngine::new(&mut state, &config);
        assert_eq!(engine.player_step(1, 0), Err(StepError::NotPlayersTurn));
        assert_eq!(state.entities.player.position(), Position::new(1, 0));
        assert_eq!(state.entities.player.food, 9);

        let mut engine = GameEngine::new(&mut state, &config);
        engine.begin_player_turn();
        assert!(engine.player_step(1, 0).is_ok());
    }

    #[test]
    fn zero_intent_charges_nothing_and_keeps_the_turn() {
        let config = GameConfig::default();
        let mut state = state(10);
        let mut engine = GameEngine::new(&mut state, &config);

        assert_eq!(engine.player_step(0, 0), Err(StepError::NoDirection));
        assert_eq!(state.entities.player.food, 10);
        assert!(state.turn.players_turn);
    }

    #[test]
    fn external_damage_checks_game_over_but_not_the_turn() {
        let config = GameConfig::default();
        let mut state = state(15);
        let mut engine = GameEngine::new(&mut state, &config);

        let hit = engine.damage_player(20);

        assert_eq!(hit.loss, 20);
        assert_eq!(hit.food, -5);
        assert!(hit.game_over);
        assert_eq!(state.entities.player.food, 100);
        assert!(state.turn.players_turn);
    }

    #[test]
    fn pickup_collection_adds_points_and_deactivates_once() {
        let config = GameConfig::default();
        let mut state = state(40);
        state.entities.items.push(ItemState::new(
            EntityId(8),
            Position::new(1, 0),
            PickupKind::Food,
            10,
        ));
        let mut engine = GameEngine::new(&mut state, &config);

        let pickup = engine.collect_pickup(EntityId(8)).unwrap();
        assert_eq!(pickup.kind, PickupKind::Food);
        assert_eq!(pickup.points, 10);
        assert_eq!(pickup.food, 50);

        assert_eq!(
            engine.collect_pickup(EntityId(8)),
            Err(PickupError::AlreadyCollected(EntityId(8)))
        );
        assert_eq!(
            engine.collect_pickup(EntityId(99)),
            Err(PickupError::ItemNotFound(EntityId(99)))
        );
        assert_eq!(state.entities.player.food, 50);
    }

    #[test]
    fn step_reports_trigger_under_destination() {
        let config = GameConfig::default();
        let mut state = state(10);
        state.entities.items.push(ItemState::new(
            EntityId(8),
            Position::new(1, 0),
            PickupKind::Soda,
            20,
        ));
        state
            .entities
            .props
            .push(PropState::new(EntityId(9), Position::new(0, 1), PropKind::Exit));

        let mut engine = GameEngine::new(&mut state, &config);
        let step = engine.player_step(1, 0).unwrap();
        assert_eq!(step.stepped_on, Some(SteppedOn::Pickup(EntityId(8))));

        state.entities.player.actor.position = Position::ORIGIN;
        let mut engine = GameEngine::new(&mut state, &config);
        engine.begin_player_turn();
        let step = engine.player_step(0, 1).unwrap();
        assert_eq!(step.stepped_on, Some(SteppedOn::Exit));
    }

    #[test]
    fn enemy_step_attacks_when_blocked_by_player() {
        let config = GameConfig::default();
        let mut state = state(15);
        state
            .entities
            .enemies
            .push(EnemyState::new(EntityId(3), Position::new(1, 0), 10));
        let mut engine = GameEngine::new(&mut state, &config);

        let step = engine.enemy_step(EntityId(3), Direction::Left).unwrap();

        assert!(matches!(step.outcome, Some(MoveOutcome::Blocked { .. })));
        let hit = step.player_hit.unwrap();
        assert_eq!(hit.loss, 10);
        assert_eq!(hit.food, 5);
        assert!(!hit.game_over);
        // Attacking does not displace the enemy.
        assert_eq!(
            state.entities.enemy(EntityId(3)).unwrap().position(),
            Position::new(1, 0)
        );
    }

    #[test]
    fn enemy_sits_out_every_other_phase() {
        let config = GameConfig::default();
        let mut state = state(100);
        state
            .entities
            .enemies
            .push(EnemyState::new(EntityId(3), Position::new(5, 0), 10));
        let mut engine = GameEngine::new(&mut state, &config);

        let first = engine.enemy_step(EntityId(3), Direction::Left).unwrap();
        assert!(first.outcome.is_some());

        let second = engine.enemy_step(EntityId(3), Direction::Left).unwrap();
        assert!(second.outcome.is_none());

        let third = engine.enemy_step(EntityId(3), Direction::Left).unwrap();
        assert!(third.outcome.is_some());
        assert_eq!(
            state.entities.enemy(EntityId(3)).unwrap().position(),
            Position::new(3, 0)
        );
    }
}
