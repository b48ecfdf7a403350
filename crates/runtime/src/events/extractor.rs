use scavenge_core::{
    DamageOutcome, EnemyStepOutcome, EntityId, MoveOutcome, PickupOutcome, Reaction, StepOutcome,
    SteppedOn,
};

use super::GameEvent;

/// Flattens one player move attempt into its event stream. Pickup
/// collection is not included here; the runtime consumes the reported
/// trigger through the engine and extracts those events separately.
pub fn from_player_step(step: &StepOutcome) -> Vec<GameEvent> {
    let mut events = vec![GameEvent::FoodChanged {
        delta: None,
        total: step.food,
    }];

    match step.outcome {
        MoveOutcome::Moved { from, to } => {
            events.push(GameEvent::PlayerMoved { from, to });
        }
        MoveOutcome::Blocked { entity, reaction } => {
            if let Reaction::WallDamaged { destroyed, .. } = reaction {
                events.push(GameEvent::WallChopped { entity, destroyed });
            }
        }
        MoveOutcome::Obstructed => {}
    }

    if step.stepped_on == Some(SteppedOn::Exit) {
        events.push(GameEvent::ExitReached);
    }
    if step.game_over {
        events.push(GameEvent::GameOver);
    }
    events
}

pub fn from_pickup(pickup: &PickupOutcome) -> Vec<GameEvent> {
    vec![
        GameEvent::FoodChanged {
            delta: Some(pickup.points),
            total: pickup.food,
        },
        GameEvent::PickupCollected {
            kind: pickup.kind,
            points: pickup.points,
            total: pickup.food,
        },
    ]
}

pub fn from_damage(hit: &DamageOutcome) -> Vec<GameEvent> {
    let mut events = vec![
        GameEvent::FoodChanged {
            delta: Some(-hit.loss),
            total: hit.food,
        },
        GameEvent::PlayerHit {
            loss: hit.loss,
            total: hit.food,
        },
    ];
    if hit.game_over {
        events.push(GameEvent::GameOver);
    }
    events
}

pub fn from_enemy_step(enemy: EntityId, step: &EnemyStepOutcome) -> Vec<GameEvent> {
    let mut events = Vec::new();
    match step.outcome {
        Some(MoveOutcome::Moved { to, .. }) => {
            events.push(GameEvent::EnemyMoved { entity: enemy, to });
        }
        Some(MoveOutcome::Blocked { .. }) => {
            if let Some(hit) = &step.player_hit {
                events.extend(from_damage(hit));
            }
        }
        Some(MoveOutcome::Obstructed) | None => {}
    }
    events
}
