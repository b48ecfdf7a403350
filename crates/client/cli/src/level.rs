//! Fixed demo floor layout.
use scavenge_core::{
    EnemyState, EntitiesState, EntityId, GameConfig, ItemState, PickupKind, PlayerState, Position,
    PropKind, PropState,
};

/// Side length of the floor including the boundary ring.
pub const SIZE: i32 = 10;

const WALL_HITS: i32 = 3;
const ENEMY_DAMAGE: i32 = 10;

/// Lays out the demo floor: a boundary ring around an 8x8 interior, a few
/// breakable walls, one ration and one soda, a single pursuer, and the exit
/// in the far corner.
pub fn build(config: &GameConfig) -> EntitiesState {
    let mut next_id = EntityId(1);
    let mut fresh = || {
        let id = next_id;
        next_id = EntityId(next_id.0 + 1);
        id
    };

    let mut props = Vec::new();
    for y in 0..SIZE {
        for x in 0..SIZE {
            if x == 0 || y == 0 || x == SIZE - 1 || y == SIZE - 1 {
                props.push(PropState::new(fresh(), Position::new(x, y), PropKind::Boundary));
            }
        }
    }
    for (x, y) in [(3, 2), (3, 3), (6, 5), (4, 7)] {
        props.push(PropState::new(
            fresh(),
            Position::new(x, y),
            PropKind::Wall { hits: WALL_HITS },
        ));
    }
    props.push(PropState::new(fresh(), Position::new(8, 8), PropKind::Exit));

    let items = vec![
        ItemState::new(
            fresh(),
            Position::new(2, 5),
            PickupKind::Food,
            config.points_per_food,
        ),
        ItemState::new(
            fresh(),
            Position::new(7, 3),
            PickupKind::Soda,
            config.points_per_soda,
        ),
    ];

    let enemies = vec![EnemyState::new(fresh(), Position::new(8, 6), ENEMY_DAMAGE)];

    EntitiesState::new(PlayerState::new(Position::new(1, 1), config.starting_food))
        .with_enemies(enemies)
        .with_props(props)
        .with_items(items)
}
