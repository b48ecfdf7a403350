use super::{Direction, EntityId, Position};

/// Kind tag carried by every blocking occupant of a cell.
///
/// Movement callers declare which kind they know how to react to (the player
/// chops walls, enemies attack the player); a blocker of any other kind is a
/// plain collision with no reaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObstacleKind {
    Wall,
    Boundary,
    Player,
    Enemy,
}

/// Base record for anything that can attempt grid moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub id: EntityId,
    pub position: Position,
    /// Directional intent from the most recent move attempt, successful or
    /// not. `None` until the first attempt.
    pub facing: Option<Direction>,
}

impl ActorState {
    pub fn new(id: EntityId, position: Position) -> Self {
        Self {
            id,
            position,
            facing: None,
        }
    }
}

/// The resource-tracked player actor.
///
/// `food` is deliberately not clamped: external damage may push it negative
/// so the game-over check observes the true terminal value before the
/// respawn reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub actor: ActorState,
    pub food: i32,
}

impl PlayerState {
    pub fn new(position: Position, food: i32) -> Self {
        Self {
            actor: ActorState::new(EntityId::PLAYER, position),
            food,
        }
    }

    pub fn position(&self) -> Position {
        self.actor.position
    }
}

/// A world-phase actor that pursues and attacks the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyState {
    pub actor: ActorState,
    /// Food the player loses when this enemy lands an attack.
    pub damage: i32,
    /// Enemies act every other world phase; set after each step taken.
    pub skip_next: bool,
}

impl EnemyState {
    pub fn new(id: EntityId, position: Position, damage: i32) -> Self {
        Self {
            actor: ActorState::new(id, position),
            damage,
            skip_next: false,
        }
    }

    pub fn position(&self) -> Position {
        self.actor.position
    }
}

/// Static-ish world furniture: destructible walls and the exit zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropState {
    pub id: EntityId,
    pub position: Position,
    pub kind: PropKind,
    /// Cleared exactly once when a wall is chopped down. Inactive props
    /// neither block movement nor react to damage.
    pub is_active: bool,
}

impl PropState {
    pub fn new(id: EntityId, position: Position, kind: PropKind) -> Self {
        Self {
            id,
            position,
            kind,
            is_active: true,
        }
    }
}

/// Prop categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropKind {
    /// Destructible obstacle with remaining durability.
    Wall { hits: i32 },
    /// Indestructible boundary tile. Blocks movement but reacts to nothing;
    /// bumping it is a plain collision for every actor kind.
    Boundary,
    /// Non-blocking zone that ends the level when entered.
    Exit,
}

impl PropKind {
    /// Walls and boundary tiles block movement; the exit is walked onto.
    pub fn blocks(&self) -> bool {
        matches!(self, PropKind::Wall { .. } | PropKind::Boundary)
    }

    fn obstacle_kind(&self) -> Option<ObstacleKind> {
        match self {
            PropKind::Wall { .. } => Some(ObstacleKind::Wall),
            PropKind::Boundary => Some(ObstacleKind::Boundary),
            PropKind::Exit => None,
        }
    }
}

/// Consumable pickups lying on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemState {
    pub id: EntityId,
    pub position: Position,
    pub kind: PickupKind,
    /// Food restored when collected.
    pub points: i32,
    pub is_active: bool,
}

impl ItemState {
    pub fn new(id: EntityId, position: Position, kind: PickupKind, points: i32) -> Self {
        Self {
            id,
            position,
            kind,
            points,
            is_active: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PickupKind {
    Food,
    Soda,
}

/// Aggregate state for every entity on the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitiesState {
    pub player: PlayerState,
    pub enemies: Vec<EnemyState>,
    pub props: Vec<PropState>,
    pub items: Vec<ItemState>,
}

impl EntitiesState {
    pub fn new(player: PlayerState) -> Self {
        Self {
            player,
            enemies: Vec::new(),
            props: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn with_enemies(mut self, enemies: Vec<EnemyState>) -> Self {
        self.enemies = enemies;
        self
    }

    pub fn with_props(mut self, props: Vec<PropState>) -> Self {
        self.props = props;
        self
    }

    pub fn with_items(mut self, items: Vec<ItemState>) -> Self {
        self.items = items;
        self
    }

    /// Returns the nearest blocking occupant of `position`, tagged with its
    /// obstacle kind. Inactive props never block.
    pub fn blocker_at(&self, position: Position) -> Option<(EntityId, ObstacleKind)> {
        if self.player.position() == position {
            return Some((self.player.actor.id, ObstacleKind::Player));
        }
        if let Some(enemy) = self.enemies.iter().find(|e| e.position() == position) {
            return Some((enemy.actor.id, ObstacleKind::Enemy));
        }
        self.props
            .iter()
            .filter(|p| p.is_active && p.position == position)
            .find_map(|p| p.kind.obstacle_kind().map(|kind| (p.id, kind)))
    }

    /// Returns the active pickup lying on `position`, if any.
    pub fn item_at(&self, position: Position) -> Option<&ItemState> {
        self.items
            .iter()
            .find(|i| i.is_active && i.position == position)
    }

    /// Returns true if `position` is inside an active exit zone.
    pub fn exit_at(&self, position: Position) -> bool {
        self.props
            .iter()
            .any(|p| p.is_active && p.kind == PropKind::Exit && p.position == position)
    }

    /// Returns the base grid-actor record for the player or an enemy.
    pub fn grid_actor(&self, id: EntityId) -> Option<&ActorState> {
        if id.is_player() {
            return Some(&self.player.actor);
        }
        self.enemies.iter().find(|e| e.actor.id == id).map(|e| &e.actor)
    }

    /// Mutable counterpart of [`grid_actor`](Self::grid_actor).
    pub fn grid_actor_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        if id.is_player() {
            return Some(&mut self.player.actor);
        }
        self.enemies
            .iter_mut()
            .find(|e| e.actor.id == id)
            .map(|e| &mut e.actor)
    }

    pub fn enemy(&self, id: EntityId) -> Option<&EnemyState> {
        self.enemies.iter().find(|e| e.actor.id == id)
    }

    pub fn enemy_mut(&mut self, id: EntityId) -> Option<&mut EnemyState> {
        self.enemies.iter_mut().find(|e| e.actor.id == id)
    }

    pub fn prop(&self, id: EntityId) -> Option<&PropState> {
        self.props.iter().find(|p| p.id == id)
    }

    pub fn prop_mut(&mut self, id: EntityId) -> Option<&mut PropState> {
        self.props.iter_mut().find(|p| p.id == id)
    }

    pub fn item_mut(&mut self, id: EntityId) -> Option<&mut ItemState> {
        self.items.iter_mut().find(|i| i.id == id)
    }
}
