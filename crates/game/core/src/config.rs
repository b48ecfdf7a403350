/// Game configuration constants and tunable balance parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Food charged for every player move attempt, accepted or blocked.
    pub move_cost: i32,
    /// Food total the player respawns with after a game over.
    pub respawn_food: i32,
    /// Food total a brand-new run starts with.
    pub starting_food: i32,
    /// Food restored by a food pickup.
    pub points_per_food: i32,
    /// Food restored by a soda pickup.
    pub points_per_soda: i32,
    /// Damage the player deals to a wall when chopping it.
    pub wall_damage: i32,
}

impl GameConfig {
    // ===== balance defaults =====
    pub const DEFAULT_MOVE_COST: i32 = 1;
    pub const DEFAULT_RESPAWN_FOOD: i32 = 100;
    pub const DEFAULT_STARTING_FOOD: i32 = 100;
    pub const DEFAULT_POINTS_PER_FOOD: i32 = 10;
    pub const DEFAULT_POINTS_PER_SODA: i32 = 20;
    pub const DEFAULT_WALL_DAMAGE: i32 = 1;

    pub fn new() -> Self {
        Self {
            move_cost: Self::DEFAULT_MOVE_COST,
            respawn_food: Self::DEFAULT_RESPAWN_FOOD,
            starting_food: Self::DEFAULT_STARTING_FOOD,
            points_per_food: Self::DEFAULT_POINTS_PER_FOOD,
            points_per_soda: Self::DEFAULT_POINTS_PER_SODA,
            wall_damage: Self::DEFAULT_WALL_DAMAGE,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
