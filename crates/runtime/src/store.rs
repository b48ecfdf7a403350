//! Food persistence across level sessions.
//!
//! The only state that survives a level transition is the player's food
//! total, handed through [`FoodStore`] as an opaque integer. The file
//! implementation backs the save/load menu flow; the in-memory one serves
//! tests and single-session runs.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("save file i/o failed")]
    Io(#[from] std::io::Error),

    #[error("save file is malformed")]
    Format(#[from] serde_json::Error),
}

/// Repository contract for the persisted food total.
pub trait FoodStore {
    /// Returns the stored total, or `None` when no save exists.
    fn load(&self) -> Result<Option<i32>, StoreError>;

    fn save(&mut self, food: i32) -> Result<(), StoreError>;
}

/// Volatile store for tests and runs without a save slot.
#[derive(Debug, Default)]
pub struct InMemoryFoodStore {
    slot: Option<i32>,
}

impl InMemoryFoodStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FoodStore for InMemoryFoodStore {
    fn load(&self) -> Result<Option<i32>, StoreError> {
        Ok(self.slot)
    }

    fn save(&mut self, food: i32) -> Result<(), StoreError> {
        self.slot = Some(food);
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SaveFile {
    food: i32,
}

/// JSON save file on disk.
#[derive(Debug)]
pub struct FileFoodStore {
    path: PathBuf,
}

impl FileFoodStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FoodStore for FileFoodStore {
    fn load(&self) -> Result<Option<i32>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        let save: SaveFile = serde_json::from_str(&raw)?;
        Ok(Some(save.food))
    }

    fn save(&mut self, food: i32) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(&SaveFile { food })?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}
