use std::sync::{Mutex, MutexGuard};

use serde::Deserialize;

pub use rawmaster::*;

use crate::error::Result;
use crate::raws::item_structs::Item;
use crate::raws::mob_structs::Mob;

pub mod item_structs;
pub mod mob_structs;
pub mod rawmaster;

const RAW_FILE: &str = include_str!("../../raws/spawns.json");

lazy_static! {
    pub static ref RAWS: Mutex<RawMaster> = Mutex::new(RawMaster::empty());
}

/// Locks the shared archetype store. A poisoned lock still holds valid data
/// since loading replaces it in one assignment.
pub fn raws() -> MutexGuard<'static, RawMaster> {
    RAWS.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Parses the embedded archetype file into the shared store.
pub fn load_raws() -> Result<()> {
    let decoder: Raws = serde_json::from_str(RAW_FILE)?;
    raws().load(decoder);
    Ok(())
}

/// Loads the embedded archetypes unless something has been loaded already.
pub fn ensure_loaded() -> Result<()> {
    if raws().is_empty() {
        load_raws()?;
    }
    Ok(())
}

#[derive(Deserialize, Debug, Default)]
pub struct Raws {
    #[serde(default)]
    pub spawn_limits: SpawnLimits,
    #[serde(default)]
    pub mobs: Vec<Mob>,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// Depth tables bounding how much a single room or zone receives.
#[derive(Deserialize, Debug, Clone)]
pub struct SpawnLimits {
    pub max_monsters_per_room: Vec<(i32, i32)>,
    pub max_items_per_room: Vec<(i32, i32)>,
    /// Percent chance that an item slot draws from the consumable pool.
    pub consumable_chance: i32,
}

impl Default for SpawnLimits {
    fn default() -> Self {
        Self {
            max_monsters_per_room: vec![(2, 1), (3, 4), (5, 6)],
            max_items_per_room: vec![(1, 1), (2, 4)],
            consumable_chance: 70,
        }
    }
}
