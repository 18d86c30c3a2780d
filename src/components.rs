use serde::{Deserialize, Serialize};
use specs::prelude::*;
use specs_derive::*;

#[derive(Component, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

#[derive(Component, Serialize, Deserialize, Clone, Debug)]
pub struct Name {
    pub name: String,
}

/// Display glyph carried over from the archetype data.
#[derive(Component, Serialize, Deserialize, Clone, Debug)]
pub struct Glyph {
    pub glyph: char,
}

#[derive(Component, Serialize, Deserialize, Clone, Debug)]
pub struct Monster {}

#[derive(Component, Serialize, Deserialize, Clone, Debug)]
pub struct BlocksTile {}

#[derive(Component, Serialize, Deserialize, Clone, Debug)]
pub struct Item {}

#[derive(Component, Serialize, Deserialize, Clone, Debug)]
pub struct Consumable {}

#[derive(Component, Serialize, Deserialize, Clone, Debug)]
pub struct ProvidesHealing {
    pub heal_amount: i32,
}

#[derive(Component, Serialize, Deserialize, Clone, Debug)]
pub struct Ranged {
    pub range: i32,
}

#[derive(Component, Serialize, Deserialize, Clone, Debug)]
pub struct InflictsDamage {
    pub damage: i32,
}

#[derive(Component, Serialize, Deserialize, Clone, Debug)]
pub struct AreaOfEffect {
    pub radius: i32,
}

/// Turns a struck monster spends confused.
#[derive(Component, Serialize, Deserialize, Clone, Debug)]
pub struct Confusion {
    pub turns: i32,
}

#[derive(PartialEq, Eq, Copy, Clone, Debug, Serialize, Deserialize)]
pub enum EquipmentSlot {
    MainHand,
    OffHand,
    Head,
    Torso,
    Coat,
    Special,
}

#[derive(Component, Serialize, Deserialize, Clone, Debug)]
pub struct Equippable {
    pub slot: EquipmentSlot,
}

/// The way down. `destination` is the depth the stairs lead to.
#[derive(Component, Serialize, Deserialize, Clone, Debug)]
pub struct Stairs {
    pub destination: i32,
}

/// Registers every component this crate creates entities with.
pub fn register_components(ecs: &mut World) {
    ecs.register::<Position>();
    ecs.register::<Name>();
    ecs.register::<Glyph>();
    ecs.register::<Monster>();
    ecs.register::<BlocksTile>();
    ecs.register::<Item>();
    ecs.register::<Consumable>();
    ecs.register::<ProvidesHealing>();
    ecs.register::<Ranged>();
    ecs.register::<InflictsDamage>();
    ecs.register::<AreaOfEffect>();
    ecs.register::<Confusion>();
    ecs.register::<Equippable>();
    ecs.register::<Stairs>();
}
