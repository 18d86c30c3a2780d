use std::collections::HashMap;

use serde::Deserialize;

use crate::components::EquipmentSlot;

#[derive(Deserialize, Debug)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub glyph: String,
    pub spawn_chance: Vec<(i32, i32)>,
    pub consumable: Option<Consumable>,
    pub wearable: Option<Wearable>,
}

#[derive(Deserialize, Debug)]
pub struct Consumable {
    #[serde(default)]
    pub effects: HashMap<String, String>,
}

#[derive(Deserialize, Debug)]
pub struct Wearable {
    pub slot: EquipmentSlot,
}
