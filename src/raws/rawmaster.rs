use std::collections::{HashMap, HashSet};

use log::warn;
use specs::{Builder, Entity, EntityBuilder, World, WorldExt};

use crate::components::{
    AreaOfEffect, BlocksTile, Confusion, Consumable, Equippable, Glyph, InflictsDamage, Item, Monster, Name,
    Position, ProvidesHealing, Ranged,
};
use crate::random_tables::{from_dungeon_level, RandomTable};
use crate::raws::item_structs::Consumable as ConsumableTemplate;
use crate::raws::Raws;

pub enum SpawnType {
    AtPosition { x: i32, y: i32 },
}

pub struct RawMaster {
    raws: Raws,
    item_index: HashMap<String, usize>,
    mob_index: HashMap<String, usize>,
}

impl RawMaster {
    pub fn empty() -> Self {
        Self {
            raws: Raws::default(),
            item_index: HashMap::new(),
            mob_index: HashMap::new(),
        }
    }

    pub fn load(&mut self, raws: Raws) {
        self.raws = raws;
        self.item_index = HashMap::new();
        self.mob_index = HashMap::new();
        let mut entries_used: HashSet<String> = HashSet::new();
        for (i, item) in self.raws.items.iter().enumerate() {
            if !entries_used.insert(item.id.clone()) {
                warn!("duplicate item type in raw file [{}]", item.id);
            }
            self.item_index.insert(item.id.clone(), i);
        }
        for (i, mob) in self.raws.mobs.iter().enumerate() {
            if !entries_used.insert(mob.id.clone()) {
                warn!("duplicate mob type in raw file [{}]", mob.id);
            }
            self.mob_index.insert(mob.id.clone(), i);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.raws.items.is_empty() && self.raws.mobs.is_empty()
    }

    pub fn is_known(&self, key: &str) -> bool {
        self.item_index.contains_key(key) || self.mob_index.contains_key(key)
    }

    pub fn max_monsters(&self, depth: i32) -> i32 {
        from_dungeon_level(&self.raws.spawn_limits.max_monsters_per_room, depth)
    }

    pub fn max_items(&self, depth: i32) -> i32 {
        from_dungeon_level(&self.raws.spawn_limits.max_items_per_room, depth)
    }

    pub fn consumable_chance(&self) -> i32 {
        self.raws.spawn_limits.consumable_chance
    }

    pub fn get_monster_table_for_depth(&self, depth: i32) -> RandomTable {
        self.raws.mobs.iter().fold(RandomTable::new(), |table, mob| {
            table.add(&mob.id, from_dungeon_level(&mob.spawn_chance, depth))
        })
    }

    pub fn get_consumable_table_for_depth(&self, depth: i32) -> RandomTable {
        self.raws
            .items
            .iter()
            .filter(|item| item.consumable.is_some())
            .fold(RandomTable::new(), |table, item| {
                table.add(&item.id, from_dungeon_level(&item.spawn_chance, depth))
            })
    }

    pub fn get_equipment_table_for_depth(&self, depth: i32) -> RandomTable {
        self.raws
            .items
            .iter()
            .filter(|item| item.wearable.is_some())
            .fold(RandomTable::new(), |table, item| {
                table.add(&item.id, from_dungeon_level(&item.spawn_chance, depth))
            })
    }
}

fn spawn_position<'a>(pos: SpawnType, new_entity: EntityBuilder<'a>) -> EntityBuilder<'a> {
    match pos {
        SpawnType::AtPosition { x, y } => new_entity.with(Position { x, y }),
    }
}

fn effect_amount(item: &str, effect: &str, value: &str) -> Option<i32> {
    match value.parse::<i32>() {
        Ok(amount) => Some(amount),
        Err(_) => {
            warn!("consumable {} has a non-numeric {} value [{}]", item, effect, value);
            None
        }
    }
}

fn apply_effects<'a>(item: &str, consumable: &ConsumableTemplate, mut eb: EntityBuilder<'a>) -> EntityBuilder<'a> {
    for (effect_name, value) in consumable.effects.iter() {
        let amount = match effect_amount(item, effect_name, value) {
            Some(amount) => amount,
            None => continue,
        };
        match effect_name.as_str() {
            "provides_healing" => eb = eb.with(ProvidesHealing { heal_amount: amount }),
            "ranged" => eb = eb.with(Ranged { range: amount }),
            "damage" => eb = eb.with(InflictsDamage { damage: amount }),
            "area_of_effect" => eb = eb.with(AreaOfEffect { radius: amount }),
            "confusion" => eb = eb.with(Confusion { turns: amount }),
            _ => warn!("consumable effect {} not implemented", effect_name),
        }
    }
    eb
}

fn get_glyph_component(glyph: &str) -> Glyph {
    Glyph {
        glyph: glyph.chars().next().unwrap_or('?'),
    }
}

pub fn spawn_named_entity(raws: &RawMaster, key: &str, pos: SpawnType, ecs: &mut World) -> Option<Entity> {
    if raws.item_index.contains_key(key) {
        return spawn_named_item(raws, key, pos, ecs);
    } else if raws.mob_index.contains_key(key) {
        return spawn_named_mob(raws, key, pos, ecs);
    }
    None
}

pub fn spawn_named_item(raws: &RawMaster, key: &str, pos: SpawnType, ecs: &mut World) -> Option<Entity> {
    let item_template = &raws.raws.items[*raws.item_index.get(key)?];

    let mut eb = spawn_position(pos, ecs.create_entity());
    eb = eb.with(get_glyph_component(&item_template.glyph));
    eb = eb.with(Name { name: item_template.name.clone() });
    eb = eb.with(Item {});

    if let Some(consumable) = &item_template.consumable {
        eb = eb.with(Consumable {});
        eb = apply_effects(&item_template.id, consumable, eb);
    }
    if let Some(wearable) = &item_template.wearable {
        eb = eb.with(Equippable { slot: wearable.slot });
    }
    Some(eb.build())
}

pub fn spawn_named_mob(raws: &RawMaster, key: &str, pos: SpawnType, ecs: &mut World) -> Option<Entity> {
    let mob_template = &raws.raws.mobs[*raws.mob_index.get(key)?];

    let mut eb = spawn_position(pos, ecs.create_entity());
    eb = eb.with(get_glyph_component(&mob_template.glyph));
    eb = eb.with(Name { name: mob_template.name.clone() });
    eb = eb.with(Monster {});
    eb = eb.with(BlocksTile {});
    Some(eb.build())
}
