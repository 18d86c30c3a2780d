use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Mob {
    pub id: String,
    pub name: String,
    pub glyph: String,
    pub spawn_chance: Vec<(i32, i32)>,
}
