use bracket_random::prelude::RandomNumberGenerator;

/// `(value, min_depth)` pairs, ordered by ascending `min_depth`.
pub type DepthTable = [(i32, i32)];

/// Looks a value up from a depth table, scanning from the deepest entry
/// down. The first entry whose `min_depth` has been reached wins; a depth
/// shallower than every entry yields 0.
pub fn from_dungeon_level(table: &DepthTable, depth: i32) -> i32 {
    for (value, min_depth) in table.iter().rev() {
        if depth >= *min_depth {
            return *value;
        }
    }
    0
}

pub struct RandomEntry {
    name: String,
    weight: i32,
}

impl RandomEntry {
    pub fn new<S: ToString>(name: S, weight: i32) -> Self {
        Self {
            name: name.to_string(),
            weight,
        }
    }
}

#[derive(Default)]
pub struct RandomTable {
    entries: Vec<RandomEntry>,
    total_weight: i32,
}

impl RandomTable {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            total_weight: 0,
        }
    }

    /// Entries with no weight are left out, so they can never be rolled.
    pub fn add<S: ToString>(mut self, name: S, weight: i32) -> RandomTable {
        if weight > 0 {
            self.total_weight += weight;
            self.entries.push(RandomEntry::new(name, weight));
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_weight(&self) -> i32 {
        self.total_weight
    }

    /// Cumulative-weight draw: roll in `[1, total]` and return the first
    /// entry whose running sum reaches the roll.
    pub fn roll(&self, rng: &mut RandomNumberGenerator) -> Option<&str> {
        if self.total_weight == 0 {
            return None;
        }
        let roll = rng.roll_dice(1, self.total_weight);
        let mut running_sum = 0;
        for entry in self.entries.iter() {
            running_sum += entry.weight;
            if roll <= running_sum {
                return Some(&entry.name);
            }
        }
        None
    }
}
