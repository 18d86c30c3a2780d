use std::cmp::max;

use bracket_random::prelude::RandomNumberGenerator;
use log::debug;
use rand::distributions::{Distribution, WeightedIndex};

use crate::error::Result;
use crate::map::Map;
use crate::map_builders::{BuilderMap, InitialMapBuilder};
use crate::rect::Rect;
use crate::settings::DrunkardSettings;

/// Sampling order of the direction weights.
const MOVES: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const SOUTH: usize = 0;
const NORTH: usize = 1;
const EAST: usize = 2;
const WEST: usize = 3;

const ZONE_SIZE: i32 = 3;

/// How a walk ended: either `cleared >= goal` or `iterations == cap`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkOutcome {
    pub iterations: i32,
    pub cleared: i32,
    pub goal: f32,
    pub cap: i32,
}

impl WalkOutcome {
    pub fn reached_goal(&self) -> bool {
        self.cleared as f32 >= self.goal
    }
}

pub struct DrunkardsWalkBuilder {
    settings: DrunkardSettings,
}

impl InitialMapBuilder for DrunkardsWalkBuilder {
    fn build_map(&mut self, rng: &mut RandomNumberGenerator, build_data: &mut BuilderMap) -> Result<()> {
        self.build(rng, build_data);
        Ok(())
    }
}

impl DrunkardsWalkBuilder {
    pub fn new(settings: DrunkardSettings) -> Box<Self> {
        Box::new(Self { settings })
    }

    pub fn open_cave() -> Box<Self> {
        Self::new(DrunkardSettings::open_cave())
    }

    pub fn winding_passages() -> Box<Self> {
        Self::new(DrunkardSettings::winding_passages())
    }

    fn build(&mut self, rng: &mut RandomNumberGenerator, build_data: &mut BuilderMap) {
        let outcome = self.walk(rng, &mut build_data.map);
        debug!(
            "drunkard cleared {} of {} tiles in {} steps (cap {})",
            outcome.cleared, outcome.goal, outcome.iterations, outcome.cap
        );
        build_data.take_snapshot();

        let zones = scan_for_zones(rng, &build_data.map);
        debug!("drunkard layout marked {} zones", zones.len());
        build_data.zones = Some(zones);
    }

    fn direction_weights(&self, map: &Map, pos: (i32, i32), prev_direction: Option<usize>) -> [f32; 4] {
        let (width, height) = (map.width as f32, map.height as f32);
        let v_move = width / height;
        let h_move = height / width;
        let mut weights = [v_move, v_move, h_move, h_move];

        let center_bias = self.settings.weighted_toward_center;
        let (x, y) = (pos.0 as f32, pos.1 as f32);
        if x < width * 0.25 {
            weights[EAST] += center_bias;
        } else if x > width * 0.75 {
            weights[WEST] += center_bias;
        }
        if y < height * 0.25 {
            weights[SOUTH] += center_bias;
        } else if y > height * 0.75 {
            weights[NORTH] += center_bias;
        }

        if let Some(prev) = prev_direction {
            weights[prev] += self.settings.weighted_toward_prev_direction;
        }
        weights
    }

    /// Staggers around the map clearing rock until enough new tiles have
    /// been cleared or the step cap runs out. The one-tile border and the
    /// ring inside it are never entered.
    pub fn walk(&self, rng: &mut RandomNumberGenerator, map: &mut Map) -> WalkOutcome {
        let (width, height) = (map.width, map.height);
        let cap = max(self.settings.walk_iterations, width * height * 10);
        let goal = self.settings.percent_goal * (width * height) as f32;

        let mut x = rng.range(2, width - 1);
        let mut y = rng.range(2, height - 1);
        let mut cleared = 0;
        if map.is_blocked(x, y) {
            map.carve(x, y);
            cleared += 1;
        }

        let mut prev_direction: Option<usize> = None;
        let mut iterations = 0;
        while iterations < cap && (cleared as f32) < goal {
            iterations += 1;
            let weights = self.direction_weights(map, (x, y), prev_direction);
            let direction = match WeightedIndex::new(weights) {
                Ok(dist) => dist.sample(rng.get_rng()),
                Err(_) => rng.range(0, 4) as usize,
            };

            let (dx, dy) = MOVES[direction];
            let (nx, ny) = (x + dx, y + dy);
            if 1 < nx && nx < width - 1 && 1 < ny && ny < height - 1 {
                x = nx;
                y = ny;
                if map.is_blocked(x, y) {
                    map.carve(x, y);
                    cleared += 1;
                }
                prev_direction = Some(direction);
            } else {
                prev_direction = None;
            }
        }

        WalkOutcome {
            iterations,
            cleared,
            goal,
            cap,
        }
    }
}

/// Splits the map into 3x3 sections and keeps about half of the fully
/// cleared ones as spawn zones.
pub fn scan_for_zones(rng: &mut RandomNumberGenerator, map: &Map) -> Vec<Rect> {
    let mut zones = Vec::new();
    for x in (0..map.width - ZONE_SIZE - 1).step_by(ZONE_SIZE as usize) {
        for y in (0..map.height - ZONE_SIZE - 1).step_by(ZONE_SIZE as usize) {
            let section = Rect::new(x, y, ZONE_SIZE, ZONE_SIZE);
            let all_clear = (section.x1..section.x2)
                .all(|sx| (section.y1..section.y2).all(|sy| !map.is_blocked(sx, sy)));
            if all_clear && rng.rand::<f32>() >= 0.5 {
                zones.push(section);
            }
        }
    }
    zones
}
