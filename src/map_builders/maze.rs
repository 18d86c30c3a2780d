use bracket_random::prelude::RandomNumberGenerator;
use log::{debug, warn};

use crate::error::{GenError, Result};
use crate::map::Map;
use crate::map_builders::{BuilderMap, InitialMapBuilder};
use crate::rect::Rect;
use crate::settings::{odd_dimensions, GeneratorSettings, MazeSettings};

const NORTH: (i32, i32) = (0, -1);
const SOUTH: (i32, i32) = (0, 1);
const EAST: (i32, i32) = (1, 0);
const WEST: (i32, i32) = (-1, 0);
const DIRECTIONS: [(i32, i32); 4] = [NORTH, SOUTH, EAST, WEST];

/// Union-find over region ids, tracking how many distinct regions are left.
#[derive(Debug, Clone)]
pub struct RegionUnion {
    parent: Vec<usize>,
    open: usize,
}

impl RegionUnion {
    pub fn new(count: usize) -> Self {
        Self {
            parent: (0..count).collect(),
            open: count,
        }
    }

    pub fn find(&mut self, region: usize) -> usize {
        let mut root = region;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = region;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Folds `source` into `dest`. Returns false when both were already
    /// joined.
    pub fn union(&mut self, dest: usize, source: usize) -> bool {
        let dest_root = self.find(dest);
        let source_root = self.find(source);
        if dest_root == source_root {
            return false;
        }
        self.parent[source_root] = dest_root;
        self.open -= 1;
        true
    }

    pub fn open_regions(&self) -> usize {
        self.open
    }
}

/// A wall cell touching more than one region, with the unmerged ids of
/// the regions it touches.
#[derive(Debug, Clone)]
struct Connector {
    pos: (i32, i32),
    regions: Vec<usize>,
}

struct Carver {
    regions: Vec<Vec<Option<usize>>>,
    region_count: usize,
    mz_width: i32,
    mz_height: i32,
}

impl Carver {
    fn new(width: i32, height: i32) -> Self {
        let (mz_width, mz_height) = odd_dimensions(width, height);
        Self {
            regions: vec![vec![None; height as usize]; width as usize],
            region_count: 0,
            mz_width,
            mz_height,
        }
    }

    fn start_region(&mut self) -> usize {
        self.region_count += 1;
        self.region_count - 1
    }

    fn carve_cell(&mut self, map: &mut Map, x: i32, y: i32, region: usize) {
        map.carve(x, y);
        self.regions[x as usize][y as usize] = Some(region);
    }

    fn region_at(&self, x: i32, y: i32) -> Option<usize> {
        self.regions[x as usize][y as usize]
    }

    /// Rooms are odd-sized and sit on odd coordinates so they line up with
    /// the corridors grown around them.
    fn add_rooms(
        &mut self,
        map: &mut Map,
        rng: &mut RandomNumberGenerator,
        attempts: i32,
        min_size: i32,
        max_size: i32,
    ) -> Vec<Rect> {
        let mut rooms: Vec<Rect> = Vec::new();
        for _ in 0..attempts {
            let w = rng.range(min_size / 2, max_size / 2 + 1) * 2 + 1;
            let h = rng.range(min_size / 2, max_size / 2 + 1) * 2 + 1;
            let x = (rng.range(0, self.mz_width - w) / 2) * 2 + 1;
            let y = (rng.range(0, self.mz_height - h) / 2) * 2 + 1;
            let new_room = Rect::new(x, y, w, h);

            if rooms.iter().any(|other| new_room.intersect(other)) {
                continue;
            }
            let region = self.start_region();
            for rx in new_room.x1..new_room.x2 {
                for ry in new_room.y1..new_room.y2 {
                    self.carve_cell(map, rx, ry, region);
                }
            }
            rooms.push(new_room);
        }
        rooms
    }

    /// The cell two steps away must still be solid and the cell three steps
    /// away must lie strictly inside the maze.
    fn can_carve(&self, map: &Map, cell: (i32, i32), direction: (i32, i32)) -> bool {
        let (x3, y3) = (cell.0 + direction.0 * 3, cell.1 + direction.1 * 3);
        if !(0 < x3 && x3 < self.mz_width && 0 < y3 && y3 < self.mz_height) {
            return false;
        }
        map.is_blocked(cell.0 + direction.0 * 2, cell.1 + direction.1 * 2)
    }

    /// Randomised flood fill from `start`, carving two cells per step.
    fn grow_maze(&mut self, map: &mut Map, rng: &mut RandomNumberGenerator, start: (i32, i32), winding_percent: f32) {
        let region = self.start_region();
        self.carve_cell(map, start.0, start.1, region);

        let mut cells = vec![start];
        let mut last_direction: Option<(i32, i32)> = None;

        while let Some(&cell) = cells.last() {
            let unmade: Vec<(i32, i32)> = DIRECTIONS
                .iter()
                .copied()
                .filter(|dir| self.can_carve(map, cell, *dir))
                .collect();

            if unmade.is_empty() {
                cells.pop();
                last_direction = None;
                continue;
            }

            let keep_going = match last_direction {
                Some(last) => unmade.contains(&last) && rng.rand::<f32>() > winding_percent,
                None => false,
            };
            let direction = match (keep_going, last_direction) {
                (true, Some(last)) => last,
                _ => *rng.random_slice_entry(&unmade).unwrap_or(&unmade[0]),
            };

            let (dx, dy) = direction;
            self.carve_cell(map, cell.0 + dx, cell.1 + dy, region);
            let next = (cell.0 + dx * 2, cell.1 + dy * 2);
            self.carve_cell(map, next.0, next.1, region);
            cells.push(next);
            last_direction = Some(direction);
        }
    }

    /// Solid cells inside the maze border that touch at least two regions
    /// which are not yet joined, in row-major scan order.
    fn find_connectors(&self, map: &Map, merged: &mut RegionUnion) -> Vec<Connector> {
        let mut connectors = Vec::new();
        for y in 1..self.mz_height - 1 {
            for x in 1..self.mz_width - 1 {
                if !map.is_blocked(x, y) {
                    continue;
                }
                let mut regions: Vec<usize> = DIRECTIONS
                    .iter()
                    .filter_map(|(dx, dy)| self.region_at(x + dx, y + dy))
                    .collect();
                regions.sort_unstable();
                regions.dedup();

                let mut roots: Vec<usize> = regions.iter().map(|r| merged.find(*r)).collect();
                roots.sort_unstable();
                roots.dedup();
                if roots.len() >= 2 {
                    connectors.push(Connector { pos: (x, y), regions });
                }
            }
        }
        connectors
    }

    fn open_connector(&mut self, map: &mut Map, pos: (i32, i32), region: usize) {
        self.carve_cell(map, pos.0, pos.1, region);
    }

    /// Opens connectors at random until every region is joined into one.
    fn connect_regions(
        &mut self,
        map: &mut Map,
        rng: &mut RandomNumberGenerator,
        extra_connector_chance: f32,
    ) -> Result<()> {
        let mut merged = RegionUnion::new(self.region_count);
        let mut connectors = self.find_connectors(map, &mut merged);
        debug!(
            "maze has {} regions and {} connectors before merging",
            self.region_count,
            connectors.len()
        );

        while merged.open_regions() > 1 {
            if connectors.is_empty() {
                connectors = self.find_connectors(map, &mut merged);
                if connectors.is_empty() {
                    warn!("maze merge stranded {} regions", merged.open_regions());
                    return Err(GenError::Disconnected {
                        regions: merged.open_regions(),
                    });
                }
            }

            let pick = rng.random_slice_index(&connectors).unwrap_or(0);
            let connector = connectors.swap_remove(pick);

            let mut roots: Vec<usize> = Vec::new();
            for region in connector.regions.iter() {
                let root = merged.find(*region);
                if !roots.contains(&root) {
                    roots.push(root);
                }
            }
            let dest = roots[0];
            for source in roots.iter().skip(1) {
                merged.union(dest, *source);
            }
            self.open_connector(map, connector.pos, dest);

            let mut kept = Vec::with_capacity(connectors.len());
            for other in connectors.into_iter() {
                let dx = (other.pos.0 - connector.pos.0) as f32;
                let dy = (other.pos.1 - connector.pos.1) as f32;
                if (dx * dx + dy * dy).sqrt() < 2.0 {
                    continue;
                }

                let first_root = merged.find(other.regions[0]);
                let still_spans = other.regions.iter().any(|r| merged.find(*r) != first_root);
                if still_spans {
                    kept.push(other);
                    continue;
                }

                // Redundant now, but occasionally opened anyway so the
                // dungeon has loops.
                if rng.rand::<f32>() < extra_connector_chance {
                    self.open_connector(map, other.pos, first_root);
                }
            }
            connectors = kept;
        }
        Ok(())
    }
}

/// Fills carved cells with at most one open neighbour until none are left.
fn remove_dead_ends(map: &mut Map, mz_width: i32, mz_height: i32) {
    let mut done = false;
    while !done {
        done = true;
        for y in 1..mz_height {
            for x in 1..mz_width {
                if map.is_blocked(x, y) {
                    continue;
                }
                if map.open_neighbours(x, y) <= 1 {
                    map.block(x, y);
                    done = false;
                }
            }
        }
    }
}

/// Rooms and mazes: odd-aligned rooms, corridors grown through the
/// remaining rock, regions joined through connectors, then dead ends filled.
pub struct MazeBuilder {
    settings: MazeSettings,
    room_min_size: i32,
    room_max_size: i32,
}

impl InitialMapBuilder for MazeBuilder {
    fn build_map(&mut self, rng: &mut RandomNumberGenerator, build_data: &mut BuilderMap) -> Result<()> {
        self.build(rng, build_data)
    }
}

impl MazeBuilder {
    pub fn new(settings: &GeneratorSettings) -> Box<Self> {
        Box::new(Self {
            settings: settings.maze.clone(),
            room_min_size: settings.room_min_size,
            room_max_size: settings.room_max_size,
        })
    }

    fn build(&mut self, rng: &mut RandomNumberGenerator, build_data: &mut BuilderMap) -> Result<()> {
        let mut carver = Carver::new(build_data.width, build_data.height);
        let rooms = carver.add_rooms(
            &mut build_data.map,
            rng,
            self.settings.build_room_attempts,
            self.room_min_size,
            self.room_max_size,
        );
        build_data.take_snapshot();

        for y in (1..carver.mz_height).step_by(2) {
            for x in (1..carver.mz_width).step_by(2) {
                if build_data.map.is_blocked(x, y) {
                    carver.grow_maze(&mut build_data.map, rng, (x, y), self.settings.winding_percent);
                }
            }
        }
        build_data.take_snapshot();

        carver.connect_regions(&mut build_data.map, rng, self.settings.extra_connector_chance)?;
        build_data.take_snapshot();

        if !self.settings.allow_dead_ends {
            remove_dead_ends(&mut build_data.map, carver.mz_width, carver.mz_height);
            build_data.take_snapshot();
        }

        debug!("maze layout placed {} rooms", rooms.len());
        build_data.rooms = Some(rooms);
        Ok(())
    }
}
