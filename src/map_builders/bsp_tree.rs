use std::cmp::min;

use bracket_random::prelude::RandomNumberGenerator;
use log::debug;

use crate::error::Result;
use crate::map::Map;
use crate::map_builders::common::{apply_room_to_map, connect_rooms};
use crate::map_builders::{BuilderMap, InitialMapBuilder};
use crate::rect::Rect;
use crate::settings::GeneratorSettings;

/// An area of the partition. Either a leaf or the parent of exactly two
/// children, referenced by their index in the tree's arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub children: Option<(usize, usize)>,
    pub room: Option<Rect>,
}

impl Node {
    fn new(x: i32, y: i32, width: i32, height: i32) -> Node {
        Node {
            x,
            y,
            width,
            height,
            children: None,
            room: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// The node's area; a room placed in this leaf never reaches its right
    /// or bottom edge.
    pub fn area(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Cuts the node in two. Elongated nodes are cut across their long
    /// side, near-square ones in a random direction. Returns `None` when
    /// either half would fall below `min_leaf_size`.
    fn split(&self, min_leaf_size: i32, rng: &mut RandomNumberGenerator) -> Option<(Node, Node)> {
        let ratio = self.width as f32 / self.height as f32;
        let split_horizontally = if ratio >= 1.25 {
            false
        } else if 1.0 / ratio >= 1.25 {
            true
        } else {
            rng.range(0, 2) == 1
        };

        let max_length = if split_horizontally {
            self.height - min_leaf_size
        } else {
            self.width - min_leaf_size
        };
        if max_length <= min_leaf_size {
            return None;
        }

        let split = rng.range(min_leaf_size, max_length + 1);
        Some(if split_horizontally {
            (
                Node::new(self.x, self.y, self.width, split),
                Node::new(self.x, self.y + split, self.width, self.height - split),
            )
        } else {
            (
                Node::new(self.x, self.y, split, self.height),
                Node::new(self.x + split, self.y, self.width - split, self.height),
            )
        })
    }
}

pub struct BspTree {
    nodes: Vec<Node>,
}

impl BspTree {
    /// Partitions a `width` x `height` area. Every pass walks the whole
    /// arena, including nodes appended during the pass; oversized leaves
    /// always try to split and the rest try one time in five. Growth stops
    /// after a pass without a successful split.
    pub fn grow(
        width: i32,
        height: i32,
        max_node_size: i32,
        min_leaf_size: i32,
        rng: &mut RandomNumberGenerator,
    ) -> BspTree {
        let mut nodes = vec![Node::new(0, 0, width, height)];
        let mut split_successfully = true;
        while split_successfully {
            split_successfully = false;
            let mut i = 0;
            while i < nodes.len() {
                if nodes[i].is_leaf() {
                    let roll = rng.rand::<f32>();
                    let node = &nodes[i];
                    let try_split = node.width > max_node_size || node.height > max_node_size || roll > 0.8;
                    if try_split {
                        if let Some((first, second)) = node.split(min_leaf_size, rng) {
                            let first_idx = nodes.len();
                            nodes.push(first);
                            nodes.push(second);
                            nodes[i].children = Some((first_idx, first_idx + 1));
                            split_successfully = true;
                        }
                    }
                }
                i += 1;
            }
        }
        BspTree { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn leaves(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_leaf())
    }

    /// Places one room per leaf and connects siblings bottom-up. Rooms are
    /// returned in post-order, the order they were carved.
    pub fn create_rooms(
        &mut self,
        map: &mut Map,
        rng: &mut RandomNumberGenerator,
        room_min_size: i32,
        room_max_size: i32,
    ) -> Vec<Rect> {
        let mut rooms = Vec::new();
        let mut stack: Vec<(usize, bool)> = vec![(0, false)];

        while let Some((idx, children_done)) = stack.pop() {
            match self.nodes[idx].children {
                Some((first, second)) if !children_done => {
                    stack.push((idx, true));
                    stack.push((second, false));
                    stack.push((first, false));
                }
                Some((first, second)) => {
                    let room_a = self.get_room(first, rng);
                    let room_b = self.get_room(second, rng);
                    if let (Some(a), Some(b)) = (room_a, room_b) {
                        connect_rooms(map, rng, &a, &b);
                    }
                }
                None => {
                    let room = self.leaf_room(idx, rng, room_min_size, room_max_size);
                    apply_room_to_map(map, &room);
                    self.nodes[idx].room = Some(room);
                    rooms.push(room);
                }
            }
        }
        rooms
    }

    fn leaf_room(&self, idx: usize, rng: &mut RandomNumberGenerator, room_min_size: i32, room_max_size: i32) -> Rect {
        let node = &self.nodes[idx];
        let w = rng.range(room_min_size, min(room_max_size, node.width - 1) + 1);
        let h = rng.range(room_min_size, min(room_max_size, node.height - 1) + 1);
        let x = rng.range(node.x, node.x + node.width - w);
        let y = rng.range(node.y, node.y + node.height - h);
        Rect::new(x, y, w, h)
    }

    /// A representative room for the subtree rooted at `idx`, found by
    /// descending into a random child until a room turns up.
    fn get_room(&self, idx: usize, rng: &mut RandomNumberGenerator) -> Option<Rect> {
        let mut current = idx;
        loop {
            let node = &self.nodes[current];
            if let Some(room) = node.room {
                return Some(room);
            }
            let (first, second) = node.children?;
            current = if rng.rand::<f32>() < 0.5 { first } else { second };
        }
    }
}

pub struct BspTreeBuilder {
    max_node_size: i32,
    min_leaf_size: i32,
    room_min_size: i32,
    room_max_size: i32,
}

impl InitialMapBuilder for BspTreeBuilder {
    fn build_map(&mut self, rng: &mut RandomNumberGenerator, build_data: &mut BuilderMap) -> Result<()> {
        self.build(rng, build_data);
        Ok(())
    }
}

impl BspTreeBuilder {
    pub fn new(settings: &GeneratorSettings) -> Box<Self> {
        Box::new(Self {
            max_node_size: settings.bsp.max_node_size,
            min_leaf_size: settings.bsp.min_leaf_size,
            room_min_size: settings.room_min_size,
            room_max_size: settings.room_max_size,
        })
    }

    fn build(&mut self, rng: &mut RandomNumberGenerator, build_data: &mut BuilderMap) {
        let mut tree = BspTree::grow(
            build_data.width,
            build_data.height,
            self.max_node_size,
            self.min_leaf_size,
            rng,
        );
        let rooms = tree.create_rooms(&mut build_data.map, rng, self.room_min_size, self.room_max_size);
        debug!("bsp layout split into {} nodes and {} rooms", tree.nodes().len(), rooms.len());
        build_data.take_snapshot();
        build_data.rooms = Some(rooms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grow_and_fill(seed: u64, width: i32, height: i32) -> (BspTree, Map, Vec<Rect>) {
        let settings = GeneratorSettings::default();
        let mut rng = RandomNumberGenerator::seeded(seed);
        let mut tree = BspTree::grow(width, height, settings.bsp.max_node_size, settings.bsp.min_leaf_size, &mut rng);
        let mut map = Map::new(1, width, height);
        let rooms = tree.create_rooms(&mut map, &mut rng, settings.room_min_size, settings.room_max_size);
        (tree, map, rooms)
    }

    #[test]
    fn small_area_is_never_split() {
        let mut rng = RandomNumberGenerator::seeded(1);
        let tree = BspTree::grow(20, 20, 24, 10, &mut rng);
        assert_eq!(tree.nodes().len(), 1);
    }

    #[test]
    fn oversized_nodes_are_split() {
        let (tree, _, _) = grow_and_fill(2, 60, 50);
        for leaf in tree.leaves() {
            assert!(leaf.width <= 24 && leaf.height <= 24, "{:?}", leaf);
        }
    }

    #[test]
    fn children_tile_their_parent() {
        let (tree, _, _) = grow_and_fill(3, 60, 50);
        for node in tree.nodes() {
            if let Some((a, b)) = node.children {
                let (a, b) = (&tree.nodes()[a], &tree.nodes()[b]);
                assert_eq!(a.width * a.height + b.width * b.height, node.width * node.height);
                assert!(a.width >= 10 && a.height >= 10);
                assert!(b.width >= 10 && b.height >= 10);
            }
        }
    }

    #[test]
    fn one_room_per_leaf_in_leaf_order() {
        for seed in 0..20 {
            let (tree, _, rooms) = grow_and_fill(seed, 60, 50);
            let leaves: Vec<&Node> = tree.leaves().collect();
            assert_eq!(leaves.len(), rooms.len());
            for room in rooms.iter() {
                let owners = leaves.iter().filter(|l| l.room == Some(*room)).count();
                assert_eq!(owners, 1);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_rooms_sit_strictly_inside_their_leaves(seed in any::<u64>()) {
            let (tree, map, rooms) = grow_and_fill(seed, 60, 50);
            for leaf in tree.leaves() {
                let room = leaf.room.unwrap();
                prop_assert!(room.x1 >= leaf.x && room.y1 >= leaf.y);
                prop_assert!(room.x2 < leaf.x + leaf.width);
                prop_assert!(room.y2 < leaf.y + leaf.height);
            }
            for (i, a) in rooms.iter().enumerate() {
                for b in rooms.iter().skip(i + 1) {
                    prop_assert!(!a.intersect(b));
                }
            }
            prop_assert!(map.get_total_cleared_tiles() > 0);
        }
    }
}
