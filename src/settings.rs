use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};
use crate::map_builders::DungeonKind;

/// Everything a generation run needs apart from the algorithm choice and the
/// RNG. Every field has a default, so a JSON document only has to name what
/// it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    pub width: i32,
    pub height: i32,
    pub room_min_size: i32,
    pub room_max_size: i32,
    pub depth: i32,
    pub water_noise: bool,
    pub tunnel: TunnelSettings,
    pub bsp: BspSettings,
    pub maze: MazeSettings,
    pub drunkard: DrunkardSettings,
    pub buildings: BuildingsSettings,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            width: 60,
            height: 50,
            room_min_size: 6,
            room_max_size: 10,
            depth: 1,
            water_noise: false,
            tunnel: TunnelSettings::default(),
            bsp: BspSettings::default(),
            maze: MazeSettings::default(),
            drunkard: DrunkardSettings::default(),
            buildings: BuildingsSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TunnelSettings {
    /// Placement attempts, not a guaranteed room count.
    pub max_rooms: i32,
}

impl Default for TunnelSettings {
    fn default() -> Self {
        Self { max_rooms: 30 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BspSettings {
    pub max_node_size: i32,
    pub min_leaf_size: i32,
}

impl Default for BspSettings {
    fn default() -> Self {
        Self {
            max_node_size: 24,
            min_leaf_size: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeSettings {
    pub build_room_attempts: i32,
    pub extra_connector_chance: f32,
    pub winding_percent: f32,
    pub allow_dead_ends: bool,
}

impl Default for MazeSettings {
    fn default() -> Self {
        Self {
            build_room_attempts: 100,
            extra_connector_chance: 0.04,
            winding_percent: 0.2,
            allow_dead_ends: false,
        }
    }
}

impl MazeSettings {
    pub fn labyrinth() -> Self {
        Self {
            build_room_attempts: 20,
            extra_connector_chance: 0.08,
            winding_percent: 0.5,
            allow_dead_ends: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrunkardSettings {
    pub percent_goal: f32,
    pub walk_iterations: i32,
    pub weighted_toward_center: f32,
    pub weighted_toward_prev_direction: f32,
}

impl Default for DrunkardSettings {
    fn default() -> Self {
        Self {
            percent_goal: 0.4,
            walk_iterations: 25000,
            weighted_toward_center: 0.15,
            weighted_toward_prev_direction: 0.7,
        }
    }
}

impl DrunkardSettings {
    pub fn open_cave() -> Self {
        Self {
            percent_goal: 0.55,
            weighted_toward_center: 0.3,
            weighted_toward_prev_direction: 0.2,
            ..Self::default()
        }
    }

    pub fn winding_passages() -> Self {
        Self {
            percent_goal: 0.3,
            weighted_toward_center: 0.1,
            weighted_toward_prev_direction: 1.5,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingsSettings {
    pub max_rooms: i32,
    /// Clearance kept around every building.
    pub distance: i32,
}

impl Default for BuildingsSettings {
    fn default() -> Self {
        Self {
            max_rooms: 7,
            distance: 4,
        }
    }
}

fn check(condition: bool, message: impl FnOnce() -> String) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(GenError::config(message()))
    }
}

fn check_probability(name: &str, value: f32) -> Result<()> {
    check((0.0..=1.0).contains(&value), || {
        format!("{} must lie in [0, 1], got {}", name, value)
    })
}

impl GeneratorSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rejects settings that would break an algorithm's geometry before any
    /// tile is touched.
    pub fn validate(&self, kind: DungeonKind) -> Result<()> {
        check(self.width >= 5 && self.height >= 5, || {
            format!("grid must be at least 5x5, got {}x{}", self.width, self.height)
        })?;
        match kind {
            DungeonKind::Tunnel => {
                self.check_room_bounds(3)?;
                check(self.tunnel.max_rooms >= 1, || {
                    format!("tunnel.max_rooms must be positive, got {}", self.tunnel.max_rooms)
                })
            }
            DungeonKind::BspTree => self.validate_bsp(),
            DungeonKind::Maze => self.validate_maze(),
            DungeonKind::DrunkardsWalk => self.validate_drunkard(),
            DungeonKind::Buildings => {
                self.check_room_bounds(4)?;
                check(self.buildings.max_rooms >= 0, || {
                    format!("buildings.max_rooms must not be negative, got {}", self.buildings.max_rooms)
                })?;
                check(self.buildings.distance >= 0, || {
                    format!("buildings.distance must not be negative, got {}", self.buildings.distance)
                })
            }
        }
    }

    fn check_room_bounds(&self, smallest: i32) -> Result<()> {
        check(self.room_min_size >= smallest, || {
            format!("room_min_size must be at least {}, got {}", smallest, self.room_min_size)
        })?;
        check(self.room_min_size <= self.room_max_size, || {
            format!(
                "room_min_size {} exceeds room_max_size {}",
                self.room_min_size, self.room_max_size
            )
        })?;
        check(
            self.room_max_size < self.width && self.room_max_size < self.height,
            || {
                format!(
                    "room_max_size {} does not fit a {}x{} grid",
                    self.room_max_size, self.width, self.height
                )
            },
        )
    }

    fn validate_bsp(&self) -> Result<()> {
        let bsp = &self.bsp;
        check(bsp.min_leaf_size >= 4, || {
            format!("bsp.min_leaf_size must be at least 4, got {}", bsp.min_leaf_size)
        })?;
        check(
            self.width >= bsp.min_leaf_size && self.height >= bsp.min_leaf_size,
            || format!("grid is smaller than bsp.min_leaf_size {}", bsp.min_leaf_size),
        )?;
        self.check_room_bounds(3)?;
        check(self.room_min_size < bsp.min_leaf_size, || {
            format!(
                "room_min_size {} does not fit a leaf of bsp.min_leaf_size {}",
                self.room_min_size, bsp.min_leaf_size
            )
        })
    }

    fn validate_maze(&self) -> Result<()> {
        let maze = &self.maze;
        let (mz_width, mz_height) = odd_dimensions(self.width, self.height);
        check(self.room_min_size >= 2, || {
            format!("maze rooms need room_min_size >= 2, got {}", self.room_min_size)
        })?;
        check(self.room_min_size <= self.room_max_size, || {
            format!(
                "room_min_size {} exceeds room_max_size {}",
                self.room_min_size, self.room_max_size
            )
        })?;
        let largest = (self.room_max_size / 2) * 2 + 1;
        check(largest < mz_width && largest < mz_height, || {
            format!(
                "odd-aligned room size {} does not fit the {}x{} maze",
                largest, mz_width, mz_height
            )
        })?;
        check(maze.build_room_attempts >= 1, || {
            format!(
                "maze.build_room_attempts must be positive, got {}",
                maze.build_room_attempts
            )
        })?;
        check_probability("maze.extra_connector_chance", maze.extra_connector_chance)?;
        check_probability("maze.winding_percent", maze.winding_percent)
    }

    fn validate_drunkard(&self) -> Result<()> {
        let drunk = &self.drunkard;
        check(drunk.percent_goal > 0.0 && drunk.percent_goal <= 1.0, || {
            format!("drunkard.percent_goal must lie in (0, 1], got {}", drunk.percent_goal)
        })?;
        let interior = ((self.width - 3) * (self.height - 3)) as f32;
        let goal = drunk.percent_goal * (self.width * self.height) as f32;
        check(goal <= interior, || {
            format!(
                "drunkard.percent_goal {} asks for {} tiles but only {} can be cleared",
                drunk.percent_goal, goal, interior
            )
        })?;
        check(drunk.walk_iterations >= 0, || {
            format!("drunkard.walk_iterations must not be negative, got {}", drunk.walk_iterations)
        })?;
        check(
            drunk.weighted_toward_center >= 0.0 && drunk.weighted_toward_prev_direction >= 0.0,
            || "drunkard direction weights must not be negative".to_string(),
        )
    }
}

/// The maze carving scheme works on odd dimensions only.
pub fn odd_dimensions(width: i32, height: i32) -> (i32, i32) {
    let mz_width = if width % 2 == 0 { width - 1 } else { width };
    let mz_height = if height % 2 == 0 { height - 1 } else { height };
    (mz_width, mz_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn defaults_are_valid_for_every_kind() {
        let settings = GeneratorSettings::default();
        for kind in DungeonKind::iter() {
            assert!(settings.validate(kind).is_ok(), "{} rejected defaults", kind);
        }
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let settings = GeneratorSettings::from_json(
            r#"{ "width": 40, "height": 30, "maze": { "winding_percent": 0.6 } }"#,
        )
        .unwrap();
        assert_eq!(settings.width, 40);
        assert_eq!(settings.height, 30);
        assert_eq!(settings.maze.winding_percent, 0.6);
        assert_eq!(settings.maze.build_room_attempts, 100);
        assert_eq!(settings.room_min_size, 6);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            GeneratorSettings::from_json("{ width: }"),
            Err(GenError::Json(_))
        ));
    }

    #[test]
    fn inverted_room_bounds_are_rejected() {
        let settings = GeneratorSettings {
            room_min_size: 9,
            room_max_size: 5,
            ..GeneratorSettings::default()
        };
        assert!(matches!(
            settings.validate(DungeonKind::Tunnel),
            Err(GenError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rooms_larger_than_grid_are_rejected() {
        let settings = GeneratorSettings {
            width: 12,
            height: 12,
            room_min_size: 4,
            room_max_size: 12,
            ..GeneratorSettings::default()
        };
        assert!(settings.validate(DungeonKind::Tunnel).is_err());
        assert!(settings.validate(DungeonKind::Buildings).is_err());
        assert!(settings.validate(DungeonKind::Maze).is_err());
    }

    #[test]
    fn bsp_rooms_must_fit_leaves() {
        let mut settings = GeneratorSettings::default();
        settings.room_min_size = 10;
        settings.room_max_size = 12;
        assert!(settings.validate(DungeonKind::BspTree).is_err());
    }

    #[test]
    fn unreachable_drunkard_goal_is_rejected() {
        let mut settings = GeneratorSettings::default();
        settings.drunkard.percent_goal = 0.99;
        assert!(settings.validate(DungeonKind::DrunkardsWalk).is_err());
    }

    #[test]
    fn probabilities_are_checked() {
        let mut settings = GeneratorSettings::default();
        settings.maze.winding_percent = 1.5;
        assert!(settings.validate(DungeonKind::Maze).is_err());
    }

    #[test]
    fn odd_dimensions_shrink_even_sides() {
        assert_eq!(odd_dimensions(60, 50), (59, 49));
        assert_eq!(odd_dimensions(41, 40), (41, 39));
    }
}
