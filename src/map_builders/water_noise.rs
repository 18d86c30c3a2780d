use bracket_noise::prelude::{FastNoise, FractalType, NoiseType};
use bracket_random::prelude::RandomNumberGenerator;
use log::debug;

use crate::error::Result;
use crate::map::TileType;
use crate::map_builders::{BuilderMap, MetaMapBuilder};

const WATER_THRESHOLD: f32 = 0.2;

/// Floods carved ground wherever a fractal noise field rises above a
/// threshold. Water stays passable and spawnable; only the tile type
/// changes.
pub struct WaterNoise {
    threshold: f32,
}

impl MetaMapBuilder for WaterNoise {
    fn build_map(&mut self, rng: &mut RandomNumberGenerator, build_data: &mut BuilderMap) -> Result<()> {
        self.build(rng, build_data);
        Ok(())
    }
}

impl WaterNoise {
    pub fn new() -> Box<Self> {
        Box::new(Self {
            threshold: WATER_THRESHOLD,
        })
    }

    pub fn with_threshold(threshold: f32) -> Box<Self> {
        Box::new(Self { threshold })
    }

    fn build(&mut self, rng: &mut RandomNumberGenerator, build_data: &mut BuilderMap) {
        let mut noise = FastNoise::seeded(rng.roll_dice(1, 65536) as u64);
        noise.set_noise_type(NoiseType::SimplexFractal);
        noise.set_fractal_type(FractalType::FBM);
        noise.set_fractal_octaves(4);
        noise.set_fractal_gain(0.5);
        noise.set_fractal_lacunarity(2.0);
        noise.set_frequency(0.08);

        let mut flooded = 0;
        for x in 0..build_data.map.width {
            for y in 0..build_data.map.height {
                let tile = build_data.map.tile_mut(x, y);
                if tile.blocked {
                    continue;
                }
                if noise.get_noise(x as f32, y as f32) > self.threshold {
                    tile.tile_type = TileType::Water;
                    flooded += 1;
                }
            }
        }
        debug!("water noise flooded {} tiles", flooded);
        build_data.take_snapshot();
    }
}
