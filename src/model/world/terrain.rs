// terrain.rs - height-field terrain generation for one chunk column
//
// STEP 1: Height (2D noise)
//   → base height plus three octaves (large, medium, small) of coherent noise
//   → clamped to [1, WORLD_HEIGHT - 1] and floored
//
// STEP 2: Column fill (Y-level checks)
//   → bedrock at y=0, stone, a dirt band, one surface block on top
//   → surface: sand in the lowlands, stone on peaks, grass in between
//   → low columns are flooded with water up to the sea level
//
// STEP 3: Trees (second pass, per-column RNG)
//   → only on grass, only where the whole tree fits inside the chunk
//   → wood trunk, sphere of leaves around its top
//
// Nothing is stored between calls except the noise source and the config, so a
// column always generates the same way.

use super::block::Block;
use super::chunk::{Chunk, CHUNK_SIZE, WORLD_HEIGHT};
use super::noise::NoiseSource;
use crate::config::TerrainConfig;
use crate::utils::{BlockCoord, ChunkCoord};

/// Tree placed on top of a surface block
struct Tree {
    pos: (i32, i32),
    surface_y: i32,
    trunk_height: i32,
}

pub struct TerrainGenerator {
    noise: Box<dyn NoiseSource>,
    seed: u32,
    pub config: TerrainConfig,
}

impl TerrainGenerator {
    pub fn new(noise: Box<dyn NoiseSource>, seed: u32, config: TerrainConfig) -> Self {
        Self { noise, seed, config }
    }

    /// Terrain height of the world column (wx, wz): the first air level above the surface.
    pub fn column_height(&self, wx: isize, wz: isize) -> i32 {
        let (x, z) = (wx as f64, wz as f64);
        let height = self.config.octaves.iter().fold(self.config.base_height, |height, octave| {
            height + self.noise.sample(x * octave.frequency, z * octave.frequency) * octave.amplitude
        });
        height.clamp(1.0, (WORLD_HEIGHT - 1) as f64).floor() as i32
    }

    /// Block at level `y` of a column whose terrain height is `height`.
    pub fn block_for(&self, y: i32, height: i32) -> Block {
        if y == 0 {
            Block::Bedrock
        } else if y < height - 4 {
            Block::Stone
        } else if y < height - 1 {
            Block::Dirt
        } else if y == height - 1 {
            self.surface_block(height)
        } else if y < self.config.sea_level && height < self.config.sea_level {
            Block::Water
        } else {
            Block::Empty
        }
    }

    fn surface_block(&self, height: i32) -> Block {
        if height < self.config.sand_below {
            Block::Sand
        } else if height > self.config.stone_above {
            Block::Stone
        } else {
            Block::Grass
        }
    }

    /// Fill `chunk` with the terrain of its column.
    pub fn populate_chunk(&self, chunk: &mut Chunk) {
        let chunk_coord = chunk.coord();
        let mut trees = Vec::new();

        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let world = chunk_coord.block_to_world(&BlockCoord(x, 0, z));
                let height = self.column_height(world.0, world.2);

                for y in 0..WORLD_HEIGHT {
                    chunk.write_block(&BlockCoord(x, y, z), self.block_for(y as i32, height));
                }

                if let Some(tree) = self.roll_tree(&chunk_coord, x as i32, z as i32, height - 1) {
                    trees.push(tree);
                }
            }
        }

        // trees go in after every column is filled, otherwise later columns would erase leaves
        for tree in &trees {
            if chunk.get_block(&BlockCoord(tree.pos.0 as usize, tree.surface_y as usize, tree.pos.1 as usize)) == Block::Grass {
                self.plant_tree(tree, chunk);
            }
        }

        tracing::trace!(?chunk_coord, trees = trees.len(), "populated chunk");
    }

    /// Decide whether the column at local (x, z) grows a tree, and how tall.
    fn roll_tree(&self, chunk_coord: &ChunkCoord, x: i32, z: i32, surface_y: i32) -> Option<Tree> {
        if surface_y < 0 || self.block_for(surface_y, surface_y + 1) != Block::Grass {
            return None;
        }

        let world = chunk_coord.block_to_world(&BlockCoord(x as usize, 0, z as usize));
        let mut rng = fastrand::Rng::with_seed(column_seed(self.seed, world.0, world.2));
        if rng.f64() >= self.config.tree_chance {
            return None;
        }
        let trunk_height = rng.i32(self.config.min_trunk_height..=self.config.max_trunk_height);

        // trees never cross chunk borders
        let margin = self.config.tree_edge_margin;
        let size = CHUNK_SIZE as i32;
        if x < margin || z < margin || x >= size - margin || z >= size - margin {
            return None;
        }
        // the trunk has to fit below the top of the world
        if surface_y + trunk_height >= WORLD_HEIGHT as i32 {
            return None;
        }

        Some(Tree { pos: (x, z), surface_y, trunk_height })
    }

    fn plant_tree(&self, tree: &Tree, chunk: &mut Chunk) {
        let (x, z) = tree.pos;
        let top = tree.surface_y + tree.trunk_height;

        for y in tree.surface_y + 1..=top {
            chunk.write_block(&BlockCoord(x as usize, y as usize, z as usize), Block::Wood);
        }

        // leaf sphere centred one above the trunk top
        let radius = self.config.leaf_radius;
        let center_y = top + 1;
        for dy in -radius..=radius {
            for dz in -radius..=radius {
                for dx in -radius..=radius {
                    if dx * dx + dy * dy + dz * dz > radius * radius {
                        continue;
                    }
                    let Some(coord) = BlockCoord::checked((x + dx) as isize, (center_y + dy) as isize, (z + dz) as isize) else {
                        continue;
                    };
                    if chunk.get_block(&coord) != Block::Wood {
                        chunk.write_block(&coord, Block::Leaves);
                    }
                }
            }
        }
    }
}

/// RNG seed of one world column, mixed from the world seed and the column position
fn column_seed(seed: u32, wx: isize, wz: isize) -> u64 {
    let x = (wx as i64 as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let z = (wz as i64 as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
    (x ^ z.rotate_left(31)) ^ u64::from(seed).wrapping_mul(0x1656_67B1_9E37_79F9)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::world::noise::{CoherentNoise, ConstantNoise};

    fn flat(base_height: f64) -> TerrainGenerator {
        let config = TerrainConfig { base_height, tree_chance: 0.0, ..TerrainConfig::default() };
        TerrainGenerator::new(Box::new(ConstantNoise(0.0)), 0, config)
    }

    #[test]
    fn column_layers() {
        let gen = flat(20.0);
        let height = gen.column_height(0, 0);
        assert_eq!(height, 20);

        assert_eq!(gen.block_for(0, height), Block::Bedrock);
        assert_eq!(gen.block_for(1, height), Block::Stone);
        assert_eq!(gen.block_for(15, height), Block::Stone);
        assert_eq!(gen.block_for(16, height), Block::Dirt);
        assert_eq!(gen.block_for(18, height), Block::Dirt);
        assert_eq!(gen.block_for(19, height), Block::Grass);
        assert_eq!(gen.block_for(20, height), Block::Empty);
    }

    #[test]
    fn surface_depends_on_height() {
        let gen = flat(0.0);
        assert_eq!(gen.block_for(10, 11), Block::Sand);
        assert_eq!(gen.block_for(11, 12), Block::Grass);
        assert_eq!(gen.block_for(23, 24), Block::Grass);
        assert_eq!(gen.block_for(24, 25), Block::Stone);
    }

    #[test]
    fn low_columns_are_flooded_up_to_sea_level() {
        let gen = flat(0.0);
        let height = 6;
        assert_eq!(gen.block_for(5, height), Block::Sand);
        assert_eq!(gen.block_for(6, height), Block::Water);
        assert_eq!(gen.block_for(9, height), Block::Water);
        assert_eq!(gen.block_for(10, height), Block::Empty);
    }

    #[test]
    fn height_is_clamped_to_the_world() {
        assert_eq!(flat(-100.0).column_height(3, 3), 1);
        assert_eq!(flat(1000.0).column_height(3, 3), (WORLD_HEIGHT - 1) as i32);
    }

    #[test]
    fn octaves_are_summed_onto_the_base() {
        // every octave samples +0.5: 16 + 0.5 * (20 + 10 + 3) = 32.5
        let gen = TerrainGenerator::new(Box::new(ConstantNoise(0.5)), 0, TerrainConfig::default());
        assert_eq!(gen.column_height(0, 0), 32);
    }

    #[test]
    fn generation_is_deterministic() {
        let make = || TerrainGenerator::new(Box::new(CoherentNoise::perlin(11)), 11, TerrainConfig::default());
        let (a, b) = (make(), make());

        let mut first = Chunk::new(ChunkCoord(5, 5));
        let mut second = Chunk::new(ChunkCoord(5, 5));
        a.populate_chunk(&mut first);
        b.populate_chunk(&mut second);
        assert_eq!(first.voxel_bytes(), second.voxel_bytes());

        // and calling the same generator twice changes nothing either
        let mut third = Chunk::new(ChunkCoord(5, 5));
        a.populate_chunk(&mut third);
        assert_eq!(first.voxel_bytes(), third.voxel_bytes());
    }

    #[test]
    fn trees_grow_on_grass_inside_the_margin() {
        let config = TerrainConfig { base_height: 20.0, tree_chance: 1.0, ..TerrainConfig::default() };
        let gen = TerrainGenerator::new(Box::new(ConstantNoise(0.0)), 3, config);
        let mut chunk = Chunk::new(ChunkCoord(0, 0));
        gen.populate_chunk(&mut chunk);

        let surface = 19;
        let margin = config.tree_edge_margin as usize;
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let above = chunk.get_block(&BlockCoord(x, surface + 1, z));
                let inside = (margin..CHUNK_SIZE - margin).contains(&x) && (margin..CHUNK_SIZE - margin).contains(&z);
                if inside {
                    assert_eq!(above, Block::Wood, "missing trunk at ({x}, {z})");
                } else {
                    assert_ne!(above, Block::Wood, "trunk too close to the edge at ({x}, {z})");
                }
            }
        }
    }

    #[test]
    fn single_tree_shape() {
        let gen = flat(20.0);
        let mut chunk = Chunk::new(ChunkCoord(0, 0));
        gen.populate_chunk(&mut chunk);

        let tree = Tree { pos: (8, 8), surface_y: 19, trunk_height: 5 };
        gen.plant_tree(&tree, &mut chunk);

        for y in 20..=24 {
            assert_eq!(chunk.get_block(&BlockCoord(8, y, 8)), Block::Wood);
        }
        // leaves around the top never replace the trunk
        assert_eq!(chunk.get_block(&BlockCoord(8, 25, 8)), Block::Leaves);
        assert_eq!(chunk.get_block(&BlockCoord(8, 27, 8)), Block::Leaves);
        assert_eq!(chunk.get_block(&BlockCoord(10, 25, 8)), Block::Leaves);
        assert_eq!(chunk.get_block(&BlockCoord(7, 24, 8)), Block::Leaves);
        // corners of the bounding cube lie outside the sphere
        assert_eq!(chunk.get_block(&BlockCoord(10, 27, 10)), Block::Empty);
        assert_eq!(chunk.get_block(&BlockCoord(8, 28, 8)), Block::Empty);
    }

    #[test]
    fn trees_that_do_not_fit_vertically_are_skipped() {
        let config = TerrainConfig { base_height: 1000.0, stone_above: 1000, tree_chance: 1.0, ..TerrainConfig::default() };
        let gen = TerrainGenerator::new(Box::new(ConstantNoise(0.0)), 0, config);
        let mut chunk = Chunk::new(ChunkCoord(0, 0));
        gen.populate_chunk(&mut chunk);

        assert_eq!(chunk.get_block(&BlockCoord(8, WORLD_HEIGHT - 2, 8)), Block::Grass);
        assert_eq!(chunk.get_block(&BlockCoord(8, WORLD_HEIGHT - 1, 8)), Block::Empty);
    }

    #[test]
    fn column_seeds_differ_per_column() {
        assert_ne!(column_seed(0, 1, 2), column_seed(0, 2, 1));
        assert_ne!(column_seed(0, 1, 2), column_seed(1, 1, 2));
        assert_eq!(column_seed(9, -4, 7), column_seed(9, -4, 7));
    }
}
