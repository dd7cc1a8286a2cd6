use std::collections::{BTreeSet, HashMap};

use glam::Vec3;

use crate::config::{ConfigError, WorldConfig};
use crate::model::raycast::{self, Selection};
use crate::model::world::{
    Block, BlockLookup, BlockPalette, Chunk, CoherentNoise, MaterialProvider, NoiseSource, TerrainGenerator,
};
use crate::utils::{BlockCoord, ChunkCoord, WorldCoord};

/// pre-compute square offsets for chunk loading order (closest first)
fn generate_square_offsets_in_distance_order(radius: isize) -> Vec<(isize, isize)> {
    let mut offsets = Vec::new();
    for x in -radius..=radius {
        for z in -radius..=radius {
            offsets.push((x, z));
        }
    }

    // sort by distance, ties by position so the order is stable
    offsets.sort_unstable_by_key(|&(x, z)| (x * x + z * z, x, z));
    offsets
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorldStats {
    pub loaded_chunks: usize,
    pub total_faces: usize,
    pub total_batches: usize,
}

/// What one `update` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamingReport {
    pub generated: usize,
    pub disposed: usize,
    pub seams_rebuilt: usize,
}

/// The loaded part of the world: a sparse map of columns around the observer.
///
/// A chunk is in the map iff it was generated and not yet unloaded. Reads from
/// anywhere else are air, writes there are dropped.
pub struct World {
    chunks: HashMap<ChunkCoord, Chunk>,
    terrain: TerrainGenerator,
    materials: Box<dyn MaterialProvider>,
    config: WorldConfig,

    observer_chunk: Option<ChunkCoord>,
    load_offsets: Vec<(isize, isize)>,
}

impl World {
    /// World with Perlin terrain seeded from the config and the built-in palette
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        let noise = Box::new(CoherentNoise::perlin(config.seed));
        Self::with_parts(config, noise, Box::new(BlockPalette))
    }

    /// Rejects configs that `WorldConfig::validate` rejects.
    pub fn with_parts(
        config: WorldConfig,
        noise: Box<dyn NoiseSource>,
        materials: Box<dyn MaterialProvider>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            chunks: HashMap::new(),
            terrain: TerrainGenerator::new(noise, config.seed, config.terrain),
            materials,
            load_offsets: generate_square_offsets_in_distance_order(config.render_distance as isize),
            config,
            observer_chunk: None,
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn observer_chunk(&self) -> Option<ChunkCoord> {
        self.observer_chunk
    }

    pub fn chunk(&self, coord: &ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(coord)
    }

    pub fn is_loaded(&self, coord: &ChunkCoord) -> bool {
        self.chunks.contains_key(coord)
    }

    /// coordinates of all loaded chunks, sorted
    pub fn loaded_chunks(&self) -> Vec<ChunkCoord> {
        let mut coords: Vec<ChunkCoord> = self.chunks.keys().copied().collect();
        coords.sort_unstable();
        coords
    }

    pub fn stats(&self) -> WorldStats {
        self.chunks.values().fold(
            WorldStats { loaded_chunks: self.chunks.len(), ..WorldStats::default() },
            |mut stats, chunk| {
                if let Some(mesh) = chunk.mesh() {
                    stats.total_faces += mesh.face_count();
                    stats.total_batches += mesh.batch_count();
                }
                stats
            },
        )
    }

    pub fn get_block(&self, world_coord: &WorldCoord) -> Block {
        let Some(block_coord) = world_coord.to_block_coord() else {
            return Block::Empty;
        };

        self.chunks
            .get(&world_coord.to_chunk_coord())
            .map(|chunk| chunk.get_block(&block_coord))
            .unwrap_or(Block::Empty)
    }

    /// Write a block and rebuild the affected meshes.
    ///
    /// Returns `false` (and changes nothing) outside the world height or when the
    /// owning chunk is not loaded. Blocks on a chunk wall also rebuild the
    /// loaded neighbour(s) across that wall.
    pub fn set_block(&mut self, world_coord: &WorldCoord, block: Block) -> bool {
        let Some(block_coord) = world_coord.to_block_coord() else {
            return false;
        };
        let chunk_coord = world_coord.to_chunk_coord();

        let Some(chunk) = self.chunks.get_mut(&chunk_coord) else {
            return false;
        };
        chunk.write_block(&block_coord, block);
        self.rebuild_mesh(&chunk_coord);

        if block_coord.is_on_chunk_edge() {
            for neighbor in Self::neighbors_across_edge(&chunk_coord, &block_coord) {
                self.rebuild_mesh(&neighbor);
            }
        }

        true
    }

    /// chunks sharing the wall(s) `block` sits on
    fn neighbors_across_edge(chunk: &ChunkCoord, block: &BlockCoord) -> Vec<ChunkCoord> {
        let last = crate::model::world::CHUNK_SIZE - 1;
        let mut neighbors = Vec::new();
        if block.0 == 0 {
            neighbors.push(chunk.offset(-1, 0));
        }
        if block.0 == last {
            neighbors.push(chunk.offset(1, 0));
        }
        if block.2 == 0 {
            neighbors.push(chunk.offset(0, -1));
        }
        if block.2 == last {
            neighbors.push(chunk.offset(0, 1));
        }
        neighbors
    }

    /// Rebuild the mesh of a loaded chunk against the current world. Returns
    /// whether the chunk was loaded.
    pub fn rebuild_mesh(&mut self, coord: &ChunkCoord) -> bool {
        let Some(chunk) = self.chunks.get(coord) else {
            return false;
        };
        let mesh = chunk.compute_mesh(Some(&*self), self.materials.as_ref());

        if let Some(chunk) = self.chunks.get_mut(coord) {
            chunk.replace_mesh(mesh);
        }
        tracing::debug!(?coord, "rebuilt chunk mesh");
        true
    }

    /// Stream chunks around the observer.
    ///
    /// Afterwards exactly the columns within `render_distance` (square radius) of
    /// the observer's column are loaded. New chunks are generated nearest first,
    /// meshed once the whole batch exists, and loaded chunks bordering a new or
    /// removed chunk get their seam rebuilt.
    pub fn update(&mut self, observer: Vec3) -> StreamingReport {
        let center = WorldCoord::from_position(observer).to_chunk_coord();
        let radius = self.config.render_distance as isize;
        self.observer_chunk = Some(center);

        let mut report = StreamingReport::default();
        let mut touched: BTreeSet<ChunkCoord> = BTreeSet::new();

        // unload everything outside the square
        let outside: Vec<ChunkCoord> = self
            .chunks
            .keys()
            .filter(|coord| coord.chebyshev_distance(&center) > radius)
            .copied()
            .collect();
        for coord in outside {
            if let Some(mut chunk) = self.chunks.remove(&coord) {
                chunk.dispose();
                report.disposed += 1;
                touched.extend(coord.neighbors());
                tracing::debug!(?coord, "disposed chunk");
            }
        }

        // generate what is missing, closest first
        let mut generated = Vec::new();
        for &(dx, dz) in &self.load_offsets {
            let coord = center.offset(dx, dz);
            if self.chunks.contains_key(&coord) {
                continue;
            }
            self.chunks.insert(coord, Chunk::generated(coord, &self.terrain));
            generated.push(coord);
            touched.extend(coord.neighbors());
            tracing::debug!(?coord, "generated chunk");
        }
        report.generated = generated.len();

        for coord in &generated {
            self.rebuild_mesh(coord);
        }

        // refresh the seams of chunks that were already there
        for coord in touched {
            if generated.contains(&coord) || !self.chunks.contains_key(&coord) {
                continue;
            }
            self.rebuild_mesh(&coord);
            report.seams_rebuilt += 1;
        }

        if report.generated > 0 || report.disposed > 0 {
            tracing::info!(
                ?center,
                generated = report.generated,
                disposed = report.disposed,
                seams = report.seams_rebuilt,
                loaded = self.chunks.len(),
                "streamed chunks"
            );
        }
        report
    }

    /// First non-air block along the ray, up to `max_distance`.
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<Selection> {
        raycast::raycast(origin, direction, max_distance, |coord| self.get_block(coord))
    }
}

impl BlockLookup for World {
    fn block_at(&self, coord: &WorldCoord) -> Block {
        self.get_block(coord)
    }
}
