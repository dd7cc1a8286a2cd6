use std::collections::BTreeMap;

use glam::Vec3;

use super::block::Block;
use super::face::Face;
use super::material::{FaceTexture, MaterialProvider};
use crate::utils::{ChunkCoord, Vertex};

/// Image-space UVs (v grows downwards) for the quad corners in
/// origin, right, right + up, up order.
const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BatchKey {
    pub block: Block,
    pub face: Face,
}

/// All visible faces of one block kind pointing one way, bound to one texture.
#[derive(Debug, Clone)]
pub struct FaceBatch {
    pub block: Block,
    pub face: Face,
    pub texture: FaceTexture,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl FaceBatch {
    fn new(key: BatchKey, texture: FaceTexture) -> Self {
        Self {
            block: key.block,
            face: key.face,
            texture,
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// one quad (4 vertices, 2 triangles) for the block whose min corner is `pos`
    fn push_quad(&mut self, pos: Vec3) {
        let (origin, right, up) = self.face.quad_frame();
        let normal = self.face.normal();
        let base = self.vertices.len() as u32;
        let corners = [origin, origin + right, origin + right + up, origin + up];

        for (corner, uv) in corners.iter().zip(QUAD_UVS) {
            self.vertices.push(Vertex { pos: (pos + *corner).to_array(), normal, uv });
        }
        self.indices.extend(QUAD_INDICES.iter().map(|i| base + i));
    }

    pub fn face_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Render-ready geometry of one chunk, in chunk-local space.
///
/// Batches are keyed by (block, face) and kept in a `BTreeMap` so iteration
/// order is stable. Only batches with at least one face exist.
#[derive(Debug, Clone)]
pub struct ChunkMesh {
    coord: ChunkCoord,
    batches: BTreeMap<BatchKey, FaceBatch>,
}

impl ChunkMesh {
    pub fn empty(coord: ChunkCoord) -> Self {
        Self { coord, batches: BTreeMap::new() }
    }

    pub fn push_face(&mut self, block: Block, face: Face, pos: Vec3, materials: &dyn MaterialProvider) {
        let key = BatchKey { block, face };
        self.batches
            .entry(key)
            .or_insert_with(|| FaceBatch::new(key, materials.texture_for(block, face)))
            .push_quad(pos);
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    pub fn batches(&self) -> impl Iterator<Item = &FaceBatch> {
        self.batches.values()
    }

    pub fn batch(&self, block: Block, face: Face) -> Option<&FaceBatch> {
        self.batches.get(&BatchKey { block, face })
    }

    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    pub fn face_count(&self) -> usize {
        self.batches.values().map(FaceBatch::face_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// world position of the chunk's local origin
    pub fn world_offset(&self) -> Vec3 {
        let corner = self.coord.to_world_coord();
        Vec3::new(corner.0 as f32, corner.1 as f32, corner.2 as f32)
    }

    /// batches with vertices moved into world space
    pub fn translated(&self) -> Vec<FaceBatch> {
        let offset = self.world_offset();
        self.batches
            .values()
            .map(|batch| {
                let mut batch = batch.clone();
                for v in batch.vertices.iter_mut() {
                    v.pos = (Vec3::from_array(v.pos) + offset).to_array();
                }
                batch
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::world::material::BlockPalette;
    use crate::model::world::CHUNK_SIZE;

    #[test]
    fn quads_are_grouped_by_block_and_face() {
        let mut mesh = ChunkMesh::empty(ChunkCoord(0, 0));
        mesh.push_face(Block::Stone, Face::PosY, Vec3::ZERO, &BlockPalette);
        mesh.push_face(Block::Stone, Face::PosY, Vec3::X, &BlockPalette);
        mesh.push_face(Block::Stone, Face::NegY, Vec3::ZERO, &BlockPalette);
        mesh.push_face(Block::Grass, Face::PosY, Vec3::Z, &BlockPalette);

        assert_eq!(mesh.batch_count(), 3);
        assert_eq!(mesh.face_count(), 4);

        let top = mesh.batch(Block::Stone, Face::PosY).expect("stone top batch");
        assert_eq!(top.face_count(), 2);
        assert_eq!(top.vertices.len(), 8);
        assert_eq!(top.indices, vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);
        assert_eq!(mesh.batch(Block::Grass, Face::PosY).map(|b| b.texture.name), Some("grass_top"));
        assert!(mesh.batch(Block::Grass, Face::NegY).is_none());
    }

    #[test]
    fn triangles_wind_towards_their_normal() {
        let mut mesh = ChunkMesh::empty(ChunkCoord(0, 0));
        for face in Face::ALL {
            mesh.push_face(Block::Dirt, face, Vec3::new(3.0, 4.0, 5.0), &BlockPalette);
        }

        for batch in mesh.batches() {
            for tri in batch.indices.chunks(3) {
                let p = |i: u32| Vec3::from_array(batch.vertices[i as usize].pos);
                let n = (p(tri[1]) - p(tri[0])).cross(p(tri[2]) - p(tri[0]));
                assert!(n.dot(Vec3::from_array(batch.face.normal())) > 0.0, "{:?}", batch.face);
            }
            for v in &batch.vertices {
                assert_eq!(v.normal, batch.face.normal());
            }
        }
    }

    #[test]
    fn translation_moves_into_world_space() {
        let mut mesh = ChunkMesh::empty(ChunkCoord(-1, 2));
        mesh.push_face(Block::Sand, Face::NegX, Vec3::ZERO, &BlockPalette);

        let world = mesh.translated();
        let s = CHUNK_SIZE as f32;
        assert_eq!(world[0].vertices[0].pos, [-s, 0.0, 2.0 * s]);
        // the local mesh is untouched
        assert_eq!(mesh.batch(Block::Sand, Face::NegX).map(|b| b.vertices[0].pos), Some([0.0, 0.0, 0.0]));
    }
}
