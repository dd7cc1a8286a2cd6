use super::block::Block;
use super::face::Face;

/// Handle to one face texture. The renderer resolves `name`; `tint` is the
/// flat colour used when no image is bound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceTexture {
    pub name: &'static str,
    pub tint: [f32; 4],
}

impl FaceTexture {
    pub const MISSING: FaceTexture = FaceTexture { name: "missing", tint: [1.0, 0.0, 1.0, 1.0] };

    pub fn scaled(self, factor: f32) -> Self {
        let [r, g, b, a] = self.tint;
        FaceTexture {
            name: self.name,
            tint: [
                (r * factor).clamp(0.0, 1.0),
                (g * factor).clamp(0.0, 1.0),
                (b * factor).clamp(0.0, 1.0),
                a,
            ],
        }
    }
}

/// Maps a block kind to its six face textures (+X, -X, +Y, -Y, +Z, -Z).
pub trait MaterialProvider {
    /// `None` when the provider does not know `block`.
    fn lookup(&self, block: Block) -> Option<[FaceTexture; 6]>;

    fn fallback_textures(&self) -> [FaceTexture; 6] {
        [FaceTexture::MISSING; 6]
    }

    fn textures_for(&self, block: Block) -> [FaceTexture; 6] {
        self.lookup(block).unwrap_or_else(|| {
            tracing::warn!(block = block.name(), "no textures for block, using fallback");
            self.fallback_textures()
        })
    }

    fn texture_for(&self, block: Block, face: Face) -> FaceTexture {
        self.textures_for(block)[face.index()]
    }
}

const TOP_LIGHTEN: f32 = 1.2;
const BOTTOM_DARKEN: f32 = 0.7;

/// Built-in flat-colour palette.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlockPalette;

impl BlockPalette {
    fn side(block: Block) -> Option<FaceTexture> {
        let tint = match block {
            Block::Empty => return None,
            Block::Bedrock => [0.2, 0.2, 0.2, 1.0],
            Block::Stone => [0.5, 0.5, 0.5, 1.0],
            Block::Dirt => [0.6, 0.4, 0.2, 1.0],
            Block::Grass => [0.45, 0.5, 0.25, 1.0],
            Block::Sand => [0.9, 0.85, 0.3, 1.0],
            Block::Water => [0.0, 0.1, 0.4, 0.6],
            Block::Glass => [0.8, 0.9, 0.95, 0.3],
            Block::Leaves => [0.2, 0.6, 0.2, 0.8],
            Block::Wood => [0.5, 0.3, 0.1, 1.0],
            Block::Brick => [0.65, 0.25, 0.2, 1.0],
            Block::Cobblestone => [0.4, 0.4, 0.4, 1.0],
            Block::Planks => [0.75, 0.6, 0.35, 1.0],
        };
        let name = match block {
            Block::Grass => "grass_side",
            other => other.name(),
        };
        Some(FaceTexture { name, tint })
    }
}

impl MaterialProvider for BlockPalette {
    fn lookup(&self, block: Block) -> Option<[FaceTexture; 6]> {
        let side = Self::side(block)?;
        let (top, bottom) = match block {
            Block::Grass => (
                FaceTexture { name: "grass_top", tint: [0.3, 0.8, 0.2, 1.0] },
                FaceTexture { name: "dirt", tint: [0.6, 0.4, 0.2, 1.0] },
            ),
            _ => (side.scaled(TOP_LIGHTEN), side.scaled(BOTTOM_DARKEN)),
        };

        let mut textures = [side; 6];
        textures[Face::PosY.index()] = top;
        textures[Face::NegY.index()] = bottom;
        Some(textures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grass_has_distinct_top_bottom_and_side() {
        let textures = BlockPalette.textures_for(Block::Grass);
        assert_eq!(textures[Face::PosY.index()].name, "grass_top");
        assert_eq!(textures[Face::NegY.index()].name, "dirt");
        for face in [Face::PosX, Face::NegX, Face::PosZ, Face::NegZ] {
            assert_eq!(textures[face.index()].name, "grass_side");
        }
    }

    #[test]
    fn other_blocks_reuse_side_texture_lightened_and_darkened() {
        let textures = BlockPalette.textures_for(Block::Stone);
        let side = textures[Face::PosX.index()];
        let top = textures[Face::PosY.index()];
        let bottom = textures[Face::NegY.index()];
        assert_eq!(top.name, side.name);
        assert_eq!(bottom.name, side.name);
        assert!(top.tint[0] > side.tint[0]);
        assert!(bottom.tint[0] < side.tint[0]);
    }

    #[test]
    fn unknown_blocks_get_the_fallback_set() {
        assert_eq!(BlockPalette.textures_for(Block::Empty), [FaceTexture::MISSING; 6]);
    }

    #[test]
    fn lightening_is_clamped() {
        let bright = FaceTexture { name: "x", tint: [0.9, 1.0, 0.1, 0.5] }.scaled(2.0);
        assert_eq!(bright.tint, [1.0, 1.0, 0.2, 0.5]);
    }
}
