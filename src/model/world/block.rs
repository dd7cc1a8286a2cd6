use bytemuck::NoUninit;
use serde::{Deserialize, Serialize};

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, NoUninit, Serialize, Deserialize)]
pub enum Block {
    Empty = 0,
    Bedrock = 1,
    Stone = 2,
    Dirt = 3,
    Grass = 4,
    Sand = 5,
    Water = 6,
    Glass = 7,
    Leaves = 8,
    Wood = 9,
    Brick = 10,
    Cobblestone = 11,
    Planks = 12,
}

impl Block {
    pub const ALL: [Block; 13] = [
        Block::Empty,
        Block::Bedrock,
        Block::Stone,
        Block::Dirt,
        Block::Grass,
        Block::Sand,
        Block::Water,
        Block::Glass,
        Block::Leaves,
        Block::Wood,
        Block::Brick,
        Block::Cobblestone,
        Block::Planks,
    ];

    pub fn from_u8(v: u8) -> Self {
        Self::ALL.get(v as usize).copied().unwrap_or(Block::Empty)
    }

    pub fn to_u8(self) -> u8 {
        self as u8
    }

    pub fn is_empty(self) -> bool {
        self == Block::Empty
    }

    /// Blocks you can see through. Air is handled separately by `is_empty`.
    pub fn is_transparent(self) -> bool {
        matches!(self, Block::Water | Block::Glass | Block::Leaves)
    }

    pub fn name(self) -> &'static str {
        match self {
            Block::Empty => "air",
            Block::Bedrock => "bedrock",
            Block::Stone => "stone",
            Block::Dirt => "dirt",
            Block::Grass => "grass",
            Block::Sand => "sand",
            Block::Water => "water",
            Block::Glass => "glass",
            Block::Leaves => "leaves",
            Block::Wood => "wood",
            Block::Brick => "brick",
            Block::Cobblestone => "cobblestone",
            Block::Planks => "planks",
        }
    }

    /// Whether the face of `self` towards `neighbor` has to be drawn.
    ///
    /// Identical kinds never show a shared face, transparent ones included.
    /// Everything else is visible against air, and solid-against-transparent
    /// as well as transparent-against-other-transparent boundaries are shown.
    pub fn shows_face_towards(self, neighbor: Block) -> bool {
        if self.is_empty() || self == neighbor {
            return false;
        }
        if neighbor.is_empty() {
            return true;
        }
        neighbor.is_transparent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_u8_round_trips_and_defaults_to_air() {
        for block in Block::ALL {
            assert_eq!(Block::from_u8(block.to_u8()), block);
        }
        assert_eq!(Block::from_u8(200), Block::Empty);
    }

    #[test]
    fn face_rules() {
        // solid against air
        assert!(Block::Stone.shows_face_towards(Block::Empty));
        // solid against solid
        assert!(!Block::Stone.shows_face_towards(Block::Dirt));
        assert!(!Block::Stone.shows_face_towards(Block::Stone));
        // solid against transparent
        assert!(Block::Stone.shows_face_towards(Block::Water));
        // transparent against solid is hidden by the solid neighbour
        assert!(!Block::Water.shows_face_towards(Block::Stone));
        // identical transparent kinds merge
        assert!(!Block::Water.shows_face_towards(Block::Water));
        assert!(!Block::Glass.shows_face_towards(Block::Glass));
        // different transparent kinds show their boundary from both sides
        assert!(Block::Water.shows_face_towards(Block::Glass));
        assert!(Block::Glass.shows_face_towards(Block::Water));
        // air never emits anything
        assert!(!Block::Empty.shows_face_towards(Block::Stone));
    }
}
