//! The six axis-aligned faces of a block.
//!
//! Order is +X, -X, +Y, -Y, +Z, -Z. Material providers return their six face
//! textures in the same order.

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Face {
    PosX = 0,
    NegX = 1,
    PosY = 2,
    NegY = 3,
    PosZ = 4,
    NegZ = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::PosX,
        Face::NegX,
        Face::PosY,
        Face::NegY,
        Face::PosZ,
        Face::NegZ,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Offset to the neighbouring block this face looks at
    pub fn offset(self) -> IVec3 {
        match self {
            Face::PosX => IVec3::X,
            Face::NegX => IVec3::NEG_X,
            Face::PosY => IVec3::Y,
            Face::NegY => IVec3::NEG_Y,
            Face::PosZ => IVec3::Z,
            Face::NegZ => IVec3::NEG_Z,
        }
    }

    pub fn normal(self) -> [f32; 3] {
        self.offset().as_vec3().to_array()
    }

    /// Corner frame of the quad on the unit cube: (origin, right, up).
    ///
    /// The quad is origin, origin + right, origin + right + up, origin + up and
    /// `right x up` points out of the cube, so it is counter-clockwise when seen
    /// from outside. Side faces keep `up` on +Y so textures stand upright; the
    /// top and bottom faces walk along -Z / +Z instead.
    pub fn quad_frame(self) -> (Vec3, Vec3, Vec3) {
        match self {
            Face::PosX => (Vec3::new(1.0, 0.0, 1.0), Vec3::NEG_Z, Vec3::Y),
            Face::NegX => (Vec3::new(0.0, 0.0, 0.0), Vec3::Z, Vec3::Y),
            Face::PosY => (Vec3::new(0.0, 1.0, 1.0), Vec3::X, Vec3::NEG_Z),
            Face::NegY => (Vec3::new(0.0, 0.0, 0.0), Vec3::X, Vec3::Z),
            Face::PosZ => (Vec3::new(0.0, 0.0, 1.0), Vec3::X, Vec3::Y),
            Face::NegZ => (Vec3::new(1.0, 0.0, 0.0), Vec3::NEG_X, Vec3::Y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_frames_face_outwards() {
        for face in Face::ALL {
            let (_, right, up) = face.quad_frame();
            assert_eq!(right.cross(up), face.offset().as_vec3(), "{face:?} winds inwards");
        }
    }

    #[test]
    fn quad_frames_lie_on_their_face() {
        for face in Face::ALL {
            let (origin, right, up) = face.quad_frame();
            let center = origin + (right + up) * 0.5;
            let expected = Vec3::splat(0.5) + face.offset().as_vec3() * 0.5;
            assert_eq!(center, expected, "{face:?} quad is not on the face");
        }
    }

    #[test]
    fn index_matches_declaration_order() {
        for (i, face) in Face::ALL.iter().enumerate() {
            assert_eq!(face.index(), i);
        }
    }
}
