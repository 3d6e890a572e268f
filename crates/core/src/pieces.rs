//! Pieces module - the static piece catalog
//!
//! Seven shapes, each with four stored rotation slots of four `(dx, dy)` offsets
//! around a pivot. `y` grows downward, so negative `dy` reaches above the pivot.
//!
//! Only the first `rotations` slots of a shape are distinct: the O piece has one,
//! the I, S and Z pieces have two in practice (I declares 2, S and Z repeat their
//! pair across all four slots and declare 4), J, L and T have four.

use crate::types::{PieceKind, Position, Rotation, PIECE_COUNT, ROTATION_COUNT};

/// Offset of a single block relative to the piece pivot
pub type BlockOffset = (i8, i8);

/// Shape of a piece - 4 block offsets from the pivot
pub type PieceShape = [BlockOffset; 4];

/// One catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    /// Number of geometrically distinct rotation slots (1, 2 or 4)
    pub rotations: u8,
    /// Block offsets per rotation slot
    pub shapes: [PieceShape; ROTATION_COUNT],
}

impl Piece {
    /// Offsets for a rotation slot
    #[inline]
    pub fn shape(&self, rotation: Rotation) -> &PieceShape {
        &self.shapes[rotation.index()]
    }
}

/// The full catalog, indexed by [`PieceKind::index`]
pub type Catalog = [Piece; PIECE_COUNT];

const fn uniform(rotations: u8, shape: PieceShape) -> Piece {
    Piece {
        rotations,
        shapes: [shape; ROTATION_COUNT],
    }
}

const fn paired(a: PieceShape, b: PieceShape, rotations: u8) -> Piece {
    Piece {
        rotations,
        shapes: [a, b, a, b],
    }
}

/// Shared read-only catalog
pub static CATALOG: Catalog = [
    // O
    uniform(1, [(0, 0), (0, -1), (1, -1), (1, 0)]),
    // I
    paired(
        [(-1, 0), (0, 0), (1, 0), (2, 0)],
        [(0, -2), (0, -1), (0, 0), (0, 1)],
        2,
    ),
    // J
    Piece {
        rotations: 4,
        shapes: [
            [(-1, 0), (0, 0), (1, 0), (1, 1)],
            [(-1, 1), (0, 1), (0, 0), (0, -1)],
            [(-1, -1), (-1, 0), (0, 0), (1, 0)],
            [(1, -1), (0, -1), (0, 0), (0, 1)],
        ],
    },
    // L
    Piece {
        rotations: 4,
        shapes: [
            [(-1, 1), (-1, 0), (0, 0), (1, 0)],
            [(-1, -1), (0, -1), (0, 0), (0, 1)],
            [(-1, 0), (0, 0), (1, 0), (1, -1)],
            [(0, -1), (0, 0), (0, 1), (1, 1)],
        ],
    },
    // S
    paired(
        [(-1, 1), (0, 1), (0, 0), (1, 0)],
        [(-1, -1), (-1, 0), (0, 0), (0, 1)],
        4,
    ),
    // T
    Piece {
        rotations: 4,
        shapes: [
            [(-1, 0), (0, 0), (1, 0), (0, 1)],
            [(-1, 0), (0, -1), (0, 0), (0, 1)],
            [(-1, 0), (0, 0), (1, 0), (0, -1)],
            [(0, -1), (0, 0), (0, 1), (1, 0)],
        ],
    },
    // Z
    paired(
        [(-1, 0), (0, 0), (0, 1), (1, 1)],
        [(-1, 1), (-1, 0), (0, 0), (0, -1)],
        4,
    ),
];

/// Catalog entry for a piece kind
#[inline]
pub fn piece(kind: PieceKind) -> &'static Piece {
    &CATALOG[kind.index()]
}

/// Get the shape (block offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    *piece(kind).shape(rotation)
}

/// Number of distinct rotation slots for a piece kind
pub fn rotation_count(kind: PieceKind) -> u8 {
    piece(kind).rotations
}

/// Absolute cells covered by `shape` with its pivot at `pos`
#[inline]
pub fn cells_at(shape: &PieceShape, pos: Position) -> [Position; 4] {
    shape.map(|(dx, dy)| pos.offset(dx, dy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_matches_kind_index() {
        assert_eq!(piece(PieceKind::O).rotations, 1);
        assert_eq!(piece(PieceKind::I).rotations, 2);
        for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::T, PieceKind::Z] {
            assert_eq!(rotation_count(kind), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_offsets_are_distinct_and_compact() {
        for kind in PieceKind::ALL {
            for r in 0..ROTATION_COUNT {
                let shape = get_shape(kind, Rotation::from_index(r));
                for i in 0..4 {
                    for j in (i + 1)..4 {
                        assert_ne!(shape[i], shape[j], "{:?} rotation {} repeats a block", kind, r);
                    }
                }
                for &(dx, dy) in &shape {
                    assert!((-2..=2).contains(&dx), "{:?} dx {}", kind, dx);
                    assert!((-2..=2).contains(&dy), "{:?} dy {}", kind, dy);
                }
            }
        }
    }

    #[test]
    fn test_every_shape_contains_pivot() {
        for kind in PieceKind::ALL {
            for r in 0..ROTATION_COUNT {
                assert!(get_shape(kind, Rotation::from_index(r)).contains(&(0, 0)));
            }
        }
    }

    #[test]
    fn test_cells_at_translates_offsets() {
        let cells = cells_at(&get_shape(PieceKind::I, Rotation::North), Position::new(5, 1));
        assert_eq!(
            cells,
            [
                Position::new(4, 1),
                Position::new(5, 1),
                Position::new(6, 1),
                Position::new(7, 1)
            ]
        );
    }
}
