use serde::Serialize;

use crate::pieces::{cells_at, get_shape};
use crate::types::{PieceKind, Position, Rotation, FIELD_HEIGHT, FIELD_WIDTH, SPAWN_POSITION};

const WIDTH: usize = FIELD_WIDTH as usize;
const HEIGHT: usize = FIELD_HEIGHT as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PieceSnapshot {
    pub kind: &'static str,
    /// Field value this piece writes when it locks (1..=7)
    pub value: u8,
    pub rotation: u8,
}

impl PieceSnapshot {
    pub fn new(kind: PieceKind, rotation: Rotation) -> Self {
        Self {
            kind: kind.as_str(),
            value: kind.cell_value(),
            rotation: rotation.index() as u8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    pub board: [[u8; WIDTH]; HEIGHT],
    pub current: PieceSnapshot,
    pub next: PieceSnapshot,
    pub x: i8,
    pub y: i8,
    /// Absolute `(x, y)` cells of the falling piece, possibly above the field
    pub cells: [(i8, i8); 4],
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub interval_count: u64,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }

    pub(crate) fn set_active(&mut self, kind: PieceKind, rotation: Rotation, pos: Position) {
        self.current = PieceSnapshot::new(kind, rotation);
        self.x = pos.x;
        self.y = pos.y;
        self.cells = cells_at(&get_shape(kind, rotation), pos).map(|c| (c.x, c.y));
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[0u8; WIDTH]; HEIGHT],
            current: PieceSnapshot::new(PieceKind::O, Rotation::North),
            next: PieceSnapshot::new(PieceKind::O, Rotation::North),
            x: 0,
            y: 0,
            cells: [(0, 0); 4],
            score: 0,
            level: 0,
            lines: 0,
            interval_count: 0,
            game_over: false,
        };
        s.set_active(PieceKind::O, Rotation::North, SPAWN_POSITION);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_shows_square_at_spawn() {
        let snap = GameSnapshot::default();
        assert_eq!(snap.current.kind, "o");
        assert_eq!(snap.current.value, 1);
        assert_eq!((snap.x, snap.y), (5, 1));
        assert_eq!(snap.cells, [(5, 1), (5, 0), (6, 0), (6, 1)]);
        assert!(snap.playable());
    }

    #[test]
    fn set_active_follows_rotation() {
        let mut snap = GameSnapshot::default();
        snap.set_active(PieceKind::I, Rotation::East, Position::new(0, 2));
        assert_eq!(snap.current.rotation, 1);
        assert_eq!(snap.cells, [(0, 0), (0, 1), (0, 2), (0, 3)]);
    }

    #[test]
    fn serializes_kind_as_name() {
        let snap = GameSnapshot::default();
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"kind\":\"o\""));
        assert!(json.contains("\"game_over\":false"));
    }
}
