//! Tetromino definitions and shapes
//!
//! All 7 tetrominoes with their rotation states. Each state is a 4x4
//! occupancy pattern, row 0 at the top. States are cyclic: rotating right
//! advances to the next state, rotating left goes back one.

use serde::{Deserialize, Serialize};

/// Side length of a rotation pattern
pub const SHAPE_SIZE: usize = 4;

/// One rotation state: `true` marks an occupied cell
pub type Shape = [[bool; SHAPE_SIZE]; SHAPE_SIZE];

/// Build a pattern from four rows of `#` (filled) and `.` (empty)
const fn pattern(rows: [&[u8; SHAPE_SIZE]; SHAPE_SIZE]) -> Shape {
    let mut shape = [[false; SHAPE_SIZE]; SHAPE_SIZE];
    let mut row = 0;
    while row < SHAPE_SIZE {
        let mut col = 0;
        while col < SHAPE_SIZE {
            shape[row][col] = rows[row][col] == b'#';
            col += 1;
        }
        row += 1;
    }
    shape
}

const I_STATES: [Shape; 2] = [
    pattern([b"####", b"....", b"....", b"...."]),
    pattern([b".#..", b".#..", b".#..", b".#.."]),
];

const O_STATES: [Shape; 1] = [pattern([b".##.", b".##.", b"....", b"...."])];

// Clockwise order
const T_STATES: [Shape; 4] = [
    pattern([b"###.", b".#..", b"....", b"...."]),
    pattern([b"..#.", b".##.", b"..#.", b"...."]),
    pattern([b"....", b".#..", b"###.", b"...."]),
    pattern([b"#...", b"##..", b"#...", b"...."]),
];

const L_STATES: [Shape; 4] = [
    pattern([b"###.", b"#...", b"....", b"...."]),
    pattern([b".##.", b"..#.", b"..#.", b"...."]),
    pattern([b"....", b"..#.", b"###.", b"...."]),
    pattern([b"#...", b"#...", b"##..", b"...."]),
];

const J_STATES: [Shape; 4] = [
    pattern([b"###.", b"..#.", b"....", b"...."]),
    pattern([b"..#.", b"..#.", b".##.", b"...."]),
    pattern([b"....", b"#...", b"###.", b"...."]),
    pattern([b"##..", b"#...", b"#...", b"...."]),
];

const S_STATES: [Shape; 2] = [
    pattern([b".##.", b"##..", b"....", b"...."]),
    pattern([b"#...", b"##..", b".#..", b"...."]),
];

const Z_STATES: [Shape; 2] = [
    pattern([b"##..", b".##.", b"....", b"...."]),
    pattern([b".#..", b"##..", b"#...", b"...."]),
];

/// The 7 tetromino kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TetrominoKind {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
}

impl TetrominoKind {
    /// Every kind, in table order
    pub const ALL: [TetrominoKind; 7] = [
        TetrominoKind::I,
        TetrominoKind::O,
        TetrominoKind::T,
        TetrominoKind::L,
        TetrominoKind::J,
        TetrominoKind::S,
        TetrominoKind::Z,
    ];

    /// Get all tetromino kinds for randomization
    pub fn all() -> [TetrominoKind; 7] {
        Self::ALL
    }

    /// The ordered rotation states of this kind
    pub fn rotations(&self) -> &'static [Shape] {
        match self {
            TetrominoKind::I => &I_STATES,
            TetrominoKind::O => &O_STATES,
            TetrominoKind::T => &T_STATES,
            TetrominoKind::L => &L_STATES,
            TetrominoKind::J => &J_STATES,
            TetrominoKind::S => &S_STATES,
            TetrominoKind::Z => &Z_STATES,
        }
    }

    pub fn rotation_count(&self) -> usize {
        self.rotations().len()
    }

    /// Pattern for a rotation index, wrapped into range
    pub fn shape(&self, rotation: usize) -> &'static Shape {
        let states = self.rotations();
        &states[rotation % states.len()]
    }

    /// Letter used to name the kind
    pub fn letter(&self) -> char {
        match self {
            TetrominoKind::I => 'I',
            TetrominoKind::O => 'O',
            TetrominoKind::T => 'T',
            TetrominoKind::L => 'L',
            TetrominoKind::J => 'J',
            TetrominoKind::S => 'S',
            TetrominoKind::Z => 'Z',
        }
    }
}

/// Occupied (row, col) offsets of a pattern, relative to its top-left corner
pub fn occupied(shape: &Shape) -> impl Iterator<Item = (i32, i32)> + Clone + '_ {
    shape.iter().enumerate().flat_map(|(row, cells)| {
        cells
            .iter()
            .enumerate()
            .filter(|(_, filled)| **filled)
            .map(move |(col, _)| (row as i32, col as i32))
    })
}

/// Direction for a one-step translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    /// (row, col) delta of one step
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
        }
    }
}

/// Direction for rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    /// Previous state in the table
    Left,
    /// Next state in the table
    Right,
}

impl RotationDirection {
    /// Rotation index reached from `current` for a kind with `count` states
    pub fn apply(&self, current: usize, count: usize) -> usize {
        match self {
            RotationDirection::Right => (current + 1) % count,
            RotationDirection::Left => (current + count - 1) % count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_state_has_four_cells() {
        for kind in TetrominoKind::all() {
            assert!(kind.rotation_count() >= 1);
            for shape in kind.rotations() {
                assert_eq!(occupied(shape).count(), 4, "{kind:?}");
            }
        }
    }

    #[test]
    fn test_rotation_counts() {
        assert_eq!(TetrominoKind::I.rotation_count(), 2);
        assert_eq!(TetrominoKind::O.rotation_count(), 1);
        assert_eq!(TetrominoKind::T.rotation_count(), 4);
        assert_eq!(TetrominoKind::L.rotation_count(), 4);
        assert_eq!(TetrominoKind::J.rotation_count(), 4);
        assert_eq!(TetrominoKind::S.rotation_count(), 2);
        assert_eq!(TetrominoKind::Z.rotation_count(), 2);
    }

    #[test]
    fn test_i_spawn_state_is_top_row() {
        let cells: Vec<_> = occupied(TetrominoKind::I.shape(0)).collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (0, 2), (0, 3)]);
    }

    #[test]
    fn test_rotation_wraps() {
        assert_eq!(RotationDirection::Right.apply(3, 4), 0);
        assert_eq!(RotationDirection::Left.apply(0, 4), 3);
        assert_eq!(RotationDirection::Left.apply(0, 1), 0);
        assert_eq!(RotationDirection::Right.apply(1, 2), 0);
    }

    #[test]
    fn test_shape_index_wraps() {
        assert_eq!(TetrominoKind::S.shape(2), TetrominoKind::S.shape(0));
    }
}
