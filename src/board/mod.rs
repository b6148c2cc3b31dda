//! Board representation for Qubic (4×4×4 three-dimensional tic-tac-toe)

pub mod board;
pub mod geometry;


// Re-exports
pub use board::{Board, StateError};
pub use geometry::{Geometry, GeometryError};

/// Cube edge length
pub const EDGE: usize = 4;
/// Total number of cells (4³)
pub const CELL_COUNT: usize = 64;
/// Number of winning lines in the standard geometry
pub const LINE_COUNT: usize = 76;

/// The two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    A,
    B,
}

impl Player {
    /// Get the other player
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }
}

/// Derived ownership classification of a line.
///
/// A line is `Open` while untouched, `Owned(p)` while only `p` has claimed
/// cells on it, and `Mixed` once both players appear on it. A mixed line can
/// never be completed by either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineState {
    Open,
    Owned(Player),
    Mixed,
}

/// Cell coordinates inside the cube, each component in `1..=4`.
///
/// Identity is by coordinates only; ownership lives on the [`Board`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

impl Coord {
    #[inline]
    pub fn new(x: u8, y: u8, z: u8) -> Self {
        debug_assert!(Coord::is_valid(x as i32, y as i32, z as i32));
        Self { x, y, z }
    }

    /// Check that all three components lie in `1..=4`.
    #[inline]
    pub fn is_valid(x: i32, y: i32, z: i32) -> bool {
        (1..=EDGE as i32).contains(&x)
            && (1..=EDGE as i32).contains(&y)
            && (1..=EDGE as i32).contains(&z)
    }

    /// Whether this coordinate names a cell of the cube.
    #[inline]
    pub fn in_bounds(self) -> bool {
        Coord::is_valid(self.x as i32, self.y as i32, self.z as i32)
    }

    /// Dense index in `0..64`, z-major then y then x.
    #[inline]
    pub fn to_index(self) -> usize {
        (self.z as usize - 1) * EDGE * EDGE + (self.y as usize - 1) * EDGE + (self.x as usize - 1)
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        debug_assert!(idx < CELL_COUNT);
        Self {
            x: (idx % EDGE) as u8 + 1,
            y: (idx / EDGE % EDGE) as u8 + 1,
            z: (idx / (EDGE * EDGE)) as u8 + 1,
        }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{},{})", self.x, self.y, self.z)
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}
