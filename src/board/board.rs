//! Board state with incrementally maintained line aggregates
//!
//! The board owns the 64 cell owners and one status record per line. Both
//! are updated incrementally on every [`Board::apply`]/[`Board::undo`] —
//! a line is never rescanned during play. Undo must mirror apply in exact
//! reverse order (stack discipline); the move history enforces that.

use thiserror::Error;

use super::{Coord, Geometry, LineState, Player, CELL_COUNT};

/// Fatal board-consistency violations.
///
/// These can only arise from an implementation bug (e.g. unpaired
/// apply/undo), never from normal play. [`Board::validate`] detects them by
/// a full rescan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("history length {history} does not match occupied cell count {occupied}")]
    HistoryDesync { history: usize, occupied: usize },
    #[error("line {line} aggregate disagrees with its member cells")]
    LineAggregate { line: usize },
    #[error("board reports both a win and a draw")]
    ConflictingTerminal,
}

/// Incrementally maintained per-line counters.
#[derive(Debug, Clone, Copy, Default)]
struct LineStatus {
    selected: u8,
    a: u8,
    b: u8,
}

impl LineStatus {
    #[inline]
    fn state(self) -> LineState {
        match (self.a, self.b) {
            (0, 0) => LineState::Open,
            (_, 0) => LineState::Owned(Player::A),
            (0, _) => LineState::Owned(Player::B),
            _ => LineState::Mixed,
        }
    }
}

/// Full game state: cell owners, line aggregates, turn flag, move history
/// and the derived terminal flags.
#[derive(Debug, Clone)]
pub struct Board {
    geometry: Geometry,
    owners: [Option<Player>; CELL_COUNT],
    lines: Vec<LineStatus>,
    history: Vec<Coord>,
    current: Player,
    winner: Option<Player>,
    draw: bool,
    /// Count of lines currently in the `Mixed` state; the game is drawn
    /// once every line is mixed.
    mixed: usize,
}

impl Board {
    /// New empty board over the standard 76-line geometry, player A to move.
    pub fn new() -> Self {
        Self::with_geometry(Geometry::standard())
    }

    /// New empty board over an externally supplied geometry.
    pub fn with_geometry(geometry: Geometry) -> Self {
        let lines = vec![LineStatus::default(); geometry.line_count()];
        Self {
            geometry,
            owners: [None; CELL_COUNT],
            lines,
            history: Vec::with_capacity(CELL_COUNT),
            current: Player::A,
            winner: None,
            draw: false,
            mixed: 0,
        }
    }

    /// Claim `cell` for the player whose turn it is.
    ///
    /// Returns `false` without mutating anything if the game is already won,
    /// the coordinate is not on the board, or the cell is already owned.
    /// Callers probe speculatively, so a rejected move is not an error.
    pub fn apply(&mut self, cell: Coord) -> bool {
        if self.winner.is_some() || !cell.in_bounds() {
            return false;
        }
        let idx = cell.to_index();
        if self.owners[idx].is_some() {
            return false;
        }

        let player = self.current;
        self.owners[idx] = Some(player);
        for k in 0..self.geometry.lines_through(cell).len() {
            let li = self.geometry.lines_through(cell)[k] as usize;
            let line = &mut self.lines[li];
            let was_mixed = line.state() == LineState::Mixed;
            line.selected += 1;
            match player {
                Player::A => line.a += 1,
                Player::B => line.b += 1,
            }
            if !was_mixed && line.state() == LineState::Mixed {
                self.mixed += 1;
            }
            if line.selected == 4 {
                if let LineState::Owned(p) = line.state() {
                    self.winner = Some(p);
                }
            }
        }
        if self.winner.is_none() && self.mixed == self.lines.len() {
            self.draw = true;
        }
        self.history.push(cell);
        self.current = player.opponent();
        true
    }

    /// Undo the most recent move, restoring the exact prior state.
    ///
    /// Returns the cell that was cleared, or `None` if there is no history.
    pub fn undo(&mut self) -> Option<Coord> {
        let cell = self.history.pop()?;
        let idx = cell.to_index();
        let player = self.owners[idx]
            .take()
            .expect("undo: history references an unowned cell");

        for k in 0..self.geometry.lines_through(cell).len() {
            let li = self.geometry.lines_through(cell)[k] as usize;
            let line = &mut self.lines[li];
            let was_mixed = line.state() == LineState::Mixed;
            line.selected -= 1;
            match player {
                Player::A => line.a -= 1,
                Player::B => line.b -= 1,
            }
            if was_mixed && line.state() != LineState::Mixed {
                self.mixed -= 1;
            }
        }

        // Undo can only move from a terminal state back to a live one.
        self.winner = None;
        self.draw = false;
        self.current = player;
        Some(cell)
    }

    /// Apply `cell`, run `f`, then undo — on every path out of `f`.
    ///
    /// This is the trial-move primitive the search recursion is built on;
    /// it guarantees the apply/undo pairing that keeps the line aggregates
    /// consistent. Returns `None` (and runs nothing) if the move is illegal.
    pub fn trial<T>(&mut self, cell: Coord, f: impl FnOnce(&mut Board) -> T) -> Option<T> {
        if !self.apply(cell) {
            return None;
        }
        let value = f(self);
        let undone = self.undo();
        debug_assert_eq!(undone, Some(cell));
        Some(value)
    }

    /// All unowned cells, in construction (index) order.
    ///
    /// The order is deliberately stable; any tie-break randomness is
    /// injected by the ranking layer, not here.
    pub fn open_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.owners
            .iter()
            .enumerate()
            .filter(|(_, owner)| owner.is_none())
            .map(|(idx, _)| Coord::from_index(idx))
    }

    /// Owner of a cell, or `None` while it is open.
    #[inline]
    pub fn owner(&self, cell: Coord) -> Option<Player> {
        self.owners[cell.to_index()]
    }

    /// Aggregate state of the line at `index` into [`Geometry::lines`].
    #[inline]
    pub fn line_state(&self, index: usize) -> LineState {
        self.lines[index].state()
    }

    /// Number of owned cells on the line at `index`.
    #[inline]
    pub fn line_selected(&self, index: usize) -> u8 {
        self.lines[index].selected
    }

    #[inline]
    pub fn current_player(&self) -> Player {
        self.current
    }

    /// Whether some line has been completed by a single player.
    #[inline]
    pub fn is_won(&self) -> bool {
        self.winner.is_some()
    }

    /// The player who completed a line, if the game is won.
    #[inline]
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Whether every line is mixed with no win: the cat's game.
    #[inline]
    pub fn is_draw(&self) -> bool {
        self.draw
    }

    #[inline]
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// The applied moves, oldest first.
    #[inline]
    pub fn history(&self) -> &[Coord] {
        &self.history
    }

    #[inline]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Full-rescan consistency check of the incremental state.
    ///
    /// Verifies that every line's counters agree with its member cells,
    /// that the history length matches the occupied-cell count, and that
    /// the terminal flags are mutually exclusive.
    pub fn validate(&self) -> Result<(), StateError> {
        let occupied = self.owners.iter().filter(|o| o.is_some()).count();
        if occupied != self.history.len() {
            return Err(StateError::HistoryDesync {
                history: self.history.len(),
                occupied,
            });
        }
        for (li, line) in self.geometry.lines().iter().enumerate() {
            let mut expected = LineStatus::default();
            for cell in line {
                match self.owners[cell.to_index()] {
                    Some(Player::A) => expected.a += 1,
                    Some(Player::B) => expected.b += 1,
                    None => continue,
                }
                expected.selected += 1;
            }
            let actual = self.lines[li];
            if expected.selected != actual.selected
                || expected.a != actual.a
                || expected.b != actual.b
            {
                return Err(StateError::LineAggregate { line: li });
            }
        }
        if self.winner.is_some() && self.draw {
            return Err(StateError::ConflictingTerminal);
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    /// Four 4×4 layers, one per z slice.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in 1..=4u8 {
            for z in 1..=4u8 {
                for x in 1..=4u8 {
                    let mark = match self.owner(Coord::new(x, y, z)) {
                        Some(Player::A) => 'X',
                        Some(Player::B) => 'O',
                        None => '_',
                    };
                    write!(f, "{mark} ")?;
                }
                write!(f, "  ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
