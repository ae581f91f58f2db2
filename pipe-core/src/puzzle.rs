//! A generated and classified puzzle.

use crate::classify::{self, is_oriented, ENTRY_SIDE, EXIT_SIDE};
use crate::grid::{Node, NodeGrid, Position};
use crate::path::{self, GeneratedPath, Path};
use crate::piece::{Rotation, Shape, Side, Sides};
use crate::PuzzleError;
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A border cell just outside the grid, addressed with signed coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Port {
    /// -1 above the grid, `rows` below it.
    pub row: isize,
    pub col: isize,
}

/// A path piece as seen by a presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub position: Position,
    pub shape: Shape,
    /// Sides the piece must open to connect to its neighbors and ports.
    pub required_sides: Sides,
}

/// The frozen result of generating and classifying a pipe puzzle.
///
/// Nothing in a `Puzzle` changes after construction. The rotation each piece
/// currently has is owned by the caller (see [`crate::board::Board`]) and
/// passed in when asking whether the puzzle is solved.
///
/// The only constructor goes through classification, so the path is never
/// empty and consecutive cells are always adjacent.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Puzzle {
    grid: NodeGrid,
    path: Path,
    visited: usize,
}

impl Puzzle {
    /// Generates a path on a `rows` x `cols` grid and classifies its pieces.
    ///
    /// # Errors
    ///
    /// Propagates `PuzzleError` from path generation or classification.
    pub fn generate<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        rng: &mut R,
    ) -> Result<Self, PuzzleError> {
        let generated = path::generate(rows, cols, rng)?;
        Self::from_generated(generated)
    }

    /// Classifies an already generated path.
    ///
    /// # Errors
    ///
    /// Propagates `PuzzleError` from classification.
    pub fn from_generated(generated: GeneratedPath) -> Result<Self, PuzzleError> {
        let visited = generated.visited_count();
        let GeneratedPath { mut grid, path } = generated;
        classify::classify(&mut grid, &path)?;
        Ok(Self {
            grid,
            path,
            visited,
        })
    }

    /// Grid height.
    pub fn rows(&self) -> usize {
        self.grid.rows
    }

    /// Grid width.
    pub fn cols(&self) -> usize {
        self.grid.cols
    }

    /// The classified node arena, background cells included.
    pub fn grid(&self) -> &NodeGrid {
        &self.grid
    }

    /// Path cells from start to end.
    pub fn path(&self) -> &[Position] {
        &self.path
    }

    /// Number of path pieces.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Always false for a classified puzzle.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Number of cells the search entered while carving the path.
    pub fn visited_count(&self) -> usize {
        self.visited
    }

    /// The node at `pos`, or None out of bounds.
    pub fn node(&self, pos: Position) -> Option<&Node> {
        self.grid.get(pos)
    }

    /// Path pieces in path order.
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.path.iter().filter_map(|&pos| {
            let node = self.grid.get(pos)?;
            Some(Piece {
                position: pos,
                shape: node.shape?,
                required_sides: node.required_sides,
            })
        })
    }

    /// The piece at path index `index`.
    pub fn piece(&self, index: usize) -> Option<Piece> {
        let pos = *self.path.get(index)?;
        let node = self.grid.get(pos)?;
        Some(Piece {
            position: pos,
            shape: node.shape?,
            required_sides: node.required_sides,
        })
    }

    /// Path index of the piece at `pos`, if `pos` is on the path.
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        self.path.iter().position(|&p| p == pos)
    }

    /// The border cell above the start piece where the pipe enters.
    pub fn entry_port(&self) -> Port {
        step_outside(self.path[0], ENTRY_SIDE)
    }

    /// The border cell below the end piece where the pipe leaves.
    pub fn exit_port(&self) -> Port {
        step_outside(self.path[self.path.len() - 1], EXIT_SIDE)
    }

    /// A uniformly random rotation for every piece.
    pub fn scramble<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Rotation> {
        self.path
            .iter()
            .map(|_| Rotation::from_quarter_turns(rng.gen_range(0..4)))
            .collect()
    }

    /// For every piece, the first rotation that orients it.
    pub fn solution(&self) -> Vec<Rotation> {
        self.pieces()
            .map(|piece| {
                Rotation::ALL
                    .into_iter()
                    .find(|&r| is_oriented(piece.shape, r, piece.required_sides))
                    .unwrap_or_default()
            })
            .collect()
    }

    /// True if every piece is oriented under `rotations`, indexed by path
    /// position. Pieces without an entry count as unsolved.
    pub fn is_solved(&self, rotations: &[Rotation]) -> bool {
        is_puzzle_solved(self, rotations)
    }
}

fn step_outside(pos: Position, side: Side) -> Port {
    let (row, col) = (pos.row as isize, pos.col as isize);
    match side {
        Side::Top => Port { row: row - 1, col },
        Side::Bottom => Port { row: row + 1, col },
        Side::Left => Port { row, col: col - 1 },
        Side::Right => Port { row, col: col + 1 },
    }
}

/// True iff every piece of `puzzle` is oriented at `rotations[index]`.
///
/// Stops at the first misaligned piece. Pure; safe to call as often as the
/// host likes.
pub fn is_puzzle_solved(puzzle: &Puzzle, rotations: &[Rotation]) -> bool {
    rotations.len() >= puzzle.len()
        && puzzle
            .pieces()
            .zip(rotations)
            .all(|(piece, &rotation)| is_oriented(piece.shape, rotation, piece.required_sides))
}

/// [`is_puzzle_solved`] for continuous angles, snapped with `epsilon`.
pub fn is_puzzle_solved_degrees(puzzle: &Puzzle, degrees: &[f32], epsilon: f32) -> bool {
    degrees.len() >= puzzle.len()
        && puzzle.pieces().zip(degrees).all(|(piece, &angle)| {
            classify::is_oriented_degrees(piece.shape, angle, epsilon, piece.required_sides)
        })
}
