//! Core library for the pipe puzzle generator.
//! Defines the grid model, path carving, piece classification and the
//! orientation checks a game layer uses to decide when the pipe is connected.

use thiserror::Error;

/// Play state: current piece rotations.
pub mod board;
/// Required sides, shapes and orientation validity.
pub mod classify;
/// Generic 2D grid and the puzzle node arena.
pub mod grid;
/// Randomized depth-first path carving.
pub mod path;
/// Sides, side sets, shapes and rotation buckets.
pub mod piece;
/// Generated and classified puzzles.
pub mod puzzle;

// Re-export core public items

pub use crate::board::Board;
pub use crate::classify::{classify, is_oriented, is_oriented_degrees};
pub use crate::grid::{Grid, Node, NodeGrid, Position};
pub use crate::path::{generate, GeneratedPath, Path};
pub use crate::piece::{Rotation, Shape, Side, Sides, DEFAULT_EPSILON};
pub use crate::puzzle::{is_puzzle_solved, is_puzzle_solved_degrees, Piece, Port, Puzzle};

/// Errors that can occur while generating or classifying a puzzle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    /// A grid needs at least one row and one column.
    #[error("Invalid grid dimensions {rows}x{cols}: both must be at least 1")]
    InvalidDimensions { rows: usize, cols: usize },
    /// A path cell ended up with a number of required sides no pipe piece has.
    /// Indicates an inconsistent path, not a recoverable condition.
    #[error("Invariant violation: cell ({row}, {col}) requires {sides} sides")]
    InvariantViolation { row: usize, col: usize, sides: usize },
    /// Classification was handed a path without cells.
    #[error("Path is empty")]
    EmptyPath,
    /// Two consecutive path cells are not one step apart.
    #[error("Path breaks between ({row}, {col}) and the next cell")]
    DisconnectedPath { row: usize, col: usize },
    /// A position handed to classification is not flagged as on the path.
    #[error("Cell ({row}, {col}) is not on the path")]
    NotOnPath { row: usize, col: usize },
    /// The search ran out of cells before reaching the end cell.
    #[error("Search exhausted without reaching ({row}, {col})")]
    SearchExhausted { row: usize, col: usize },
    /// A rotation list does not line up with the puzzle's pieces.
    #[error("Expected {expected} rotations, found {found}")]
    RotationCountMismatch { expected: usize, found: usize },
}
