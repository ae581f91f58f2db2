//! Piece classification and orientation checks.
//!
//! Classification derives, for every path cell, the sides through which its
//! pipe must connect and the piece shape that provides them. The orientation
//! check compares a piece's open sides at a given rotation against those
//! required sides.

use crate::grid::{NodeGrid, Position};
use crate::piece::{Rotation, Shape, Side, Sides};
use crate::PuzzleError;
use log::{debug, error};

/// Border side through which the pipe enters the start cell.
pub const ENTRY_SIDE: Side = Side::Top;
/// Border side through which the pipe leaves the end cell.
pub const EXIT_SIDE: Side = Side::Bottom;

/// Annotates every node of `path` with its required sides and shape.
///
/// A side is required when the grid neighbor on that side is itself on the
/// path. The first node additionally requires [`ENTRY_SIDE`] and the last
/// node [`EXIT_SIDE`], the fixed ports on the grid border. Any previous
/// annotation is discarded, so classifying twice gives the same result.
///
/// # Errors
///
/// * `PuzzleError::EmptyPath` if `path` has no cells.
/// * `PuzzleError::DisconnectedPath` if two consecutive cells are not adjacent.
/// * `PuzzleError::NotOnPath` if a path position is out of bounds or its node
///   is not flagged `on_path`.
/// * `PuzzleError::InvariantViolation` if a node ends up with fewer than two
///   required sides.
pub fn classify(grid: &mut NodeGrid, path: &[Position]) -> Result<(), PuzzleError> {
    if path.is_empty() {
        error!("Cannot classify an empty path");
        return Err(PuzzleError::EmptyPath);
    }
    if let Some(pair) = path.windows(2).find(|pair| !pair[0].is_adjacent(pair[1])) {
        error!(
            "Path jumps from ({}, {}) to ({}, {})",
            pair[0].row, pair[0].col, pair[1].row, pair[1].col
        );
        return Err(PuzzleError::DisconnectedPath {
            row: pair[0].row,
            col: pair[0].col,
        });
    }

    let last = path.len() - 1;
    for (index, &pos) in path.iter().enumerate() {
        if !grid.is_on_path(pos) {
            error!("Path cell ({}, {}) is not marked on path", pos.row, pos.col);
            return Err(PuzzleError::NotOnPath {
                row: pos.row,
                col: pos.col,
            });
        }

        let mut required = Sides::EMPTY;
        for side in Side::ALL {
            if pos
                .neighbor(side, grid.rows, grid.cols)
                .is_some_and(|neighbor| grid.is_on_path(neighbor))
            {
                required.insert(side);
            }
        }
        if index == 0 {
            required.insert(ENTRY_SIDE);
        }
        if index == last {
            required.insert(EXIT_SIDE);
        }

        let shape = shape_for(required).ok_or_else(|| {
            error!(
                "Path cell ({}, {}) has {} required sides {:?}",
                pos.row,
                pos.col,
                required.len(),
                required
            );
            PuzzleError::InvariantViolation {
                row: pos.row,
                col: pos.col,
                sides: required.len(),
            }
        })?;

        if let Some(node) = grid.get_mut(pos) {
            node.required_sides = required;
            node.shape = Some(shape);
        }
        debug!(
            "Classified ({}, {}) as {} with {:?}",
            pos.row, pos.col, shape, required
        );
    }
    Ok(())
}

/// The shape able to open exactly `required`, or None for fewer than two sides.
pub fn shape_for(required: Sides) -> Option<Shape> {
    match required.len() {
        4 => Some(Shape::Cross),
        3 => Some(Shape::TJunction),
        2 if required.is_opposite_pair() => Some(Shape::Straight),
        2 => Some(Shape::Corner),
        _ => None,
    }
}

/// True if `shape` turned to `rotation` opens exactly the `required` sides.
pub fn is_oriented(shape: Shape, rotation: Rotation, required: Sides) -> bool {
    shape.sides_at(rotation) == required
}

/// [`is_oriented`] for a continuous angle in degrees.
///
/// The angle is snapped to a rotation bucket with the caller's `epsilon`;
/// an angle outside every bucket (a piece still turning) is never oriented.
pub fn is_oriented_degrees(shape: Shape, degrees: f32, epsilon: f32, required: Sides) -> bool {
    Rotation::from_degrees(degrees, epsilon)
        .is_some_and(|rotation| is_oriented(shape, rotation, required))
}
