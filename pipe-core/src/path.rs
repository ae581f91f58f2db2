//! Randomized depth-first carving of the pipe path.

use crate::grid::{NodeGrid, Position};
use crate::piece::Side;
use crate::PuzzleError;
use log::{debug, info, trace};
use rand::Rng;

/// Ordered cells from the start (top edge) to the end (bottom edge).
pub type Path = Vec<Position>;

/// Order in which unvisited neighbors are collected before shuffling.
const SEARCH_ORDER: [Side; 4] = [Side::Bottom, Side::Left, Side::Right, Side::Top];

/// The node arena and the path found by one call to [`generate`].
#[derive(Debug, Clone)]
pub struct GeneratedPath {
    /// Every cell of the grid with its search flags.
    pub grid: NodeGrid,
    /// The successful search chain, start first.
    pub path: Path,
}

impl GeneratedPath {
    /// Number of cells the search entered, on the path or not.
    pub fn visited_count(&self) -> usize {
        self.grid.iter().filter(|node| node.visited).count()
    }
}

/// Carves a random simple path from a random top-edge cell to a random
/// bottom-edge cell of a `rows` x `cols` grid.
///
/// The start column is drawn before the end column. Search proceeds depth
/// first; at each newly entered cell its unvisited neighbors are shuffled and
/// tried in turn, backtracking out of dead ends. The first chain that reaches
/// the end cell becomes the path and its nodes are marked `on_path`.
///
/// All randomness comes from `rng`, so a seeded generator reproduces the
/// same path.
///
/// # Errors
///
/// Returns `PuzzleError::InvalidDimensions` if either dimension is zero.
pub fn generate<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    rng: &mut R,
) -> Result<GeneratedPath, PuzzleError> {
    if rows == 0 || cols == 0 {
        return Err(PuzzleError::InvalidDimensions { rows, cols });
    }

    let start = Position::new(0, rng.gen_range(0..cols));
    let end = Position::new(rows - 1, rng.gen_range(0..cols));
    debug!(
        "Carving {}x{} path from ({}, {}) to ({}, {})",
        rows, cols, start.row, start.col, end.row, end.col
    );

    let mut grid = NodeGrid::with_nodes(rows, cols);
    let path = random_search(&mut grid, start, end, rng)?;
    for &pos in &path {
        if let Some(node) = grid.get_mut(pos) {
            node.on_path = true;
        }
    }

    let generated = GeneratedPath { grid, path };
    info!(
        "Generated path of {} cells ({} visited) on a {}x{} grid",
        generated.path.len(),
        generated.visited_count(),
        rows,
        cols
    );
    Ok(generated)
}

/// A cell on the search stack with its shuffled candidates.
struct Frame {
    position: Position,
    candidates: Vec<Position>,
    next: usize,
}

impl Frame {
    /// Marks `position` visited and snapshots its unvisited neighbors.
    fn enter<R: Rng + ?Sized>(grid: &mut NodeGrid, position: Position, rng: &mut R) -> Self {
        if let Some(node) = grid.get_mut(position) {
            node.visited = true;
        }
        let mut candidates: Vec<Position> = SEARCH_ORDER
            .iter()
            .filter_map(|&side| position.neighbor(side, grid.rows, grid.cols))
            .filter(|&pos| grid.get(pos).is_some_and(|node| !node.visited))
            .collect();
        shuffle(&mut candidates, rng);
        trace!(
            "Entered ({}, {}) with candidates {:?}",
            position.row,
            position.col,
            candidates
        );
        Self {
            position,
            candidates,
            next: 0,
        }
    }
}

/// Fisher–Yates: slot `i` takes a uniform pick from `i..len`.
fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in 0..items.len().saturating_sub(1) {
        let j = rng.gen_range(i..items.len());
        items.swap(i, j);
    }
}

/// Depth-first search over an explicit stack. On success the stack holds
/// exactly the chain from `start` to the cell adjacent to `goal`.
fn random_search<R: Rng + ?Sized>(
    grid: &mut NodeGrid,
    start: Position,
    goal: Position,
    rng: &mut R,
) -> Result<Path, PuzzleError> {
    if start == goal {
        if let Some(node) = grid.get_mut(start) {
            node.visited = true;
        }
        return Ok(vec![start]);
    }

    let mut stack = vec![Frame::enter(grid, start, rng)];
    while let Some(frame) = stack.last_mut() {
        let Some(&next) = frame.candidates.get(frame.next) else {
            // Dead end.
            stack.pop();
            continue;
        };
        frame.next += 1;

        // Entered through a sibling branch since this frame was created.
        if grid.get(next).map_or(true, |node| node.visited) {
            continue;
        }

        if next == goal {
            if let Some(node) = grid.get_mut(goal) {
                node.visited = true;
            }
            let mut path: Path = stack.iter().map(|frame| frame.position).collect();
            path.push(goal);
            return Ok(path);
        }

        let child = Frame::enter(grid, next, rng);
        stack.push(child);
    }

    Err(PuzzleError::SearchExhausted {
        row: goal.row,
        col: goal.col,
    })
}
