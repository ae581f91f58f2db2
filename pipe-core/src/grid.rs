use crate::piece::{Shape, Side, Sides};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A cell coordinate. Row 0 is the top edge of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Creates a position from its row and column.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the coordinate one step towards `side`, or None if that step
    /// would leave a `rows` x `cols` grid.
    pub fn neighbor(self, side: Side, rows: usize, cols: usize) -> Option<Self> {
        match side {
            Side::Top => self.row.checked_sub(1).map(|row| Self::new(row, self.col)),
            Side::Bottom => (self.row + 1 < rows).then(|| Self::new(self.row + 1, self.col)),
            Side::Left => self.col.checked_sub(1).map(|col| Self::new(self.row, col)),
            Side::Right => (self.col + 1 < cols).then(|| Self::new(self.row, self.col + 1)),
        }
    }

    /// True if `other` is exactly one horizontal or vertical step away.
    pub fn is_adjacent(self, other: Self) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

/// Generic row-major 2D grid.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grid<T> {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    pub(crate) data: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    /// Creates a new grid with the given dimensions, initialized with default values.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![T::default(); rows * cols],
        }
    }
}

impl<T> Grid<T> {
    /// Creates a grid whose cells are produced by `init(position)`.
    pub fn from_fn(rows: usize, cols: usize, mut init: impl FnMut(Position) -> T) -> Self {
        let data = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Position::new(row, col)))
            .map(&mut init)
            .collect();
        Self { rows, cols, data }
    }

    /// Returns an immutable reference to the element at `pos`,
    /// or None if the position is out of bounds.
    pub fn get(&self, pos: Position) -> Option<&T> {
        self.index(pos).and_then(|idx| self.data.get(idx))
    }

    /// Returns a mutable reference to the element at `pos`,
    /// or None if the position is out of bounds.
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        self.index(pos).and_then(move |idx| self.data.get_mut(idx))
    }

    /// Iterates over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True for a grid with zero rows or columns.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if pos.row < self.rows && pos.col < self.cols {
            Some(pos.row * self.cols + pos.col)
        } else {
            None
        }
    }
}

/// One cell of the puzzle grid.
///
/// `visited` and `on_path` are written by the path search; `required_sides`
/// and `shape` are filled in by classification and only meaningful for path
/// nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    pub position: Position,
    /// Entered by the search at some point.
    pub visited: bool,
    /// Part of the final path.
    pub on_path: bool,
    pub required_sides: Sides,
    /// None for background cells.
    pub shape: Option<Shape>,
}

impl Node {
    /// An unvisited, unclassified node.
    pub fn new(position: Position) -> Self {
        Self {
            position,
            visited: false,
            on_path: false,
            required_sides: Sides::EMPTY,
            shape: None,
        }
    }
}

// Type alias for the node arena owned by a single generation
pub type NodeGrid = Grid<Node>;

impl NodeGrid {
    /// Allocates a fresh, unvisited node for every cell.
    pub fn with_nodes(rows: usize, cols: usize) -> Self {
        Self::from_fn(rows, cols, Node::new)
    }

    /// True if `pos` is in bounds and its node lies on the path.
    pub fn is_on_path(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(|node| node.on_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbor_respects_bounds() {
        let corner = Position::new(0, 0);
        assert_eq!(corner.neighbor(Side::Top, 3, 3), None);
        assert_eq!(corner.neighbor(Side::Left, 3, 3), None);
        assert_eq!(corner.neighbor(Side::Bottom, 3, 3), Some(Position::new(1, 0)));
        assert_eq!(corner.neighbor(Side::Right, 3, 3), Some(Position::new(0, 1)));

        let far = Position::new(2, 2);
        assert_eq!(far.neighbor(Side::Bottom, 3, 3), None);
        assert_eq!(far.neighbor(Side::Right, 3, 3), None);
    }

    #[test]
    fn adjacency_excludes_diagonals() {
        let p = Position::new(1, 1);
        assert!(p.is_adjacent(Position::new(0, 1)));
        assert!(p.is_adjacent(Position::new(1, 2)));
        assert!(!p.is_adjacent(Position::new(2, 2)));
        assert!(!p.is_adjacent(p));
    }

    #[test]
    fn node_grid_positions_match_cells() {
        let grid = NodeGrid::with_nodes(2, 3);
        assert_eq!(grid.len(), 6);
        for row in 0..2 {
            for col in 0..3 {
                let pos = Position::new(row, col);
                let node = grid.get(pos).unwrap();
                assert_eq!(node.position, pos);
                assert!(!node.visited);
                assert!(!node.on_path);
            }
        }
    }
}
