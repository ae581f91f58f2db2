//! Play state for a puzzle: the current rotation of every piece.

use crate::grid::Position;
use crate::piece::Rotation;
use crate::puzzle::Puzzle;
use crate::PuzzleError;
use log::debug;
use rand::Rng;

/// Current rotations of a puzzle's pieces, indexed by path position.
///
/// The puzzle itself stays immutable; a board is the mutable layer a
/// presentation loop turns pieces on and asks about.
#[derive(Debug, Clone)]
pub struct Board<'a> {
    puzzle: &'a Puzzle,
    rotations: Vec<Rotation>,
}

impl<'a> Board<'a> {
    /// A board with every piece randomly rotated.
    pub fn scrambled<R: Rng + ?Sized>(puzzle: &'a Puzzle, rng: &mut R) -> Self {
        Self {
            puzzle,
            rotations: puzzle.scramble(rng),
        }
    }

    /// A board with the given rotations.
    ///
    /// # Errors
    ///
    /// Returns `PuzzleError::RotationCountMismatch` unless there is exactly
    /// one rotation per piece.
    pub fn from_rotations(
        puzzle: &'a Puzzle,
        rotations: Vec<Rotation>,
    ) -> Result<Self, PuzzleError> {
        if rotations.len() != puzzle.len() {
            return Err(PuzzleError::RotationCountMismatch {
                expected: puzzle.len(),
                found: rotations.len(),
            });
        }
        Ok(Self { puzzle, rotations })
    }

    /// The puzzle being played.
    pub fn puzzle(&self) -> &'a Puzzle {
        self.puzzle
    }

    /// Current rotations in path order.
    pub fn rotations(&self) -> &[Rotation] {
        &self.rotations
    }

    /// Current rotation of piece `index`.
    pub fn rotation(&self, index: usize) -> Option<Rotation> {
        self.rotations.get(index).copied()
    }

    /// Turns piece `index` a quarter turn (+90 degrees) and returns its new
    /// rotation, or None if there is no such piece.
    pub fn rotate(&mut self, index: usize) -> Option<Rotation> {
        let rotation = self.rotations.get_mut(index)?;
        *rotation = rotation.rotate_ccw();
        debug!("Rotated piece {} to {:?}", index, rotation);
        Some(*rotation)
    }

    /// [`Board::rotate`] addressed by grid position. Cells off the path are
    /// ignored.
    pub fn rotate_at(&mut self, pos: Position) -> Option<Rotation> {
        let index = self.puzzle.index_of(pos)?;
        self.rotate(index)
    }

    /// True once every piece is oriented.
    pub fn is_solved(&self) -> bool {
        self.puzzle.is_solved(&self.rotations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rejects_wrong_rotation_count() {
        let puzzle = Puzzle::generate(3, 3, &mut StepRng::new(0, 0)).unwrap();
        let err = Board::from_rotations(&puzzle, vec![Rotation::R0]).unwrap_err();
        assert!(matches!(
            err,
            PuzzleError::RotationCountMismatch {
                expected: 3,
                found: 1
            }
        ));
    }

    #[test]
    fn turning_pieces_until_solved() {
        let puzzle = Puzzle::generate(6, 6, &mut StdRng::seed_from_u64(21)).unwrap();
        let mut board = Board::scrambled(&puzzle, &mut StdRng::seed_from_u64(22));

        // At most three quarter turns bring each piece to its first solution bucket.
        for (index, target) in puzzle.solution().into_iter().enumerate() {
            for _ in 0..4 {
                if board.rotation(index) == Some(target) {
                    break;
                }
                board.rotate(index);
            }
        }
        assert!(board.is_solved());
    }

    #[test]
    fn rotate_at_ignores_background_cells() {
        let puzzle = Puzzle::generate(3, 3, &mut StepRng::new(0, 0)).unwrap();
        let mut board =
            Board::from_rotations(&puzzle, vec![Rotation::R0; puzzle.len()]).unwrap();
        assert!(board.is_solved());
        assert_eq!(board.rotate_at(Position::new(1, 2)), None);
        assert_eq!(board.rotate_at(Position::new(1, 0)), Some(Rotation::R90));
        assert!(!board.is_solved());
        assert_eq!(board.rotate(7), None);
    }
}
