use crate::error::AppError;
use pipe_core::{Port, Position, Puzzle, Rotation, Shape, Side};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// A generated puzzle together with the scrambled rotations it was dealt.
#[derive(Debug, Clone)]
pub struct GeneratedPuzzle {
    /// Seed that reproduces both the path and the scramble.
    pub seed: u64,
    pub puzzle: Puzzle,
    /// Starting rotation of every piece, in path order.
    pub scrambled: Vec<Rotation>,
}

/// JSON form of one path piece.
#[derive(Debug, Serialize)]
pub struct PieceRecord {
    pub position: Position,
    pub shape: Shape,
    pub required_sides: Vec<Side>,
    /// Rotation the piece starts the game in.
    pub rotation: Rotation,
    /// A rotation that connects the piece.
    pub solution: Rotation,
}

/// JSON form of one puzzle.
#[derive(Debug, Serialize)]
pub struct PuzzleRecord {
    pub seed: u64,
    pub rows: usize,
    pub cols: usize,
    pub entry_port: Port,
    pub exit_port: Port,
    pub pieces: Vec<PieceRecord>,
}

impl From<&GeneratedPuzzle> for PuzzleRecord {
    fn from(generated: &GeneratedPuzzle) -> Self {
        let puzzle = &generated.puzzle;
        let pieces = puzzle
            .pieces()
            .zip(&generated.scrambled)
            .zip(puzzle.solution())
            .map(|((piece, &rotation), solution)| PieceRecord {
                position: piece.position,
                shape: piece.shape,
                required_sides: piece.required_sides.iter().collect(),
                rotation,
                solution,
            })
            .collect();
        Self {
            seed: generated.seed,
            rows: puzzle.rows(),
            cols: puzzle.cols(),
            entry_port: puzzle.entry_port(),
            exit_port: puzzle.exit_port(),
            pieces,
        }
    }
}

/// Per-puzzle statistics row for the CSV report.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StatsRecord {
    pub seed: u64,
    pub rows: usize,
    pub cols: usize,
    pub path_length: usize,
    pub visited_cells: usize,
    pub straight: usize,
    pub corner: usize,
    pub t_junction: usize,
    pub cross: usize,
}

impl From<&GeneratedPuzzle> for StatsRecord {
    fn from(generated: &GeneratedPuzzle) -> Self {
        let puzzle = &generated.puzzle;
        let count = |shape| puzzle.pieces().filter(|piece| piece.shape == shape).count();
        Self {
            seed: generated.seed,
            rows: puzzle.rows(),
            cols: puzzle.cols(),
            path_length: puzzle.len(),
            visited_cells: puzzle.visited_count(),
            straight: count(Shape::Straight),
            corner: count(Shape::Corner),
            t_junction: count(Shape::TJunction),
            cross: count(Shape::Cross),
        }
    }
}

fn create(output_path: &Path) -> Result<io::BufWriter<File>, AppError> {
    let file = File::create(output_path).map_err(|e| {
        log::error!("Failed to create output file {:?}: {}", output_path, e);
        AppError::Io(e)
    })?;
    Ok(io::BufWriter::new(file))
}

/// Saves the puzzles as a pretty-printed JSON array.
pub fn save_puzzles_json(puzzles: &[GeneratedPuzzle], output_path: &Path) -> Result<(), AppError> {
    log::info!("Attempting to save {} puzzle(s) to {:?}...", puzzles.len(), output_path);

    let records: Vec<PuzzleRecord> = puzzles.iter().map(PuzzleRecord::from).collect();
    let mut writer = create(output_path)?;
    serde_json::to_writer_pretty(&mut writer, &records)?;
    writeln!(writer)?;
    writer.flush()?;

    log::info!("Successfully saved puzzles to {:?}", output_path);
    Ok(())
}

/// Saves pre-rendered boards as plain text, separated by blank lines.
pub fn save_boards_text(boards: &[String], output_path: &Path) -> Result<(), AppError> {
    let mut writer = create(output_path)?;
    for (index, board) in boards.iter().enumerate() {
        if index > 0 {
            writeln!(writer)?;
        }
        write!(writer, "{board}")?;
    }
    writer.flush()?;
    log::info!("Saved {} board(s) to {:?}", boards.len(), output_path);
    Ok(())
}

/// Writes one statistics row per puzzle.
pub fn save_stats_csv(puzzles: &[GeneratedPuzzle], output_path: &Path) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(output_path).map_err(|e| {
        log::error!("Failed to create stats file {:?}: {}", output_path, e);
        AppError::Csv(e)
    })?;
    for generated in puzzles {
        writer.serialize(StatsRecord::from(generated))?;
    }
    writer.flush()?;
    log::info!("Saved statistics for {} puzzle(s) to {:?}", puzzles.len(), output_path);
    Ok(())
}
