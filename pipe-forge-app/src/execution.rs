use crate::config::{AppConfig, PuzzleSettings, VisualizationMode};
use crate::error::AppError;
use crate::output::{self, GeneratedPuzzle};
use crate::visualization::{self, TerminalVisualizer, Visualizer};
use anyhow::{Context, Result};
use pipe_core::{is_puzzle_solved_degrees, Board, Puzzle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::time::Instant;

/// Generates a single scrambled puzzle from `seed`.
///
/// The same generator drives path search and scrambling, so a seed fully
/// determines both.
pub fn generate_one(rows: usize, cols: usize, seed: u64) -> Result<GeneratedPuzzle, AppError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let puzzle = Puzzle::generate(rows, cols, &mut rng)?;
    let scrambled = puzzle.scramble(&mut rng);
    Ok(GeneratedPuzzle {
        seed,
        puzzle,
        scrambled,
    })
}

/// Generates `count` puzzles in parallel, puzzle `i` seeded with `base_seed + i`.
pub fn generate_batch(
    settings: &PuzzleSettings,
    base_seed: u64,
    count: usize,
) -> Result<Vec<GeneratedPuzzle>, AppError> {
    (0..count as u64)
        .into_par_iter()
        .map(|i| generate_one(settings.rows, settings.cols, base_seed.wrapping_add(i)))
        .collect()
}

/// Runs the application with already loaded settings.
pub fn run(config: &AppConfig, settings: &PuzzleSettings) -> Result<()> {
    if config.count == 0 {
        return Err(AppError::Config("--count must be at least 1".to_string()).into());
    }

    let base_seed = settings.seed.unwrap_or_else(rand::random);
    log::info!(
        "Generating {} puzzle(s) of {}x{} from seed {}",
        config.count,
        settings.rows,
        settings.cols,
        base_seed
    );

    let start_time = Instant::now();
    let puzzles = generate_batch(settings, base_seed, config.count)?;
    log::info!(
        "Generated {} puzzle(s) in {:?}",
        puzzles.len(),
        start_time.elapsed()
    );

    let color = !config.no_color;
    if config.visualization_mode == VisualizationMode::Terminal {
        let mut visualizer = TerminalVisualizer::new(color);
        for generated in &puzzles {
            show(&mut visualizer, generated, config.show_solution)?;
        }
    }

    if let Some(angles) = &config.angles {
        check_angles(&puzzles, angles, settings.epsilon)?;
    }

    if let Some(path) = &config.output_path {
        output::save_puzzles_json(&puzzles, path)?;
    }

    if let Some(path) = &config.text_output {
        let boards = puzzles
            .iter()
            .map(|generated| {
                visualization::render_rotations(
                    &generated.puzzle,
                    generated.scrambled.clone(),
                    false,
                )
                .context("Scrambled rotations do not match the puzzle")
            })
            .collect::<Result<Vec<_>>>()?;
        output::save_boards_text(&boards, path)?;
    }

    if let Some(path) = &config.stats_csv {
        output::save_stats_csv(&puzzles, path)?;
    }

    log::info!("Pipe Forge finished in {:?}", start_time.elapsed());
    Ok(())
}

fn show(
    visualizer: &mut impl Visualizer,
    generated: &GeneratedPuzzle,
    show_solution: bool,
) -> Result<()> {
    let puzzle = &generated.puzzle;
    let caption = format!(
        "Seed {} ({}x{}, {} pieces)",
        generated.seed,
        puzzle.rows(),
        puzzle.cols(),
        puzzle.len()
    );
    let board = Board::from_rotations(puzzle, generated.scrambled.clone())?;
    visualizer.display_state(&caption, &board)?;

    if show_solution {
        let solved = Board::from_rotations(puzzle, puzzle.solution())?;
        visualizer.display_state("Solution", &solved)?;
    }
    Ok(())
}

/// Checks user supplied angles against the first puzzle of the batch.
fn check_angles(puzzles: &[GeneratedPuzzle], angles: &[f32], epsilon: f32) -> Result<bool> {
    let first = puzzles
        .first()
        .context("No puzzle was generated to check angles against")?;
    if angles.len() != first.puzzle.len() {
        log::warn!(
            "Got {} angle(s) for a path of {} piece(s)",
            angles.len(),
            first.puzzle.len()
        );
    }
    let solved = is_puzzle_solved_degrees(&first.puzzle, angles, epsilon);
    log::info!("Angle check for seed {}: solved = {}", first.seed, solved);
    println!("Solved: {solved}");
    Ok(solved)
}
