use colored::Colorize;
use pipe_core::{is_oriented, Board, Port, Position, Puzzle, Rotation, Side, Sides};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::io::{self, Write};

const BORDER: char = '#';
const BACKGROUND: char = '·';
const PORT: char = '▼';

/// Trait for types that can visualize the state of a pipe `Board`.
///
/// Implementors decide how the pieces at their current rotations are
/// presented, e.g. as text on a terminal.
pub trait Visualizer {
    /// Displays the board, with an optional caption line above it.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the display was successful.
    /// * `Err(anyhow::Error)` if an error occurred during visualization.
    fn display_state(&mut self, caption: &str, board: &Board<'_>) -> Result<(), anyhow::Error>;
}

/// Renders boards as box-drawing text on any writer (stdout by default).
pub struct TerminalVisualizer<W: Write = io::Stdout> {
    out: W,
    color: bool,
}

impl TerminalVisualizer {
    /// Writes to stdout.
    pub fn new(color: bool) -> Self {
        Self::with_writer(io::stdout(), color)
    }
}

impl<W: Write> TerminalVisualizer<W> {
    /// Writes to `out`.
    pub fn with_writer(out: W, color: bool) -> Self {
        Self { out, color }
    }

    /// Gives back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Visualizer for TerminalVisualizer<W> {
    fn display_state(&mut self, caption: &str, board: &Board<'_>) -> Result<(), anyhow::Error> {
        writeln!(self.out, "{caption}")?;
        write!(self.out, "{}", render_board(board, self.color))?;
        self.out.flush()?;
        Ok(())
    }
}

/// Box-drawing glyph for a piece opening exactly `sides`.
pub fn glyph(sides: Sides) -> char {
    let open = |side| sides.contains(side);
    match (
        open(Side::Top),
        open(Side::Bottom),
        open(Side::Left),
        open(Side::Right),
    ) {
        (true, true, false, false) => '│',
        (false, false, true, true) => '─',
        (true, false, true, false) => '┘',
        (true, false, false, true) => '└',
        (false, true, true, false) => '┐',
        (false, true, false, true) => '┌',
        (true, false, true, true) => '┴',
        (true, true, true, false) => '┤',
        (false, true, true, true) => '┬',
        (true, true, false, true) => '├',
        (true, true, true, true) => '┼',
        _ => '?',
    }
}

/// Draws the board framed by a border, with the entry port above the grid
/// and the exit port below it.
///
/// With `color`, the entry port is green and the exit port red; pieces
/// already in a solving orientation are cyan and the rest yellow.
pub fn render_board(board: &Board<'_>, color: bool) -> String {
    let puzzle = board.puzzle();
    let path_index: HashMap<Position, usize> = puzzle
        .path()
        .iter()
        .enumerate()
        .map(|(index, &pos)| (pos, index))
        .collect();
    let mut text = String::new();

    border_row(&mut text, puzzle, -1, color);
    for row in 0..puzzle.rows() {
        text.push(BORDER);
        for col in 0..puzzle.cols() {
            let index = path_index.get(&Position::new(row, col)).copied();
            let cell = cell_text(board, index, color);
            text.push_str(&cell);
        }
        text.push(BORDER);
        text.push('\n');
    }
    border_row(&mut text, puzzle, puzzle.rows() as isize, color);
    text
}

fn cell_text(board: &Board<'_>, index: Option<usize>, color: bool) -> String {
    let Some(index) = index else {
        return BACKGROUND.to_string();
    };
    let (Some(piece), Some(rotation)) = (board.puzzle().piece(index), board.rotation(index))
    else {
        return BACKGROUND.to_string();
    };
    piece_text(piece.shape.sides_at(rotation), color, || {
        is_oriented(piece.shape, rotation, piece.required_sides)
    })
}

fn piece_text(open: Sides, color: bool, oriented: impl FnOnce() -> bool) -> String {
    let glyph = glyph(open).to_string();
    if !color {
        return glyph;
    }
    if oriented() {
        glyph.cyan().to_string()
    } else {
        glyph.yellow().to_string()
    }
}

fn border_row(text: &mut String, puzzle: &Puzzle, row: isize, color: bool) {
    let (entry, exit) = (puzzle.entry_port(), puzzle.exit_port());
    for col in -1..=puzzle.cols() as isize {
        let here = Port { row, col };
        if here == entry {
            let _ = write!(text, "{}", port_text(color, true));
        } else if here == exit {
            let _ = write!(text, "{}", port_text(color, false));
        } else {
            text.push(BORDER);
        }
    }
    text.push('\n');
}

fn port_text(color: bool, entry: bool) -> String {
    match (color, entry) {
        (false, _) => PORT.to_string(),
        (true, true) => PORT.to_string().green().to_string(),
        (true, false) => PORT.to_string().red().to_string(),
    }
}

/// Renders the puzzle as it looks with every piece at `rotations`.
pub fn render_rotations(puzzle: &Puzzle, rotations: Vec<Rotation>, color: bool) -> Option<String> {
    Board::from_rotations(puzzle, rotations)
        .ok()
        .map(|board| render_board(&board, color))
}
