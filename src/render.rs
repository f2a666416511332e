// File: src/render.rs
use crate::core::grid::Grid;
use crate::core::types::{Cell, Position};
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use std::fmt;
use std::io::{self, Write};

const EMPTY_GLYPH: char = '.';

fn glyph(grid: &Grid, pos: Position, cell: Cell) -> char {
    match cell {
        Cell::Empty => EMPTY_GLYPH,
        Cell::Letter(c) => c,
        Cell::Anchor => grid
            .placements()
            .get(&pos)
            .map(|p| p.direction.arrow())
            .unwrap_or('@'),
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.rows().iter().enumerate() {
            let line: Vec<String> = cells
                .iter()
                .enumerate()
                .map(|(col, cell)| glyph(self, Position::new(row, col), *cell).to_string())
                .collect();
            writeln!(f, "| {} |", line.join(" "))?;
        }
        for (pos, placement) in self.placements() {
            writeln!(f, "{} {}", pos, placement.meaning)?;
        }
        Ok(())
    }
}

/// Terminal rendering: arrows highlighted, empty cells dimmed, clue key below.
/// With `show_answers` each clue is followed by its word.
pub fn render_styled<W: Write>(grid: &Grid, out: &mut W, show_answers: bool) -> io::Result<()> {
    for (row, cells) in grid.rows().iter().enumerate() {
        queue!(out, Print("| "))?;
        for (col, cell) in cells.iter().enumerate() {
            let g = glyph(grid, Position::new(row, col), *cell);
            match cell {
                Cell::Anchor => queue!(out, SetForegroundColor(Color::Cyan), Print(g), ResetColor)?,
                Cell::Empty => queue!(
                    out,
                    SetAttribute(Attribute::Dim),
                    Print(g),
                    SetAttribute(Attribute::Reset)
                )?,
                Cell::Letter(_) => queue!(out, Print(g))?,
            }
            queue!(out, Print(' '))?;
        }
        queue!(out, Print("|\n"))?;
    }

    queue!(out, Print('\n'))?;
    for (pos, placement) in grid.placements() {
        queue!(
            out,
            SetForegroundColor(Color::Cyan),
            Print(format!("{} {}", pos, placement.direction.arrow())),
            ResetColor,
            Print(format!(" {}", placement.meaning))
        )?;
        if show_answers {
            queue!(
                out,
                SetAttribute(Attribute::Bold),
                Print(format!(" [{}]", placement.word)),
                SetAttribute(Attribute::Reset)
            )?;
        }
        queue!(out, Print('\n'))?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Direction;

    #[test]
    fn plain_rendering_shows_arrows_letters_and_key() {
        let mut grid = Grid::new(4, 2);
        assert!(grid.insert(Position::new(0, 0), Direction::Right, "CAT", "a feline"));

        let text = grid.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "| \u{2192} C A T |");
        assert_eq!(lines[1], "| . . . . |");
        assert_eq!(lines[2], "(1, 1) a feline");
    }

    #[test]
    fn styled_rendering_can_reveal_answers() {
        let mut grid = Grid::new(4, 2);
        assert!(grid.insert(Position::new(1, 3), Direction::Left, "DOG", "a loyal companion"));

        let mut out = Vec::new();
        render_styled(&grid, &mut out, true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("G O D"));
        assert!(text.contains("a loyal companion"));
        assert!(text.contains("[DOG]"));
    }
}
