// File: src/core/grid.rs
use crate::core::selector::Pattern;
use crate::core::types::{Cell, Direction, Placement, Position};
use std::collections::{BTreeMap, HashSet};

/// Room available for a word at an anchor: its length is the longest word
/// that fits, its letters are the constraint from crossing words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub pattern: Pattern,
}

impl Slot {
    pub fn allowable_length(&self) -> usize {
        self.pattern.len()
    }
}

/// The puzzle under construction. Cells are write-once: nothing ever turns
/// back into `Cell::Empty`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<Cell>>,
    /// Positions that can still become an anchor, in row-major insertion order.
    empty_starts: Vec<Position>,
    placements: BTreeMap<Position, Placement>,
    used_words: HashSet<String>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        let empty_starts = (0..height)
            .flat_map(|row| (0..width).map(move |col| Position::new(row, col)))
            .collect();
        Self {
            width,
            height,
            cells: vec![vec![Cell::Empty; width]; height],
            empty_starts,
            placements: BTreeMap::new(),
            used_words: HashSet::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell(&self, pos: Position) -> Option<Cell> {
        self.cells.get(pos.row).and_then(|row| row.get(pos.col)).copied()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn empty_starts(&self) -> &[Position] {
        &self.empty_starts
    }

    pub fn placements(&self) -> &BTreeMap<Position, Placement> {
        &self.placements
    }

    pub fn used_words(&self) -> &HashSet<String> {
        &self.used_words
    }

    pub fn word_count(&self) -> usize {
        self.placements.len()
    }

    /// Up to `len` positions following `anchor` in `direction`, stopping at the edge.
    pub fn run(&self, anchor: Position, direction: Direction, len: usize) -> Vec<Position> {
        let mut positions = Vec::with_capacity(len);
        let mut cursor = anchor;
        while positions.len() < len {
            match cursor.step(direction, self.height, self.width) {
                Some(next) => {
                    positions.push(next);
                    cursor = next;
                }
                None => break,
            }
        }
        positions
    }

    /// Checks whether a word could start at `anchor` going `direction`.
    ///
    /// The scan walks away from the anchor until the edge or another anchor.
    /// Letter cells of other words are part of the run and become fixed
    /// characters in the returned pattern. `None` when the anchor cell is taken
    /// or there is no room at all.
    pub fn check_constraints(&self, anchor: Position, direction: Direction) -> Option<Slot> {
        if !self.cell(anchor)?.is_empty() {
            return None;
        }

        let mut slots = Vec::new();
        let mut cursor = anchor;
        while let Some(next) = cursor.step(direction, self.height, self.width) {
            match self.cells[next.row][next.col] {
                Cell::Anchor => break,
                Cell::Empty => slots.push(None),
                Cell::Letter(c) => slots.push(Some(c)),
            }
            cursor = next;
        }

        if slots.is_empty() {
            None
        } else {
            Some(Slot { pattern: Pattern::new(slots) })
        }
    }

    /// Writes `word` starting next to `anchor`.
    ///
    /// Returns `false` and leaves the grid untouched when the word does not fit
    /// the slot `check_constraints` reports there, or has already been placed.
    /// Insertion is never partial and never undone.
    pub fn insert(
        &mut self,
        anchor: Position,
        direction: Direction,
        word: &str,
        meaning: &str,
    ) -> bool {
        if !self.fits(anchor, direction, word) {
            return false;
        }

        self.cells[anchor.row][anchor.col] = Cell::Anchor;
        self.placements.insert(
            anchor,
            Placement { direction, word: word.to_string(), meaning: meaning.to_string() },
        );
        self.used_words.insert(word.to_string());
        self.remove_empty_start(anchor);

        let run = self.run(anchor, direction, word.chars().count());
        for (pos, c) in run.into_iter().zip(word.chars()) {
            self.cells[pos.row][pos.col] = Cell::Letter(c);
            self.remove_empty_start(pos);
        }
        true
    }

    fn fits(&self, anchor: Position, direction: Direction, word: &str) -> bool {
        if word.is_empty() || self.used_words.contains(word) {
            return false;
        }
        match self.check_constraints(anchor, direction) {
            Some(slot) => {
                word.chars().count() <= slot.allowable_length() && slot.pattern.matches(word)
            }
            None => false,
        }
    }

    fn remove_empty_start(&mut self, pos: Position) {
        if let Some(i) = self.empty_starts.iter().position(|p| *p == pos) {
            self.empty_starts.remove(i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_empty_starts() {
        let grid = Grid::new(3, 2);
        assert_eq!(grid.empty_starts().len(), 6);
        assert_eq!(grid.empty_starts()[0], Position::new(0, 0));
        assert_eq!(grid.empty_starts()[5], Position::new(1, 2));
        assert!(grid.rows().iter().flatten().all(|c| c.is_empty()));
    }

    #[test]
    fn single_cell_grid_has_no_room() {
        let grid = Grid::new(1, 1);
        for d in Direction::ALL {
            assert!(grid.check_constraints(Position::new(0, 0), d).is_none());
        }
    }

    #[test]
    fn left_edge_has_no_room_going_left() {
        let grid = Grid::new(5, 5);
        assert!(grid.check_constraints(Position::new(2, 0), Direction::Left).is_none());
        let slot = grid.check_constraints(Position::new(2, 4), Direction::Left).unwrap();
        assert_eq!(slot.allowable_length(), 4);
    }

    #[test]
    fn run_length_stops_at_edge() {
        let grid = Grid::new(5, 4);
        let slot = grid.check_constraints(Position::new(0, 1), Direction::Right).unwrap();
        assert_eq!(slot.pattern.to_string(), "...");
        let slot = grid.check_constraints(Position::new(1, 3), Direction::Down).unwrap();
        assert_eq!(slot.allowable_length(), 2);
        let slot = grid.check_constraints(Position::new(3, 3), Direction::Up).unwrap();
        assert_eq!(slot.allowable_length(), 3);
    }

    #[test]
    fn insert_writes_anchor_and_body() {
        let mut grid = Grid::new(5, 5);
        assert!(grid.insert(Position::new(0, 1), Direction::Right, "CAT", "a feline"));

        assert_eq!(grid.cell(Position::new(0, 1)), Some(Cell::Anchor));
        assert_eq!(grid.cell(Position::new(0, 2)), Some(Cell::Letter('C')));
        assert_eq!(grid.cell(Position::new(0, 4)), Some(Cell::Letter('T')));
        assert_eq!(grid.empty_starts().len(), 21);
        assert!(grid.used_words().contains("CAT"));
        assert_eq!(grid.placements()[&Position::new(0, 1)].meaning, "a feline");
    }

    #[test]
    fn letters_become_constraints_and_anchors_stop_the_scan() {
        let mut grid = Grid::new(5, 5);
        assert!(grid.insert(Position::new(0, 1), Direction::Right, "CAT", "a feline"));

        let slot = grid.check_constraints(Position::new(4, 3), Direction::Up).unwrap();
        assert_eq!(slot.pattern.to_string(), "...A");

        assert!(grid.check_constraints(Position::new(0, 0), Direction::Right).is_none());
        assert!(grid.check_constraints(Position::new(0, 2), Direction::Down).is_none());
    }

    #[test]
    fn crossing_word_reuses_letter_cell() {
        let mut grid = Grid::new(5, 5);
        assert!(grid.insert(Position::new(0, 1), Direction::Right, "CAT", "a feline"));
        assert!(grid.insert(Position::new(3, 3), Direction::Up, "TEA", "a drink"));

        assert_eq!(grid.cell(Position::new(0, 3)), Some(Cell::Letter('A')));
        assert_eq!(grid.cell(Position::new(2, 3)), Some(Cell::Letter('T')));
        assert_eq!(grid.word_count(), 2);
        assert_eq!(grid.empty_starts().len(), 18);
    }

    #[test]
    fn overlong_word_is_refused() {
        let mut grid = Grid::new(3, 1);
        let before = grid.clone();
        assert!(!grid.insert(Position::new(0, 0), Direction::Right, "CATS", "felines"));
        assert_eq!(grid, before);
    }

    #[test]
    fn letter_cell_never_becomes_an_anchor() {
        let mut grid = Grid::new(4, 4);
        assert!(grid.insert(Position::new(0, 0), Direction::Right, "CAT", "a feline"));
        let before = grid.clone();

        assert!(!grid.insert(Position::new(0, 2), Direction::Down, "DOG", "a hound"));
        assert_eq!(grid.cell(Position::new(0, 2)), Some(Cell::Letter('A')));
        assert_eq!(grid, before);
    }

    #[test]
    fn clashing_or_reused_words_are_refused() {
        let mut grid = Grid::new(5, 5);
        assert!(grid.insert(Position::new(0, 1), Direction::Right, "CAT", "a feline"));
        let before = grid.clone();

        // Column 3 carries an 'A' on row 0, reached last going up from row 3
        assert!(!grid.insert(Position::new(3, 3), Direction::Up, "TOE", "a digit"));
        assert!(!grid.insert(Position::new(2, 0), Direction::Right, "CAT", "a feline"));
        assert!(!grid.insert(Position::new(2, 0), Direction::Right, "", "nothing"));
        assert_eq!(grid, before);
    }
}
