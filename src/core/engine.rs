use crate::core::direction::{roll_direction, DirectionWeights};
use crate::core::grid::Grid;
use crate::core::random::RandomSource;
use crate::core::selector::{draw_word, LengthPolicy, WordQuery};
use crate::core::types::Position;
use crate::corpus::Corpus;
use tracing::{debug, info, trace};

/// The fill loop gives up after this many consecutive stalls per remaining
/// empty start.
const STALL_FACTOR: usize = 4;

/// What a finished fill looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillReport {
    pub words_placed: usize,
    pub attempts: usize,
    pub empty_starts_left: usize,
}

/// Greedy, randomised crossword filler.
///
/// Each attempt picks an empty anchor, rolls a direction, reads the run that
/// direction offers and draws a word that fits it. Nothing is ever backtracked.
pub struct CrosswordEngine<R: RandomSource> {
    grid: Grid,
    corpus: Corpus,
    rng: R,
    weights: DirectionWeights,
    length_policy: LengthPolicy,
}

impl<R: RandomSource> CrosswordEngine<R> {
    pub fn new(
        width: usize,
        height: usize,
        corpus: Corpus,
        rng: R,
        weights: DirectionWeights,
    ) -> Self {
        Self {
            grid: Grid::new(width, height),
            corpus,
            rng,
            weights,
            length_policy: LengthPolicy::default(),
        }
    }

    pub fn with_length_policy(mut self, length_policy: LengthPolicy) -> Self {
        self.length_policy = length_policy;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// One attempt. Returns the anchor of the word placed, if any.
    pub fn try_single_insert(&mut self) -> Option<Position> {
        // 1. Pick an anchor among the cells nobody has written to
        let anchor = *self.rng.choice(self.grid.empty_starts())?;

        // 2. Roll a direction and see how much room it offers
        let direction = roll_direction(&mut self.rng, &self.weights);
        let Some(slot) = self.grid.check_constraints(anchor, direction) else {
            trace!(%anchor, ?direction, "no room");
            return None;
        };

        // 3. Draw a word agreeing with any crossing letters
        let query =
            WordQuery::for_run(self.length_policy, &slot.pattern, self.grid.used_words());
        let Some(draw) = draw_word(&self.corpus, &mut self.rng, &query) else {
            trace!(%anchor, ?direction, pattern = %slot.pattern, "no candidate");
            return None;
        };

        // 4. Commit it
        if !self.grid.insert(anchor, direction, &draw.word, &draw.meaning) {
            trace!(%anchor, ?direction, word = %draw.word, "word refused by grid");
            return None;
        }
        debug!(%anchor, ?direction, word = %draw.word, "placed word");
        Some(anchor)
    }

    /// Runs attempts until the empty-start set is exhausted or the stall
    /// counter reaches `STALL_FACTOR` times its current size.
    pub fn fill(&mut self) -> FillReport {
        let mut stalls = 0;
        let mut attempts = 0;
        let mut previous_count = self.grid.word_count();

        while stalls < STALL_FACTOR * self.grid.empty_starts().len() {
            attempts += 1;
            self.try_single_insert();

            let count = self.grid.word_count();
            if count == previous_count {
                stalls += 1;
            } else {
                previous_count = count;
                stalls = 0;
            }
        }

        let report = FillReport {
            words_placed: self.grid.word_count(),
            attempts,
            empty_starts_left: self.grid.empty_starts().len(),
        };
        info!(
            words = report.words_placed,
            attempts = report.attempts,
            empty_starts_left = report.empty_starts_left,
            "fill finished"
        );
        report
    }
}
