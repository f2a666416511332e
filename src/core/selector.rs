// File: src/core/selector.rs
use crate::core::random::RandomSource;
use crate::corpus::Corpus;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Letters already sitting on a candidate run. `Some(c)` is fixed by a
/// crossing word, `None` is free.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pattern(Vec<Option<char>>);

impl Pattern {
    pub fn new(slots: Vec<Option<char>>) -> Self {
        Self(slots)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every character of `word` agrees with the pattern position it
    /// lands on. Only the overlapping prefix is compared; callers bound the length.
    pub fn matches(&self, word: &str) -> bool {
        word.chars()
            .zip(self.0.iter())
            .all(|(c, slot)| slot.map_or(true, |fixed| fixed == c))
    }
}

impl From<&str> for Pattern {
    /// `.` is a free cell, anything else is a fixed letter.
    fn from(text: &str) -> Self {
        Self(text.chars().map(|c| if c == '.' { None } else { Some(c) }).collect())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.0 {
            write!(f, "{}", slot.unwrap_or('.'))?;
        }
        Ok(())
    }
}

/// How a word must fit the run found at an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthPolicy {
    /// The word fills the whole run, up to the next anchor or the edge.
    #[default]
    Exact,
    /// Any word no longer than the run.
    Fit,
}

/// Filters applied before the weighted draw, in this order:
/// length, pattern, exclusion.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordQuery<'a> {
    pub exact_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<&'a Pattern>,
    pub exclude: Option<&'a HashSet<String>>,
}

impl<'a> WordQuery<'a> {
    /// The query the fill loop issues for a run described by `pattern`.
    pub fn for_run(
        policy: LengthPolicy,
        pattern: &'a Pattern,
        exclude: &'a HashSet<String>,
    ) -> Self {
        let (exact_length, max_length) = match policy {
            LengthPolicy::Exact => (Some(pattern.len()), None),
            LengthPolicy::Fit => (None, Some(pattern.len())),
        };
        Self { exact_length, max_length, pattern: Some(pattern), exclude: Some(exclude) }
    }

    fn accepts(&self, word: &str) -> bool {
        let len = word.chars().count();
        self.exact_length.map_or(true, |n| len == n)
            && self.max_length.map_or(true, |n| len <= n)
            && self.pattern.map_or(true, |p| p.matches(word))
            && self.exclude.map_or(true, |used| !used.contains(word))
    }
}

/// A drawn word and the meaning picked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    pub word: String,
    pub meaning: String,
}

/// Maps a `word_dist` sample onto `0..len`.
///
/// `round(min(sample, 1) * len - 1)` with ties to even; a negative result
/// counts back from the end, so a sample of exactly 0 selects the last entry.
pub fn weighted_index(sample: f64, len: usize) -> usize {
    debug_assert!(len > 0);
    let raw = (sample.min(1.0) * len as f64 - 1.0).round_ties_even() as i64;
    raw.rem_euclid(len as i64) as usize
}

/// Weighted draw of one unused word satisfying `query`, plus one of its meanings.
///
/// Returns `None` when nothing survives the filters. Words without any meaning
/// are never candidates.
pub fn draw_word<R: RandomSource>(
    corpus: &Corpus,
    rng: &mut R,
    query: &WordQuery<'_>,
) -> Option<Draw> {
    let candidates: Vec<&str> = corpus
        .words()
        .iter()
        .map(String::as_str)
        .filter(|w| query.accepts(w) && !corpus.meanings(w).is_empty())
        .collect();
    if candidates.is_empty() {
        return None;
    }

    let word = candidates[weighted_index(rng.word_dist(), candidates.len())];
    let meaning = rng.choice(corpus.meanings(word))?;
    Some(Draw { word: word.to_string(), meaning: meaning.clone() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Dictionary;

    struct Scripted {
        dist: f64,
    }

    impl RandomSource for Scripted {
        fn uniform(&mut self) -> f64 {
            0.0
        }
        fn choose_index(&mut self, len: usize) -> usize {
            len - 1
        }
        fn word_dist(&mut self) -> f64 {
            self.dist
        }
    }

    fn corpus(words: &[&str]) -> Corpus {
        let mut dict = Dictionary::new();
        for w in words {
            dict.insert(w.to_string(), vec![format!("first {}", w), format!("second {}", w)]);
        }
        Corpus::new(words.iter().map(|w| w.to_string()).collect(), dict)
    }

    #[test]
    fn zero_sample_wraps_to_last_candidate() {
        assert_eq!(weighted_index(0.0, 5), 4);
        assert_eq!(weighted_index(0.0, 1), 0);
    }

    #[test]
    fn index_rounds_half_to_even() {
        // 0.5 * 3 - 1 = 0.5 -> 0, 0.5 * 5 - 1 = 1.5 -> 2
        assert_eq!(weighted_index(0.5, 3), 0);
        assert_eq!(weighted_index(0.5, 5), 2);
    }

    #[test]
    fn samples_above_one_are_clamped() {
        assert_eq!(weighted_index(1.0, 4), 3);
        assert_eq!(weighted_index(7.3, 4), 3);
    }

    #[test]
    fn pattern_fixes_crossing_letters() {
        let p = Pattern::from(".A.");
        assert!(p.matches("CAT"));
        assert!(!p.matches("COT"));
        assert!(p.matches("BA"));
        assert_eq!(p.to_string(), ".A.");
    }

    #[test]
    fn exact_policy_filters_by_run_length() {
        let corpus = corpus(&["CAT", "CART", "BAT", "CA"]);
        let pattern = Pattern::from("C..");
        let used = HashSet::new();
        let query = WordQuery::for_run(LengthPolicy::Exact, &pattern, &used);
        let draw = draw_word(&corpus, &mut Scripted { dist: 0.0 }, &query).unwrap();
        assert_eq!(draw.word, "CAT");
        assert_eq!(draw.meaning, "second CAT");
    }

    #[test]
    fn fit_policy_allows_shorter_words() {
        let corpus = corpus(&["CAT", "CART", "CA"]);
        let pattern = Pattern::from("C..");
        let used = HashSet::new();
        let query = WordQuery::for_run(LengthPolicy::Fit, &pattern, &used);
        // Candidates are [CAT, CA]; a zero sample wraps to CA.
        let draw = draw_word(&corpus, &mut Scripted { dist: 0.0 }, &query).unwrap();
        assert_eq!(draw.word, "CA");
    }

    #[test]
    fn excluded_words_are_never_drawn() {
        let corpus = corpus(&["CAT"]);
        let pattern = Pattern::from("...");
        let used: HashSet<String> = ["CAT".to_string()].into_iter().collect();
        let query = WordQuery::for_run(LengthPolicy::Exact, &pattern, &used);
        assert!(draw_word(&corpus, &mut Scripted { dist: 0.5 }, &query).is_none());
    }

    #[test]
    fn words_without_meanings_are_skipped() {
        let mut dict = Dictionary::new();
        dict.insert("DOG".to_string(), vec![]);
        dict.insert("CAT".to_string(), vec!["feline".to_string()]);
        let corpus = Corpus::new(vec!["CAT".into(), "DOG".into(), "EMU".into()], dict);
        let draw = draw_word(&corpus, &mut Scripted { dist: 0.0 }, &WordQuery::default()).unwrap();
        assert_eq!(draw.word, "CAT");
    }
}
