// File: src/corpus.rs
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

/// Word -> meanings, in the order the meanings were found.
pub type Dictionary = HashMap<String, Vec<String>>;

/// The words the engine may draw from, plus their meanings.
///
/// Word order is opaque to the engine. A frequency-ordered list combined with
/// a skewed `word_dist` favours common words; a shuffled one makes rank moot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    words: Vec<String>,
    dictionary: Dictionary,
}

impl Corpus {
    pub fn new(words: Vec<String>, dictionary: Dictionary) -> Self {
        Self { words, dictionary }
    }

    /// Builds a corpus straight from the raw dictionary and frequency list texts.
    pub fn from_sources(dictionary_text: &str, frequency_text: &str) -> Self {
        let dictionary = parse_dictionary(dictionary_text);
        let words = parse_frequency_list(frequency_text, &dictionary);
        info!(
            headwords = dictionary.len(),
            ranked_words = words.len(),
            "parsed corpus sources"
        );
        Self { words, dictionary }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Meanings for `word`; empty when the dictionary has none.
    pub fn meanings(&self, word: &str) -> &[String] {
        self.dictionary.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Drops words shorter than `min_len` characters.
    pub fn retain_min_length(&mut self, min_len: usize) {
        self.words.retain(|w| w.chars().count() >= min_len);
    }

    /// Keeps only words matched by `pattern` (e.g. `^[AEIOU]` for vowel-initial words).
    pub fn retain_matching(&mut self, pattern: &Regex) {
        self.words.retain(|w| pattern.is_match(w));
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.words.shuffle(rng);
    }
}

/// Parses the ranked word list: the first tab-separated field of every line,
/// uppercased, kept only when `dictionary` can explain it.
pub fn parse_frequency_list(text: &str, dictionary: &Dictionary) -> Vec<String> {
    text.lines()
        .filter_map(|line| line.split('\t').next())
        .map(|raw| raw.trim().to_uppercase())
        .filter(|word| !word.is_empty() && dictionary.contains_key(word))
        .collect()
}

/// Parses a Gutenberg Webster-style dictionary.
///
/// Headword lines are fully uppercase (`COLOR; COLOUR`). The block that follows
/// a headword line is its entry; the first clean definition in it becomes a
/// meaning for every variant on the headword line.
pub fn parse_dictionary(text: &str) -> Dictionary {
    let cleaner = DefinitionCleaner::new();
    let mut dictionary = Dictionary::new();
    let mut headwords: Option<Vec<String>> = None;

    for (is_headword, group) in line_groups(gutenberg_body(text)) {
        if is_headword {
            headwords = Some(split_headwords(group[0]));
            continue;
        }
        let Some(words) = headwords.take() else { continue };
        if let Some(meaning) = cleaner.first_definition(&group) {
            for word in words {
                dictionary.entry(word).or_default().push(meaning.clone());
            }
        }
    }
    dictionary
}

/// Strips the Project Gutenberg licence preamble and trailer when present.
/// A start marker with nothing after it leaves no body at all.
fn gutenberg_body(text: &str) -> &str {
    let start = match text.find("*** START OF") {
        Some(i) => text[i..].find('\n').map_or(text.len(), |nl| i + nl + 1),
        None => 0,
    };
    let end = text[start..].find("*** END OF").map(|i| start + i).unwrap_or(text.len());
    &text[start..end]
}

/// At least one cased character and no lowercase ones.
fn is_upper_line(line: &str) -> bool {
    line.chars().any(char::is_uppercase) && !line.chars().any(char::is_lowercase)
}

/// Consecutive lines grouped by whether they are headword lines.
fn line_groups(text: &str) -> Vec<(bool, Vec<&str>)> {
    let mut groups: Vec<(bool, Vec<&str>)> = Vec::new();
    for line in text.lines() {
        let key = is_upper_line(line);
        match groups.last_mut() {
            Some((last_key, lines)) if *last_key == key => lines.push(line),
            _ => groups.push((key, vec![line])),
        }
    }
    groups
}

fn split_headwords(line: &str) -> Vec<String> {
    line.split(';')
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty())
        .collect()
}

struct DefinitionCleaner {
    paragraph_start: Regex,
    leading_number: Regex,
    parenthesised: Regex,
    see_also: Regex,
    capitalised: Regex,
}

impl DefinitionCleaner {
    fn new() -> Self {
        let re = |p: &str| Regex::new(p).expect("builtin definition regex");
        Self {
            paragraph_start: re(r"^[0-9]*\.\s"),
            leading_number: re(r"^[0-9]*\."),
            parenthesised: re(r"^\(.*\)$"),
            see_also: re(r"^See \w*\.$"),
            capitalised: re(r"^[A-Z]"),
        }
    }

    /// Merges an entry block into paragraphs, drops the pronunciation paragraph
    /// and returns the first paragraph that still reads like a definition.
    fn first_definition(&self, lines: &[&str]) -> Option<String> {
        let mut paragraphs: Vec<String> = Vec::new();
        let mut current: Option<String> = None;
        for line in lines.iter().filter(|l| !l.trim().is_empty()) {
            let starts_paragraph =
                self.paragraph_start.is_match(line) || line.starts_with("Defn: ");
            current = match current.take() {
                Some(done) if starts_paragraph => {
                    paragraphs.push(done);
                    Some(line.to_string())
                }
                Some(mut text) => {
                    text.push(' ');
                    text.push_str(line);
                    Some(text)
                }
                None => Some(line.to_string()),
            };
        }
        paragraphs.extend(current);

        paragraphs.iter().skip(1).find_map(|p| self.clean(p))
    }

    fn clean(&self, paragraph: &str) -> Option<String> {
        let text = paragraph.trim().replace("Defn:", "");
        let text = text.trim().replace("Etym:", "");
        let text = self.leading_number.replace(text.trim(), "");
        let text = self.parenthesised.replace(&text, "");
        let text = text.split("--").next().unwrap_or_default();
        let text = text.split('[').next().unwrap_or_default().trim();
        let text = self.see_also.replace(text, "");
        let text = text.trim();
        if self.capitalised.is_match(text) {
            Some(text.to_string())
        } else {
            None
        }
    }
}
