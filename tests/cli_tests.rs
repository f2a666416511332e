use regex::Regex;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use xword_core::corpus::{Corpus, Dictionary};
use xword_core::persistence::save_corpus;

fn write_corpus(path: &Path) {
    let words = ["CAT", "DOG", "EMU", "APE", "OWL", "ELK"];
    let dict: Dictionary = words
        .iter()
        .map(|w| (w.to_string(), vec![format!("clue for {}", w)]))
        .collect();
    let corpus = Corpus::new(words.iter().map(|w| w.to_string()).collect(), dict);
    save_corpus(&corpus, path).unwrap();
}

fn xword(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_xword"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run xword")
}

/// Grid rows of the printed puzzle, colour codes stripped.
fn grid_rows(stdout: &[u8]) -> Vec<String> {
    let ansi = Regex::new(r"\x1b\[[0-9;]*m").unwrap();
    let text = String::from_utf8_lossy(stdout);
    ansi.replace_all(&text, "")
        .lines()
        .filter(|line| line.starts_with('|'))
        .map(str::to_string)
        .collect()
}

#[test]
fn weights_need_four_values() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = dir.path().join("corpus.bin");
    write_corpus(&corpus);

    let out = xword(&["generate", "--corpus", corpus.to_str().unwrap(), "--weights", "1,0,0"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("exactly four values"), "{}", stderr);
}

#[test]
fn flags_override_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = dir.path().join("corpus.bin");
    let config = dir.path().join("puzzle.json");
    write_corpus(&corpus);
    fs::write(
        &config,
        r#"{ "width": 4, "height": 3, "direction_weights": [1, 0, 0, 0],
             "distribution": { "kind": "uniform" }, "seed": 3 }"#,
    )
    .unwrap();

    let out = xword(&[
        "generate",
        "--corpus",
        corpus.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--width",
        "6",
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let rows = grid_rows(&out.stdout);
    assert_eq!(rows.len(), 3);
    for row in &rows {
        // "| " + six glyphs + "|"
        assert_eq!(row.split_whitespace().count(), 6 + 2, "{}", row);
        // Right-only weights never produce another arrow
        assert!(!row.contains(['\u{2193}', '\u{2190}', '\u{2191}']), "{}", row);
    }
}

#[test]
fn bad_word_pattern_fails_before_loading_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("puzzle.json");
    fs::write(&config, r#"{ "starts_with": "^[AEIOU" }"#).unwrap();
    let missing = dir.path().join("missing.bin");

    let out = xword(&[
        "generate",
        "--corpus",
        missing.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("invalid word pattern"), "{}", stderr);
    assert!(!stderr.contains("loading corpus"), "{}", stderr);
}

#[test]
fn same_seed_prints_same_puzzle() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = dir.path().join("corpus.bin");
    write_corpus(&corpus);
    let args = [
        "generate",
        "--corpus",
        corpus.to_str().unwrap(),
        "--width",
        "7",
        "--height",
        "5",
        "--seed",
        "21",
        "--shuffle",
        "--answers",
    ];

    let first = xword(&args);
    let second = xword(&args);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}
