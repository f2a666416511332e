// File: src/persistence.rs
use crate::corpus::Corpus;
use crate::error::Result;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// Writes the corpus with bincode. The file is written next to `path` and
/// renamed into place, so a crash never leaves a half-written corpus behind.
pub fn save_corpus(corpus: &Corpus, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    let mut writer = BufWriter::new(&temp_file);
    bincode::serialize_into(&mut writer, corpus)?;
    writer.flush()?;
    drop(writer);
    temp_file.persist(path).map_err(io::Error::from)?;

    info!(path = %path.display(), words = corpus.len(), "saved corpus");
    Ok(())
}

pub fn load_corpus(path: &Path) -> Result<Corpus> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let corpus: Corpus = bincode::deserialize_from(reader)?;

    info!(path = %path.display(), words = corpus.len(), "loaded corpus");
    Ok(corpus)
}
