#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use truthweaver::Transcript;

/// A small interview set: one subject who walks back a duration claim, one
/// who confesses to a weekend workshop, and one failed recording.
pub const SAMPLE_LOG: &str = "\
maria_1.mp3 : I have 6 years of experience as a senior engineer building python microservices.
maria_2.mp3 : Sorry, I should correct that. It was 3 years full time, and I copied most of the design.
priya_1.mp3 : I only took a weekend workshop on Rails, I'm a junior dev.
tom.mp3 : [Transcription failed: Failed to probe audio format: end of stream]
";

pub fn sample_transcripts() -> Vec<Transcript> {
    SAMPLE_LOG
        .lines()
        .filter_map(truthweaver::transcription::parse_line)
        .collect()
}

/// Write `contents` to `name` inside `dir` and return the path.
pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap_or_else(|e| panic!("create {parent:?}: {e}"));
    }
    fs::write(&path, contents).unwrap_or_else(|e| panic!("write {path:?}: {e}"));
    path
}
