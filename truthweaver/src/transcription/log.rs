//! Plain-text log of every transcription in a run, one `<file> : <text>`
//! line per recording. The log doubles as an input for offline re-analysis.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::Result;
use crate::processing::Transcript;

const SEPARATOR: &str = " : ";
const FAILURE_PREFIX: &str = "[Transcription failed:";

/// Render a failed transcription the way it is stored in the log.
pub fn failure_marker(reason: &str) -> String {
    format!("{FAILURE_PREFIX} {}]", reason.replace('\n', " "))
}

pub fn format_line(session_id: &str, text: &str) -> String {
    format!("{session_id}{SEPARATOR}{}", text.replace('\n', " "))
}

/// Parse one log line. Failure markers read back as empty text, the same
/// thing a failed transcription contributes to analysis.
pub fn parse_line(line: &str) -> Option<Transcript> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return None;
    }
    let (session_id, text) = match line.split_once(SEPARATOR) {
        Some(parts) => parts,
        None => line.strip_suffix(" :").map(|id| (id, ""))?,
    };
    let text = if text.starts_with(FAILURE_PREFIX) {
        ""
    } else {
        text.trim()
    };
    Some(Transcript::new(session_id.trim(), text))
}

/// Writer that flushes each line as it is recorded, so a crash mid-run
/// still leaves every finished transcription on disk.
pub struct TranscriptLog {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl TranscriptLog {
    /// Create (truncating) the log file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(&path)?);
        Ok(Self { path, writer })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&mut self, session_id: &str, text: &str) -> Result<()> {
        writeln!(self.writer, "{}", format_line(session_id, text))?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn record_failure(&mut self, session_id: &str, reason: &str) -> Result<()> {
        self.record(session_id, &failure_marker(reason))
    }

    /// Read every transcript back from a log file. Lines without a
    /// separator are skipped with a warning.
    pub fn read(path: impl AsRef<Path>) -> Result<Vec<Transcript>> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let mut transcripts = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(&line) {
                Some(transcript) => transcripts.push(transcript),
                None => warn!(
                    path = %path.display(),
                    line = index + 1,
                    "Skipping malformed transcript line"
                ),
            }
        }

        debug!(path = %path.display(), count = transcripts.len(), "Read transcript log");
        Ok(transcripts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_line() {
        assert_eq!(
            parse_line("alice_1.mp3 : I have six years : mostly Python."),
            Some(Transcript::new(
                "alice_1.mp3",
                "I have six years : mostly Python."
            ))
        );
    }

    #[test]
    fn test_parse_failure_line_is_empty_text() {
        assert_eq!(
            parse_line("bob.mp3 : [Transcription failed: decoder error]"),
            Some(Transcript::new("bob.mp3", ""))
        );
    }

    #[test]
    fn test_parse_empty_text() {
        assert_eq!(
            parse_line("carol.mp3 : "),
            Some(Transcript::new("carol.mp3", ""))
        );
        assert_eq!(parse_line("carol.mp3 :"), Some(Transcript::new("carol.mp3", "")));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_line("no separator here"), None);
        assert_eq!(parse_line("   "), None);
    }

    #[test]
    fn test_failure_marker_single_line() {
        assert_eq!(
            failure_marker("line one\nline two"),
            "[Transcription failed: line one line two]"
        );
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("transcribed.txt");

        let mut log = TranscriptLog::create(&path).unwrap();
        log.record("alice_1.mp3", "Six years of Python.").unwrap();
        log.record_failure("alice_2.mp3", "timeout").unwrap();
        drop(log);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            raw,
            "alice_1.mp3 : Six years of Python.\nalice_2.mp3 : [Transcription failed: timeout]\n"
        );

        let transcripts = TranscriptLog::read(&path).unwrap();
        assert_eq!(
            transcripts,
            vec![
                Transcript::new("alice_1.mp3", "Six years of Python."),
                Transcript::new("alice_2.mp3", ""),
            ]
        );
    }
}
