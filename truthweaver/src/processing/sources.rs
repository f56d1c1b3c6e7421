use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use futures::stream::{self, StreamExt};
use tracing::{error, info, warn};

use crate::error::{Result, TruthWeaverError};
use crate::transcription::{TranscriptLog, TranscriptionProvider};

use super::session::Transcript;

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// Audio files with `extension` (any case) directly inside each directory,
/// sorted by path. Missing directories are skipped with a warning. A file
/// name seen in more than one directory is kept once, from the later
/// directory in sorted path order.
pub fn discover_audio_files(dirs: &[PathBuf], extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for dir in dirs {
        if !dir.is_dir() {
            warn!(dir = %dir.display(), "Audio directory not found, skipping");
            continue;
        }
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && has_extension(&path, extension) {
                files.push(path);
            }
        }
    }
    files.sort();

    let mut by_name: BTreeMap<String, PathBuf> = BTreeMap::new();
    for path in files {
        let name = session_id(&path);
        if let Some(previous) = by_name.insert(name.clone(), path) {
            warn!(
                file = %name,
                shadowed = %previous.display(),
                "Duplicate session file name, keeping the later path"
            );
        }
    }

    let mut files: Vec<PathBuf> = by_name.into_values().collect();
    files.sort();
    info!(count = files.len(), "Discovered audio files");
    Ok(files)
}

/// Session id of an audio file: its file name.
pub fn session_id(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Transcribe every file, recording each outcome in `log` in input order.
/// A failed file yields an empty transcript instead of an error; only
/// failures to write the log abort the run.
pub async fn transcribe_all(
    provider: &TranscriptionProvider,
    files: &[PathBuf],
    log: &mut TranscriptLog,
    concurrency: usize,
) -> Result<Vec<Transcript>> {
    if files.is_empty() {
        return Err(TruthWeaverError::Validation(
            "No audio files found. Please check directories.".to_string(),
        ));
    }
    info!(
        files = files.len(),
        concurrency,
        log = %log.path().display(),
        "Transcribing audio"
    );

    let results = stream::iter(files)
        .map(|path| async move { (session_id(path), transcribe_file(provider, path).await) })
        .buffered(concurrency.max(1));
    let mut results = std::pin::pin!(results);

    let mut transcripts = Vec::with_capacity(files.len());
    let mut failed = 0usize;
    while let Some((session_id, outcome)) = results.next().await {
        match outcome {
            Ok(text) => {
                log.record(&session_id, &text)?;
                transcripts.push(Transcript::new(session_id, text));
            }
            Err(e) => {
                error!(file = %session_id, error = %e, "Error transcribing");
                failed += 1;
                log.record_failure(&session_id, &e.to_string())?;
                transcripts.push(Transcript::new(session_id, ""));
            }
        }
    }

    info!(
        transcribed = transcripts.len() - failed,
        failed,
        "Transcription finished"
    );
    Ok(transcripts)
}

async fn transcribe_file(provider: &TranscriptionProvider, path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path).await?;
    let extension = path.extension().and_then(|ext| ext.to_str());
    let text = provider.transcribe(&bytes, extension).await?;
    Ok(text.trim().to_string())
}
