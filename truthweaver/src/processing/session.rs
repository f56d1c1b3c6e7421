use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::intelligence::{ClaimExtractor, ClaimSet};

/// One recorded session as text. Empty text stands for a failed
/// transcription and is analysed like any other input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub session_id: String,
    pub text: String,
}

impl Transcript {
    pub fn new(session_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            text: text.into(),
        }
    }

    pub fn shadow_id(&self) -> String {
        shadow_id_for(&self.session_id)
    }
}

/// Derive the subject id from a session file name.
///
/// Everything after the first `.` is dropped, then a trailing `_<digits>`
/// segment is treated as the session index: `alice_2.mp3` belongs to
/// `alice`, while `bob.mp3` and `carol_final.mp3` stand alone.
pub fn shadow_id_for(session_id: &str) -> String {
    let file_name = Path::new(session_id)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(session_id);
    let base = file_name.split('.').next().unwrap_or(file_name);

    match base.rsplit_once('_') {
        Some((prefix, index))
            if !index.is_empty() && index.chars().all(|c| c.is_ascii_digit()) =>
        {
            prefix.to_string()
        }
        _ => base.to_string(),
    }
}

/// All claim sets for one subject, in session name order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectGroup {
    pub shadow_id: String,
    pub claim_sets: Vec<ClaimSet>,
}

impl SubjectGroup {
    pub fn flat(&self) -> ClaimSet {
        ClaimSet::flatten(&self.claim_sets)
    }
}

/// Groups transcripts by subject and extracts each session's claims.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionAggregator {
    extractor: ClaimExtractor,
}

impl SessionAggregator {
    pub fn new(extractor: ClaimExtractor) -> Self {
        Self { extractor }
    }

    /// Transcripts per subject, subjects in sorted order and sessions sorted
    /// by session id. Does no extraction, so subjects can be handed out to
    /// independent workers.
    pub fn partition(&self, transcripts: &[Transcript]) -> BTreeMap<String, Vec<Transcript>> {
        let mut groups: BTreeMap<String, Vec<Transcript>> = BTreeMap::new();
        for transcript in transcripts {
            groups
                .entry(transcript.shadow_id())
                .or_default()
                .push(transcript.clone());
        }
        for sessions in groups.values_mut() {
            sessions.sort_by(|a, b| a.session_id.cmp(&b.session_id));
        }
        groups
    }

    pub fn group(&self, transcripts: &[Transcript]) -> BTreeMap<String, Vec<ClaimSet>> {
        self.partition(transcripts)
            .into_iter()
            .map(|(shadow_id, sessions)| (shadow_id, self.extract_sessions(&sessions)))
            .collect()
    }

    pub fn subject_groups(&self, transcripts: &[Transcript]) -> Vec<SubjectGroup> {
        self.group(transcripts)
            .into_iter()
            .map(|(shadow_id, claim_sets)| SubjectGroup {
                shadow_id,
                claim_sets,
            })
            .collect()
    }

    pub fn extract_sessions(&self, sessions: &[Transcript]) -> Vec<ClaimSet> {
        sessions
            .iter()
            .map(|session| self.extractor.extract(&session.text))
            .collect()
    }
}
