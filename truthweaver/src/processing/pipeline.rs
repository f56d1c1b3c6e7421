use futures::future::try_join_all;
use tracing::{debug, info, warn};

use crate::error::{Result, TruthWeaverError};
use crate::intelligence::{ClaimExtractor, ClaimSet, ContradictionDetector, TruthConsolidator};
use crate::report::{Report, SubjectReport};

use super::session::{SessionAggregator, Transcript};

/// Drives transcripts through extraction, grouping, contradiction detection
/// and consolidation. Holds no state between runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TruthPipeline {
    aggregator: SessionAggregator,
    detector: ContradictionDetector,
    consolidator: TruthConsolidator,
}

impl TruthPipeline {
    pub fn new() -> Self {
        Self {
            aggregator: SessionAggregator::new(ClaimExtractor),
            detector: ContradictionDetector::new(),
            consolidator: TruthConsolidator::new(),
        }
    }

    /// Log every rule that can never fire with the current vocabulary.
    /// Returns the number of such rules.
    pub fn audit_rules(&self) -> usize {
        let dead: Vec<String> = self
            .detector
            .unreachable_rules()
            .into_iter()
            .chain(self.consolidator.unreachable_rules())
            .collect();
        for rule in &dead {
            warn!(rule = %rule, "Rule references tags the extractor never produces");
        }
        dead.len()
    }

    /// Analyse all transcripts on the current thread.
    pub fn analyze(&self, transcripts: &[Transcript]) -> Report {
        info!(transcripts = transcripts.len(), "Analysing transcripts");
        let subjects = self
            .aggregator
            .subject_groups(transcripts)
            .into_iter()
            .map(|group| self.analyze_claims(group.shadow_id, &group.claim_sets))
            .collect();
        self.finish(subjects)
    }

    /// Analyse one subject's sessions. All sessions must share a shadow id.
    pub fn analyze_subject(&self, shadow_id: &str, sessions: &[Transcript]) -> SubjectReport {
        let claim_sets = self.aggregator.extract_sessions(sessions);
        self.analyze_claims(shadow_id.to_string(), &claim_sets)
    }

    /// Same result as [`analyze`](Self::analyze), with each subject analysed
    /// on the blocking pool.
    pub async fn analyze_concurrent(&self, transcripts: Vec<Transcript>) -> Result<Report> {
        info!(
            transcripts = transcripts.len(),
            "Analysing transcripts concurrently"
        );
        let tasks = self
            .aggregator
            .partition(&transcripts)
            .into_iter()
            .map(|(shadow_id, sessions)| {
                let pipeline = *self;
                tokio::task::spawn_blocking(move || pipeline.analyze_subject(&shadow_id, &sessions))
            });

        let subjects = try_join_all(tasks)
            .await
            .map_err(|e| TruthWeaverError::Internal(format!("Subject analysis task failed: {e}")))?;

        Ok(self.finish(subjects))
    }

    fn analyze_claims(&self, shadow_id: String, claim_sets: &[ClaimSet]) -> SubjectReport {
        let flat = ClaimSet::flatten(claim_sets);
        let deception_patterns = self.detector.detect_flat(&flat);
        let revealed_truth = self.consolidator.consolidate_flat(&flat);

        debug!(
            shadow_id = %shadow_id,
            sessions = claim_sets.len(),
            claims = flat.len(),
            contradictions = deception_patterns.len(),
            "Analysed subject"
        );

        SubjectReport {
            shadow_id,
            revealed_truth,
            deception_patterns,
        }
    }

    fn finish(&self, subjects: Vec<SubjectReport>) -> Report {
        let report = Report::new(subjects);
        info!(
            subjects = report.subjects.len(),
            contradictions = report.deception_count(),
            "Analysis complete"
        );
        report
    }
}
