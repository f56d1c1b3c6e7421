//! Cross-examines a subject's recorded self-reports: extracts lexical claims
//! from each session, flags claims that contradict one another and
//! consolidates a single best-guess profile per subject.

pub mod config;
pub mod error;
pub mod intelligence;
pub mod processing;
pub mod report;
pub mod transcription;

pub use error::{Result, TruthWeaverError};
pub use processing::{Transcript, TruthPipeline};
pub use report::{Report, SubjectReport};
