mod pipeline;
mod session;
mod sources;

pub use pipeline::TruthPipeline;
pub use session::{shadow_id_for, SessionAggregator, SubjectGroup, Transcript};
pub use sources::{discover_audio_files, session_id, transcribe_all};
