mod api;
mod log;
#[cfg(feature = "local-whisper")]
mod preprocessing;
mod provider;
#[cfg(feature = "local-whisper")]
mod whisper;

pub use api::TranscriptionApiClient;
pub use log::{failure_marker, format_line, parse_line, TranscriptLog};
#[cfg(feature = "local-whisper")]
pub use preprocessing::{decode, downmix, prepare_for_whisper, resample, DecodedAudio};
pub use provider::TranscriptionProvider;
#[cfg(feature = "local-whisper")]
pub use whisper::LocalWhisper;
