use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::config::TranscriptionConfig;
use crate::error::{Result, TruthWeaverError};

use super::preprocessing::{prepare_for_whisper, WHISPER_SAMPLE_RATE};

/// A loaded ggml Whisper model shared between clones.
#[derive(Clone)]
pub struct LocalWhisper {
    context: Arc<Mutex<WhisperContext>>,
}

impl LocalWhisper {
    pub fn new(config: &TranscriptionConfig) -> Result<Self> {
        let model_path = config.model_path.as_deref().ok_or_else(|| {
            TruthWeaverError::Transcription(
                "TRANSCRIPTION_MODEL_PATH is required for local Whisper".to_string(),
            )
        })?;

        info!(model_path, "Loading Whisper model");
        let context =
            WhisperContext::new_with_params(model_path, WhisperContextParameters::default())
                .map_err(|e| {
                    TruthWeaverError::Transcription(format!("Failed to load Whisper model: {e}"))
                })?;

        Ok(Self {
            context: Arc::new(Mutex::new(context)),
        })
    }

    /// Transcribe an encoded recording. Decoding and inference run on the
    /// blocking pool.
    pub async fn transcribe(&self, audio_bytes: &[u8], extension: Option<&str>) -> Result<String> {
        let bytes = audio_bytes.to_vec();
        let extension = extension.map(str::to_string);
        let context = Arc::clone(&self.context);

        tokio::task::spawn_blocking(move || {
            let pcm = prepare_for_whisper(&bytes, extension.as_deref())?;
            debug!(
                duration_secs = pcm.len() as f32 / WHISPER_SAMPLE_RATE as f32,
                "Running Whisper"
            );

            let ctx = context.blocking_lock();
            let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
            params.set_language(Some("en"));
            params.set_print_progress(false);
            params.set_print_realtime(false);

            let mut state = ctx.create_state().map_err(|e| {
                TruthWeaverError::Transcription(format!("Failed to create Whisper state: {e}"))
            })?;
            state
                .full(params, &pcm)
                .map_err(|e| TruthWeaverError::Transcription(format!("Whisper failed: {e}")))?;

            let segments: Vec<String> = (0..state.full_n_segments())
                .filter_map(|i| state.get_segment(i))
                .filter_map(|segment| segment.to_str().ok().map(|s| s.trim().to_string()))
                .filter(|text| !text.is_empty())
                .collect();

            Ok(segments.join(" "))
        })
        .await
        .map_err(|e| TruthWeaverError::Internal(format!("Whisper task panicked: {e}")))?
    }
}
