use std::time::Duration;

use tracing::{info, warn};

use crate::config::{parse_provider_model, TranscriptionConfig};
use crate::error::{Result, TruthWeaverError};

use super::api::TranscriptionApiClient;

#[derive(Clone)]
enum TranscriptionBackend {
    #[cfg(feature = "local-whisper")]
    Local { whisper: super::whisper::LocalWhisper },
    Api { client: TranscriptionApiClient },
    Unavailable { reason: String },
}

/// Speech-to-text for recorded sessions. Construction never fails: a backend
/// that cannot start degrades to `Unavailable` and every call reports why.
#[derive(Clone)]
pub struct TranscriptionProvider {
    backend: TranscriptionBackend,
    timeout: Duration,
    max_file_size: u64,
}

impl TranscriptionProvider {
    pub fn new(config: &TranscriptionConfig) -> Self {
        let (provider, model) = parse_provider_model(&config.model);

        let backend = if provider.eq_ignore_ascii_case("local") {
            Self::local_backend(config)
        } else {
            match TranscriptionApiClient::new(config) {
                Ok(client) => {
                    info!(provider, model, "Transcription API backend initialized");
                    TranscriptionBackend::Api { client }
                }
                Err(e) => unavailable(format!("Transcription API backend unavailable: {e}")),
            }
        };

        Self {
            backend,
            timeout: Duration::from_secs(config.timeout_secs),
            max_file_size: config.max_file_size,
        }
    }

    #[cfg(feature = "local-whisper")]
    fn local_backend(config: &TranscriptionConfig) -> TranscriptionBackend {
        match super::whisper::LocalWhisper::new(config) {
            Ok(whisper) => {
                info!("Local Whisper backend initialized");
                TranscriptionBackend::Local { whisper }
            }
            Err(e) => unavailable(format!("Whisper backend unavailable: {e}")),
        }
    }

    #[cfg(not(feature = "local-whisper"))]
    fn local_backend(_config: &TranscriptionConfig) -> TranscriptionBackend {
        unavailable(
            "local Whisper requires building with the `local-whisper` feature; \
             set TRANSCRIPTION_MODEL to an API provider such as openai/whisper-1"
                .to_string(),
        )
    }

    pub fn unavailable(reason: &str) -> Self {
        Self {
            backend: TranscriptionBackend::Unavailable {
                reason: reason.to_string(),
            },
            timeout: Duration::from_secs(300),
            max_file_size: u64::MAX,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, TranscriptionBackend::Unavailable { .. })
    }

    /// Why the provider cannot transcribe, if it cannot.
    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.backend {
            TranscriptionBackend::Unavailable { reason } => Some(reason),
            _ => None,
        }
    }

    pub async fn transcribe(&self, audio_bytes: &[u8], extension: Option<&str>) -> Result<String> {
        if audio_bytes.len() as u64 > self.max_file_size {
            return Err(TruthWeaverError::Validation(format!(
                "Audio file is {} bytes, limit is {}",
                audio_bytes.len(),
                self.max_file_size
            )));
        }

        tokio::time::timeout(self.timeout, self.transcribe_internal(audio_bytes, extension))
            .await
            .map_err(|_| {
                TruthWeaverError::Transcription(format!(
                    "Transcription timed out after {} seconds",
                    self.timeout.as_secs()
                ))
            })?
    }

    async fn transcribe_internal(
        &self,
        audio_bytes: &[u8],
        extension: Option<&str>,
    ) -> Result<String> {
        match &self.backend {
            #[cfg(feature = "local-whisper")]
            TranscriptionBackend::Local { whisper } => {
                whisper.transcribe(audio_bytes, extension).await
            }
            TranscriptionBackend::Api { client } => client.transcribe(audio_bytes, extension).await,
            TranscriptionBackend::Unavailable { reason } => {
                Err(TruthWeaverError::TranscriptionUnavailable(reason.clone()))
            }
        }
    }
}

fn unavailable(reason: String) -> TranscriptionBackend {
    warn!("{}", reason);
    TranscriptionBackend::Unavailable { reason }
}
