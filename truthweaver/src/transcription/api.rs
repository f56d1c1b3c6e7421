use std::time::Duration;

use reqwest::{multipart, Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{parse_provider_model, TranscriptionConfig};
use crate::error::{Result, TruthWeaverError};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

const BASE_BACKOFF_MS: u64 = 100;
const MAX_BACKOFF: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Client for OpenAI-compatible `/audio/transcriptions` endpoints.
#[derive(Debug, Clone)]
pub struct TranscriptionApiClient {
    client: Client,
    url: String,
    api_key: String,
    model: String,
    max_retries: u32,
}

impl TranscriptionApiClient {
    pub fn new(config: &TranscriptionConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            TruthWeaverError::Transcription("API key required for transcription API".to_string())
        })?;

        let (provider, model) = parse_provider_model(&config.model);
        let base_url = config
            .base_url
            .as_deref()
            .unwrap_or(match provider.to_lowercase().as_str() {
                "openrouter" => OPENROUTER_BASE_URL,
                "groq" => GROQ_BASE_URL,
                _ => OPENAI_BASE_URL,
            })
            .trim_end_matches('/');

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                TruthWeaverError::Transcription(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            url: format!("{base_url}/audio/transcriptions"),
            api_key,
            model: model.to_string(),
            max_retries: config.max_retries,
        })
    }

    pub async fn transcribe(&self, audio_bytes: &[u8], extension: Option<&str>) -> Result<String> {
        let mut attempt = 0;
        loop {
            match self.send(audio_bytes, extension).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = backoff_delay(attempt);
                    warn!(attempt, error = %e, "Transcription attempt failed, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn send(&self, audio_bytes: &[u8], extension: Option<&str>) -> Result<String> {
        let extension = extension.unwrap_or("mp3");
        let file_part = multipart::Part::bytes(audio_bytes.to_vec())
            .file_name(format!("audio.{extension}"))
            .mime_str(mime_type(extension))
            .map_err(|e| TruthWeaverError::Transcription(format!("Invalid MIME type: {e}")))?;

        let form = multipart::Form::new()
            .part("file", file_part)
            .text("model", self.model.clone())
            .text("language", "en")
            .text("response_format", "json");

        debug!(url = %self.url, bytes = audio_bytes.len(), "Sending transcription request");

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TruthWeaverError::Transcription("Request timeout".to_string())
                } else {
                    TruthWeaverError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(map_http_error(status, &body));
        }

        let parsed: TranscriptionResponse = response.json().await.map_err(|e| {
            TruthWeaverError::Transcription(format!("Failed to parse transcription response: {e}"))
        })?;

        Ok(parsed.text.trim().to_string())
    }
}

fn backoff_delay(attempt: u32) -> Duration {
    let factor = 2_u64.saturating_pow(attempt.saturating_sub(1));
    Duration::from_millis(BASE_BACKOFF_MS.saturating_mul(factor)).min(MAX_BACKOFF)
}

fn mime_type(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "wav" => "audio/wav",
        "m4a" | "mp4" => "audio/mp4",
        "ogg" => "audio/ogg",
        "webm" => "audio/webm",
        "flac" => "audio/flac",
        _ => "audio/mpeg",
    }
}

fn map_http_error(status: StatusCode, body: &str) -> TruthWeaverError {
    let message = match status {
        StatusCode::UNAUTHORIZED => format!("Authentication failed (401): {body}"),
        StatusCode::PAYLOAD_TOO_LARGE => format!("Audio file rejected as too large (413): {body}"),
        StatusCode::TOO_MANY_REQUESTS => format!("Rate limit exceeded (429): {body}"),
        s if s.is_server_error() => format!("Server error ({}): {body}", s.as_u16()),
        s => format!("Transcription API error ({s}): {body}"),
    };
    TruthWeaverError::Transcription(message)
}
