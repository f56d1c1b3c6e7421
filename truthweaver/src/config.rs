use serde::Deserialize;
use std::env;
use std::path::PathBuf;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

fn parse_env_opt<T: std::str::FromStr>(var: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Ignoring.", val, var, e);
                None
            }
        },
        Err(_) => None,
    }
}

pub const DEFAULT_EVALUATION_DIR: &str = "INNOV8 3.0/Evaluation set/audio";
pub const DEFAULT_EXTRA_DIR: &str = "INNOV8 3.0/INNOV8 3.0";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub transcription: TranscriptionConfig,
    pub pipeline: PipelineConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    pub evaluation_dir: PathBuf,
    pub extra_dir: Option<PathBuf>,
    pub audio_extension: String,
}

impl InputConfig {
    /// Directories scanned for audio, in scan order.
    pub fn audio_dirs(&self) -> Vec<PathBuf> {
        std::iter::once(self.evaluation_dir.clone())
            .chain(self.extra_dir.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub transcript_path: PathBuf,
    pub report_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model_path: Option<String>,
    pub timeout_secs: u64,
    pub max_file_size: u64,
    pub max_retries: u32,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            model: "local/whisper-base".to_string(),
            api_key: None,
            base_url: None,
            model_path: None,
            timeout_secs: 300,
            max_file_size: 104857600,
            max_retries: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Analyse subjects on the blocking pool instead of inline.
    pub concurrent: bool,
    /// Audio files transcribed at once.
    pub transcription_concurrency: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}', expected pretty or json")),
        }
    }
}

impl LogFormat {
    /// Reads `LOG_FORMAT` without logging, so the subscriber can be built
    /// before the rest of the configuration reports bad values.
    pub fn from_env() -> Self {
        env::var("LOG_FORMAT")
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or(LogFormat::Pretty)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: InputConfig {
                evaluation_dir: env::var("TRUTHWEAVER_EVALUATION_DIR")
                    .unwrap_or_else(|_| DEFAULT_EVALUATION_DIR.to_string())
                    .into(),
                extra_dir: match env::var("TRUTHWEAVER_EXTRA_DIR") {
                    Ok(dir) if dir.trim().is_empty() => None,
                    Ok(dir) => Some(dir.into()),
                    Err(_) => Some(DEFAULT_EXTRA_DIR.into()),
                },
                audio_extension: env::var("TRUTHWEAVER_AUDIO_EXTENSION")
                    .unwrap_or_else(|_| "mp3".to_string()),
            },
            output: OutputConfig {
                transcript_path: env::var("TRUTHWEAVER_TRANSCRIPT_PATH")
                    .unwrap_or_else(|_| "transcribed.txt".to_string())
                    .into(),
                report_path: env::var("TRUTHWEAVER_REPORT_PATH")
                    .unwrap_or_else(|_| "PrelimsSubmission.json".to_string())
                    .into(),
            },
            transcription: TranscriptionConfig {
                model: env::var("TRANSCRIPTION_MODEL")
                    .unwrap_or_else(|_| "local/whisper-base".to_string()),
                api_key: env::var("TRANSCRIPTION_API_KEY").ok(),
                base_url: env::var("TRANSCRIPTION_BASE_URL").ok(),
                model_path: env::var("TRANSCRIPTION_MODEL_PATH").ok(),
                timeout_secs: parse_env_or("TRANSCRIPTION_TIMEOUT", 300),
                max_file_size: parse_env_or("TRANSCRIPTION_MAX_FILE_SIZE", 104857600),
                max_retries: parse_env_or("TRANSCRIPTION_MAX_RETRIES", 3),
            },
            pipeline: PipelineConfig {
                concurrent: parse_env_or("PIPELINE_CONCURRENT", true),
                transcription_concurrency: parse_env_opt("TRANSCRIPTION_CONCURRENCY")
                    .filter(|n: &usize| *n > 0)
                    .unwrap_or(2),
            },
            logging: LoggingConfig {
                format: parse_env_or("LOG_FORMAT", LogFormat::Pretty),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

/// Known transcription providers that use OpenAI-compatible APIs
const KNOWN_PROVIDERS: &[&str] = &["openai", "openrouter", "groq", "local"];

/// Parse a model name into (provider, model) tuple.
pub fn parse_provider_model(model: &str) -> (&str, &str) {
    if let Some((prefix, rest)) = model.split_once('/') {
        let prefix_lower = prefix.to_lowercase();
        if KNOWN_PROVIDERS.contains(&prefix_lower.as_str()) {
            return (prefix, rest);
        }
    }
    ("local", model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    const VARS: &[&str] = &[
        "TRUTHWEAVER_EVALUATION_DIR",
        "TRUTHWEAVER_EXTRA_DIR",
        "TRUTHWEAVER_AUDIO_EXTENSION",
        "TRUTHWEAVER_TRANSCRIPT_PATH",
        "TRUTHWEAVER_REPORT_PATH",
        "TRANSCRIPTION_MODEL",
        "TRANSCRIPTION_TIMEOUT",
        "TRANSCRIPTION_MAX_RETRIES",
        "TRANSCRIPTION_CONCURRENCY",
        "PIPELINE_CONCURRENT",
        "LOG_FORMAT",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_config_defaults() {
        clear_env();

        let config = Config::default();
        assert_eq!(
            config.input.evaluation_dir,
            PathBuf::from(DEFAULT_EVALUATION_DIR)
        );
        assert_eq!(config.input.extra_dir, Some(PathBuf::from(DEFAULT_EXTRA_DIR)));
        assert_eq!(config.input.audio_extension, "mp3");
        assert_eq!(config.output.transcript_path, PathBuf::from("transcribed.txt"));
        assert_eq!(
            config.output.report_path,
            PathBuf::from("PrelimsSubmission.json")
        );
        assert_eq!(config.transcription.model, "local/whisper-base");
        assert_eq!(config.transcription.timeout_secs, 300);
        assert_eq!(config.transcription.max_retries, 3);
        assert!(config.pipeline.concurrent);
        assert_eq!(config.pipeline.transcription_concurrency, 2);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    #[serial]
    fn test_config_from_env() {
        clear_env();
        std::env::set_var("TRUTHWEAVER_EVALUATION_DIR", "/data/audio");
        std::env::set_var("TRUTHWEAVER_EXTRA_DIR", "");
        std::env::set_var("TRANSCRIPTION_MODEL", "groq/whisper-large-v3");
        std::env::set_var("PIPELINE_CONCURRENT", "false");
        std::env::set_var("LOG_FORMAT", "JSON");

        let config = Config::from_env();
        assert_eq!(config.input.audio_dirs(), vec![PathBuf::from("/data/audio")]);
        assert_eq!(config.transcription.model, "groq/whisper-large-v3");
        assert!(!config.pipeline.concurrent);
        assert_eq!(config.logging.format, LogFormat::Json);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_values_fall_back() {
        clear_env();
        std::env::set_var("TRANSCRIPTION_TIMEOUT", "soon");
        std::env::set_var("TRANSCRIPTION_CONCURRENCY", "0");
        std::env::set_var("LOG_FORMAT", "xml");

        let config = Config::default();
        assert_eq!(config.transcription.timeout_secs, 300);
        assert_eq!(config.pipeline.transcription_concurrency, 2);
        assert_eq!(config.logging.format, LogFormat::Pretty);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_log_format_from_env() {
        clear_env();
        assert_eq!(LogFormat::from_env(), LogFormat::Pretty);
        std::env::set_var("LOG_FORMAT", "json");
        assert_eq!(LogFormat::from_env(), LogFormat::Json);
        std::env::set_var("LOG_FORMAT", "xml");
        assert_eq!(LogFormat::from_env(), LogFormat::Pretty);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_values_are_logged() {
        clear_env();
        std::env::set_var("PIPELINE_CONCURRENT", "maybe");

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .finish();
        let config = tracing::subscriber::with_default(subscriber, Config::from_env);

        assert!(config.pipeline.concurrent);
        assert!(logs
            .contents()
            .contains("Invalid value 'maybe' for PIPELINE_CONCURRENT"));

        clear_env();
    }

    #[test]
    fn test_audio_dirs_order() {
        let input = InputConfig {
            evaluation_dir: "eval".into(),
            extra_dir: Some("extra".into()),
            audio_extension: "mp3".to_string(),
        };
        assert_eq!(
            input.audio_dirs(),
            vec![PathBuf::from("eval"), PathBuf::from("extra")]
        );
    }

    #[test]
    fn test_parse_provider_model() {
        assert_eq!(parse_provider_model("openai/whisper-1"), ("openai", "whisper-1"));
        assert_eq!(
            parse_provider_model("groq/whisper-large-v3"),
            ("groq", "whisper-large-v3")
        );
        assert_eq!(parse_provider_model("local/whisper-base"), ("local", "whisper-base"));
        assert_eq!(parse_provider_model("whisper-base"), ("local", "whisper-base"));
        assert_eq!(parse_provider_model("acme/model"), ("local", "acme/model"));
    }
}
