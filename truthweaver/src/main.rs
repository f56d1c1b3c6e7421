use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use truthweaver::config::{Config, LogFormat};
use truthweaver::processing::{discover_audio_files, transcribe_all, Transcript, TruthPipeline};
use truthweaver::transcription::{TranscriptLog, TranscriptionProvider};

#[derive(Parser)]
#[command(name = "truthweaver")]
#[command(about = "Detect contradictions across a subject's recorded self-reports")]
struct Args {
    /// Directory holding the evaluation recordings
    #[arg(long)]
    evaluation_dir: Option<PathBuf>,

    /// Additional directory of recordings
    #[arg(long)]
    extra_dir: Option<PathBuf>,

    /// Analyse an existing transcript log instead of transcribing audio
    #[arg(long, value_name = "FILE")]
    transcripts: Option<PathBuf>,

    /// Where to write the JSON report
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Where to write the transcript log
    #[arg(long, value_name = "FILE")]
    transcript_output: Option<PathBuf>,
}

impl Args {
    fn apply(self, config: &mut Config) -> Option<PathBuf> {
        if let Some(dir) = self.evaluation_dir {
            config.input.evaluation_dir = dir;
        }
        if let Some(dir) = self.extra_dir {
            config.input.extra_dir = Some(dir);
        }
        if let Some(path) = self.output {
            config.output.report_path = path;
        }
        if let Some(path) = self.transcript_output {
            config.output.transcript_path = path;
        }
        self.transcripts
    }
}

fn init_tracing(format: LogFormat) {
    let json = format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "truthweaver=info".into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    init_tracing(LogFormat::from_env());

    let mut config = Config::from_env();
    let transcript_input = args.apply(&mut config);

    let pipeline = TruthPipeline::new();
    let dead_rules = pipeline.audit_rules();
    if dead_rules > 0 {
        tracing::info!(dead_rules, "Rule audit finished");
    }

    let transcripts = match transcript_input {
        Some(path) => {
            tracing::info!("Reading transcripts from {}...", path.display());
            TranscriptLog::read(&path)?
        }
        None => transcribe(&config).await?,
    };

    let report = if config.pipeline.concurrent {
        pipeline.analyze_concurrent(transcripts).await?
    } else {
        pipeline.analyze(&transcripts)
    };
    report.write_json(&config.output.report_path)?;

    tracing::info!(
        "All done! Wrote {}.",
        config.output.report_path.display()
    );
    Ok(())
}

async fn transcribe(config: &Config) -> anyhow::Result<Vec<Transcript>> {
    let files = discover_audio_files(&config.input.audio_dirs(), &config.input.audio_extension)?;
    if files.is_empty() {
        anyhow::bail!("No audio files found. Please check directories.");
    }

    tracing::info!(
        "Initializing transcription provider: {}...",
        config.transcription.model
    );
    let provider = TranscriptionProvider::new(&config.transcription);
    if let Some(reason) = provider.unavailable_reason() {
        tracing::warn!(
            "Transcription unavailable - every session will be analysed as empty: {}",
            reason
        );
    }

    let mut log = TranscriptLog::create(&config.output.transcript_path)?;
    let transcripts = transcribe_all(
        &provider,
        &files,
        &mut log,
        config.pipeline.transcription_concurrency,
    )
    .await?;
    tracing::info!("Wrote {}", log.path().display());
    Ok(transcripts)
}
