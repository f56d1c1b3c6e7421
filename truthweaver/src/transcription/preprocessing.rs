//! Decoding of recorded sessions into the 16 kHz mono PCM Whisper expects.

use std::io::Cursor;

use rubato::{FftFixedIn, Resampler};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;

use crate::error::{Result, TruthWeaverError};

pub const WHISPER_SAMPLE_RATE: u32 = 16000;

const RESAMPLE_CHUNK: usize = 1024;

/// Interleaved samples as decoded from a recording.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: usize,
}

impl DecodedAudio {
    pub fn duration_secs(&self) -> f32 {
        if self.channels == 0 || self.sample_rate == 0 {
            return 0.0;
        }
        (self.samples.len() / self.channels) as f32 / self.sample_rate as f32
    }
}

fn audio_error(context: &str, e: impl std::fmt::Display) -> TruthWeaverError {
    TruthWeaverError::Transcription(format!("{context}: {e}"))
}

/// Decode a whole recording. `extension` is only a probe hint.
pub fn decode(bytes: &[u8], extension: Option<&str>) -> Result<DecodedAudio> {
    if bytes.is_empty() {
        return Err(TruthWeaverError::Transcription(
            "Empty audio data".to_string(),
        ));
    }

    let source = MediaSourceStream::new(Box::new(Cursor::new(bytes.to_vec())), Default::default());
    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            source,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| audio_error("Failed to probe audio format", e))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| TruthWeaverError::Transcription("No audio tracks found".to_string()))?;
    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| TruthWeaverError::Transcription("Sample rate not available".to_string()))?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| audio_error("Failed to create decoder", e))?;

    let mut samples = Vec::new();
    let mut channels = track.codec_params.channels.map(|c| c.count()).unwrap_or(1);

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break
            }
            Err(e) => return Err(audio_error("Failed to read packet", e)),
        };
        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                channels = spec.channels.count();
                let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                buffer.copy_interleaved_ref(decoded);
                samples.extend_from_slice(buffer.samples());
            }
            Err(SymphoniaError::DecodeError(e)) => {
                debug!(error = %e, "Skipping undecodable packet");
            }
            Err(e) => return Err(audio_error("Failed to decode audio", e)),
        }
    }

    if samples.is_empty() {
        return Err(TruthWeaverError::Transcription(
            "No audio samples decoded".to_string(),
        ));
    }

    debug!(
        sample_rate,
        channels,
        samples = samples.len(),
        "Decoded audio"
    );

    Ok(DecodedAudio {
        samples,
        sample_rate,
        channels,
    })
}

/// Average interleaved frames down to one channel.
pub fn downmix(samples: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }
    samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

pub fn resample(mono: Vec<f32>, from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    if mono.is_empty() {
        return Err(TruthWeaverError::Transcription(
            "Empty samples for resampling".to_string(),
        ));
    }
    if from_rate == to_rate {
        return Ok(mono);
    }

    let chunk = RESAMPLE_CHUNK.min(mono.len());
    let mut resampler = FftFixedIn::<f32>::new(from_rate as usize, to_rate as usize, chunk, 2, 1)
        .map_err(|e| audio_error("Failed to create resampler", e))?;

    let expected_len = (mono.len() as u64 * to_rate as u64 / from_rate as u64) as usize;
    let mut output = Vec::with_capacity(expected_len);

    for window in mono.chunks(chunk) {
        let mut input = window.to_vec();
        input.resize(chunk, 0.0);
        let frames = resampler
            .process(&[input], None)
            .map_err(|e| audio_error("Resampling failed", e))?;
        output.extend_from_slice(&frames[0]);
    }
    // flush the filter delay with silence
    for _ in 0..4 {
        if output.len() >= expected_len {
            break;
        }
        let frames = resampler
            .process(&[vec![0.0; chunk]], None)
            .map_err(|e| audio_error("Resampling failed", e))?;
        output.extend_from_slice(&frames[0]);
    }
    output.truncate(expected_len);

    Ok(output)
}

/// Decode, downmix and resample a recording for Whisper.
pub fn prepare_for_whisper(bytes: &[u8], extension: Option<&str>) -> Result<Vec<f32>> {
    let audio = decode(bytes, extension)?;
    debug!(duration_secs = audio.duration_secs(), "Preparing audio for Whisper");
    let mono = downmix(&audio.samples, audio.channels);
    resample(mono, audio.sample_rate, WHISPER_SAMPLE_RATE)
}
