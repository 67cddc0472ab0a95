//! WAV import and export
//!
//! Clips live in memory as 32-bit float; integer WAV widths are normalized
//! on import and quantized back to 16-bit PCM on export.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::debug;

use crate::clip::AudioClip;
use crate::error::Result;

/// Read a WAV file into an [`AudioClip`].
pub fn read_wav(path: &Path) -> Result<AudioClip> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    debug!(
        "reading {}: {}ch {} Hz {}-bit {:?}",
        path.display(),
        spec.channels,
        spec.sample_rate,
        spec.bits_per_sample,
        spec.sample_format
    );

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<_, _>>()?,
        SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<std::result::Result<_, _>>()?
        }
    };

    AudioClip::from_interleaved(samples, spec.channels, spec.sample_rate)
}

/// Write a clip to disk as 16-bit PCM WAV.
pub fn write_wav(path: &Path, clip: &AudioClip) -> Result<()> {
    let spec = WavSpec {
        channels: clip.channels(),
        sample_rate: clip.frame_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &sample in clip.samples() {
        let quantized = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer.write_sample(quantized)?;
    }
    writer.finalize()?;
    Ok(())
}
