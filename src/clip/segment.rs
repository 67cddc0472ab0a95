//! The audio clip container
//!
//! Samples are stored interleaved: [L0, R0, L1, R1, ...]. Every operation
//! returns a new clip; inputs are never mutated. Durations are measured in
//! integral milliseconds, which is also the unit the merge planner works in.

use std::ops::Range;

use crate::clip::db::db_to_float;
use crate::error::{OverdubError, Result};
use crate::merge::OverlayParams;

/// An immutable in-memory audio clip.
///
/// The overlay, slice and gain operations all produce new clips. Two clips
/// can be composited only when their channel count and frame rate agree;
/// resampling is out of scope for this crate.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioClip {
    /// Interleaved sample data
    samples: Vec<f32>,
    /// Number of channels (1 = mono, 2 = stereo)
    channels: u16,
    /// Frame rate in Hz
    frame_rate: u32,
}

impl AudioClip {
    /// Create a clip from existing interleaved samples.
    ///
    /// Fails if the sample count is not divisible by the channel count.
    pub fn from_interleaved(samples: Vec<f32>, channels: u16, frame_rate: u32) -> Result<Self> {
        if channels == 0 {
            return Err(OverdubError::InvalidClip {
                reason: "clip must have at least one channel".into(),
            });
        }
        if frame_rate == 0 {
            return Err(OverdubError::InvalidClip {
                reason: "clip frame rate must be non-zero".into(),
            });
        }
        if samples.len() % channels as usize != 0 {
            return Err(OverdubError::InvalidClip {
                reason: format!(
                    "sample count {} is not divisible by channel count {}",
                    samples.len(),
                    channels
                ),
            });
        }
        Ok(Self {
            samples,
            channels,
            frame_rate,
        })
    }

    /// A clip of silence with the given duration.
    ///
    /// `frame_rate` and `channels` must be non-zero.
    pub fn silent(duration_ms: u64, frame_rate: u32, channels: u16) -> Self {
        debug_assert!(frame_rate > 0, "clip frame rate must be non-zero");
        debug_assert!(channels > 0, "clip must have at least one channel");
        let frames = (duration_ms.saturating_mul(frame_rate as u64) / 1000) as usize;
        Self {
            samples: vec![0.0; frames * channels as usize],
            channels,
            frame_rate,
        }
    }

    /// Number of channels
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Frame rate in Hz
    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    /// Number of frames (samples per channel)
    pub fn num_frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    /// Duration in whole milliseconds, rounded down.
    pub fn len_millis(&self) -> u64 {
        self.num_frames() as u64 * 1000 / self.frame_rate as u64
    }

    /// Interleaved sample data
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    fn frame_at_millis(&self, ms: u64) -> usize {
        // Positions are caller-supplied; saturate instead of overflowing.
        // Anything past the clip's end is clamped by the callers anyway.
        (ms.saturating_mul(self.frame_rate as u64) / 1000) as usize
    }

    fn check_compatible(&self, other: &AudioClip, reason: &str) -> Result<()> {
        if self.channels != other.channels || self.frame_rate != other.frame_rate {
            return Err(OverdubError::ClipMismatch {
                reason: reason.into(),
                base_channels: self.channels,
                base_rate: self.frame_rate,
                other_channels: other.channels,
                other_rate: other.frame_rate,
            });
        }
        Ok(())
    }

    /// Composite `other` onto this clip.
    ///
    /// The result keeps this clip's duration; whatever part of `other` falls
    /// past the end is dropped. During the overlapping region the base signal
    /// is scaled by `gain_during_overlay` (dB) and `other` is summed on top.
    /// With `loop_to_end` the overlaid clip repeats until the end of the base;
    /// `times` caps the number of repetitions instead.
    pub fn overlay(&self, other: &AudioClip, params: &OverlayParams) -> Result<AudioClip> {
        self.check_compatible(other, "overlay requires matching channels and frame rate")?;

        let mut out = self.clone();
        let ch = self.channels as usize;
        let base_frames = self.num_frames();
        let other_frames = other.num_frames();
        let start = self.frame_at_millis(params.position);

        if start >= base_frames || other_frames == 0 {
            return Ok(out);
        }

        let gain = db_to_float(params.gain_during_overlay, true) as f32;
        let mut remaining = if params.loop_to_end {
            None
        } else {
            Some(params.times.unwrap_or(1))
        };

        let mut frame = start;
        while frame < base_frames && remaining != Some(0) {
            let span = (base_frames - frame).min(other_frames);
            let base = frame * ch;
            for i in 0..span * ch {
                out.samples[base + i] = out.samples[base + i] * gain + other.samples[i];
            }
            frame += other_frames;
            if let Some(n) = remaining.as_mut() {
                *n -= 1;
            }
        }

        Ok(out)
    }

    /// Return a copy with every sample negated.
    pub fn invert_phase(&self) -> AudioClip {
        AudioClip {
            samples: self.samples.iter().map(|s| -s).collect(),
            channels: self.channels,
            frame_rate: self.frame_rate,
        }
    }

    /// Return a copy with a uniform gain (dB) applied.
    pub fn apply_gain(&self, db: f64) -> AudioClip {
        let ratio = db_to_float(db, true) as f32;
        AudioClip {
            samples: self.samples.iter().map(|s| s * ratio).collect(),
            channels: self.channels,
            frame_rate: self.frame_rate,
        }
    }

    /// Sub-clip by millisecond range, clamped to the clip's length.
    pub fn slice_millis(&self, range: Range<u64>) -> AudioClip {
        let ch = self.channels as usize;
        let start = self.frame_at_millis(range.start).min(self.num_frames());
        let end = self
            .frame_at_millis(range.end.max(range.start))
            .min(self.num_frames());
        AudioClip {
            samples: self.samples[start * ch..end * ch].to_vec(),
            channels: self.channels,
            frame_rate: self.frame_rate,
        }
    }

    /// Split into one mono clip per channel.
    pub fn split_to_mono(&self) -> Vec<AudioClip> {
        let ch = self.channels as usize;
        (0..ch)
            .map(|c| AudioClip {
                samples: self
                    .samples
                    .iter()
                    .skip(c)
                    .step_by(ch)
                    .copied()
                    .collect(),
                channels: 1,
                frame_rate: self.frame_rate,
            })
            .collect()
    }

    /// Interleave mono clips into one multichannel clip.
    ///
    /// All inputs must be mono, with the same frame rate and frame count.
    pub fn from_mono_clips(channels: &[AudioClip]) -> Result<AudioClip> {
        let first = channels.first().ok_or(OverdubError::EmptyInput)?;
        for c in channels {
            first.check_compatible(c, "mono channels must share a frame rate")?;
            if c.channels != 1 {
                return Err(OverdubError::ClipMismatch {
                    reason: "from_mono_clips requires mono inputs".into(),
                    base_channels: 1,
                    base_rate: first.frame_rate,
                    other_channels: c.channels,
                    other_rate: c.frame_rate,
                });
            }
            if c.num_frames() != first.num_frames() {
                return Err(OverdubError::ClipMismatch {
                    reason: "mono channels must have equal frame counts".into(),
                    base_channels: 1,
                    base_rate: first.frame_rate,
                    other_channels: c.channels,
                    other_rate: c.frame_rate,
                });
            }
        }

        let ch = channels.len();
        let frames = first.num_frames();
        let mut samples = vec![0.0; frames * ch];
        for (c, clip) in channels.iter().enumerate() {
            for (i, &s) in clip.samples.iter().enumerate() {
                samples[i * ch + c] = s;
            }
        }
        Ok(AudioClip {
            samples,
            channels: ch as u16,
            frame_rate: first.frame_rate,
        })
    }
}

/// Break a clip into chunks of `chunk_ms` milliseconds.
///
/// The last chunk may be shorter.
pub fn make_chunks(clip: &AudioClip, chunk_ms: u64) -> Vec<AudioClip> {
    if chunk_ms == 0 {
        return vec![clip.clone()];
    }
    let total = clip.len_millis();
    let count = total.div_ceil(chunk_ms).max(1);
    (0..count)
        .map(|i| clip.slice_millis(i * chunk_ms..(i + 1) * chunk_ms))
        .collect()
}
