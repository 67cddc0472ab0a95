//! Merge command values
//!
//! Transient value objects handed to the merge operations. Each fold step
//! builds one `MergeAudioCommand` and discards it after use.

use crate::clip::AudioClip;
use crate::merge::{OverlayOptions, OverlayPolicy};

/// One source to merge, paired with its placement configuration.
#[derive(Clone, Debug)]
pub struct InputAudio {
    pub audio: AudioClip,
    pub options: OverlayOptions,
}

impl InputAudio {
    /// An input with default placement (single overlay at position 0).
    pub fn new(audio: AudioClip) -> Self {
        InputAudio {
            audio,
            options: OverlayOptions::default(),
        }
    }

    pub fn with_options(audio: AudioClip, options: OverlayOptions) -> Self {
        InputAudio { audio, options }
    }
}

/// Apply one input onto the accumulating result.
#[derive(Clone, Debug)]
pub struct MergeAudioCommand {
    /// The accumulating result
    pub to: AudioClip,
    pub input: InputAudio,
}

/// Merge a set of inputs under an ordering policy.
#[derive(Clone, Debug)]
pub struct MergeAudiosCommand {
    pub inputs: Vec<InputAudio>,
    pub policy: OverlayPolicy,
}
