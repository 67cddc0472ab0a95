//! Merge operations
//!
//! `merge_audio` is the pairwise executor: it plans overlay calls from the
//! accumulating result's duration and folds them through the overlay
//! primitive. `merge_audios` is the N-way orchestrator: stable-sort by the
//! policy's key, seed with the first input, fold the rest pairwise.

use log::debug;

use crate::clip::AudioClip;
use crate::error::{OverdubError, Result};
use crate::merge::{MergeAudioCommand, MergeAudiosCommand};

/// Apply one input clip onto the accumulating result.
pub fn merge_audio(cmd: MergeAudioCommand) -> Result<AudioClip> {
    let mut result = cmd.to;
    let plan = cmd.input.options.to_overlay_options(result.len_millis());

    debug!(
        "overlaying {} ms clip in {} call(s)",
        cmd.input.audio.len_millis(),
        plan.len()
    );

    for params in &plan {
        result = result.overlay(&cmd.input.audio, params)?;
    }

    Ok(result)
}

/// Merge all inputs into one clip under the command's ordering policy.
///
/// The sort is stable, so inputs with equal keys keep their original
/// relative order. A single input is returned as-is, with no overlay calls.
pub fn merge_audios(cmd: MergeAudiosCommand) -> Result<AudioClip> {
    if cmd.inputs.is_empty() {
        return Err(OverdubError::EmptyInput);
    }

    let policy = cmd.policy;
    let mut inputs = cmd.inputs;
    inputs.sort_by_key(|input| policy.sort_key(&input.audio));

    debug!("merging {} input(s) under policy {policy}", inputs.len());

    let mut iter = inputs.into_iter();
    let first = iter.next().ok_or(OverdubError::EmptyInput)?;
    let mut result = first.audio;

    for input in iter {
        result = merge_audio(MergeAudioCommand { to: result, input })?;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::{InputAudio, OverlayOptions, OverlayPolicy};

    fn tone(ms: u64, value: f32) -> AudioClip {
        AudioClip::from_interleaved(vec![value; ms as usize], 1, 1000).unwrap()
    }

    #[test]
    fn single_input_is_returned_unchanged() {
        let clip = tone(1000, 0.3);
        let merged = merge_audios(MergeAudiosCommand {
            inputs: vec![InputAudio::new(clip.clone())],
            policy: OverlayPolicy::Longest,
        })
        .unwrap();
        assert_eq!(merged, clip);
    }

    #[test]
    fn empty_inputs_error() {
        let result = merge_audios(MergeAudiosCommand {
            inputs: vec![],
            policy: OverlayPolicy::First,
        });
        assert!(matches!(result, Err(OverdubError::EmptyInput)));
    }

    #[test]
    fn longest_clip_becomes_the_timeline_base() {
        let inputs = vec![
            InputAudio::new(tone(1000, 0.1)),
            InputAudio::new(tone(5000, 0.2)),
            InputAudio::new(tone(2000, 0.3)),
        ];
        let merged = merge_audios(MergeAudiosCommand {
            inputs,
            policy: OverlayPolicy::Longest,
        })
        .unwrap();
        // Base is the 5000 ms clip; nothing is truncated against it.
        assert_eq!(merged.len_millis(), 5000);
        // All three overlap in the first second.
        assert!((merged.samples()[0] - 0.6).abs() < 1e-6);
        // Only the base remains past the 2000 ms mark.
        assert!((merged.samples()[4999] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn first_policy_keeps_input_order() {
        let inputs = vec![
            InputAudio::new(tone(1000, 0.1)),
            InputAudio::new(tone(5000, 0.2)),
        ];
        let merged = merge_audios(MergeAudiosCommand {
            inputs,
            policy: OverlayPolicy::First,
        })
        .unwrap();
        // The 1000 ms first input is the base, so the result is 1000 ms.
        assert_eq!(merged.len_millis(), 1000);
    }

    #[test]
    fn equal_lengths_keep_relative_order_under_longest() {
        // Distinguish order by which clip ends up as the base: the base's
        // samples are damped by the overlay gain, the overlaid clip's are not.
        let a = tone(1000, 1.0);
        let b = tone(1000, 0.0);
        let options = OverlayOptions {
            gain_during_overlay: -6.0,
            ..OverlayOptions::default()
        };
        let merged = merge_audios(MergeAudiosCommand {
            inputs: vec![
                InputAudio::new(a),
                InputAudio::with_options(b, options),
            ],
            policy: OverlayPolicy::Longest,
        })
        .unwrap();
        let damped = crate::clip::db_to_float(-6.0, true) as f32;
        // `a` sorted first (stable tie-break), so it was the damped base.
        assert!((merged.samples()[0] - damped).abs() < 1e-6);
    }

    #[test]
    fn merge_is_deterministic() {
        let inputs = vec![
            InputAudio::new(tone(1200, 0.11)),
            InputAudio::new(tone(1200, -0.07)),
            InputAudio::new(tone(800, 0.4)),
        ];
        let cmd = MergeAudiosCommand {
            inputs,
            policy: OverlayPolicy::Longest,
        };
        let once = merge_audios(cmd.clone()).unwrap();
        let twice = merge_audios(cmd).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn repeat_every_applies_one_overlay_per_window() {
        let base = tone(3000, 0.0);
        let stamp = tone(10, 0.5);
        let options = OverlayOptions {
            repeat_every: Some(1000),
            ..OverlayOptions::default()
        };
        let merged = merge_audios(MergeAudiosCommand {
            inputs: vec![
                InputAudio::new(base),
                InputAudio::with_options(stamp, options),
            ],
            policy: OverlayPolicy::Longest,
        })
        .unwrap();
        for start in [0usize, 1000, 2000] {
            assert!((merged.samples()[start] - 0.5).abs() < 1e-6);
            assert!(merged.samples()[start + 11].abs() < 1e-6);
        }
    }
}
