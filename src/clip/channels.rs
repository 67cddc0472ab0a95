//! Stereo channel transforms
//!
//! Left/Right to Mid/Side and back, built from overlay and phase inversion.

use crate::clip::AudioClip;
use crate::error::{OverdubError, Result};
use crate::merge::OverlayParams;

fn require_stereo(clip: &AudioClip) -> Result<()> {
    if clip.channels() != 2 {
        return Err(OverdubError::InvalidClip {
            reason: format!(
                "mid/side transform requires a stereo clip, got {} channel(s)",
                clip.channels()
            ),
        });
    }
    Ok(())
}

/// Left-Right -> Mid-Side
pub fn stereo_to_ms(clip: &AudioClip) -> Result<AudioClip> {
    require_stereo(clip)?;
    let lr = clip.split_to_mono();
    let mid = lr[0].overlay(&lr[1], &OverlayParams::default())?;
    let side = lr[0].overlay(&lr[1].invert_phase(), &OverlayParams::default())?;
    AudioClip::from_mono_clips(&[mid, side])
}

/// Mid-Side -> Left-Right
///
/// The -3 dB trim compensates for the doubling introduced by the forward
/// transform.
pub fn ms_to_stereo(clip: &AudioClip) -> Result<AudioClip> {
    require_stereo(clip)?;
    let ms = clip.split_to_mono();
    let left = ms[0].overlay(&ms[1], &OverlayParams::default())?.apply_gain(-3.0);
    let right = ms[0]
        .overlay(&ms[1].invert_phase(), &OverlayParams::default())?
        .apply_gain(-3.0);
    AudioClip::from_mono_clips(&[left, right])
}
