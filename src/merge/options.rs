//! Overlay placement options and the position planner

/// Parameters for a single overlay call.
///
/// Defaults mirror the overlay primitive: position 0, no looping, no gain
/// change during the overlap.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayParams {
    /// Start offset into the base clip, in milliseconds
    pub position: u64,
    /// Repeat the overlaid clip until the end of the base
    pub loop_to_end: bool,
    /// Cap on the number of repetitions (ignored when `loop_to_end` is set)
    pub times: Option<usize>,
    /// Gain applied to the base signal during the overlap, in dB
    pub gain_during_overlay: f64,
}

impl Default for OverlayParams {
    fn default() -> Self {
        OverlayParams {
            position: 0,
            loop_to_end: false,
            times: None,
            gain_during_overlay: 0.0,
        }
    }
}

/// Placement configuration for one merge input.
///
/// `to_overlay_options` is the position planner: given the accumulating
/// result's duration in milliseconds it produces the overlay calls to apply
/// for this input. The default plan is a single overlay; `repeat_every`
/// switches to duration-driven repetition, one overlay per window of the
/// result's timeline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlayOptions {
    /// Start offset for the first (or only) overlay, in milliseconds
    pub position: u64,
    /// Loop the clip until the end of the base on every overlay call
    pub loop_to_end: bool,
    /// Repetition cap passed through to every overlay call
    pub times: Option<usize>,
    /// Gain applied to the base during each overlap, in dB
    pub gain_during_overlay: f64,
    /// Re-apply the clip every this-many milliseconds of the result
    pub repeat_every: Option<u64>,
}

impl OverlayOptions {
    /// Place the clip once at the start of the base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Plan the overlay calls for a result of `result_len_ms` milliseconds.
    ///
    /// Always yields at least one record, even for a zero-length result.
    pub fn to_overlay_options(&self, result_len_ms: u64) -> Vec<OverlayParams> {
        let base = OverlayParams {
            position: self.position,
            loop_to_end: self.loop_to_end,
            times: self.times,
            gain_during_overlay: self.gain_during_overlay,
        };

        let step = match self.repeat_every {
            Some(step) if step > 0 => step,
            _ => return vec![base],
        };

        let mut plan = Vec::new();
        let mut position = self.position;
        loop {
            plan.push(OverlayParams {
                position,
                ..base.clone()
            });
            position += step;
            if position >= result_len_ms {
                break;
            }
        }
        plan
    }
}
