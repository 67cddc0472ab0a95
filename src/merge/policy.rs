//! Overlay ordering policies

use std::fmt;
use std::str::FromStr;

use crate::clip::AudioClip;

/// Strategy selecting the base track and fold order for an N-way merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayPolicy {
    /// Keep the original input order; the first input is the timeline base.
    First,
    /// Longest clip first, so shorter tracks are laid over the longest
    /// timeline and nothing gets truncated against a shorter base.
    Longest,
}

impl OverlayPolicy {
    /// Sort key for ascending stable sort. Ties keep input order.
    pub fn sort_key(&self, clip: &AudioClip) -> i64 {
        match self {
            OverlayPolicy::First => 0,
            OverlayPolicy::Longest => -(clip.len_millis() as i64),
        }
    }
}

impl fmt::Display for OverlayPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayPolicy::First => write!(f, "first"),
            OverlayPolicy::Longest => write!(f, "longest"),
        }
    }
}

impl FromStr for OverlayPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(OverlayPolicy::First),
            "longest" => Ok(OverlayPolicy::Longest),
            other => Err(format!("unknown overlay policy: {other}")),
        }
    }
}
