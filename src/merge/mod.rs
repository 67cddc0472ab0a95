//! Multi-track overlay composition
//!
//! An N-way merge is a stable sort by the policy's key followed by a fold of
//! pairwise overlays. The position planner on [`OverlayOptions`] decides how
//! many overlay calls each input gets against the accumulating result.

mod command;
mod op;
mod options;
mod policy;

pub use command::{InputAudio, MergeAudioCommand, MergeAudiosCommand};
pub use op::{merge_audio, merge_audios};
pub use options::{OverlayOptions, OverlayParams};
pub use policy::OverlayPolicy;
