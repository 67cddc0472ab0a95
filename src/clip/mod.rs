//! Audio clip container and sample math
//!
//! The [`AudioClip`] type is the value every merge operation consumes and
//! produces. Clips are immutable; compositing returns new clips.

mod channels;
mod db;
mod segment;

pub use channels::{ms_to_stereo, stereo_to_ms};
pub use db::{db_to_float, frame_width, ratio_to_db, sample_range, values_ratio_to_db};
pub use segment::{make_chunks, AudioClip};
