//! overdub - audio clip composition over ffmpeg-family tools
//!
//! Two pieces of real work live here:
//! 1. The overlay composition engine: merge any number of clips into one
//!    under a selectable ordering policy ([`merge`]).
//! 2. Probe-metadata reconciliation: the prober's JSON is frequently
//!    incomplete for sample-format fields, so attributes parsed out of its
//!    diagnostic text fill the gaps ([`probe`]).
//!
//! Around those sit narrow collaborators: the clip container ([`clip`]),
//! WAV import/export ([`io`]), transcoder command construction
//! ([`transcode`]) and a compression backend registry ([`compression`]).

pub mod cli;
pub mod clip;
pub mod compression;
pub mod error;
pub mod io;
pub mod merge;
pub mod probe;
pub mod transcode;

pub use clip::AudioClip;
pub use error::{OverdubError, Result};
pub use merge::{merge_audios, MergeAudiosCommand, OverlayPolicy};
