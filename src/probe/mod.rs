//! Media probing and metadata reconciliation
//!
//! The prober's JSON output is frequently incomplete for sample-format and
//! bit-depth fields. This module runs the prober, mines its stderr for
//! per-stream attribute tokens, and folds those back into the JSON without
//! disturbing fields that already hold data.

mod enrich;
mod extra;
mod mediainfo;

pub use enrich::enrich_streams;
pub use extra::{extra_stream_info, StreamAttributeTable};
pub use mediainfo::{
    encoder_name, mediainfo_json, player_name, prober_name, supported_decoders,
    supported_encoders, ProbeSource,
};
