//! Probe JSON enrichment
//!
//! The prober's JSON output frequently leaves `sample_fmt`,
//! `bits_per_sample` and `bits_per_raw_sample` absent or zero for audio
//! streams. This pass fills those gaps from the attribute tokens mined out
//! of stderr, and never overwrites a field that already holds real data.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{json, Value};

use crate::probe::extra::StreamAttributeTable;

fn int_with_raw_bits_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([su]([0-9]{1,2})p?) \(([0-9]{1,2}) bit\)$")
            .expect("sample format pattern is valid")
    })
}

fn int_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([su]([0-9]{1,2})p?)( \(default\))?$")
            .expect("sample format pattern is valid")
    })
}

fn float_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^fltp?( \(default\))?$").expect("float pattern is valid"))
}

fn double_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^dblp?( \(default\))?$").expect("double pattern is valid"))
}

/// True when the field holds no usable data: absent, null, zero or "".
fn is_empty_field(stream: &Value, prop: &str) -> bool {
    match stream.get(prop) {
        None | Some(Value::Null) => true,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn set_property(stream: &mut Value, prop: &str, value: Value) {
    if is_empty_field(stream, prop) {
        stream[prop] = value;
    }
}

fn apply_token(stream: &mut Value, token: &str) {
    if let Some(caps) = int_with_raw_bits_re().captures(token) {
        let bits: u32 = caps[2].parse().unwrap_or(0);
        let raw_bits: u32 = caps[3].parse().unwrap_or(0);
        set_property(stream, "sample_fmt", json!(caps[1].to_string()));
        set_property(stream, "bits_per_sample", json!(bits));
        set_property(stream, "bits_per_raw_sample", json!(raw_bits));
    } else if let Some(caps) = int_re().captures(token) {
        let bits: u32 = caps[2].parse().unwrap_or(0);
        set_property(stream, "sample_fmt", json!(caps[1].to_string()));
        set_property(stream, "bits_per_sample", json!(bits));
        set_property(stream, "bits_per_raw_sample", json!(bits));
    } else if float_re().is_match(token) {
        set_property(stream, "sample_fmt", json!(token));
        set_property(stream, "bits_per_sample", json!(32));
        set_property(stream, "bits_per_raw_sample", json!(32));
    } else if double_re().is_match(token) {
        set_property(stream, "sample_fmt", json!(token));
        set_property(stream, "bits_per_sample", json!(64));
        set_property(stream, "bits_per_raw_sample", json!(64));
    }
    // Tokens matching none of the patterns are ignored.
}

/// Fill sample-format gaps on the first audio stream of a probe result.
///
/// Operates on the first stream whose `codec_type` is `"audio"`; a result
/// with no audio streams is returned untouched. Only fields that are
/// absent or empty are written.
pub fn enrich_streams(info: &mut Value, extra: &StreamAttributeTable) {
    let Some(streams) = info.get_mut("streams").and_then(Value::as_array_mut) else {
        return;
    };
    let Some(stream) = streams
        .iter_mut()
        .find(|s| s.get("codec_type").and_then(Value::as_str) == Some("audio"))
    else {
        return;
    };

    let index = stream
        .get("index")
        .and_then(Value::as_u64)
        .map(|i| i as usize);
    let Some(tokens) = index.and_then(|i| extra.get(&i)) else {
        return;
    };

    for token in tokens {
        apply_token(stream, token);
    }
}
