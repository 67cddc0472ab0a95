//! Prober invocation
//!
//! Runs the ffmpeg-family prober as a blocking subprocess, parses its JSON
//! stdout and reconciles it with the attributes mined from stderr. The
//! prober call is the only blocking boundary in the crate; everything
//! downstream of it is pure.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use log::{debug, warn};
use regex::Regex;
use serde_json::Value;

use crate::error::Result;
use crate::probe::enrich::enrich_streams;
use crate::probe::extra::extra_stream_info;

/// What to probe: a file on disk, or raw bytes fed over stdin.
#[derive(Clone, Copy, Debug)]
pub enum ProbeSource<'a> {
    Path(&'a Path),
    Bytes(&'a [u8]),
}

fn find_tool(preferred: &str, fallback: &str) -> String {
    if which::which(preferred).is_ok() {
        preferred.to_string()
    } else if which::which(fallback).is_ok() {
        fallback.to_string()
    } else {
        warn!("couldn't find {fallback} or {preferred} - defaulting to {fallback}, but it may not work");
        fallback.to_string()
    }
}

/// Name of the probe tool on PATH, `avprobe` or `ffprobe`.
pub fn prober_name() -> String {
    find_tool("avprobe", "ffprobe")
}

/// Name of the encoder tool on PATH, `avconv` or `ffmpeg`.
pub fn encoder_name() -> String {
    find_tool("avconv", "ffmpeg")
}

/// Name of the player tool on PATH, `avplay` or `ffplay`.
pub fn player_name() -> String {
    find_tool("avplay", "ffplay")
}

/// Probe a media source and return its enriched metadata.
///
/// Returns `Ok(None)` when the prober produced no parseable JSON, which is
/// how a missing or unreadable file presents; callers need no special case
/// for parse failure. Byte sources are fed over stdin; under ffprobe that
/// uses the `cache:pipe:0` protocol with `read_ahead_limit` bytes of
/// read-ahead (-1 for unlimited).
pub fn mediainfo_json(source: ProbeSource<'_>, read_ahead_limit: i64) -> Result<Option<Value>> {
    let prober = prober_name();

    let mut command = Command::new(&prober);
    command.args(["-of", "json", "-v", "info", "-show_format", "-show_streams"]);

    let stdin_data = match source {
        ProbeSource::Path(path) => {
            command.arg(path);
            command.stdin(Stdio::null());
            None
        }
        ProbeSource::Bytes(bytes) => {
            if prober == "ffprobe" {
                command.arg("-read_ahead_limit");
                command.arg(read_ahead_limit.to_string());
                command.arg("cache:pipe:0");
            } else {
                command.arg("-");
            }
            command.stdin(Stdio::piped());
            Some(bytes)
        }
    };

    debug!("probing with: {command:?}");
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());

    let mut child = command.spawn()?;
    if let Some(bytes) = stdin_data {
        if let Some(mut stdin) = child.stdin.take() {
            // The prober may stop reading early; a broken pipe is fine.
            let _ = stdin.write_all(bytes);
        }
    }
    let output = child.wait_with_output()?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    let mut info: Value = match serde_json::from_str(&stdout) {
        Ok(value) => value,
        // No JSON at all means the prober had nothing to say about the
        // source (missing file, unreadable stream).
        Err(_) => return Ok(None),
    };

    if info.as_object().map_or(true, |map| map.is_empty()) {
        return Ok(Some(info));
    }

    let extra = extra_stream_info(&stderr);
    enrich_streams(&mut info, &extra);
    Ok(Some(info))
}

fn codec_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([D.][E.][AVS.][I.][L.][S.]) (\w+) +(.*)")
            .expect("codec table pattern is valid")
    })
}

fn query_codecs() -> (BTreeSet<String>, BTreeSet<String>) {
    let encoder = encoder_name();
    let output = match Command::new(&encoder)
        .arg("-codecs")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
    {
        Ok(output) if output.status.success() => output,
        _ => return (BTreeSet::new(), BTreeSet::new()),
    };

    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut decoders = BTreeSet::new();
    let mut encoders = BTreeSet::new();
    for line in stdout.lines() {
        let Some(caps) = codec_line_re().captures(line.trim()) else {
            continue;
        };
        let flags = &caps[1];
        let codec = caps[2].to_string();
        if flags.starts_with('D') {
            decoders.insert(codec.clone());
        }
        if flags[1..].starts_with('E') {
            encoders.insert(codec);
        }
    }
    (decoders, encoders)
}

fn codec_cache() -> &'static (BTreeSet<String>, BTreeSet<String>) {
    static CACHE: OnceLock<(BTreeSet<String>, BTreeSet<String>)> = OnceLock::new();
    CACHE.get_or_init(query_codecs)
}

/// Codec names the local encoder can decode. Queried once per process.
pub fn supported_decoders() -> &'static BTreeSet<String> {
    &codec_cache().0
}

/// Codec names the local encoder can encode. Queried once per process.
pub fn supported_encoders() -> &'static BTreeSet<String> {
    &codec_cache().1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_table_lines_parse() {
        let line = "DEA.L. flac   FLAC (Free Lossless Audio Codec)";
        let caps = codec_line_re().captures(line).unwrap();
        assert_eq!(&caps[2], "flac");
        assert!(caps[1].starts_with('D'));
    }

    #[test]
    fn non_codec_lines_do_not_parse() {
        assert!(codec_line_re().captures("Codecs:").is_none());
        assert!(codec_line_re().captures(" D..... = Decoding supported").is_none());
    }
}
