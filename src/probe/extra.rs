//! Stream attribute extraction from prober diagnostics
//!
//! The prober's stderr often carries per-stream details its JSON output
//! leaves blank, in the form:
//!
//! ```text
//!     Stream #0:0: Audio: flac, 88200 Hz, stereo, s32 (24 bit)
//! ```
//!
//! or split over a continuation line (seen on macOS builds):
//!
//! ```text
//!     Stream #0:0: Audio: vorbis
//!       44100 Hz, stereo, fltp, 320 kb/s
//! ```

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

/// Trimmed attribute tokens per stream index, built once from stderr text.
pub type StreamAttributeTable = BTreeMap<usize, Vec<String>>;

fn header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<indent> +)Stream #0[:.](?P<id>[0-9]+)(?P<content>.+)$")
            .expect("stream header pattern is valid")
    })
}

fn continuation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<indent> +)(?P<content>\S.*)$").expect("continuation pattern is valid")
    })
}

/// Parse prober stderr into attribute tokens keyed by stream index.
///
/// A line following a stream header counts as a continuation when it is not
/// itself a stream header and is indented at least as deeply as the header;
/// its content is joined to the header's with a comma. The combined content
/// is split on `:` and `,`, trimmed, and empty tokens are dropped. A later
/// header for the same index replaces the earlier entry. Text that matches
/// nothing yields nothing; it is never an error.
pub fn extra_stream_info(stderr: &str) -> StreamAttributeTable {
    let mut table = StreamAttributeTable::new();
    let lines: Vec<&str> = stderr.lines().collect();

    for (i, line) in lines.iter().enumerate() {
        let Some(header) = header_re().captures(line) else {
            continue;
        };
        let Ok(id) = header["id"].parse::<usize>() else {
            continue;
        };

        let mut content = header["content"].to_string();
        if let Some(next) = lines.get(i + 1) {
            if !next.trim_start().starts_with("Stream") {
                if let Some(cont) = continuation_re().captures(next) {
                    if header["indent"].len() <= cont["indent"].len() {
                        content.push(',');
                        content.push_str(&cont["content"]);
                    }
                }
            }
        }

        let tokens: Vec<String> = content
            .split([':', ','])
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        table.insert(id, tokens);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn single_line_stream_header() {
        let stderr = "    Stream #0:0: Audio: flac, 88200 Hz, stereo, s32 (24 bit)\n";
        let table = extra_stream_info(stderr);
        assert_eq!(
            table[&0],
            vec!["Audio", "flac", "88200 Hz", "stereo", "s32 (24 bit)"]
        );
    }

    #[test]
    fn continuation_line_is_joined() {
        let stderr = "    Stream #0:0: Audio: vorbis\n      44100 Hz, stereo, fltp, 320 kb/s\n";
        let table = extra_stream_info(stderr);
        assert_eq!(
            table[&0],
            vec!["Audio", "vorbis", "44100 Hz", "stereo", "fltp", "320 kb/s"]
        );
    }

    #[test]
    fn shallower_continuation_is_ignored() {
        let stderr = "      Stream #0:0: Audio: vorbis\n  44100 Hz, stereo\n";
        let table = extra_stream_info(stderr);
        assert_eq!(table[&0], vec!["Audio", "vorbis"]);
    }

    #[test]
    fn following_stream_header_is_not_a_continuation() {
        let stderr = "    Stream #0:0: Video: h264, 1920x1080\n    Stream #0:1: Audio: aac, 48000 Hz\n";
        let table = extra_stream_info(stderr);
        assert_eq!(table[&0], vec!["Video", "h264", "1920x1080"]);
        assert_eq!(table[&1], vec!["Audio", "aac", "48000 Hz"]);
    }

    #[test]
    fn dot_separated_stream_index_is_accepted() {
        let stderr = "    Stream #0.2: Audio: mp3, 44100 Hz\n";
        let table = extra_stream_info(stderr);
        assert_eq!(table[&2], vec!["Audio", "mp3", "44100 Hz"]);
    }

    #[test]
    fn later_header_replaces_earlier_entry() {
        let stderr = "    Stream #0:0: Audio: flac\n\n    Stream #0:0: Audio: aac, 48000 Hz\n";
        let table = extra_stream_info(stderr);
        assert_eq!(table[&0], vec!["Audio", "aac", "48000 Hz"]);
    }

    #[test]
    fn unrelated_text_yields_empty_table() {
        assert!(extra_stream_info("ffprobe version 6.0\nInput #0, wav\n").is_empty());
        assert!(extra_stream_info("").is_empty());
    }
}
