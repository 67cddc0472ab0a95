//! Command-line interface
//!
//! Thin wrappers over the library: probe a file and print the enriched
//! metadata, or merge WAV clips under an overlay policy.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::info;

use crate::error::Result;
use crate::io::{read_wav, write_wav};
use crate::merge::{
    merge_audios, InputAudio, MergeAudiosCommand, OverlayOptions, OverlayPolicy,
};
use crate::probe::{mediainfo_json, ProbeSource};

/// Audio clip composition and media probing over ffmpeg-family tools
#[derive(Parser, Debug)]
#[command(name = "overdub")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print enriched media metadata for a file as JSON
    Probe {
        /// Media file to probe
        file: PathBuf,

        /// Read-ahead byte limit for piped input (-1 = unlimited)
        #[arg(long, default_value_t = -1)]
        read_ahead_limit: i64,
    },

    /// Merge WAV clips into one output under an overlay policy
    Merge {
        /// Input WAV files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output WAV file
        #[arg(short, long)]
        output: PathBuf,

        /// Ordering policy: first | longest
        #[arg(short, long, default_value = "first")]
        policy: OverlayPolicy,

        /// Gain applied to the base during each overlap, in dB
        #[arg(long, default_value_t = 0.0)]
        gain_during_overlay: f64,
    },
}

/// Probe `file` and print the enriched JSON, or a note when unreadable.
pub fn probe(file: &PathBuf, read_ahead_limit: i64) -> Result<()> {
    match mediainfo_json(ProbeSource::Path(file), read_ahead_limit)? {
        Some(info) => println!("{}", serde_json::to_string_pretty(&info)?),
        None => println!("no media information available for {}", file.display()),
    }
    Ok(())
}

/// Merge the input files and write the result.
pub fn merge(
    inputs: &[PathBuf],
    output: &PathBuf,
    policy: OverlayPolicy,
    gain_during_overlay: f64,
) -> Result<()> {
    let options = OverlayOptions {
        gain_during_overlay,
        ..OverlayOptions::default()
    };

    let mut sources = Vec::with_capacity(inputs.len());
    for path in inputs {
        let clip = read_wav(path)?;
        info!("loaded {} ({} ms)", path.display(), clip.len_millis());
        sources.push(InputAudio::with_options(clip, options.clone()));
    }

    let merged = merge_audios(MergeAudiosCommand {
        inputs: sources,
        policy,
    })?;
    info!("merged {} clip(s) into {} ms", inputs.len(), merged.len_millis());

    write_wav(output, &merged)?;
    Ok(())
}
