//! Transcoder command construction
//!
//! Builds the argument vector for an ffmpeg-family converter invocation.
//! Piped-stdin input differs between families: ffmpeg reads
//! `-read_ahead_limit <n> -i cache:pipe:0`, avconv reads plain `-i -`.
//! What flows over the pipe is the transcoder's business, not this crate's.

use std::io::Write;
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{OverdubError, Result};

/// Builder for one converter invocation.
///
/// Always starts `[converter, "-y"]` so an existing output file is
/// overwritten without prompting.
#[derive(Clone, Debug)]
pub struct ConversionCommand {
    converter: String,
    args: Vec<String>,
}

impl ConversionCommand {
    pub fn new(converter: &str) -> Self {
        ConversionCommand {
            converter: converter.to_string(),
            args: vec!["-y".to_string()],
        }
    }

    /// Output container format (`-f`).
    pub fn format(mut self, file_format: &str) -> Self {
        self.args.extend(["-f".to_string(), file_format.to_string()]);
        self
    }

    /// Audio codec (`-acodec`).
    pub fn codec(mut self, codec: &str) -> Self {
        self.args.extend(["-acodec".to_string(), codec.to_string()]);
        self
    }

    /// Named input file (`-i <filename>`).
    pub fn input_file(mut self, filename: &str) -> Self {
        self.args.extend(["-i".to_string(), filename.to_string()]);
        self
    }

    /// Input over stdin instead of a named file.
    ///
    /// `read_ahead_limit` only applies to the ffmpeg family's cache
    /// protocol; -1 means unlimited read-ahead.
    pub fn piped_input(mut self, read_ahead_limit: i64) -> Self {
        if self.converter == "ffmpeg" {
            self.args.extend([
                "-read_ahead_limit".to_string(),
                read_ahead_limit.to_string(),
                "-i".to_string(),
                "cache:pipe:0".to_string(),
            ]);
        } else {
            self.args.extend(["-i".to_string(), "-".to_string()]);
        }
        self
    }

    /// Drop any video streams (`-vn`).
    pub fn remove_video(mut self) -> Self {
        self.args.push("-vn".to_string());
        self
    }

    /// Trim the start (`-ss <seconds>`).
    pub fn start_second(mut self, start_second: u64) -> Self {
        self.args.extend(["-ss".to_string(), start_second.to_string()]);
        self
    }

    /// Cap the duration (`-t <seconds>`).
    pub fn duration(mut self, duration: u64) -> Self {
        self.args.extend(["-t".to_string(), duration.to_string()]);
        self
    }

    /// Write the result to stdout (trailing `-`).
    pub fn to_stdout(mut self) -> Self {
        self.args.push("-".to_string());
        self
    }

    /// Pass-through extra converter parameters, appended verbatim.
    pub fn parameters<I, S>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(parameters.into_iter().map(Into::into));
        self
    }

    /// The full argument vector, converter binary first.
    pub fn into_args(self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.args.len() + 1);
        args.push(self.converter);
        args.extend(self.args);
        args
    }

    /// Run the converter to completion, feeding `stdin` when given.
    ///
    /// Blocks until the process exits. Returns stdout bytes; a non-zero
    /// exit becomes a [`OverdubError::Transcoder`] carrying the stderr text.
    pub fn run(self, stdin: Option<&[u8]>) -> Result<Vec<u8>> {
        debug!("running converter: {} {}", self.converter, self.args.join(" "));

        let mut command = Command::new(&self.converter);
        command.args(&self.args);
        command.stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());

        let mut child = command.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                OverdubError::ToolNotFound {
                    tool: self.converter.clone(),
                }
            } else {
                OverdubError::Io(e)
            }
        })?;

        if let Some(bytes) = stdin {
            if let Some(mut pipe) = child.stdin.take() {
                // The converter may stop reading early; a broken pipe is fine.
                let _ = pipe.write_all(bytes);
            }
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(OverdubError::Transcoder {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builds_a_full_decode_command() {
        let args = ConversionCommand::new("ffmpeg")
            .format("wav")
            .codec("pcm_s16le")
            .input_file("in.mp3")
            .remove_video()
            .start_second(3)
            .duration(10)
            .to_stdout()
            .into_args();
        assert_eq!(
            args,
            vec![
                "ffmpeg", "-y", "-f", "wav", "-acodec", "pcm_s16le", "-i", "in.mp3", "-vn",
                "-ss", "3", "-t", "10", "-"
            ]
        );
    }

    #[test]
    fn ffmpeg_piped_input_uses_cache_protocol() {
        let args = ConversionCommand::new("ffmpeg").piped_input(-1).into_args();
        assert_eq!(
            args,
            vec!["ffmpeg", "-y", "-read_ahead_limit", "-1", "-i", "cache:pipe:0"]
        );
    }

    #[test]
    fn avconv_piped_input_reads_plain_stdin() {
        let args = ConversionCommand::new("avconv").piped_input(-1).into_args();
        assert_eq!(args, vec!["avconv", "-y", "-i", "-"]);
    }

    #[test]
    fn extra_parameters_are_appended_verbatim() {
        let args = ConversionCommand::new("ffmpeg")
            .input_file("in.wav")
            .parameters(["-ar", "44100"])
            .to_stdout()
            .into_args();
        assert_eq!(
            args,
            vec!["ffmpeg", "-y", "-i", "in.wav", "-ar", "44100", "-"]
        );
    }

    #[test]
    fn missing_converter_is_a_tool_not_found_error() {
        let result = ConversionCommand::new("definitely-not-a-real-converter")
            .input_file("in.wav")
            .run(None);
        assert!(matches!(result, Err(OverdubError::ToolNotFound { .. })));
    }
}
