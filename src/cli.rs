//! Command-line surface and input-source resolution
//!
//! Flags are case-insensitive and order-independent. Exactly one of the four
//! input modes is selected per invocation; anything else is a usage error.

use crate::error::{Error, Result};
use std::path::PathBuf;

pub const USAGE: &str = "Usage:
  foundry-ocr <imagePath> [--pretty] [--out <file>] [--lang <code>]
  foundry-ocr --stdin [--pretty] [--out <file>] [--lang <code>]
  foundry-ocr --base64 <base64String> [--pretty] [--out <file>] [--lang <code>]
  foundry-ocr --stdin --base64 [--pretty] [--out <file>] [--lang <code>]
  foundry-ocr --help
";

/// Where the image bytes come from. Exactly one per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Image file on disk; the engine opens the path itself.
    File(PathBuf),
    /// Raw image bytes streamed from stdin.
    StdinImage,
    /// Base64-encoded image given inline after `--base64`.
    Base64Literal(String),
    /// Base64 text read from stdin (`--stdin --base64`).
    StdinBase64,
}

/// A validated invocation: one input source plus the shared options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub source: InputSource,
    /// Indent the JSON result.
    pub pretty: bool,
    /// Write the result here instead of stdout.
    pub out_file: Option<PathBuf>,
    /// Language hint, reserved for future use. Accepted and stored, never validated.
    pub lang: Option<String>,
}

/// Outcome of argument resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Empty argument vector or `--help` anywhere: print usage, exit 0.
    Usage,
    Run(Request),
}

/// Resolve the raw argument vector into exactly one input mode.
///
/// Mode rules, in order:
/// 1. `--base64` without `--stdin`: the payload is the value of `--base64`.
/// 2. `--base64` with `--stdin`: base64 text is read from stdin; a file path
///    alongside is a conflict.
/// 3. `--stdin` alone: raw image bytes from stdin.
/// 4. otherwise: the positional argument is the image path.
pub fn resolve(args: &[String]) -> Result<Resolution> {
    if args.is_empty() || args.iter().any(|a| a.eq_ignore_ascii_case("--help")) {
        return Ok(Resolution::Usage);
    }

    let use_stdin = has_flag(args, "--stdin");
    let pretty = has_flag(args, "--pretty");
    let is_base64 = has_flag(args, "--base64");

    let out_file = option_value(args, "--out").filter(|v| !v.trim().is_empty());
    let lang = option_value(args, "--lang");
    let positional = positional_arg(args);

    let source = if is_base64 && !use_stdin {
        match option_value(args, "--base64") {
            Some(v) if !v.trim().is_empty() => InputSource::Base64Literal(v),
            _ => return Err(Error::MissingBase64Value),
        }
    } else if is_base64 && use_stdin {
        if positional.is_some() {
            return Err(Error::ConflictingInput);
        }
        InputSource::StdinBase64
    } else if use_stdin {
        InputSource::StdinImage
    } else {
        match positional {
            Some(p) if !p.trim().is_empty() => InputSource::File(PathBuf::from(p)),
            _ => return Err(Error::MissingImagePath),
        }
    };

    Ok(Resolution::Run(Request {
        source,
        pretty,
        out_file: out_file.map(PathBuf::from),
        lang,
    }))
}

fn has_flag(args: &[String], name: &str) -> bool {
    args.iter().any(|a| a.eq_ignore_ascii_case(name))
}

/// Value of a `--name <value>` option: the token right after `name`, unless
/// that token itself starts with `--` (then the option has no value).
fn option_value(args: &[String], name: &str) -> Option<String> {
    let idx = args.iter().position(|a| a.eq_ignore_ascii_case(name))?;
    match args.get(idx + 1) {
        Some(next) if !next.starts_with("--") => Some(next.clone()),
        _ => None,
    }
}

/// First token that neither starts with `--` nor was consumed as the value of
/// `--out` or `--lang`.
fn positional_arg(args: &[String]) -> Option<String> {
    let mut consumed = vec![false; args.len()];
    for name in ["--out", "--lang"] {
        if let Some(idx) = args.iter().position(|a| a.eq_ignore_ascii_case(name)) {
            if let Some(next) = args.get(idx + 1) {
                if !next.starts_with("--") {
                    consumed[idx + 1] = true;
                }
            }
        }
    }

    args.iter()
        .enumerate()
        .find(|(i, a)| !consumed[*i] && !a.starts_with("--"))
        .map(|(_, a)| a.clone())
}
