use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{bail, Context};
use serde::Serialize;

use blindrf_shared::{DecodedCommand, Decoder};

/// Longest code a capture line may carry (128 bits).
const MAX_HEX_DIGITS: usize = 32;

/// Bare hex in a capture log needs at least a full payload worth of digits to count as a code.
const MIN_BARE_HEX_DIGITS: usize = 16;

#[derive(Serialize)]
struct Record<'a> {
    remote: String,
    #[serde(flatten)]
    cmd: &'a DecodedCommand,
}

/// Decode codes given on the command line.
pub fn command_codes(decoder: &Decoder, codes: &[String], json: bool) -> anyhow::Result<()> {
    for code in codes {
        let raw = parse_code(code)?;
        print_decoded(decoder, &decoder.decode(raw), json)?;
    }

    Ok(())
}

/// Replay a capture log, or stdin when no path is given.
pub fn command_playback(decoder: &Decoder, path: Option<&Path>, json: bool) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            log::info!("Replaying {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("failed to open capture {}", path.display()))?;
            play_lines(decoder, BufReader::new(file), json)
        }
        None => {
            log::info!("Reading codes from stdin");
            let stdin = io::stdin();
            let lock = stdin.lock();
            play_lines(decoder, lock, json)
        }
    }
}

fn play_lines<R: BufRead>(decoder: &Decoder, reader: R, json: bool) -> anyhow::Result<()> {
    let mut decoded = 0;

    for (lineno, line) in reader.lines().enumerate() {
        let line = line.context("failed to read capture")?;
        let codes = scan_line(&line);

        if codes.is_empty() {
            log::debug!("line {}: no code", lineno + 1);
            continue;
        }

        for cmd in decoder.decode_codes(&codes) {
            print_decoded(decoder, &cmd, json)?;
            decoded += 1;
        }
    }

    log::info!("Decoded {} codes", decoded);

    Ok(())
}

fn print_decoded(decoder: &Decoder, cmd: &DecodedCommand, json: bool) -> anyhow::Result<()> {
    if json {
        let record = Record {
            remote: decoder.remotes().label(cmd.remote_id),
            cmd,
        };
        println!("{}", serde_json::to_string(&record)?);
    } else {
        println!("{}\t{}", cmd.payload, decoder.describe(cmd));
    }

    Ok(())
}

/// Parse one code token: `0x<hex>`, bare hex, or the demodulator's `{<bits>}<hex>`.
pub fn parse_code(token: &str) -> anyhow::Result<u128> {
    let token = token.trim();

    let hex = if let Some(rest) = token.strip_prefix('{') {
        let end = rest
            .find('}')
            .with_context(|| format!("unterminated bit count in {:?}", token))?;
        let bits: u32 = rest[..end]
            .parse()
            .with_context(|| format!("invalid bit count in {:?}", token))?;
        log::trace!("{} bit code {:?}", bits, token);
        &rest[end + 1..]
    } else if let Some(rest) = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        rest
    } else {
        token
    };

    if hex.starts_with('+') || hex.starts_with('-') {
        bail!("{:?} is not a code, signs are not allowed", token);
    }

    if hex.is_empty() || hex.len() > MAX_HEX_DIGITS {
        bail!("{:?} is not a code of 1-{} hex digits", token, MAX_HEX_DIGITS);
    }

    u128::from_str_radix(hex, 16).with_context(|| format!("invalid hex code {:?}", token))
}

/// Pull every code out of a capture log line. Works on plain text and JSON lines alike.
fn scan_line(line: &str) -> Vec<u128> {
    line.split(|c: char| !(c.is_ascii_alphanumeric() || c == '{' || c == '}'))
        .filter(|token| looks_like_code(token))
        .filter_map(|token| match parse_code(token) {
            Ok(raw) => Some(raw),
            Err(err) => {
                log::debug!("skipping {:?}: {}", token, err);
                None
            }
        })
        .collect()
}

fn looks_like_code(token: &str) -> bool {
    let bare = token.len() >= MIN_BARE_HEX_DIGITS && token.chars().all(|c| c.is_ascii_hexdigit());
    token.starts_with('{') || token.starts_with("0x") || token.starts_with("0X") || bare
}
