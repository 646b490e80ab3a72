//! Offline replay: a reference slice-source implementation reading slices
//! from a directory of hex-encoded chunk files.
//!
//! This is an external, swappable contract, not part of the hard core —
//! analogous to a reference implementation's own capture-replay module
//! sitting alongside its assembler rather than inside it. It exists so the
//! pipeline is runnable end-to-end in tests without physical hardware.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while loading or replaying a chunk directory.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read chunk directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read chunk file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("chunk file stem {stem:?} is not a positive integer")]
    InvalidStem { stem: String },
    #[error("chunk file {path} contains invalid hex: {source}")]
    InvalidHex {
        path: PathBuf,
        #[source]
        source: HexError,
    },
}

/// Minimal hex-decode error, since this crate otherwise has no use for a
/// dedicated hex crate.
#[derive(Debug, Error)]
#[error("odd-length or non-hex-digit input at byte {0}")]
pub struct HexError(pub usize);

fn decode_hex(text: &str) -> Result<Vec<u8>, HexError> {
    let text = text.trim();
    if text.len() % 2 != 0 {
        return Err(HexError(text.len()));
    }
    let mut out = Vec::with_capacity(text.len() / 2);
    let bytes = text.as_bytes();
    for (i, pair) in bytes.chunks(2).enumerate() {
        let hi = (pair[0] as char).to_digit(16).ok_or(HexError(i * 2))?;
        let lo = (pair[1] as char).to_digit(16).ok_or(HexError(i * 2 + 1))?;
        out.push(((hi << 4) | lo) as u8);
    }
    Ok(out)
}

/// One play-ordered chunk loaded from disk: its bytes plus the integer
/// play order parsed from its filename stem.
#[derive(Debug, Clone)]
struct Chunk {
    order: u64,
    bytes: Vec<u8>,
}

/// Replays a directory of hex-encoded chunk files in ascending
/// filename-stem order.
///
/// `repeat = -1` replays indefinitely; `repeat = N` (`N >= 0`) replays
/// exactly `N` full passes over the directory (`0` yields nothing),
/// matching `load_chunks`'s `while repeat > 0: ...; repeat -= 1` loop in
/// the original Python loader.
pub struct ChunkDirectorySource {
    chunks: Vec<Chunk>,
    repeat: i64,
    cursor: usize,
    passes_started: i64,
}

impl ChunkDirectorySource {
    /// Load every chunk file in `dir`, sorted by parsed integer stem.
    pub fn load(dir: impl AsRef<Path>, repeat: i64) -> Result<Self, ReplayError> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|source| ReplayError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut chunks = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ReplayError::ReadDir {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
            let order: u64 = stem
                .parse()
                .map_err(|_| ReplayError::InvalidStem { stem: stem.clone() })?;

            let text = fs::read_to_string(&path).map_err(|source| ReplayError::ReadFile {
                path: path.clone(),
                source,
            })?;
            let bytes = decode_hex(&text).map_err(|source| ReplayError::InvalidHex {
                path: path.clone(),
                source,
            })?;

            chunks.push(Chunk { order, bytes });
        }

        chunks.sort_by_key(|c| c.order);
        log::info!("loaded {} chunks from {}", chunks.len(), dir.display());

        Ok(ChunkDirectorySource {
            chunks,
            repeat,
            cursor: 0,
            passes_started: 0,
        })
    }
}

/// Environment variable read by [`ChunkDirectorySource::load_from_env`] to
/// configure the replay repeat count.
pub const REPLAY_REPEAT_ENV: &str = "FLIR_REPLAY_REPEAT";

impl ChunkDirectorySource {
    /// Load `dir`, reading the repeat count from [`REPLAY_REPEAT_ENV`]
    /// (defaulting to `1`, one pass — the same default `load_chunks` takes
    /// in the original Python loader) rather than taking it as an explicit
    /// argument — the same permissive-parse-with-warning pattern
    /// `ValidationLevel::from_env_str` uses for its own env-configured
    /// tunable.
    pub fn load_from_env(dir: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let repeat = std::env::var(REPLAY_REPEAT_ENV)
            .ok()
            .map(|v| repeat_from_str(&v))
            .unwrap_or(1);
        Self::load(dir, repeat)
    }
}

/// Parse a repeat-count string, defaulting to `1` (one pass) and logging a
/// warning on anything that isn't a valid integer.
fn repeat_from_str(s: &str) -> i64 {
    s.trim().parse().unwrap_or_else(|_| {
        log::warn!("invalid {REPLAY_REPEAT_ENV} value {s:?}, defaulting to 1");
        1
    })
}

impl Iterator for ChunkDirectorySource {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Vec<u8>> {
        if self.chunks.is_empty() {
            return None;
        }
        if self.cursor >= self.chunks.len() {
            self.cursor = 0;
        }
        if self.cursor == 0 {
            let infinite = self.repeat < 0;
            if !infinite && self.passes_started >= self.repeat {
                return None;
            }
            self.passes_started += 1;
        }
        let bytes = self.chunks[self.cursor].bytes.clone();
        self.cursor += 1;
        Some(bytes)
    }
}
