//! Finite State Entropy (FSE) codec for byte streams.
//!
//! Implements tANS (table-based Asymmetric Numeral Systems): a
//! near-optimal entropy coder whose state transitions are table lookups
//! and bit shifts, no divisions or data-dependent branches on the hot
//! path. Output length approaches the zero-order entropy of the input;
//! decoding reconstructs the original bytes exactly.
//!
//! # Layout
//!
//! The codec is layered bottom-up:
//!
//! - [`frequency`]: byte histograms.
//! - [`normalize`]: histogram → frequencies summing to a power of two.
//! - [`table`]: spread + decode/encode tables from normalised frequencies.
//! - [`bitio`]: bit-level I/O in both wire orderings (msb- and lsb-first).
//! - [`block`]: reverse-order encode / forward decode of one block.
//! - [`frame`]: multi-block container with self-describing records.
//! - [`level`]: the small-integer configuration surface.
//!
//! # Single-shot API
//!
//! ```
//! let data = b"an example with some repetition, some repetition";
//! let compressed = zfse::compress(data, 4);
//! let restored = zfse::decompress(&compressed, 4).unwrap();
//! assert_eq!(restored, data);
//! ```
//!
//! The level must match between [`compress`] and [`decompress`]: it
//! selects the wire ordering, table log, and block size.

pub mod bitio;
pub mod block;
pub mod frame;
pub mod frequency;
pub mod level;
pub mod normalize;
pub mod table;


use frame::FrameOptions;
use level::LevelConfig;

/// Error types for zfse operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ZfseError {
    /// A table log outside `[1, 15]`, or an empty alphabet.
    InvalidParameter,
    /// Table construction was requested for a histogram whose counts sum
    /// to zero.
    EmptyHistogram,
    /// Encode was handed a symbol the tables do not cover.
    InvalidInput,
    /// Decode detected a truncated record, an inconsistent bit count, a
    /// symbol-count mismatch, or a failed terminal-state check.
    CorruptFrame,
}

impl std::fmt::Display for ZfseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidParameter => write!(f, "invalid parameter"),
            Self::EmptyHistogram => write!(f, "histogram has zero total count"),
            Self::InvalidInput => write!(f, "symbol not covered by tables"),
            Self::CorruptFrame => write!(f, "corrupt frame"),
        }
    }
}

impl std::error::Error for ZfseError {}

pub type ZfseResult<T> = Result<T, ZfseError>;

/// Compress `src` into a self-contained frame at the given level.
pub fn compress(src: &[u8], level: i32) -> Vec<u8> {
    let opts = FrameOptions::from(LevelConfig::from_level(level));
    // Level-derived options always carry a valid table log, and byte
    // input cannot produce an empty histogram for a non-empty block.
    frame::encode_stream(src, &opts).expect("level-derived options are valid")
}

/// Decompress a frame produced by [`compress`] at the same level.
pub fn decompress(src: &[u8], level: i32) -> ZfseResult<Vec<u8>> {
    let opts = FrameOptions::from(LevelConfig::from_level(level));
    frame::decode_stream(src, &opts)
}

/// Capacity-bounded [`compress`]: writes the frame into `dst` and returns
/// the number of bytes written, or 0 if `dst` is too small.
///
/// The 0 return is a soft signal, not an error; retry with a larger
/// buffer.
pub fn compress_into(src: &[u8], dst: &mut [u8], level: i32) -> usize {
    let encoded = compress(src, level);
    if encoded.len() > dst.len() {
        return 0;
    }
    dst[..encoded.len()].copy_from_slice(&encoded);
    encoded.len()
}

/// Capacity-bounded [`decompress`]: writes the reconstructed bytes into
/// `dst` and returns the count, or `Ok(0)` if `dst` is too small. Decode
/// failures still surface as errors.
pub fn decompress_into(dst: &mut [u8], src: &[u8], level: i32) -> ZfseResult<usize> {
    let decoded = decompress(src, level)?;
    if decoded.len() > dst.len() {
        return Ok(0);
    }
    dst[..decoded.len()].copy_from_slice(&decoded);
    Ok(decoded.len())
}
