//! Multi-block frame codec.
//!
//! A frame is a concatenation of self-contained block records. Each
//! record carries the raw byte histogram of its block, so the decoder can
//! rebuild the exact tables without seeing any neighbouring block.
//!
//! Record layout (all integers little-endian u32):
//!
//! ```text
//! offset  size        field
//! 0       4           n           (source symbols in this block)
//! 4       4           bit_count   (meaningful bits in payload)
//! 8       4           table_log
//! 12      256 * 4     counts[0..256]
//! 1036    ceil(bit_count/8)  payload (last byte may be partial)
//! ```
//!
//! The next record begins immediately after the payload; the frame ends
//! when the cursor lands exactly on the end of the input.

use crate::bitio::{LsbReader, LsbWideWriter, LsbWriter, MsbReader, MsbWriter};
use crate::block::{decode_block, encode_block};
use crate::frequency::FrequencyTable;
use crate::level::{LevelConfig, WireKind, DEFAULT_TABLE_LOG};
use crate::normalize::{MAX_TABLE_LOG, MIN_TABLE_LOG};
use crate::table::CodecTables;
use crate::{ZfseError, ZfseResult};

/// Fixed per-record header size: three u32 fields plus the histogram.
const RECORD_HEADER_BYTES: usize = 4 * 3 + 256 * 4;

/// Frame-level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameOptions {
    /// Block size in bytes; 0 means a single block covering the whole
    /// input.
    pub block_size: usize,
    /// Table log used for every block of the frame.
    pub table_log: u32,
    /// Bit ordering and writer width for block payloads.
    pub wire: WireKind,
}

impl Default for FrameOptions {
    fn default() -> Self {
        FrameOptions {
            block_size: 32 * 1024,
            table_log: DEFAULT_TABLE_LOG,
            wire: WireKind::MsbNarrow,
        }
    }
}

impl From<LevelConfig> for FrameOptions {
    fn from(cfg: LevelConfig) -> Self {
        FrameOptions {
            block_size: cfg.block_size,
            table_log: cfg.table_log,
            wire: cfg.wire,
        }
    }
}

fn write_record_header(out: &mut Vec<u8>, n: u32, bit_count: u32, table_log: u32, counts: &[u32]) {
    out.extend_from_slice(&n.to_le_bytes());
    out.extend_from_slice(&bit_count.to_le_bytes());
    out.extend_from_slice(&table_log.to_le_bytes());
    for &c in counts {
        out.extend_from_slice(&c.to_le_bytes());
    }
}

fn read_u32_le(data: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]])
}

/// Encode `input` into a framed stream of independently decodable blocks.
///
/// Empty input produces a single header-only record (`n = 0`,
/// `bit_count = 0`) so that an empty stream still round-trips through a
/// well-formed frame.
pub fn encode_stream(input: &[u8], opts: &FrameOptions) -> ZfseResult<Vec<u8>> {
    if !(MIN_TABLE_LOG..=MAX_TABLE_LOG).contains(&opts.table_log) {
        return Err(ZfseError::InvalidParameter);
    }

    let mut frame = Vec::new();
    if input.is_empty() {
        write_record_header(&mut frame, 0, 0, opts.table_log, &[0u32; 256]);
        return Ok(frame);
    }

    let block_size = if opts.block_size == 0 {
        input.len()
    } else {
        opts.block_size
    };

    let mut freq = FrequencyTable::new();
    for chunk in input.chunks(block_size) {
        freq.count(chunk);
        let tables = CodecTables::build(&freq.byte, opts.table_log)?;

        let encoded = match opts.wire {
            WireKind::MsbNarrow => encode_block(chunk, &tables, MsbWriter::new()),
            WireKind::LsbNarrow => encode_block(chunk, &tables, LsbWriter::new()),
            WireKind::LsbWide => encode_block(chunk, &tables, LsbWideWriter::new()),
        };

        write_record_header(
            &mut frame,
            chunk.len() as u32,
            encoded.bit_count as u32,
            opts.table_log,
            &freq.byte,
        );
        frame.extend_from_slice(&encoded.bytes);
    }
    Ok(frame)
}

/// Decode a framed stream back to the original bytes.
///
/// Only the wire ordering is taken from `opts`; block size and table log
/// come from the record headers, so a decoder configured with a different
/// block-size hint still reconstructs the stream.
pub fn decode_stream(frame: &[u8], opts: &FrameOptions) -> ZfseResult<Vec<u8>> {
    let mut output = Vec::new();
    let mut pos = 0usize;

    while pos < frame.len() {
        if frame.len() - pos < RECORD_HEADER_BYTES {
            return Err(ZfseError::CorruptFrame);
        }
        let n = read_u32_le(frame, pos) as usize;
        let bit_count = read_u32_le(frame, pos + 4) as usize;
        let table_log = read_u32_le(frame, pos + 8);
        pos += 12;

        let mut counts = [0u32; 256];
        for c in counts.iter_mut() {
            *c = read_u32_le(frame, pos);
            pos += 4;
        }

        let payload_bytes = (bit_count + 7) / 8;
        if frame.len() - pos < payload_bytes {
            return Err(ZfseError::CorruptFrame);
        }
        let payload = &frame[pos..pos + payload_bytes];
        pos += payload_bytes;

        if n == 0 {
            // Header-only empty record, or an empty block whose payload
            // carries just the count field. Nothing to emit either way.
            continue;
        }

        if !(MIN_TABLE_LOG..=MAX_TABLE_LOG).contains(&table_log) {
            return Err(ZfseError::CorruptFrame);
        }
        let tables =
            CodecTables::build(&counts, table_log).map_err(|_| ZfseError::CorruptFrame)?;

        let decoded = match opts.wire {
            WireKind::MsbNarrow => {
                decode_block(MsbReader::new(payload, bit_count, 0), &tables)?
            }
            WireKind::LsbNarrow | WireKind::LsbWide => {
                decode_block(LsbReader::new(payload, 0), &tables)?
            }
        };

        if decoded.symbols.len() != n || decoded.bits_consumed > bit_count {
            return Err(ZfseError::CorruptFrame);
        }
        output.extend_from_slice(&decoded.symbols);
    }

    Ok(output)
}
