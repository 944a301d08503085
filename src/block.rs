//! Single-block encode and decode.
//!
//! The encoder walks the symbols in reverse, recording one variable-width
//! bit chunk per symbol, then emits the recorded chunks backwards so the
//! decoder consumes them in forward order. Both directions share the same
//! table set; the wire ordering comes from the caller's choice of
//! [`BitSink`] / [`BitSource`].

use crate::bitio::{BitSink, BitSource, MASK};
use crate::table::CodecTables;
use crate::{ZfseError, ZfseResult};

/// Width of the leading block-size field. Fixed: both sides of an exchange
/// must agree on it for the frame format to interoperate.
pub const DATA_BLOCK_SIZE_BITS: u32 = 32;

/// Encoded bitstream with explicit bit length (last byte may be partially
/// used).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBlock {
    pub bytes: Vec<u8>,
    pub bit_count: usize,
}

/// Decoded symbols plus the exact number of bits consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBlock {
    pub symbols: Vec<u8>,
    pub bits_consumed: usize,
}

/// Encode one block of symbols through `writer`.
///
/// Layout, in stream order: the symbol count in [`DATA_BLOCK_SIZE_BITS`]
/// bits, the final encoder state minus `table_size` in `table_log` bits,
/// then the per-symbol chunks arranged for forward decoding. An empty
/// block is just the count field.
///
/// Symbols must be covered by `tables` (every byte value is covered when
/// the tables were built from a 256-entry histogram); a symbol with a
/// zero normalised frequency is a contract violation by the caller.
pub fn encode_block<W: BitSink>(symbols: &[u8], tables: &CodecTables, mut writer: W) -> EncodedBlock {
    writer.append_bits(symbols.len() as u32, DATA_BLOCK_SIZE_BITS);
    if symbols.is_empty() {
        let (bytes, bit_count) = writer.finish();
        return EncodedBlock { bytes, bit_count };
    }

    let mut state = tables.table_size;
    let mut chunk_vals: Vec<u32> = Vec::with_capacity(symbols.len());
    let mut chunk_bits: Vec<u32> = Vec::with_capacity(symbols.len());

    for &byte in symbols.iter().rev() {
        let s = byte as usize;
        debug_assert!(s < tables.sym_tt.len(), "symbol outside table alphabet");
        let tr = tables.sym_tt[s];

        let nb = (state + tr.delta_nb_bits) >> 16;
        chunk_vals.push(state & MASK[nb as usize]);
        chunk_bits.push(nb);

        let sub = (state >> nb) as i32;
        state = tables.next_state[(sub + tr.delta_find_state) as usize] as u32;
    }

    debug_assert!(state >= tables.table_size && state < 2 * tables.table_size);
    writer.append_bits(state - tables.table_size, tables.table_log);

    // The chunks were recorded back-to-front; reverse them so the decoder
    // sees them in forward time.
    for (&val, &nb) in chunk_vals.iter().rev().zip(chunk_bits.iter().rev()) {
        if nb > 0 {
            writer.append_bits(val, nb);
        }
    }

    let (bytes, bit_count) = writer.finish();
    EncodedBlock { bytes, bit_count }
}

/// Decode one block from `reader`.
///
/// Reads the symbol count, the initial state, then one table transition
/// per symbol. After the last symbol the state must have returned to zero;
/// anything else means the payload is corrupt or was built against
/// different tables.
pub fn decode_block<R: BitSource>(mut reader: R, tables: &CodecTables) -> ZfseResult<DecodedBlock> {
    let start = reader.position();

    let n = reader.read_bits(DATA_BLOCK_SIZE_BITS) as usize;
    if n == 0 {
        return Ok(DecodedBlock {
            symbols: Vec::new(),
            bits_consumed: reader.position() - start,
        });
    }

    // The state offset is table_log bits wide, so it lands in
    // [0, table_size) by construction.
    let mut state = reader.read_bits(tables.table_log);

    let mut symbols = Vec::with_capacity(n);
    for _ in 0..n {
        let entry = tables.decode[state as usize];
        symbols.push(entry.symbol);
        let bits = reader.read_bits(entry.nb_bits as u32);
        state = entry.new_state_base as u32 + bits;
    }

    if state != 0 {
        return Err(ZfseError::CorruptFrame);
    }

    Ok(DecodedBlock {
        symbols,
        bits_consumed: reader.position() - start,
    })
}
