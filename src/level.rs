//! Level-to-configuration mapping.
//!
//! The public API is configured by a single small integer. Each level
//! names a combination of table log, block size, and wire format; the
//! mapping is a speed/ratio trade-off, and compression ratio depends only
//! on the table log and block size. The level must be identical on both
//! sides of an exchange because it selects the wire ordering.

/// Wire format of a frame's block payloads.
///
/// The writer width (narrow vs wide) changes encode speed only; the bit
/// ordering changes the bytes on the wire. Frames written under one
/// ordering do not decode under the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireKind {
    /// Msb-first packing, reference-FSE compatible.
    MsbNarrow,
    /// Lsb-first packing, byte-at-a-time writer.
    LsbNarrow,
    /// Lsb-first packing, 64-bit chunked writer. Same bytes as
    /// [`WireKind::LsbNarrow`].
    LsbWide,
}

/// Default table log: 4096 states.
pub const DEFAULT_TABLE_LOG: u32 = 12;

/// Resolved configuration for one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelConfig {
    /// Base-2 log of the state-table size.
    pub table_log: u32,
    /// Frame block size in bytes; 0 means a single block covering the
    /// whole input.
    pub block_size: usize,
    /// Bit ordering and writer width.
    pub wire: WireKind,
}

impl LevelConfig {
    /// Map a level integer to its configuration. Total over `i32`:
    /// everything at or below 1 is the msb baseline, everything at or
    /// above 7 shares the 64 KiB lsb configuration.
    pub fn from_level(level: i32) -> Self {
        match level {
            i32::MIN..=1 => LevelConfig {
                table_log: DEFAULT_TABLE_LOG,
                block_size: 0,
                wire: WireKind::MsbNarrow,
            },
            2 => LevelConfig {
                table_log: DEFAULT_TABLE_LOG,
                block_size: 0,
                wire: WireKind::LsbNarrow,
            },
            3 => LevelConfig {
                table_log: DEFAULT_TABLE_LOG,
                block_size: 0,
                wire: WireKind::LsbWide,
            },
            4 => LevelConfig {
                table_log: DEFAULT_TABLE_LOG,
                block_size: 32 * 1024,
                wire: WireKind::LsbWide,
            },
            5 => LevelConfig {
                table_log: DEFAULT_TABLE_LOG,
                block_size: 0,
                wire: WireKind::LsbWide,
            },
            6 => LevelConfig {
                table_log: 11,
                block_size: 32 * 1024,
                wire: WireKind::LsbNarrow,
            },
            _ => LevelConfig {
                table_log: DEFAULT_TABLE_LOG,
                block_size: 64 * 1024,
                wire: WireKind::LsbNarrow,
            },
        }
    }
}
