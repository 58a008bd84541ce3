//! EDID block layout and checksum
//!
//! An EDID is a sequence of 128-byte blocks. The base block (block 0) is
//! mandatory; its byte 126 declares how many extension blocks follow. The
//! last byte of every block is chosen so that all 128 bytes sum to zero
//! modulo 256. All other bytes are opaque to this crate.

/// Size of every EDID block in bytes
pub const EDID_BLOCK_SIZE: usize = 128;

/// Offset of the extension count in the base block
pub const EXTENSION_COUNT_OFFSET: usize = 126;

/// Offset of the checksum byte in every block
pub const CHECKSUM_OFFSET: usize = 127;

/// Fixed 8-byte header opening a base block
pub const EDID_HEADER: [u8; 8] = [0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00];

/// Position of a block within an EDID session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlockIndex {
    /// Mandatory base block
    Base,
    /// Extension block, zero-based within the extension sequence
    Extension(u8),
}

impl BlockIndex {
    /// Position within the session (base block is 0)
    pub const fn session_position(self) -> usize {
        match self {
            BlockIndex::Base => 0,
            BlockIndex::Extension(e) => e as usize + 1,
        }
    }
}

impl core::fmt::Display for BlockIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BlockIndex::Base => f.write_str("EDID block 0"),
            BlockIndex::Extension(e) => write!(f, "EDID extension block {}", e),
        }
    }
}

/// Running modulo-256 sum over the bytes of one block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlockChecksum(u8);

impl BlockChecksum {
    /// Start a fresh sum
    pub const fn new() -> Self {
        Self(0)
    }

    /// Add one byte
    pub fn add(&mut self, byte: u8) {
        self.0 = self.0.wrapping_add(byte);
    }

    /// Current sum
    pub const fn sum(self) -> u8 {
        self.0
    }

    /// Sum is zero, i.e. the bytes seen so far form a valid block
    pub const fn is_valid(self) -> bool {
        self.0 == 0
    }
}

/// Sum of all bytes modulo 256
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Byte to store at [`CHECKSUM_OFFSET`] so that the block sums to zero
pub fn checksum_byte(payload: &[u8]) -> u8 {
    checksum(payload).wrapping_neg()
}

/// One complete 128-byte EDID block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdidBlock {
    bytes: [u8; EDID_BLOCK_SIZE],
}

impl EdidBlock {
    /// Wrap raw block bytes
    pub const fn new(bytes: [u8; EDID_BLOCK_SIZE]) -> Self {
        Self { bytes }
    }

    /// Build a block from its first 127 bytes, filling in the checksum
    pub fn with_checksum(payload: &[u8; CHECKSUM_OFFSET]) -> Self {
        let mut bytes = [0u8; EDID_BLOCK_SIZE];
        bytes[..CHECKSUM_OFFSET].copy_from_slice(payload);
        bytes[CHECKSUM_OFFSET] = checksum_byte(payload);
        Self { bytes }
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8; EDID_BLOCK_SIZE] {
        &self.bytes
    }

    /// Sum of all 128 bytes is zero
    pub fn is_valid(&self) -> bool {
        checksum(&self.bytes) == 0
    }

    /// Declared extension count (meaningful for the base block only)
    pub fn extension_count(&self) -> u8 {
        self.bytes[EXTENSION_COUNT_OFFSET]
    }

    /// Block starts with the fixed base block header
    pub fn has_base_header(&self) -> bool {
        self.bytes[..EDID_HEADER.len()] == EDID_HEADER
    }
}

impl From<[u8; EDID_BLOCK_SIZE]> for EdidBlock {
    fn from(bytes: [u8; EDID_BLOCK_SIZE]) -> Self {
        Self::new(bytes)
    }
}
