//! EDID data model
//!
//! Block layout and checksums, the per-session outcome, and the capture
//! sink that keeps the raw bytes.

pub mod block;
pub mod capture;
pub mod outcome;

pub use block::{
    checksum, checksum_byte, BlockChecksum, BlockIndex, EdidBlock, CHECKSUM_OFFSET,
    EDID_BLOCK_SIZE, EDID_HEADER, EXTENSION_COUNT_OFFSET,
};
pub use capture::{CapturedBlock, EdidCapture, DEFAULT_CAPTURE_BLOCKS};
pub use outcome::{AddressNacks, AddressPhase, EdidError, ReadOutcome};
