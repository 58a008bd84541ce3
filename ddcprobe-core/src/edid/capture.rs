//! In-memory capture of a read session
//!
//! Keeps the raw bytes and per-block checksum verdicts so callers can
//! inspect the EDID programmatically instead of parsing the console dump.

use heapless::Vec;

use super::block::{BlockIndex, EdidBlock, EDID_BLOCK_SIZE};
use crate::traits::EdidSink;

/// Default number of blocks kept by a capture (base + 3 extensions)
pub const DEFAULT_CAPTURE_BLOCKS: usize = 4;

/// One block as received from the bus
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CapturedBlock {
    index: BlockIndex,
    bytes: [u8; EDID_BLOCK_SIZE],
    len: usize,
    valid: Option<bool>,
}

impl CapturedBlock {
    fn new(index: BlockIndex) -> Self {
        Self {
            index,
            bytes: [0u8; EDID_BLOCK_SIZE],
            len: 0,
            valid: None,
        }
    }

    /// Position of the block in the session
    pub fn index(&self) -> BlockIndex {
        self.index
    }

    /// Bytes received so far
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// All 128 bytes were received
    pub fn is_complete(&self) -> bool {
        self.len == EDID_BLOCK_SIZE
    }

    /// Checksum verdict, `None` if the block was never evaluated
    pub fn is_valid(&self) -> Option<bool> {
        self.valid
    }

    /// Complete block, if all bytes were received
    pub fn to_block(&self) -> Option<EdidBlock> {
        self.is_complete().then(|| EdidBlock::new(self.bytes))
    }
}

/// Sink storing up to `BLOCKS` blocks
///
/// Blocks beyond the capacity are still streamed by the reader; their
/// bytes are counted in [`EdidCapture::dropped_bytes`].
#[derive(Debug, Clone, Default)]
pub struct EdidCapture<const BLOCKS: usize = DEFAULT_CAPTURE_BLOCKS> {
    blocks: Vec<CapturedBlock, BLOCKS>,
    dropped_bytes: usize,
    overflowed: bool,
}

impl<const BLOCKS: usize> EdidCapture<BLOCKS> {
    /// Create an empty capture
    pub const fn new() -> Self {
        Self {
            blocks: Vec::new(),
            dropped_bytes: 0,
            overflowed: false,
        }
    }

    /// Captured blocks in session order
    pub fn blocks(&self) -> &[CapturedBlock] {
        &self.blocks
    }

    /// Captured base block
    pub fn base(&self) -> Option<&CapturedBlock> {
        self.blocks.first()
    }

    /// Captured block at `index`
    pub fn block(&self, index: BlockIndex) -> Option<&CapturedBlock> {
        self.blocks.iter().find(|b| b.index == index)
    }

    /// All captured bytes in session order
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.blocks.iter().flat_map(|b| b.bytes().iter().copied())
    }

    /// Number of captured bytes
    pub fn len(&self) -> usize {
        self.blocks.iter().map(|b| b.len).sum()
    }

    /// Nothing was captured
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Some blocks did not fit
    pub fn is_truncated(&self) -> bool {
        self.overflowed
    }

    /// Bytes of blocks that did not fit
    pub fn dropped_bytes(&self) -> usize {
        self.dropped_bytes
    }

    fn current(&mut self, index: BlockIndex) -> Option<&mut CapturedBlock> {
        if self.overflowed {
            return None;
        }
        self.blocks.last_mut().filter(|b| b.index == index)
    }
}

impl<const BLOCKS: usize> EdidSink for EdidCapture<BLOCKS> {
    fn block_start(&mut self, block: BlockIndex) {
        if self.overflowed || self.blocks.push(CapturedBlock::new(block)).is_err() {
            self.overflowed = true;
        }
    }

    fn byte(&mut self, block: BlockIndex, offset: usize, value: u8) {
        if offset < EDID_BLOCK_SIZE {
            if let Some(captured) = self.current(block) {
                captured.bytes[offset] = value;
                captured.len = captured.len.max(offset + 1);
                return;
            }
        }
        self.dropped_bytes += 1;
    }

    fn block_end(&mut self, block: BlockIndex, valid: bool) {
        if let Some(captured) = self.current(block) {
            captured.valid = Some(valid);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream_block<S: EdidSink>(sink: &mut S, index: BlockIndex, fill: u8, valid: bool) {
        sink.block_start(index);
        for offset in 0..EDID_BLOCK_SIZE {
            sink.byte(index, offset, fill);
        }
        sink.block_end(index, valid);
    }

    #[test]
    fn test_capture_two_blocks() {
        let mut capture: EdidCapture<2> = EdidCapture::new();
        stream_block(&mut capture, BlockIndex::Base, 0x00, true);
        stream_block(&mut capture, BlockIndex::Extension(0), 0x02, false);

        assert_eq!(capture.blocks().len(), 2);
        assert_eq!(capture.len(), 256);
        assert!(!capture.is_truncated());

        let base = capture.base().unwrap();
        assert!(base.is_complete());
        assert_eq!(base.is_valid(), Some(true));
        assert!(base.to_block().unwrap().is_valid());

        let ext = capture.block(BlockIndex::Extension(0)).unwrap();
        assert_eq!(ext.is_valid(), Some(false));
        assert!(capture.bytes().skip(128).all(|b| b == 0x02));
    }

    #[test]
    fn test_capture_overflow_counts_dropped_bytes() {
        let mut capture: EdidCapture<1> = EdidCapture::new();
        stream_block(&mut capture, BlockIndex::Base, 0x00, true);
        stream_block(&mut capture, BlockIndex::Extension(0), 0x00, true);

        assert!(capture.is_truncated());
        assert_eq!(capture.blocks().len(), 1);
        assert_eq!(capture.dropped_bytes(), 128);
        assert_eq!(capture.len(), 128);
    }

    #[test]
    fn test_partial_block() {
        let mut capture: EdidCapture = EdidCapture::new();
        capture.block_start(BlockIndex::Base);
        for offset in 0..127 {
            capture.byte(BlockIndex::Base, offset, 0x01);
        }
        capture.block_end(BlockIndex::Base, false);

        let base = capture.base().unwrap();
        assert!(!base.is_complete());
        assert_eq!(base.bytes().len(), 127);
        assert!(base.to_block().is_none());
    }

    #[test]
    fn test_empty_capture() {
        let capture: EdidCapture = EdidCapture::new();
        assert!(capture.is_empty());
        assert!(capture.base().is_none());
    }
}
