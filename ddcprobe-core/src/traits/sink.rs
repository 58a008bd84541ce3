//! EDID event sink
//!
//! The reader does not build the dump itself. It reports every event of a
//! session to an [`EdidSink`] as it happens on the bus, and sinks decide
//! what to keep: the console renderer prints, the capture stores, a tuple
//! of sinks does both.

use crate::edid::{AddressPhase, BlockIndex};

/// Observer of one EDID read session
///
/// Events arrive in bus order:
/// `address_nack*`, then per block `block_start`, `byte*`, `block_end`.
/// A `block_end` with `valid == false` is the last event of the session.
pub trait EdidSink {
    /// An addressing phase was not acknowledged
    ///
    /// Only reported when the probe runs with verbose diagnostics.
    ///
    /// # Arguments
    /// * `label` - Name of the output the probe is attached to
    /// * `phase` - Addressing step that was nacked
    fn address_nack(&mut self, label: &str, phase: AddressPhase) {
        let _ = (label, phase);
    }

    /// A block is about to be streamed
    fn block_start(&mut self, block: BlockIndex) {
        let _ = block;
    }

    /// One byte was read from the slave
    ///
    /// # Arguments
    /// * `block` - Block the byte belongs to
    /// * `offset` - Offset within the block (0-127)
    /// * `value` - Byte value
    fn byte(&mut self, block: BlockIndex, offset: usize, value: u8);

    /// The checksum of a block was evaluated
    ///
    /// `valid == false` means the session aborts after this event.
    fn block_end(&mut self, block: BlockIndex, valid: bool) {
        let _ = (block, valid);
    }
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EdidSink for NullSink {
    fn byte(&mut self, _block: BlockIndex, _offset: usize, _value: u8) {}
}

impl<S: EdidSink + ?Sized> EdidSink for &mut S {
    fn address_nack(&mut self, label: &str, phase: AddressPhase) {
        (**self).address_nack(label, phase)
    }

    fn block_start(&mut self, block: BlockIndex) {
        (**self).block_start(block)
    }

    fn byte(&mut self, block: BlockIndex, offset: usize, value: u8) {
        (**self).byte(block, offset, value)
    }

    fn block_end(&mut self, block: BlockIndex, valid: bool) {
        (**self).block_end(block, valid)
    }
}

/// Fan out to two sinks, first then second
impl<A: EdidSink, B: EdidSink> EdidSink for (A, B) {
    fn address_nack(&mut self, label: &str, phase: AddressPhase) {
        self.0.address_nack(label, phase);
        self.1.address_nack(label, phase);
    }

    fn block_start(&mut self, block: BlockIndex) {
        self.0.block_start(block);
        self.1.block_start(block);
    }

    fn byte(&mut self, block: BlockIndex, offset: usize, value: u8) {
        self.0.byte(block, offset, value);
        self.1.byte(block, offset, value);
    }

    fn block_end(&mut self, block: BlockIndex, valid: bool) {
        self.0.block_end(block, valid);
        self.1.block_end(block, valid);
    }
}
