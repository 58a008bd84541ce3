//! Console hex dump of an EDID session
//!
//! Output format, kept byte-for-byte compatible with the existing console:
//!
//! ```text
//! 00 FF FF FF FF FF FF 00 3D 17 32 12 2A 6A BF 00
//! ...
//! 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 34
//!
//! 02 03 ...                      <- extension blocks follow a blank line
//! Checksum ERROR in EDID extension block 0
//! ```
//!
//! Every byte is followed by a space; a newline ends each group of 16.

use core::fmt::Write;

use crate::edid::{AddressPhase, BlockIndex, EdidError};
use crate::traits::EdidSink;

/// Bytes per output line
pub const BYTES_PER_LINE: usize = 16;

/// Sink rendering the session as text
pub struct HexDump<W> {
    out: W,
    write_failed: bool,
}

impl<W: Write> HexDump<W> {
    /// Render into `out`
    pub fn new(out: W) -> Self {
        Self {
            out,
            write_failed: false,
        }
    }

    /// A write to the output failed at some point
    ///
    /// Write errors never interrupt the bus transaction; the dump is simply
    /// incomplete.
    pub fn write_failed(&self) -> bool {
        self.write_failed
    }

    /// Borrow the output
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Return the output
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, args: core::fmt::Arguments<'_>) {
        if self.out.write_fmt(args).is_err() {
            self.write_failed = true;
        }
    }
}

impl<W: Write> EdidSink for HexDump<W> {
    fn address_nack(&mut self, label: &str, phase: AddressPhase) {
        if label.is_empty() {
            self.emit(format_args!("{}\n", phase.nack_message()));
        } else {
            self.emit(format_args!("{}: {}\n", label, phase.nack_message()));
        }
    }

    fn block_start(&mut self, block: BlockIndex) {
        if let BlockIndex::Extension(_) = block {
            self.emit(format_args!("\n"));
        }
    }

    fn byte(&mut self, _block: BlockIndex, offset: usize, value: u8) {
        self.emit(format_args!("{:02X} ", value));
        if (offset + 1) % BYTES_PER_LINE == 0 {
            self.emit(format_args!("\n"));
        }
    }

    fn block_end(&mut self, block: BlockIndex, valid: bool) {
        if !valid {
            let err = EdidError::ChecksumMismatch { block };
            self.emit(format_args!("{}\n", err));
        }
    }
}
