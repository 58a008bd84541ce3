//! EEPROM random read sequence
//!
//! The EDID store of a display behaves like a 24C02 EEPROM at 7-bit
//! address 0x50. Reading from a given offset takes two phases:
//!
//! ```text
//! S | 0xA0 A | offset A | Sr | 0xA1 A | data A | data A | ... | data N | P
//! ```
//!
//! The address phases are best effort: a nack is recorded but the sequence
//! goes on, so that sinks which do not acknowledge properly still yield
//! whatever data they put on the bus.

use ddcprobe_core::edid::{AddressNacks, AddressPhase};
use ddcprobe_hal::BusLines;
use embedded_hal::delay::DelayNs;

use super::bitbang::BitBang;

/// 7-bit address of the EDID EEPROM
pub const EDID_SLAVE_ADDR: u8 = 0x50;

/// Address byte selecting a write to the EDID EEPROM
pub const EDID_WRITE_ADDR: u8 = EDID_SLAVE_ADDR << 1;

/// Address byte selecting a read from the EDID EEPROM
pub const EDID_READ_ADDR: u8 = EDID_WRITE_ADDR | 1;

/// An open random read transaction
///
/// Holds the engine until [`RandomRead::close`] issues the stop condition.
pub struct RandomRead<'a, B, D> {
    engine: &'a mut BitBang<B, D>,
    nacks: AddressNacks,
}

impl<'a, B: BusLines, D: DelayNs> RandomRead<'a, B, D> {
    /// Address the slave and set its read pointer
    ///
    /// # Arguments
    /// * `engine` - Engine driving the bus
    /// * `slave` - 7-bit slave address
    /// * `offset` - Offset to start reading from
    pub fn open(engine: &'a mut BitBang<B, D>, slave: u8, offset: u8) -> Self {
        let mut nacks = AddressNacks::none();
        let write_addr = slave << 1;

        engine.start_condition();
        if !engine.write_byte(write_addr) {
            nacks.insert(AddressPhase::SlaveAddressWrite);
        }
        if !engine.write_byte(offset) {
            nacks.insert(AddressPhase::OffsetWrite);
        }

        // Repeated start, the engine is still in the Started state
        engine.start_condition();
        if !engine.write_byte(write_addr | 1) {
            nacks.insert(AddressPhase::SlaveAddressRead);
        }

        #[cfg(feature = "defmt")]
        if !nacks.is_empty() {
            defmt::warn!("I2C random read at {=u8:#x}: nacks {}", slave, nacks);
        }

        Self { engine, nacks }
    }

    /// Address the EDID EEPROM and point it at offset 0
    pub fn open_edid(engine: &'a mut BitBang<B, D>) -> Self {
        Self::open(engine, EDID_SLAVE_ADDR, 0x00)
    }

    /// Addressing phases that were not acknowledged
    pub fn nacks(&self) -> AddressNacks {
        self.nacks
    }

    /// Read the next byte
    ///
    /// Pass `ack = false` for the final byte of the transaction.
    pub fn read(&mut self, ack: bool) -> u8 {
        self.engine.read_byte(ack)
    }

    /// Fill `buf`, nacking the last byte if `last` is set
    pub fn read_into(&mut self, buf: &mut [u8], last: bool) {
        let len = buf.len();
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = self.engine.read_byte(!(last && i + 1 == len));
        }
    }

    /// Issue the stop condition and end the transaction
    pub fn close(self) -> AddressNacks {
        self.engine.stop_condition();
        self.nacks
    }
}
