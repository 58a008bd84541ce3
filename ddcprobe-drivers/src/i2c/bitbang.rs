//! Bit-banged I2C master
//!
//! Implements the bus primitives (start, stop, bit and byte transfers) by
//! toggling the lines of a [`BusLines`] implementation, with one half-bit
//! delay after each line change.
//!
//! # Line handling
//!
//! The data line is open-drain: a 0 is driven low, a 1 is released and
//! pulled high. The clock line is driven both high and low, which is only
//! valid because this engine is the sole master on the bus. Clock
//! stretching is not honoured.
//!
//! # Timing
//!
//! ```text
//!          start        bit          bit        stop
//! SCL ‾‾‾‾‾‾‾‾‾‾\____/‾‾‾‾\____/‾‾‾‾\_____/‾‾‾‾‾‾‾‾‾‾
//! SDA ‾‾‾‾‾\_______XXXXXXXXXXXXXXXXXXXXX______/‾‾‾‾‾‾
//! ```
//!
//! Each level is held for `half_bit_ns`; the default targets slow mode
//! (10 kHz), which every DDC sink accepts.

use ddcprobe_hal::{BusLines, BusState, SdaDrive};
use embedded_hal::delay::DelayNs;

/// Bus errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Data line did not read high within the poll budget
    NotReady,
}

/// Whether a start condition is currently open
///
/// A start issued while `Started` is a repeated start and releases the
/// data line before clocking the new start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransactionState {
    /// No transaction on the bus
    #[default]
    Idle,
    /// Start condition issued, no stop yet
    Started,
}

/// Bit-banged I2C master over one bus
pub struct BitBang<B, D> {
    bus: B,
    delay: D,
    half_bit_ns: u32,
    lines: BusState,
    state: TransactionState,
}

impl<B: BusLines, D: DelayNs> BitBang<B, D> {
    /// Create an engine
    ///
    /// The lines are not touched until [`BitBang::init`].
    ///
    /// # Arguments
    /// * `bus` - Line access for this bus
    /// * `delay` - Delay provider for the half-bit period
    /// * `half_bit_ns` - Half clock period in nanoseconds
    pub fn new(bus: B, delay: D, half_bit_ns: u32) -> Self {
        Self {
            bus,
            delay,
            half_bit_ns,
            lines: BusState::IDLE,
            state: TransactionState::Idle,
        }
    }

    /// Release both lines and wait for the bus to go idle
    ///
    /// Polls the data line up to `poll_budget` times; a slave still holding
    /// it low after that is reported as [`BusError::NotReady`].
    pub fn init(&mut self, poll_budget: u32) -> Result<(), BusError> {
        self.state = TransactionState::Idle;
        self.drive(BusState::IDLE);

        for _ in 0..poll_budget {
            if self.bus.sda_is_high() {
                return Ok(());
            }
        }

        #[cfg(feature = "defmt")]
        defmt::warn!("I2C bus not ready after {} polls", poll_budget);

        Err(BusError::NotReady)
    }

    /// Current transaction state
    pub fn state(&self) -> TransactionState {
        self.state
    }

    /// Line state last driven by the master
    pub fn lines(&self) -> BusState {
        self.lines
    }

    /// Half clock period in nanoseconds
    pub fn half_bit_ns(&self) -> u32 {
        self.half_bit_ns
    }

    /// Change the half clock period
    pub fn set_half_bit_ns(&mut self, half_bit_ns: u32) {
        self.half_bit_ns = half_bit_ns;
    }

    /// Borrow the bus lines
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Mutably borrow the bus lines
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Release the bus lines and delay provider
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    fn drive(&mut self, lines: BusState) {
        self.lines = lines;
        self.bus.write_control(lines.control());
    }

    fn half_bit(&mut self) {
        self.delay.delay_ns(self.half_bit_ns);
    }

    /// Issue a start condition (or a repeated start if one is open)
    pub fn start_condition(&mut self) {
        if self.state == TransactionState::Started {
            // Back to idle-high levels before the new start
            self.drive(BusState::new(false, SdaDrive::Released));
            self.half_bit();
            self.drive(BusState::new(true, SdaDrive::Released));
            self.half_bit();
        }

        // SDA falls while SCL is high
        self.drive(BusState::new(true, SdaDrive::DrivenLow));
        self.half_bit();
        self.drive(BusState::new(false, SdaDrive::DrivenLow));
        self.state = TransactionState::Started;
    }

    /// Issue a stop condition
    pub fn stop_condition(&mut self) {
        self.drive(BusState::new(false, SdaDrive::DrivenLow));
        self.half_bit();
        self.drive(BusState::new(true, SdaDrive::DrivenLow));
        self.half_bit();

        // SDA rises while SCL is high
        self.drive(BusState::new(true, SdaDrive::Released));
        self.half_bit();
        self.state = TransactionState::Idle;
    }

    /// Clock one bit out
    pub fn write_bit(&mut self, bit: bool) {
        let data = BusState::new(false, SdaDrive::for_bit(bit));
        self.drive(data);
        self.half_bit();
        self.drive(data.with_scl(true));
        self.half_bit();
        self.drive(data);
    }

    /// Clock one bit in
    ///
    /// Returns `true` if the data line read high.
    pub fn read_bit(&mut self) -> bool {
        // Let the slave drive data
        self.drive(BusState::new(false, SdaDrive::Released));
        self.half_bit();
        self.drive(BusState::new(true, SdaDrive::Released));
        self.half_bit();
        let bit = self.bus.sda_is_high();
        self.half_bit();
        self.drive(BusState::new(false, SdaDrive::Released));
        bit
    }

    /// Write one byte, most significant bit first
    ///
    /// Returns `true` if the slave acknowledged (held the data line low
    /// during the ninth clock).
    pub fn write_byte(&mut self, byte: u8) -> bool {
        for bit in (0..8).rev() {
            self.write_bit(byte & (1 << bit) != 0);
        }
        !self.read_bit()
    }

    /// Read one byte, most significant bit first
    ///
    /// # Arguments
    /// * `ack` - `true` to request another byte, `false` to tell the slave
    ///   this is the last one
    pub fn read_byte(&mut self, ack: bool) -> u8 {
        let mut byte = 0u8;
        for _ in 0..8 {
            byte = (byte << 1) | self.read_bit() as u8;
        }
        self.write_bit(!ack);
        byte
    }
}
