//! Two-wire bus line abstractions
//!
//! The bus is open-drain: a line is either driven low or released and
//! pulled high by the external resistor. The clock is the exception, it is
//! driven both ways because the engine is the only master on the bus.
//!
//! The bit layout of [`ControlBits`] and [`StatusBits`] matches the
//! control/status register pair exposed by the video output gateware, so a
//! register-backed implementation is a plain write/read of the raw value.

/// Value written to the line control register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlBits(pub u8);

impl ControlBits {
    /// Clock line driven high
    pub const SCL: u8 = 0x01;
    /// Data line output enable
    pub const SDA_OE: u8 = 0x02;
    /// Data line output value (only meaningful with `SDA_OE`)
    pub const SDA_OUT: u8 = 0x04;

    /// Raw register value
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Clock line is driven high
    pub const fn scl(self) -> bool {
        self.0 & Self::SCL != 0
    }

    /// Data line is actively driven (low or high)
    pub const fn sda_enabled(self) -> bool {
        self.0 & Self::SDA_OE != 0
    }

    /// Level the data line settles at from the master's side alone
    ///
    /// A released line reads high; a driven line reads its output value.
    pub const fn sda_level(self) -> bool {
        !self.sda_enabled() || self.0 & Self::SDA_OUT != 0
    }
}

/// Value read from the line status register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusBits(pub u8);

impl StatusBits {
    /// Sampled data line level
    pub const SDA_IN: u8 = 0x01;

    /// Raw register value
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Data line currently reads high
    pub const fn sda(self) -> bool {
        self.0 & Self::SDA_IN != 0
    }
}

/// How the master is driving the data line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SdaDrive {
    /// Not driven, pulled high unless a slave holds it low
    #[default]
    Released,
    /// Actively pulled low by the master
    DrivenLow,
}

impl SdaDrive {
    /// Drive state that puts `bit` on the line (0 = low, 1 = released)
    pub const fn for_bit(bit: bool) -> Self {
        if bit {
            Self::Released
        } else {
            Self::DrivenLow
        }
    }
}

/// Line state driven by the master
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusState {
    /// Clock line high
    pub scl: bool,
    /// Data line drive
    pub sda: SdaDrive,
}

impl BusState {
    /// Both lines released high
    pub const IDLE: Self = Self {
        scl: true,
        sda: SdaDrive::Released,
    };

    /// Create a line state
    pub const fn new(scl: bool, sda: SdaDrive) -> Self {
        Self { scl, sda }
    }

    /// Same data drive with the clock changed
    pub const fn with_scl(self, scl: bool) -> Self {
        Self { scl, sda: self.sda }
    }

    /// Same clock with the data drive changed
    pub const fn with_sda(self, sda: SdaDrive) -> Self {
        Self { scl: self.scl, sda }
    }

    /// Encode as a control register value
    pub const fn control(self) -> ControlBits {
        let mut bits = 0;
        if self.scl {
            bits |= ControlBits::SCL;
        }
        if let SdaDrive::DrivenLow = self.sda {
            bits |= ControlBits::SDA_OE;
        }
        ControlBits(bits)
    }
}

impl Default for BusState {
    fn default() -> Self {
        Self::IDLE
    }
}

impl From<BusState> for ControlBits {
    fn from(state: BusState) -> Self {
        state.control()
    }
}

/// Clock and data line access for one physical bus
///
/// Implementations apply the control value to the lines immediately.
/// Timing is the caller's concern.
pub trait BusLines {
    /// Drive the clock and data lines
    fn write_control(&mut self, control: ControlBits);

    /// Sample the line status
    fn read_status(&mut self) -> StatusBits;

    /// Check if the data line currently reads high
    fn sda_is_high(&mut self) -> bool {
        self.read_status().sda()
    }
}

impl<T: BusLines + ?Sized> BusLines for &mut T {
    fn write_control(&mut self, control: ControlBits) {
        (**self).write_control(control)
    }

    fn read_status(&mut self) -> StatusBits {
        (**self).read_status()
    }
}
