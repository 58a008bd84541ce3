//! Probe configuration types
//!
//! One [`ProbeConfig`] exists per physical output. It carries everything
//! that used to be a process-wide setting: the output's name for log lines,
//! bus timing, and the verbose diagnostics switch.

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum output label length
pub const MAX_LABEL_LEN: usize = 16;

/// Default readiness poll budget (iterations)
pub const DEFAULT_READY_POLL_BUDGET: u32 = 1000;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Label longer than [`MAX_LABEL_LEN`]
    LabelTooLong,
    /// Zero bus frequency
    InvalidFrequency,
}

/// I2C bus timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct I2cTiming {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cTiming {
    fn default() -> Self {
        Self::SLOW
    }
}

impl I2cTiming {
    /// Slow mode (10 kHz), tolerated by every DDC sink
    pub const SLOW: Self = Self { frequency: 10_000 };

    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Create a timing for `frequency` Hz
    pub fn new(frequency: u32) -> Result<Self, ConfigError> {
        if frequency == 0 {
            return Err(ConfigError::InvalidFrequency);
        }
        Ok(Self { frequency })
    }

    /// Half of one clock period in nanoseconds
    pub const fn half_bit_ns(&self) -> u32 {
        500_000_000 / self.frequency
    }
}

/// Where an extension block's checksum is evaluated
///
/// The base block is always checked after its checksum byte (offset 127).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExtensionCheck {
    /// After the checksum byte, over all 128 bytes
    #[default]
    ChecksumByte,
    /// After the extension count byte (offset 126), over 127 bytes
    ///
    /// Behaviour of the legacy firmware. A correct block fails this check
    /// unless its checksum byte happens to be zero.
    ExtensionCountByte,
}

impl ExtensionCheck {
    /// Block offset after which the sum is evaluated
    pub const fn offset(self) -> usize {
        match self {
            ExtensionCheck::ChecksumByte => crate::edid::CHECKSUM_OFFSET,
            ExtensionCheck::ExtensionCountByte => crate::edid::EXTENSION_COUNT_OFFSET,
        }
    }
}

/// Per-output probe configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProbeConfig {
    /// Output name used as the prefix of diagnostic lines
    pub label: String<MAX_LABEL_LEN>,
    /// Half clock period in nanoseconds
    pub half_bit_ns: u32,
    /// Polls of the data line before the bus is declared not ready
    pub ready_poll_budget: u32,
    /// Log non-fatal address nacks
    pub verbose: bool,
    /// Extension block checksum evaluation point
    pub extension_check: ExtensionCheck,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            half_bit_ns: I2cTiming::SLOW.half_bit_ns(),
            ready_poll_budget: DEFAULT_READY_POLL_BUDGET,
            verbose: false,
            extension_check: ExtensionCheck::ChecksumByte,
        }
    }
}

impl ProbeConfig {
    /// Default configuration for the output named `label`
    pub fn for_output(label: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config
            .label
            .push_str(label)
            .map_err(|_| ConfigError::LabelTooLong)?;
        Ok(config)
    }

    /// Use the half-bit period of `timing`
    pub fn with_timing(mut self, timing: I2cTiming) -> Self {
        self.half_bit_ns = timing.half_bit_ns();
        self
    }

    /// Enable or disable verbose diagnostics
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Select the extension checksum evaluation point
    pub fn with_extension_check(mut self, check: ExtensionCheck) -> Self {
        self.extension_check = check;
        self
    }

    /// Set the readiness poll budget
    pub fn with_ready_poll_budget(mut self, budget: u32) -> Self {
        self.ready_poll_budget = budget;
        self
    }
}
