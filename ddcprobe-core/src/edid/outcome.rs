//! Result of one EDID read session

use super::block::BlockIndex;

/// Addressing step of the random-read sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressPhase {
    /// Slave address with the write bit, before the offset
    SlaveAddressWrite,
    /// EEPROM offset byte
    OffsetWrite,
    /// Slave address with the read bit, after the repeated start
    SlaveAddressRead,
}

impl AddressPhase {
    /// All phases in bus order
    pub const ALL: [AddressPhase; 3] = [
        AddressPhase::SlaveAddressWrite,
        AddressPhase::OffsetWrite,
        AddressPhase::SlaveAddressRead,
    ];

    const fn mask(self) -> u8 {
        match self {
            AddressPhase::SlaveAddressWrite => 0x01,
            AddressPhase::OffsetWrite => 0x02,
            AddressPhase::SlaveAddressRead => 0x04,
        }
    }

    /// Diagnostic text logged when this phase is not acknowledged
    pub const fn nack_message(self) -> &'static str {
        match self {
            AddressPhase::SlaveAddressWrite => "NACK while writing slave address!",
            AddressPhase::OffsetWrite => "NACK while writing eeprom address!",
            AddressPhase::SlaveAddressRead => "NACK while writing slave address (2)!",
        }
    }
}

/// Set of addressing phases the slave did not acknowledge
///
/// Nacks are not fatal: the read carries on to salvage whatever data a
/// non-compliant sink still returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AddressNacks(u8);

impl AddressNacks {
    /// No nacks
    pub const fn none() -> Self {
        Self(0)
    }

    /// Record a nack
    pub fn insert(&mut self, phase: AddressPhase) {
        self.0 |= phase.mask();
    }

    /// Check whether `phase` was nacked
    pub const fn contains(self, phase: AddressPhase) -> bool {
        self.0 & phase.mask() != 0
    }

    /// Every phase was acknowledged
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of nacked phases
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Nacked phases in bus order
    pub fn iter(self) -> impl Iterator<Item = AddressPhase> {
        AddressPhase::ALL
            .into_iter()
            .filter(move |&phase| self.contains(phase))
    }
}

/// Fatal EDID read errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdidError {
    /// Block bytes did not sum to zero; later blocks were not read
    ChecksumMismatch {
        /// Failing block
        block: BlockIndex,
    },
}

impl core::fmt::Display for EdidError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EdidError::ChecksumMismatch { block } => write!(f, "Checksum ERROR in {}", block),
        }
    }
}

/// Summary of one read session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReadOutcome {
    /// Extension count declared by the base block
    pub extension_count: u8,
    /// Blocks streamed from the slave, including a failing one
    pub blocks_read: usize,
    /// Bytes streamed from the slave
    pub bytes_read: usize,
    /// Addressing phases that were not acknowledged
    pub nacks: AddressNacks,
    /// Checksum verdict for the session
    pub result: Result<(), EdidError>,
}

impl ReadOutcome {
    /// All blocks read and valid
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Block that failed its checksum, if any
    pub fn failed_block(&self) -> Option<BlockIndex> {
        match self.result {
            Ok(()) => None,
            Err(EdidError::ChecksumMismatch { block }) => Some(block),
        }
    }
}
