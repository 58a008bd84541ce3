//! Software I2C master
//!
//! - [`bitbang`] - bus primitives over [`ddcprobe_hal::BusLines`]
//! - [`random_read`] - EEPROM-style addressed read built on the primitives

pub mod bitbang;
pub mod random_read;

pub use bitbang::{BitBang, BusError, TransactionState};
pub use random_read::{RandomRead, EDID_READ_ADDR, EDID_SLAVE_ADDR, EDID_WRITE_ADDR};
