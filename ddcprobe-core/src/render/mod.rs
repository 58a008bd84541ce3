//! Text rendering of EDID sessions

pub mod hexdump;

pub use hexdump::{HexDump, BYTES_PER_LINE};
