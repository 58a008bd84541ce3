//! EDID retrieval over the display data channel

pub mod reader;

pub use reader::read_edid;
