//! Interfaces between the EDID reader and its consumers

pub mod sink;

pub use sink::{EdidSink, NullSink};
