//! EDID probe drivers
//!
//! This crate drives the display data channel of a video output with a
//! software I2C master and reads the attached sink's EDID:
//!
//! - Bit-level I2C engine over [`ddcprobe_hal::BusLines`]
//! - EEPROM random read sequencer
//! - EDID reader with per-block checksum validation
//! - [`Probe`] facade, one instance per physical output
//!
//! # Example
//!
//! ```
//! use ddcprobe_core::config::ProbeConfig;
//! use ddcprobe_drivers::Probe;
//! use ddcprobe_hal::{BusLines, ControlBits, StatusBits};
//! # struct NoSink;
//! # impl BusLines for NoSink {
//! #     fn write_control(&mut self, _control: ControlBits) {}
//! #     fn read_status(&mut self) -> StatusBits { StatusBits(StatusBits::SDA_IN) }
//! # }
//! # struct NoDelay;
//! # impl embedded_hal::delay::DelayNs for NoDelay { fn delay_ns(&mut self, _ns: u32) {} }
//!
//! let config = ProbeConfig::for_output("hdmi_out0").unwrap();
//! let mut probe = Probe::new(NoSink, NoDelay, config);
//! probe.init().unwrap();
//!
//! let mut console = heapless::String::<2048>::new();
//! let outcome = probe.print_edid(&mut console);
//! assert!(!outcome.is_ok());
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod edid;
pub mod i2c;
pub mod probe;

pub use probe::Probe;
