//! ddcprobe Hardware Abstraction Layer
//!
//! This crate defines the two-wire line interface that the bit-banged I2C
//! master in `ddcprobe-drivers` is written against. A board provides one
//! [`BusLines`] implementation per physical output (e.g. one per HDMI
//! output), and the same engine code drives all of them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  ddcprobe-drivers (engine, EDID reader) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ddcprobe-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ control/status│       │ embedded-hal  │
//! │   registers   │       │  GPIO pins    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits and types
//!
//! - [`lines::BusLines`] - clock/data control write and data status read
//! - [`gpio::PinBus`] - [`BusLines`] over `embedded-hal` digital pins
//! - [`delay::SpinDelay`] - busy-wait `DelayNs` for boards without a timer

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;
pub mod lines;

// Re-export key types at crate root for convenience
pub use delay::SpinDelay;
pub use gpio::PinBus;
pub use lines::{BusLines, BusState, ControlBits, SdaDrive, StatusBits};
