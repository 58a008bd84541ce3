//! Board-agnostic core logic for EDID diagnostics
//!
//! This crate contains everything about reading a display's EDID that does
//! not depend on how the bus lines are toggled:
//!
//! - EDID block layout, checksum arithmetic and extension counting
//! - Read outcome and error taxonomy (address nacks, checksum mismatches)
//! - The [`traits::EdidSink`] observer fed by the reader as bytes arrive
//! - Sinks: console hex dump rendering and in-memory capture
//! - Probe configuration (label, bus timing, verbosity)

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod edid;
pub mod render;
pub mod traits;
