//! Per-output EDID probe
//!
//! The command dispatcher holds one [`Probe`] per video output and calls
//! [`Probe::init`] once at boot and [`Probe::print_edid`] whenever the
//! operator asks for the attached sink's EDID.

use core::fmt::Write;

use ddcprobe_core::config::ProbeConfig;
use ddcprobe_core::edid::{EdidCapture, ReadOutcome};
use ddcprobe_core::render::HexDump;
use ddcprobe_core::traits::EdidSink;
use ddcprobe_hal::{BusLines, SpinDelay};
use embedded_hal::delay::DelayNs;

use crate::edid::read_edid;
use crate::i2c::{BitBang, BusError};

/// EDID probe for one output's display data channel
pub struct Probe<B, D = SpinDelay> {
    engine: BitBang<B, D>,
    config: ProbeConfig,
}

impl<B: BusLines> Probe<B, SpinDelay> {
    /// Create a probe timed by the default busy-wait delay
    pub fn with_spin_delay(bus: B, config: ProbeConfig) -> Self {
        Self::new(bus, SpinDelay::default(), config)
    }
}

impl<B: BusLines, D: DelayNs> Probe<B, D> {
    /// Create a probe
    ///
    /// # Arguments
    /// * `bus` - Line access for this output's DDC bus
    /// * `delay` - Delay provider timing each half bit
    /// * `config` - Output configuration
    pub fn new(bus: B, delay: D, config: ProbeConfig) -> Self {
        Self {
            engine: BitBang::new(bus, delay, config.half_bit_ns),
            config,
        }
    }

    /// Release the lines and check that the bus is idle
    pub fn init(&mut self) -> Result<(), BusError> {
        self.engine.init(self.config.ready_poll_budget)
    }

    /// Configuration
    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Enable or disable logging of address nacks
    pub fn set_verbose(&mut self, verbose: bool) {
        self.config.verbose = verbose;
    }

    /// Address nacks are logged
    pub fn is_verbose(&self) -> bool {
        self.config.verbose
    }

    /// Read the EDID, reporting every event to `sink`
    pub fn read_edid<S: EdidSink>(&mut self, sink: S) -> ReadOutcome {
        read_edid(&mut self.engine, &self.config, sink)
    }

    /// Read the EDID and print it as a hex dump
    ///
    /// The dump, checksum errors and (in verbose mode) address nacks are
    /// written to `out`; the outcome is also returned.
    pub fn print_edid<W: Write>(&mut self, out: W) -> ReadOutcome {
        self.read_edid(HexDump::new(out))
    }

    /// Read the EDID into memory
    pub fn capture_edid<const BLOCKS: usize>(&mut self) -> (EdidCapture<BLOCKS>, ReadOutcome) {
        let mut capture = EdidCapture::new();
        let outcome = self.read_edid(&mut capture);
        (capture, outcome)
    }

    /// Borrow the engine
    pub fn engine(&self) -> &BitBang<B, D> {
        &self.engine
    }

    /// Release the bus lines and delay provider
    pub fn release(self) -> (B, D) {
        self.engine.release()
    }
}
