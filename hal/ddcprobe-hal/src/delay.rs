//! Busy-wait delay
//!
//! Boards without a spare hardware timer time each half bit by spinning.
//! The loop count is calibrated per CPU clock; the result is only an
//! upper bound on the bus frequency, which is all a slow-mode I2C slave
//! needs.

use embedded_hal::delay::DelayNs;

/// Spin loop iterations per microsecond at the default calibration
///
/// Matches a ~100 MHz soft CPU spending a few cycles per iteration.
pub const DEFAULT_LOOPS_PER_US: u32 = 20;

/// Busy-wait [`DelayNs`] implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpinDelay {
    loops_per_us: u32,
}

impl Default for SpinDelay {
    fn default() -> Self {
        Self::new(DEFAULT_LOOPS_PER_US)
    }
}

impl SpinDelay {
    /// Create a spin delay with a calibrated loop rate
    pub const fn new(loops_per_us: u32) -> Self {
        Self { loops_per_us }
    }

    /// Loop iterations for a delay of `ns` nanoseconds (at least one)
    pub const fn loops_for(&self, ns: u32) -> u32 {
        let loops = (ns as u64 * self.loops_per_us as u64).div_ceil(1000);
        if loops == 0 {
            1
        } else if loops > u32::MAX as u64 {
            u32::MAX
        } else {
            loops as u32
        }
    }
}

impl DelayNs for SpinDelay {
    fn delay_ns(&mut self, ns: u32) {
        for _ in 0..self.loops_for(ns) {
            core::hint::spin_loop();
        }
    }
}
