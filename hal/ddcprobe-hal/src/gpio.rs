//! Bus lines backed by GPIO pins
//!
//! Adapts two `embedded-hal` digital pins to [`BusLines`]. The data pin
//! must be configured as open-drain with a pull-up (external or internal),
//! so that setting it high releases the line and reading it returns the
//! level a slave may be holding low.

use core::convert::Infallible;

use embedded_hal::digital::{InputPin, OutputPin};

use crate::lines::{BusLines, ControlBits, StatusBits};

/// GPIO pair acting as a two-wire bus
///
/// Only infallible pins are accepted: a bit-banged transfer has no way to
/// recover from a pin that refuses a level change half way through a bit.
pub struct PinBus<SCL, SDA> {
    scl: SCL,
    sda: SDA,
}

impl<SCL, SDA> PinBus<SCL, SDA>
where
    SCL: OutputPin<Error = Infallible>,
    SDA: OutputPin<Error = Infallible> + InputPin<Error = Infallible>,
{
    /// Create a bus from a clock pin and an open-drain data pin
    ///
    /// Both lines are released, leaving the bus idle.
    pub fn new(scl: SCL, sda: SDA) -> Self {
        let mut bus = Self { scl, sda };
        bus.write_control(ControlBits(ControlBits::SCL));
        bus
    }

    /// Release the pins
    pub fn release(self) -> (SCL, SDA) {
        (self.scl, self.sda)
    }
}

impl<SCL, SDA> BusLines for PinBus<SCL, SDA>
where
    SCL: OutputPin<Error = Infallible>,
    SDA: OutputPin<Error = Infallible> + InputPin<Error = Infallible>,
{
    fn write_control(&mut self, control: ControlBits) {
        if control.sda_level() {
            infallible(self.sda.set_high());
        } else {
            infallible(self.sda.set_low());
        }

        if control.scl() {
            infallible(self.scl.set_high());
        } else {
            infallible(self.scl.set_low());
        }
    }

    fn read_status(&mut self) -> StatusBits {
        if infallible(self.sda.is_high()) {
            StatusBits(StatusBits::SDA_IN)
        } else {
            StatusBits(0)
        }
    }
}

fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}
