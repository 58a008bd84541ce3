//! Simulated DDC sink for integration tests
//!
//! [`SimEeprom`] sits on the other end of the bus lines and behaves like
//! the 24C02-style EDID EEPROM of a display: it decodes start and stop
//! conditions from data transitions while the clock is high, shifts bits in
//! on rising clock edges, and drives acks and data bits after falling
//! edges. Everything it sees is logged as [`WireEvent`]s.

#![allow(dead_code)]

use ddcprobe_core::edid::{EdidBlock, CHECKSUM_OFFSET, EDID_BLOCK_SIZE, EXTENSION_COUNT_OFFSET};
use ddcprobe_hal::{BusLines, ControlBits, StatusBits};
use embedded_hal::delay::DelayNs;

/// 7-bit address answered by the simulated EEPROM
pub const SLAVE_ADDR: u8 = 0x50;

/// What the slave observed on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireEvent {
    /// Start or repeated start
    Start,
    /// Stop seen on the lines
    Stop,
    /// Byte written by the master and whether the slave acked it
    Write { value: u8, acked: bool },
    /// Byte sent by the slave and the master's acknowledgment
    Read { value: u8, ack: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Address,
    Offset,
    WriteData,
    Transmit,
    WaitStop,
}

/// Edge-driven EDID EEPROM model
pub struct SimEeprom {
    memory: Vec<u8>,
    /// Acknowledge and drive data; a dead sink leaves the lines alone
    pub responding: bool,
    /// Hold the data line low regardless of the master
    pub stuck_low: bool,
    master: ControlBits,
    sda: bool,
    slave_low: bool,
    phase: Phase,
    shift: u8,
    bits: u8,
    in_ack: bool,
    rx_byte: u8,
    tx_byte: u8,
    tx_bit: u8,
    master_ack: bool,
    pointer: usize,
    /// Bus log
    pub events: Vec<WireEvent>,
    /// Stop conditions issued by the master, whether or not the slave
    /// released the line in time for them to be seen on the wire
    pub master_stops: usize,
}

impl SimEeprom {
    /// EEPROM holding `memory`
    pub fn new(memory: Vec<u8>) -> Self {
        Self {
            memory,
            responding: true,
            stuck_low: false,
            master: ControlBits(ControlBits::SCL),
            sda: true,
            slave_low: false,
            phase: Phase::Idle,
            shift: 0,
            bits: 0,
            in_ack: false,
            rx_byte: 0,
            tx_byte: 0,
            tx_bit: 0,
            master_ack: false,
            pointer: 0,
            events: Vec::new(),
            master_stops: 0,
        }
    }

    /// Bus with nothing attached
    pub fn absent() -> Self {
        let mut sim = Self::new(Vec::new());
        sim.responding = false;
        sim
    }

    /// Bytes read by the master with their ack bits
    pub fn reads(&self) -> Vec<(u8, bool)> {
        self.events
            .iter()
            .filter_map(|e| match *e {
                WireEvent::Read { value, ack } => Some((value, ack)),
                _ => None,
            })
            .collect()
    }

    /// Positions (in read order) where the master nacked
    pub fn nack_positions(&self) -> Vec<usize> {
        self.reads()
            .iter()
            .enumerate()
            .filter(|(_, (_, ack))| !ack)
            .map(|(i, _)| i)
            .collect()
    }

    /// Events before the first data read
    pub fn addressing(&self) -> Vec<WireEvent> {
        self.events
            .iter()
            .take_while(|e| !matches!(e, WireEvent::Read { .. }))
            .copied()
            .collect()
    }

    fn line(&self) -> bool {
        self.master.sda_level() && !self.slave_low && !self.stuck_low
    }

    fn load_tx(&mut self) {
        self.tx_byte = self.memory.get(self.pointer).copied().unwrap_or(0xFF);
        self.tx_bit = 0;
        self.slave_low = self.tx_byte & 0x80 == 0;
    }

    fn on_start(&mut self) {
        self.events.push(WireEvent::Start);
        self.phase = Phase::Address;
        self.shift = 0;
        self.bits = 0;
        self.in_ack = false;
        self.slave_low = false;
    }

    fn on_stop(&mut self) {
        self.events.push(WireEvent::Stop);
        self.phase = Phase::Idle;
        self.in_ack = false;
        self.slave_low = false;
    }

    fn on_rise(&mut self, sda: bool) {
        match self.phase {
            Phase::Address | Phase::Offset | Phase::WriteData => {
                if !self.in_ack {
                    self.shift = (self.shift << 1) | sda as u8;
                    self.bits += 1;
                }
            }
            Phase::Transmit => {
                if self.in_ack {
                    self.master_ack = !sda;
                    self.events.push(WireEvent::Read {
                        value: self.tx_byte,
                        ack: self.master_ack,
                    });
                }
            }
            Phase::Idle | Phase::WaitStop => {}
        }
    }

    fn on_fall(&mut self) {
        match self.phase {
            Phase::Address | Phase::Offset | Phase::WriteData => {
                if self.in_ack {
                    self.end_rx_ack();
                } else if self.bits == 8 {
                    self.rx_byte = self.shift;
                    let acked = self.responding
                        && (self.phase != Phase::Address || self.rx_byte >> 1 == SLAVE_ADDR);
                    self.events.push(WireEvent::Write {
                        value: self.rx_byte,
                        acked,
                    });
                    self.in_ack = true;
                    self.slave_low = acked;
                }
            }
            Phase::Transmit => {
                if self.in_ack {
                    self.in_ack = false;
                    if self.master_ack {
                        self.pointer += 1;
                        self.load_tx();
                    } else {
                        self.phase = Phase::WaitStop;
                        self.slave_low = false;
                    }
                } else {
                    self.tx_bit += 1;
                    if self.tx_bit == 8 {
                        self.slave_low = false;
                        self.in_ack = true;
                    } else {
                        self.slave_low = self.tx_byte & (0x80 >> self.tx_bit) == 0;
                    }
                }
            }
            Phase::Idle | Phase::WaitStop => {}
        }
    }

    fn end_rx_ack(&mut self) {
        let acked = self.slave_low;
        self.slave_low = false;
        self.in_ack = false;
        self.shift = 0;
        self.bits = 0;

        if !acked {
            self.phase = Phase::Idle;
            return;
        }

        match self.phase {
            Phase::Address if self.rx_byte & 1 == 1 => {
                self.phase = Phase::Transmit;
                self.load_tx();
            }
            Phase::Address => self.phase = Phase::Offset,
            Phase::Offset => {
                self.pointer = self.rx_byte as usize;
                self.phase = Phase::WriteData;
            }
            _ => {}
        }
    }
}

impl BusLines for SimEeprom {
    fn write_control(&mut self, control: ControlBits) {
        let old = self.master;
        let (scl_old, scl_new) = (old.scl(), control.scl());

        if scl_old && scl_new && !old.sda_level() && control.sda_level() {
            self.master_stops += 1;
        }

        self.master = control;
        let sda_new = self.line();

        if scl_old && scl_new {
            if self.sda && !sda_new {
                self.on_start();
            } else if !self.sda && sda_new {
                self.on_stop();
            }
        } else if !scl_old && scl_new {
            self.on_rise(sda_new);
        } else if scl_old && !scl_new {
            self.on_fall();
        }

        self.sda = self.line();
    }

    fn read_status(&mut self) -> StatusBits {
        if self.line() {
            StatusBits(StatusBits::SDA_IN)
        } else {
            StatusBits(0)
        }
    }
}

/// Delay that returns immediately
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Valid base block declaring `extension_count` extensions
pub fn base_block(extension_count: u8) -> EdidBlock {
    let mut payload = [0u8; CHECKSUM_OFFSET];
    payload[..8].copy_from_slice(&[0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00]);
    // Manufacturer/product bytes of the default on-board EDID
    payload[8..16].copy_from_slice(&[0x3D, 0x17, 0x32, 0x12, 0x2A, 0x6A, 0xBF, 0x00]);
    payload[16..20].copy_from_slice(&[0x05, 0x17, 0x01, 0x03]);
    payload[EXTENSION_COUNT_OFFSET] = extension_count;
    EdidBlock::with_checksum(&payload)
}

/// Valid CTA-style extension block with a recognisable fill
pub fn extension_block(index: u8) -> EdidBlock {
    let mut payload = [0u8; CHECKSUM_OFFSET];
    payload[0] = 0x02;
    payload[1] = 0x03;
    for (i, b) in payload.iter_mut().enumerate().skip(4) {
        *b = (i as u8).wrapping_mul(7).wrapping_add(index);
    }
    EdidBlock::with_checksum(&payload)
}

/// Concatenated valid EDID with `extension_count` extension blocks
pub fn edid_image(extension_count: u8) -> Vec<u8> {
    let mut image = Vec::with_capacity((1 + extension_count as usize) * EDID_BLOCK_SIZE);
    image.extend_from_slice(base_block(extension_count).as_bytes());
    for e in 0..extension_count {
        image.extend_from_slice(extension_block(e).as_bytes());
    }
    image
}

/// Corrupt one byte of block `block` (0 = base) without fixing the checksum
pub fn corrupt(image: &mut [u8], block: usize, offset: usize) {
    image[block * EDID_BLOCK_SIZE + offset] ^= 0x5A;
}
