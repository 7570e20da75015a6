//! SH1106 protocol model used by the unit tests
//!
//! Decodes control bytes, tracks the page and column registers and the
//! read-modify-write column restore, answers reads (including the dummy read
//! after each switch to read direction) from a 132x8 RAM array, and logs
//! every bus event so tests can assert on exact traffic.

use alloc::vec::Vec;

use crate::command::ComScan;
use crate::interface::{Direction, Transport};

const RAM_COLUMNS: usize = 132;
const RAM_PAGES: usize = 8;
const ADDRESS: u8 = 0x3C;

/// Value returned by the dummy read
pub const DUMMY: u8 = 0x5A;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Start(u8),
    RepeatedStart(u8),
    Stop,
    Write(u8),
    Read(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimError {
    Nack,
    BusLocked,
    WrongDirection,
}

/// One read-modify-write bracket as seen by the controller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Run {
    pub page: u8,
    pub column: u8,
    pub writes: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Control,
    Command { stream: bool },
    Data { stream: bool },
}

#[derive(Debug)]
pub struct Sh1106Sim {
    pub ram: [[u8; RAM_COLUMNS]; RAM_PAGES],
    pub events: Vec<Event>,
    /// Every byte received in command phase, arguments included
    pub commands: Vec<u8>,
    pub runs: Vec<Run>,
    pub page: u8,
    pub column: u8,
    pub contrast: u8,
    pub display_on: bool,
    pub inverted: bool,
    pub com_scan: Option<ComScan>,
    /// Next start fails as if another master held the bus
    pub busy: bool,
    /// Fail the n-th start or repeated start from now (0 = next one)
    pub fail_after_starts: Option<usize>,
    /// Refuse the next write of this byte with a NACK
    pub reject_byte: Option<u8>,
    direction: Option<Direction>,
    phase: Phase,
    pending_opcode: Option<u8>,
    rmw_column: Option<u8>,
    dummy_pending: bool,
}

impl Sh1106Sim {
    pub fn new() -> Self {
        Self {
            ram: [[0; RAM_COLUMNS]; RAM_PAGES],
            events: Vec::new(),
            commands: Vec::new(),
            runs: Vec::new(),
            page: 0,
            column: 0,
            contrast: 0x80,
            display_on: false,
            inverted: false,
            com_scan: None,
            busy: false,
            fail_after_starts: None,
            reject_byte: None,
            direction: None,
            phase: Phase::Control,
            pending_opcode: None,
            rmw_column: None,
            dummy_pending: false,
        }
    }

    /// RAM byte behind visible column `x` of a panel with column offset 2
    pub fn byte(&self, x: u8, page: u8) -> u8 {
        self.ram[page as usize][x as usize + 2]
    }

    /// Pixel behind visible `(x, y)` of a panel with column offset 2
    pub fn pixel(&self, x: u8, y: u8) -> bool {
        self.byte(x, y >> 3) & (1 << (y & 7)) != 0
    }

    pub fn in_rmw(&self) -> bool {
        self.rmw_column.is_some()
    }

    pub fn clear_log(&mut self) {
        self.events.clear();
        self.commands.clear();
        self.runs.clear();
    }

    fn begin(&mut self, header: u8) -> Result<(), SimError> {
        if let Some(remaining) = self.fail_after_starts {
            if remaining == 0 {
                self.fail_after_starts = None;
                return Err(SimError::Nack);
            }
            self.fail_after_starts = Some(remaining - 1);
        }
        if header >> 1 != ADDRESS {
            return Err(SimError::Nack);
        }
        let direction = if header & 1 == 1 {
            Direction::Read
        } else {
            Direction::Write
        };
        self.direction = Some(direction);
        self.phase = Phase::Control;
        if direction == Direction::Read {
            self.dummy_pending = true;
        }
        Ok(())
    }

    fn command(&mut self, byte: u8) {
        self.commands.push(byte);
        if let Some(opcode) = self.pending_opcode.take() {
            if opcode == 0x81 {
                self.contrast = byte;
            }
            return;
        }
        match byte {
            0x00..=0x0F => self.column = (self.column & 0xF0) | byte,
            0x10..=0x1F => self.column = (self.column & 0x0F) | ((byte & 0x0F) << 4),
            0xB0..=0xBF => self.page = byte & 0x0F,
            0xAE | 0xAF => self.display_on = byte == 0xAF,
            0xA6 | 0xA7 => self.inverted = byte == 0xA7,
            0xC0 => self.com_scan = Some(ComScan::Increment),
            0xC8 => self.com_scan = Some(ComScan::Decrement),
            0xE0 => {
                self.rmw_column = Some(self.column);
                self.runs.push(Run {
                    page: self.page,
                    column: self.column,
                    writes: 0,
                });
            }
            0xEE => {
                if let Some(column) = self.rmw_column.take() {
                    self.column = column;
                }
            }
            0x20 | 0x81 | 0x8D | 0xA8 | 0xAD | 0xD3 | 0xD5 | 0xD9 | 0xDA | 0xDB => {
                self.pending_opcode = Some(byte);
            }
            _ => {}
        }
    }

    fn ram_write(&mut self, byte: u8) {
        let column = self.column as usize;
        if column < RAM_COLUMNS && (self.page as usize) < RAM_PAGES {
            self.ram[self.page as usize][column] = byte;
        }
        self.column = self.column.saturating_add(1);
        if self.rmw_column.is_some() {
            if let Some(run) = self.runs.last_mut() {
                run.writes += 1;
            }
        }
    }

    /// A header nobody acknowledges is followed by a stop, as on the wire
    fn addressed(&mut self, header: u8) -> Result<(), SimError> {
        let result = self.begin(header);
        if result.is_err() {
            self.stop_condition();
        }
        result
    }

    fn stop_condition(&mut self) {
        self.direction = None;
        self.events.push(Event::Stop);
    }
}

impl Default for Sh1106Sim {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for Sh1106Sim {
    type Error = SimError;

    fn start(&mut self, header: u8) -> Result<(), Self::Error> {
        if self.busy {
            return Err(SimError::BusLocked);
        }
        self.events.push(Event::Start(header));
        self.addressed(header)
    }

    fn repeated_start(&mut self, header: u8) -> Result<(), Self::Error> {
        self.events.push(Event::RepeatedStart(header));
        self.addressed(header)
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        self.stop_condition();
        Ok(())
    }

    fn write(&mut self, byte: u8) -> Result<(), Self::Error> {
        if self.direction != Some(Direction::Write) {
            return Err(SimError::WrongDirection);
        }
        self.events.push(Event::Write(byte));
        if self.reject_byte == Some(byte) {
            self.reject_byte = None;
            return Err(SimError::Nack);
        }
        let phase = self.phase;
        self.phase = match phase {
            Phase::Control => {
                let stream = byte & 0x80 == 0;
                if byte & 0x40 != 0 {
                    Phase::Data { stream }
                } else {
                    Phase::Command { stream }
                }
            }
            Phase::Command { stream } => {
                self.command(byte);
                if stream { phase } else { Phase::Control }
            }
            Phase::Data { stream } => {
                self.ram_write(byte);
                if stream { phase } else { Phase::Control }
            }
        };
        Ok(())
    }

    fn read(&mut self, _last: bool) -> Result<u8, Self::Error> {
        if self.direction != Some(Direction::Read) {
            return Err(SimError::WrongDirection);
        }
        let value = if self.dummy_pending {
            self.dummy_pending = false;
            DUMMY
        } else {
            let value = self
                .ram
                .get(self.page as usize)
                .and_then(|page| page.get(self.column as usize))
                .copied()
                .unwrap_or(0);
            if self.rmw_column.is_none() {
                self.column = self.column.saturating_add(1);
            }
            value
        };
        self.events.push(Event::Read(value));
        Ok(value)
    }
}
