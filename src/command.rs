//! SH1106 command definitions
//!
//! Every transfer to the controller starts with a control byte that tells it
//! how to treat the bytes that follow:
//!
//! | Control byte | Meaning |
//! |--------------|---------|
//! | [`CONTROL_COMMAND`] (`0x80`) | one command byte follows, then another control byte |
//! | [`CONTROL_DATA`] (`0x40`) | the rest of the transfer is display RAM data |
//! | [`CONTROL_DATA_SINGLE`] (`0xC0`) | one data byte follows; also selects RAM for a following read |
//!
//! Commands are modelled as the closed [`Command`] enum. [`Command::encode`]
//! turns one into the one or two raw bytes the controller expects.
//!
//! ## Example
//!
//! ```
//! use sh1106_rmw::command::Command;
//!
//! assert_eq!(Command::PageAddress(3).encode().as_bytes(), &[0xB3]);
//! assert_eq!(Command::Contrast(0x9F).encode().as_bytes(), &[0x81, 0x9F]);
//! assert_eq!(Command::ColumnHigh(0x8A).encode().as_bytes(), &[0x18]);
//! ```

use crate::config::{Config, Rotation};

/// Control byte announcing a single command byte
pub const CONTROL_COMMAND: u8 = 0x80;

/// Control byte announcing a stream of display RAM data
pub const CONTROL_DATA: u8 = 0x40;

/// Control byte announcing a single data byte
///
/// Sent right after [`Command::ReadModifyWriteStart`] so the read that
/// follows the next repeated start returns display RAM.
pub const CONTROL_DATA_SINGLE: u8 = 0xC0;

/// Number of commands in [`init_sequence`]
pub const INIT_SEQUENCE_LEN: usize = 19;

/// COM output scan direction
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ComScan {
    /// COM0 to COM[N-1] (0xC0)
    Increment,
    /// COM[N-1] to COM0 (0xC8)
    Decrement,
}

/// SH1106 commands with their payloads
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    /// Display on (0xAF) or off (0xAE)
    DisplayOn(bool),
    /// Clock divide ratio and oscillator frequency (0xD5, 1 byte)
    ClockDivider(u8),
    /// Multiplex ratio in rows, 1..=64 (0xA8, sent as `rows - 1`)
    Multiplex(u8),
    /// Vertical display offset (0xD3, 1 byte)
    DisplayOffset(u8),
    /// RAM row shown on the first line, 0..=63 (0x40 | line)
    StartLine(u8),
    /// Charge pump / DC-DC setting (0x8D, 1 byte)
    ChargePump(u8),
    /// Memory addressing mode (0x20, 1 byte)
    MemoryMode(u8),
    /// Segment remap: column 0 maps to SEG131 when true (0xA0 | remap)
    SegmentRemap(bool),
    /// COM scan direction (0xC0 / 0xC8)
    ComScanDirection(ComScan),
    /// COM pins hardware configuration (0xDA, 1 byte)
    ComPins(u8),
    /// Contrast (0x81, 1 byte)
    Contrast(u8),
    /// Discharge/precharge period (0xD9, 1 byte)
    Precharge(u8),
    /// VCOM deselect level (0xDB, 1 byte)
    VcomDetect(u8),
    /// Light every pixel regardless of RAM when true (0xA4 | on)
    EntireDisplayOn(bool),
    /// Inverted display when true (0xA6 | inverted)
    Invert(bool),
    /// Page address, 0..=7 (0xB0 | page)
    PageAddress(u8),
    /// Low nibble of the column address (0x00 | column & 0x0F)
    ColumnLow(u8),
    /// High nibble of the column address (0x10 | column >> 4)
    ColumnHigh(u8),
    /// Enter read-modify-write mode (0xE0)
    ///
    /// Reads no longer advance the column, writes still do.
    ReadModifyWriteStart,
    /// Leave read-modify-write mode (0xEE)
    ///
    /// The column address returns to where it was at `ReadModifyWriteStart`.
    ReadModifyWriteEnd,
}

/// Raw bytes of one encoded [`Command`]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Encoded {
    bytes: [u8; 2],
    len: usize,
}

impl Encoded {
    fn one(opcode: u8) -> Self {
        Self {
            bytes: [opcode, 0],
            len: 1,
        }
    }

    fn two(opcode: u8, arg: u8) -> Self {
        Self {
            bytes: [opcode, arg],
            len: 2,
        }
    }

    /// The encoded bytes, opcode first
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl Command {
    /// Encode the command into the bytes sent after [`CONTROL_COMMAND`]
    pub fn encode(self) -> Encoded {
        match self {
            Self::DisplayOn(on) => Encoded::one(0xAE | u8::from(on)),
            Self::ClockDivider(value) => Encoded::two(0xD5, value),
            Self::Multiplex(rows) => Encoded::two(0xA8, rows.clamp(1, 64) - 1),
            Self::DisplayOffset(offset) => Encoded::two(0xD3, offset & 0x3F),
            Self::StartLine(line) => Encoded::one(0x40 | (line & 0x3F)),
            Self::ChargePump(value) => Encoded::two(0x8D, value),
            Self::MemoryMode(mode) => Encoded::two(0x20, mode),
            Self::SegmentRemap(remap) => Encoded::one(0xA0 | u8::from(remap)),
            Self::ComScanDirection(ComScan::Increment) => Encoded::one(0xC0),
            Self::ComScanDirection(ComScan::Decrement) => Encoded::one(0xC8),
            Self::ComPins(value) => Encoded::two(0xDA, value),
            Self::Contrast(value) => Encoded::two(0x81, value),
            Self::Precharge(value) => Encoded::two(0xD9, value),
            Self::VcomDetect(value) => Encoded::two(0xDB, value),
            Self::EntireDisplayOn(on) => Encoded::one(0xA4 | u8::from(on)),
            Self::Invert(inverted) => Encoded::one(0xA6 | u8::from(inverted)),
            Self::PageAddress(page) => Encoded::one(0xB0 | (page & 0x0F)),
            Self::ColumnLow(column) => Encoded::one(column & 0x0F),
            Self::ColumnHigh(column) => Encoded::one(0x10 | ((column >> 4) & 0x0F)),
            Self::ReadModifyWriteStart => Encoded::one(0xE0),
            Self::ReadModifyWriteEnd => Encoded::one(0xEE),
        }
    }
}

/// Power-up command sequence for the given configuration
///
/// The order is fixed: display off, clock, multiplex, offset, start line,
/// charge pump, memory mode, segment remap, COM scan, COM pins, contrast,
/// precharge, VCOM, resume from entire-display-on, normal/inverse, display on,
/// then column and start line reset.
pub fn init_sequence(config: &Config) -> [Command; INIT_SEQUENCE_LEN] {
    let (remap, scan) = match config.rotation {
        Rotation::Rotate0 => (true, ComScan::Decrement),
        Rotation::Rotate180 => (false, ComScan::Increment),
    };
    [
        Command::DisplayOn(false),
        Command::ClockDivider(config.clock_divider),
        Command::Multiplex(config.dimensions.height),
        Command::DisplayOffset(config.display_offset),
        Command::StartLine(config.start_line),
        Command::ChargePump(config.charge_pump),
        Command::MemoryMode(config.memory_mode),
        Command::SegmentRemap(remap),
        Command::ComScanDirection(scan),
        Command::ComPins(config.com_pins),
        Command::Contrast(config.contrast),
        Command::Precharge(config.precharge),
        Command::VcomDetect(config.vcom_detect),
        Command::EntireDisplayOn(false),
        Command::Invert(config.inverted),
        Command::DisplayOn(true),
        Command::ColumnLow(0),
        Command::ColumnHigh(0),
        Command::StartLine(0),
    ]
}
