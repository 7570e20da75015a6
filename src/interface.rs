//! Hardware interface abstraction
//!
//! This module provides the [`Transport`] trait and the [`SoftI2c`] struct
//! for talking to the SH1106 over a two-wire bus.
//!
//! The driver needs bus primitives that `embedded_hal::i2c::I2c` does not
//! expose: it holds the bus across a write, a direction change and a read
//! (repeated start) while the controller sits in read-modify-write mode.
//! [`Transport`] therefore works at the level of start, repeated start, stop
//! and single bytes.
//!
//! ## Hardware Requirements
//!
//! [`SoftI2c`] bit-bangs the bus on two open-drain GPIOs:
//! - **SDA**: data, driven low or released (`OutputPin`) and sampled (`InputPin`)
//! - **SCL**: clock, driven low or released and sampled for bus lock detection
//!
//! Both lines need pull-up resistors.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use sh1106_rmw::{Direction, SoftI2c, Transport};
//! # use core::convert::Infallible;
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl InputPin for MockPin {
//! #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(false) }
//! #     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(true) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! // Create the bus on two open-drain pins
//! let mut bus = SoftI2c::new(MockPin, MockPin, MockDelay);
//!
//! // Address 0x3C in write direction, then a single command
//! let _ = bus.start(Direction::Write.header(0x3C));
//! let _ = bus.write(0x80);
//! let _ = bus.write(0xAF); // Display on
//! let _ = bus.stop();
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Transfer direction encoded in bit 0 of the address byte
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Controller receives (R/W bit 0)
    Write,
    /// Controller transmits (R/W bit 1)
    Read,
}

impl Direction {
    /// Address byte for a 7-bit device address in this direction
    pub fn header(self, address: u8) -> u8 {
        (address << 1)
            | match self {
                Self::Write => 0,
                Self::Read => 1,
            }
    }
}

/// Trait for the two-wire bus the SH1106 is attached to
///
/// All operations block until the bus is done. Implementations report
/// failures; retrying is left to the caller.
///
/// ## Implementing
///
/// For most cases, use the provided [`SoftI2c`] struct. A hardware I2C
/// peripheral that can issue start and stop conditions under software
/// control can implement this trait directly.
pub trait Transport {
    /// Error type for bus operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Issue a start condition and send the address byte
    ///
    /// # Errors
    ///
    /// Returns an error if the bus is held by someone else or the address
    /// byte is not acknowledged.
    fn start(&mut self, header: u8) -> InterfaceResult<(), Self::Error>;

    /// Issue a repeated start condition and send the address byte
    ///
    /// The bus stays owned between the previous transfer and this one.
    fn repeated_start(&mut self, header: u8) -> InterfaceResult<(), Self::Error>;

    /// Issue a stop condition, releasing the bus
    fn stop(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Send one byte and check its acknowledge
    fn write(&mut self, byte: u8) -> InterfaceResult<(), Self::Error>;

    /// Receive one byte
    ///
    /// `last` answers with NACK instead of ACK, telling the device this is
    /// the final byte of the read.
    fn read(&mut self, last: bool) -> InterfaceResult<u8, Self::Error>;
}

/// Errors that can occur at the interface level
///
/// Generic over the GPIO error type.
#[derive(Debug, PartialEq, Eq)]
pub enum InterfaceError<PinErr> {
    /// GPIO pin error
    Pin(PinErr),
    /// The device did not acknowledge a byte
    Nack,
    /// SDA or SCL held low before a start condition
    BusLocked,
}

impl<PinErr: Debug> core::fmt::Display for InterfaceError<PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
            Self::Nack => write!(f, "Byte not acknowledged"),
            Self::BusLocked => write!(f, "Bus locked"),
        }
    }
}

impl<PinErr: Debug> core::error::Error for InterfaceError<PinErr> {}

/// Default half clock period in nanoseconds (~100 kHz standard mode)
pub const DEFAULT_HALF_PERIOD_NS: u32 = 5_000;

/// Half clock period for ~400 kHz fast mode
pub const FAST_MODE_HALF_PERIOD_NS: u32 = 1_250;

/// Bit-banged two-wire bus
///
/// Implements [`Transport`] on embedded-hal v1.0 GPIO and delay traits.
///
/// ## Type Parameters
///
/// * `SDA` - Open-drain data pin implementing [`InputPin`] and [`OutputPin`]
/// * `SCL` - Open-drain clock pin implementing [`InputPin`] and [`OutputPin`]
/// * `D` - Delay implementing [`DelayNs`]
pub struct SoftI2c<SDA, SCL, D> {
    /// Data line
    sda: SDA,
    /// Clock line
    scl: SCL,
    /// Bit timing source
    delay: D,
    /// Half of one clock period in nanoseconds
    half_period_ns: u32,
}

impl<SDA, SCL, D, PinErr> SoftI2c<SDA, SCL, D>
where
    SDA: InputPin<Error = PinErr> + OutputPin<Error = PinErr>,
    SCL: InputPin<Error = PinErr> + OutputPin<Error = PinErr>,
    D: DelayNs,
    PinErr: Debug,
{
    /// Create a new bus in standard mode
    ///
    /// Both lines are expected to be released (high) already.
    pub fn new(sda: SDA, scl: SCL, delay: D) -> Self {
        Self {
            sda,
            scl,
            delay,
            half_period_ns: DEFAULT_HALF_PERIOD_NS,
        }
    }

    /// Set the half clock period in nanoseconds
    pub fn set_half_period_ns(&mut self, half_period_ns: u32) -> &mut Self {
        self.half_period_ns = half_period_ns;
        self
    }

    /// Get the half clock period in nanoseconds
    pub fn half_period_ns(&self) -> u32 {
        self.half_period_ns
    }

    /// Give back the pins and the delay
    pub fn release(self) -> (SDA, SCL, D) {
        (self.sda, self.scl, self.delay)
    }

    fn wait(&mut self) {
        self.delay.delay_ns(self.half_period_ns);
    }

    fn sda_high(&mut self) -> InterfaceResult<(), InterfaceError<PinErr>> {
        self.sda.set_high().map_err(InterfaceError::Pin)
    }

    fn sda_low(&mut self) -> InterfaceResult<(), InterfaceError<PinErr>> {
        self.sda.set_low().map_err(InterfaceError::Pin)
    }

    fn scl_high(&mut self) -> InterfaceResult<(), InterfaceError<PinErr>> {
        self.scl.set_high().map_err(InterfaceError::Pin)
    }

    fn scl_low(&mut self) -> InterfaceResult<(), InterfaceError<PinErr>> {
        self.scl.set_low().map_err(InterfaceError::Pin)
    }

    /// SDA falls while SCL is high, then SCL is pulled low for the first bit
    fn start_condition(&mut self) -> InterfaceResult<(), InterfaceError<PinErr>> {
        self.sda_low()?;
        self.wait();
        self.scl_low()?;
        self.wait();
        Ok(())
    }

    /// Send the address header after a start
    ///
    /// A device that does not answer gets a stop, so the bus is free again.
    fn address(&mut self, header: u8) -> InterfaceResult<(), InterfaceError<PinErr>> {
        let result = self.write(header);
        if result.is_err() {
            let _ = self.stop();
        }
        result
    }
}

impl<SDA, SCL, D, PinErr> Transport for SoftI2c<SDA, SCL, D>
where
    SDA: InputPin<Error = PinErr> + OutputPin<Error = PinErr>,
    SCL: InputPin<Error = PinErr> + OutputPin<Error = PinErr>,
    D: DelayNs,
    PinErr: Debug,
{
    type Error = InterfaceError<PinErr>;

    fn start(&mut self, header: u8) -> InterfaceResult<(), Self::Error> {
        self.sda_high()?;
        self.scl_high()?;
        self.wait();

        let sda_low = self.sda.is_low().map_err(InterfaceError::Pin)?;
        let scl_low = self.scl.is_low().map_err(InterfaceError::Pin)?;
        if sda_low || scl_low {
            return Err(InterfaceError::BusLocked);
        }

        self.start_condition()?;
        self.address(header)
    }

    fn repeated_start(&mut self, header: u8) -> InterfaceResult<(), Self::Error> {
        // SCL is low here; release SDA first so it can fall while SCL is high
        self.sda_high()?;
        self.wait();
        self.scl_high()?;
        self.wait();
        self.start_condition()?;
        self.address(header)
    }

    fn stop(&mut self) -> InterfaceResult<(), Self::Error> {
        self.sda_low()?;
        self.wait();
        self.scl_high()?;
        self.wait();
        self.sda_high()?;
        self.wait();
        Ok(())
    }

    fn write(&mut self, byte: u8) -> InterfaceResult<(), Self::Error> {
        for bit in (0..8).rev() {
            if byte & (1 << bit) != 0 {
                self.sda_high()?;
            } else {
                self.sda_low()?;
            }
            self.wait();
            self.scl_high()?;
            self.wait();
            self.scl_low()?;
        }

        // Acknowledge slot: the device pulls SDA low
        self.sda_high()?;
        self.wait();
        self.scl_high()?;
        self.wait();
        let nack = self.sda.is_high().map_err(InterfaceError::Pin)?;
        self.scl_low()?;
        self.wait();

        if nack {
            Err(InterfaceError::Nack)
        } else {
            Ok(())
        }
    }

    fn read(&mut self, last: bool) -> InterfaceResult<u8, Self::Error> {
        self.sda_high()?;
        let mut byte = 0u8;
        for _ in 0..8 {
            byte <<= 1;
            self.wait();
            self.scl_high()?;
            self.wait();
            if self.sda.is_high().map_err(InterfaceError::Pin)? {
                byte |= 1;
            }
            self.scl_low()?;
        }

        if last {
            self.sda_high()?;
        } else {
            self.sda_low()?;
        }
        self.wait();
        self.scl_high()?;
        self.wait();
        self.scl_low()?;
        self.sda_high()?;
        self.wait();

        Ok(byte)
    }
}
