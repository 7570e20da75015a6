//! SH1106 OLED Display Driver
//!
//! A framebuffer-less driver for the SH1106 OLED controller over I2C. Every
//! drawing call reads the affected bytes back from display RAM, merges the
//! new pixels in and writes them back, using the controller's
//! read-modify-write mode. The driver keeps no copy of the screen, so it fits
//! in a few dozen bytes of RAM.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support, with a bit-banged [`SoftI2c`] transport
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Pixels, filled rectangles and page-format bitmaps at any row
//! - Bitmap fonts with wrapping and `core::fmt::Write`
//! - Panels up to 132x64 with a configurable column offset
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use core::fmt::Write;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use sh1106_rmw::{Builder, Color, Display, Font, FontFlags, SoftI2c};
//!
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl InputPin for MockPin {
//! #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(true) }
//! #     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(false) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # static FONT: [u8; 475] = [0; 475];
//! let i2c = SoftI2c::new(MockPin, MockPin, MockDelay);
//! let config = match Builder::new().contrast(0x7F).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = Display::new(i2c, config);
//! let _ = display.initialize();
//! let _ = display.clear();
//! let _ = display.fill_rect(0, 0, 128, 10, Color::Set);
//!
//! display.set_font(Font::new(&FONT, 5, 8, b' ', FontFlags::FULL));
//! display.set_cursor(0, 16);
//! let _ = write!(display, "temp {}C", 21);
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// Bus transaction manager
pub mod bus;
/// Pixel color and background policy
pub mod color;
/// SH1106 command definitions
pub mod command;
/// Column compositor and read-modify-write bracket
pub mod compositor;
/// Display configuration types and builder
pub mod config;
/// Controller address cursor cache
pub mod cursor;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Bitmap font descriptor
pub mod font;
/// Transport abstraction and bit-banged I2C
pub mod interface;
/// Shape rasterizer
pub mod raster;
/// Text rendering
pub mod text;

#[cfg(test)]
mod sim;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use color::{Background, Color};
pub use command::Command;
pub use compositor::composite;
pub use config::{
    Builder, Config, DEFAULT_ADDRESS, DEFAULT_COLUMN_OFFSET, Dimensions, MAX_COLUMNS, MAX_ROWS,
    Rotation,
};
pub use display::Display;
pub use error::{BuilderError, Error};
pub use font::{Font, FontFlags, Glyph};
pub use interface::{
    DEFAULT_HALF_PERIOD_NS, Direction, FAST_MODE_HALF_PERIOD_NS, InterfaceError, SoftI2c,
    Transport,
};
pub use text::Emit;
