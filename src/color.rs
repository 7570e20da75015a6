//! Pixel color and background policy
//!
//! The SH1106 stores one bit per pixel. [`Color`] names the two states a
//! drawing primitive can drive a pixel to, and [`Background`] decides what
//! happens to the pixels of a shape whose source bit is zero.
//!
//! | Color   | Merge into RAM byte `b` | Solid background bits |
//! |---------|-------------------------|-----------------------|
//! | `Set`   | `b \| data`             | cleared               |
//! | `Clear` | `b & !data`             | set                   |
//!
//! `Set` means "pixel lit" only while the display runs in normal mode; with
//! [`Config::inverted`](crate::Config::inverted) the panel shows the opposite.
//!
//! ## Example
//!
//! ```
//! use sh1106_rmw::Color;
//!
//! assert_eq!(Color::Set.merge(0b0000_0001, 0b1000_0000), 0b1000_0001);
//! assert_eq!(Color::Clear.merge(0b1000_0001, 0b1000_0000), 0b0000_0001);
//! assert_eq!(Color::Set.inverse(), Color::Clear);
//! ```

/// Pixel state written by a drawing primitive
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Color {
    /// Pixel off
    Clear,
    /// Pixel on
    #[default]
    Set,
}

#[cfg(feature = "graphics")]
impl embedded_graphics_core::prelude::PixelColor for Color {
    type Raw = embedded_graphics_core::pixelcolor::raw::RawU1;
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::BinaryColor> for Color {
    fn from(color: embedded_graphics_core::pixelcolor::BinaryColor) -> Self {
        match color {
            embedded_graphics_core::pixelcolor::BinaryColor::On => Self::Set,
            embedded_graphics_core::pixelcolor::BinaryColor::Off => Self::Clear,
        }
    }
}

impl Color {
    /// The opposite color, used to paint solid backgrounds
    pub fn inverse(self) -> Self {
        match self {
            Self::Set => Self::Clear,
            Self::Clear => Self::Set,
        }
    }

    /// Merge `data` into the RAM byte `current`
    ///
    /// `Set` only ever turns bits on and `Clear` only ever turns bits off, so
    /// bits outside `data` keep whatever the controller already shows.
    pub fn merge(self, current: u8, data: u8) -> u8 {
        match self {
            Self::Set => current | data,
            Self::Clear => current & !data,
        }
    }
}

/// How the zero bits of a bitmap or glyph are drawn
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Background {
    /// Zero bits leave the display untouched
    #[default]
    Transparent,
    /// Zero bits inside the shape are painted with the inverse color
    Solid,
}
