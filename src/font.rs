//! Bitmap font descriptor
//!
//! A font is a flat glyph table laid out column-major: glyph `n` starts at
//! `n * width * byte_height`, and each column takes `byte_height` bytes, top
//! row-block first, bit 0 on top. The table itself is opaque data supplied by
//! the application.

use core::ops::BitOr;

/// Character classes a glyph table covers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FontFlags(u8);

impl FontFlags {
    /// Digits `0`..=`9`
    pub const NUMBERS: Self = Self(1);
    /// Letters `A`..=`Z`
    pub const UPPERCASE: Self = Self(2);
    /// Letters `a`..=`z`
    pub const LOWERCASE: Self = Self(4);
    /// The table holds a glyph for `' '`
    pub const HAS_SPACE: Self = Self(8);
    /// Everything
    pub const FULL: Self = Self(0xFF);

    /// No flags
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Flags from raw bits
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw bits
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether every flag in `other` is set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Flags set in either
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl BitOr for FontFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Glyph bytes for one character
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    /// Column-major glyph bytes, `width * byte_height` long
    Bitmap(&'static [u8]),
    /// An empty cell, used for spaces the table has no glyph for
    Blank,
}

/// Font descriptor
///
/// ## Example
///
/// ```
/// use sh1106_rmw::{Font, FontFlags, Glyph};
///
/// // Two 3x5 glyphs starting at '0'
/// static DIGITS: [u8; 6] = [0x1F, 0x11, 0x1F, 0x00, 0x1F, 0x00];
/// let font = Font::new(&DIGITS, 3, 5, b'0', FontFlags::NUMBERS);
///
/// assert_eq!(font.glyph(b'1'), Some(Glyph::Bitmap(&DIGITS[3..6])));
/// assert_eq!(font.glyph(b' '), Some(Glyph::Blank));
/// assert_eq!(font.glyph(b'2'), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Font {
    data: &'static [u8],
    width: u8,
    height: u8,
    first_char: u8,
    flags: FontFlags,
}

impl Font {
    /// Describe a glyph table
    ///
    /// `first_char` is the code of the table's first glyph.
    pub const fn new(
        data: &'static [u8],
        width: u8,
        height: u8,
        first_char: u8,
        flags: FontFlags,
    ) -> Self {
        Self {
            data,
            width,
            height,
            first_char,
            flags,
        }
    }

    /// Glyph width in pixels
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Glyph height in pixels
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Bytes per glyph column
    pub const fn byte_height(&self) -> u8 {
        self.height.div_ceil(8)
    }

    /// Code of the first glyph in the table
    pub const fn first_char(&self) -> u8 {
        self.first_char
    }

    /// Character classes covered
    pub const fn flags(&self) -> FontFlags {
        self.flags
    }

    /// The raw glyph table
    pub const fn data(&self) -> &'static [u8] {
        self.data
    }

    /// Map a letter to the case the table actually has
    ///
    /// Lowercase becomes uppercase when only uppercase is present, and the
    /// other way round. Everything else is returned unchanged.
    pub fn resolve(&self, c: u8) -> u8 {
        let upper = self.flags.contains(FontFlags::UPPERCASE);
        let lower = self.flags.contains(FontFlags::LOWERCASE);
        match c {
            b'a'..=b'z' if !lower && upper => c.to_ascii_uppercase(),
            b'A'..=b'Z' if !upper && lower => c.to_ascii_lowercase(),
            _ => c,
        }
    }

    /// Glyph for character `c`
    ///
    /// `None` when the table has nothing for it: the code is below
    /// `first_char` or past the end of the table, or it is a digit in a font
    /// without [`FontFlags::NUMBERS`].
    pub fn glyph(&self, c: u8) -> Option<Glyph> {
        let c = self.resolve(c);
        if c == b' ' && !self.flags.contains(FontFlags::HAS_SPACE) {
            return Some(Glyph::Blank);
        }
        if c.is_ascii_digit() && !self.flags.contains(FontFlags::NUMBERS) {
            return None;
        }
        let len = usize::from(self.width) * usize::from(self.byte_height());
        let start = usize::from(c.checked_sub(self.first_char)?) * len;
        self.data.get(start..start + len).map(Glyph::Bitmap)
    }
}
