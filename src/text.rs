//! Text rendering
//!
//! Glyphs are drawn through the same splice path as bitmaps. A text cursor
//! tracks where the next character goes:
//!
//! - `\n` moves to column 0 of the next line (`y += height`)
//! - `\r` is ignored
//! - anything else is drawn and the cursor advances `width + 1` pixels; with
//!   wrapping on, a cursor that leaves no room for another glyph moves to
//!   column 0, `height + 1` rows down
//!
//! There is no scrolling. Text below the last row is clipped.

use core::fmt;

use crate::color::{Background, Color};
use crate::display::{Display, DisplayResult};
use crate::error::Error;
use crate::font::{Font, Glyph};
use crate::interface::Transport;
use crate::raster::{Stamp, block_mask};

/// Something that consumes text one byte at a time
pub trait Emit {
    /// Error type for failed output
    type Error;

    /// Output one byte, returning how many bytes were consumed
    fn emit(&mut self, byte: u8) -> Result<usize, Self::Error>;

    /// Output every byte of `s`
    fn emit_str(&mut self, s: &str) -> Result<usize, Self::Error> {
        let mut count = 0;
        for &byte in s.as_bytes() {
            count += self.emit(byte)?;
        }
        Ok(count)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TextState {
    pub cursor: (u8, u8),
    pub font: Option<Font>,
    pub color: Color,
    pub background: Background,
    pub wrap: bool,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            cursor: (0, 0),
            font: None,
            color: Color::Set,
            background: Background::Transparent,
            wrap: true,
        }
    }
}

impl<T> Display<T>
where
    T: Transport,
{
    /// Select the font used by [`emit`](Emit::emit) and [`draw_char`](Self::draw_char)
    pub fn set_font(&mut self, font: Font) {
        self.text.font = Some(font);
    }

    /// Current font
    pub fn font(&self) -> Option<&Font> {
        self.text.font.as_ref()
    }

    /// Move the text cursor
    pub fn set_cursor(&mut self, x: u8, y: u8) {
        self.text.cursor = (x, y);
    }

    /// Move the text cursor back to `(0, 0)`
    pub fn reset_cursor(&mut self) {
        self.text.cursor = (0, 0);
    }

    /// Text cursor position
    pub fn cursor(&self) -> (u8, u8) {
        self.text.cursor
    }

    /// Set the text color and background policy
    pub fn set_text_color(&mut self, color: Color, background: Background) {
        self.text.color = color;
        self.text.background = background;
    }

    /// Enable or disable wrapping at the right edge
    pub fn set_text_wrap(&mut self, wrap: bool) {
        self.text.wrap = wrap;
    }

    /// Draw one character of the current font at `(x, y)`
    ///
    /// Does nothing without a font or for characters the font lacks. With a
    /// [`Background::Solid`] policy the spacing column right of the glyph is
    /// painted as background too, and so is the spacing row below it unless
    /// the font height is a whole number of pages.
    pub fn draw_char(
        &mut self,
        x: u8,
        y: u8,
        c: u8,
        color: Color,
        background: Background,
    ) -> DisplayResult<T> {
        let Some(font) = self.text.font else {
            return Ok(());
        };
        let Some(glyph) = font.glyph(c) else {
            log::trace!("sh1106: no glyph for {c:#04x}");
            return Ok(());
        };

        let bytes = match (glyph, background) {
            // Merging nothing into a transparent background changes nothing
            (Glyph::Blank, Background::Transparent) => return Ok(()),
            (Glyph::Blank, Background::Solid) => &[][..],
            (Glyph::Bitmap(bytes), _) => bytes,
        };
        let width = font.width();
        let height = font.height();
        let byte_height = usize::from(font.byte_height());
        let (stamp_width, stamp_height) = match background {
            Background::Solid if height % 8 != 0 => {
                (width.saturating_add(1), height.saturating_add(1))
            }
            Background::Solid => (width.saturating_add(1), height),
            Background::Transparent => (width, height),
        };
        let stamp = Stamp {
            x,
            y,
            width: stamp_width,
            height: stamp_height,
            color,
            background,
        };
        self.blit(stamp, |column, block| {
            if column >= width {
                return 0;
            }
            bytes
                .get(usize::from(column) * byte_height + usize::from(block))
                .map_or(0, |&byte| byte & block_mask(height, block))
        })
    }
}

impl<T> Emit for Display<T>
where
    T: Transport,
{
    type Error = Error<T>;

    fn emit(&mut self, byte: u8) -> Result<usize, Self::Error> {
        let Some(font) = self.text.font else {
            return Ok(0);
        };
        let (x, y) = self.text.cursor;
        match byte {
            b'\n' => self.text.cursor = (0, y.saturating_add(font.height())),
            b'\r' => {}
            _ => {
                let TextState {
                    color, background, ..
                } = self.text;
                self.draw_char(x, y, byte, color, background)?;
                let x = x.saturating_add(font.width()).saturating_add(1);
                let fits = u16::from(x) + u16::from(font.width())
                    <= u16::from(self.config.dimensions.width);
                self.text.cursor = if self.text.wrap && !fits {
                    (0, y.saturating_add(font.height()).saturating_add(1))
                } else {
                    (x, y)
                };
            }
        }
        Ok(1)
    }
}

impl<T> fmt::Write for Display<T>
where
    T: Transport,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.emit_str(s).map(|_| ()).map_err(|_| fmt::Error)
    }
}

#[cfg(test)]
mod tests {
    use core::fmt::Write as _;

    use super::*;
    use crate::config::Builder;
    use crate::font::FontFlags;
    use crate::sim::Sh1106Sim;

    // 5x8 glyphs for ' ', '!' and '"'
    static FONT_5X8: [u8; 15] = [
        0x00, 0x00, 0x00, 0x00, 0x00, // ' '
        0x00, 0x00, 0x5F, 0x00, 0x00, // '!'
        0x00, 0x07, 0x00, 0x07, 0x00, // '"'
    ];

    // One 3x12 glyph for 'A', two bytes per column
    static FONT_3X12: [u8; 6] = [0xFF, 0x0F, 0x01, 0x08, 0xFF, 0x0F];
    // Bit 7 is outside the glyph
    static FONT_3X7: [u8; 3] = [0xFF, 0x41, 0x7F];

    fn test_display() -> Display<Sh1106Sim> {
        let config = Builder::new().build().unwrap();
        Display::new(Sh1106Sim::new(), config)
    }

    fn font_5x8() -> Font {
        Font::new(&FONT_5X8, 5, 8, b' ', FontFlags::FULL)
    }

    #[test]
    fn test_defaults() {
        let display = test_display();
        assert_eq!(display.cursor(), (0, 0));
        assert!(display.font().is_none());
        assert_eq!(display.text, TextState::default());
        assert!(display.text.wrap);
    }

    #[test]
    fn test_emit_without_font_consumes_nothing() {
        let mut display = test_display();
        assert_eq!(display.emit(b'!').unwrap(), 0);
        assert_eq!(display.emit_str("!!").unwrap(), 0);
        assert!(display.transport().events.is_empty());
    }

    #[test]
    fn test_emit_draws_and_advances() {
        let mut display = test_display();
        display.set_font(font_5x8());
        assert_eq!(display.emit(b'!').unwrap(), 1);
        assert_eq!(display.cursor(), (6, 0));
        assert_eq!(display.transport().byte(2, 0), 0x5F);
        display.emit(b'"').unwrap();
        assert_eq!(display.transport().byte(7, 0), 0x07);
        assert_eq!(display.cursor(), (12, 0));
    }

    #[test]
    fn test_newline_and_carriage_return() {
        let mut display = test_display();
        display.set_font(font_5x8());
        display.set_cursor(30, 4);
        display.emit(b'\r').unwrap();
        assert_eq!(display.cursor(), (30, 4));
        display.emit(b'\n').unwrap();
        assert_eq!(display.cursor(), (0, 12));
        assert!(display.transport().events.is_empty());
    }

    #[test]
    fn test_wrap_at_right_edge() {
        let mut display = test_display();
        display.set_font(font_5x8());
        // 20 glyphs end at x = 120, room for one more
        for _ in 0..20 {
            display.emit(b' ').unwrap();
        }
        assert_eq!(display.cursor(), (120, 0));
        display.emit(b' ').unwrap();
        assert_eq!(display.cursor(), (0, 9));
    }

    #[test]
    fn test_no_wrap_keeps_going() {
        let mut display = test_display();
        display.set_font(font_5x8());
        display.set_text_wrap(false);
        display.set_cursor(120, 0);
        display.emit(b'!').unwrap();
        assert_eq!(display.cursor(), (126, 0));
        // Clipped to the two visible columns
        display.emit(b'!').unwrap();
        assert_eq!(display.cursor(), (132, 0));
        assert_eq!(display.transport().ram[0][130], 0);
    }

    #[test]
    fn test_glyph_spliced_across_pages() {
        let mut display = test_display();
        display.set_font(font_5x8());
        display.set_cursor(0, 3);
        display.emit(b'!').unwrap();
        let sim = display.transport();
        assert_eq!(sim.byte(2, 0), 0x5F << 3);
        assert_eq!(sim.byte(2, 1), 0x5F >> 5);
        assert_eq!(sim.runs.len(), 2);
    }

    #[test]
    fn test_tall_glyph_uses_byte_height() {
        let mut display = test_display();
        display.set_font(Font::new(&FONT_3X12, 3, 12, b'A', FontFlags::UPPERCASE));
        // Lowercase resolves to the uppercase glyph
        display.draw_char(0, 0, b'a', Color::Set, Background::Transparent).unwrap();
        let sim = display.transport();
        assert_eq!([sim.byte(0, 0), sim.byte(1, 0), sim.byte(2, 0)], [0xFF, 0x01, 0xFF]);
        assert_eq!([sim.byte(0, 1), sim.byte(1, 1), sim.byte(2, 1)], [0x0F, 0x08, 0x0F]);
    }

    #[test]
    fn test_solid_background_paints_spacing_column() {
        let mut display = test_display();
        display.fill_screen(Color::Set).unwrap();
        display.set_font(font_5x8());
        display.set_text_color(Color::Set, Background::Solid);
        display.emit(b'!').unwrap();
        let sim = display.transport();
        assert_eq!(sim.byte(0, 0), 0x00);
        assert_eq!(sim.byte(2, 0), 0x5F);
        // Spacing column
        assert_eq!(sim.byte(5, 0), 0x00);
        assert_eq!(sim.byte(6, 0), 0xFF);
    }

    #[test]
    fn test_blank_space() {
        let mut display = test_display();
        display.fill_screen(Color::Set).unwrap();
        display.transport_mut().clear_log();
        display.set_font(Font::new(&FONT_3X12, 3, 12, b'A', FontFlags::UPPERCASE));

        display.draw_char(0, 0, b' ', Color::Set, Background::Transparent).unwrap();
        assert!(display.transport().events.is_empty());

        display.draw_char(0, 0, b' ', Color::Set, Background::Solid).unwrap();
        let sim = display.transport();
        assert!((0..4).all(|x| sim.byte(x, 0) == 0x00));
        // Rows 8..=11 plus the spacing row 12
        assert!((0..4).all(|x| sim.byte(x, 1) == 0xE0));
        assert_eq!(sim.byte(4, 0), 0xFF);
    }

    #[test]
    fn test_solid_background_paints_spacing_row() {
        let mut display = test_display();
        display.fill_screen(Color::Set).unwrap();
        display.set_font(Font::new(&FONT_3X7, 3, 7, b'A', FontFlags::UPPERCASE));
        display.draw_char(0, 0, b'A', Color::Set, Background::Solid).unwrap();
        let sim = display.transport();
        // Row 7 is background even where the glyph byte has it set
        assert_eq!([sim.byte(0, 0), sim.byte(1, 0), sim.byte(2, 0)], [0x7F, 0x41, 0x7F]);
        assert_eq!(sim.byte(3, 0), 0x00);
        assert_eq!(sim.byte(4, 0), 0xFF);
        assert_eq!(sim.byte(0, 1), 0xFF);
    }

    #[test]
    fn test_solid_spacing_row_crosses_page() {
        let mut display = test_display();
        display.fill_screen(Color::Set).unwrap();
        display.set_font(Font::new(&FONT_3X7, 3, 7, b'A', FontFlags::UPPERCASE));
        display.draw_char(0, 2, b'A', Color::Set, Background::Solid).unwrap();
        let sim = display.transport();
        // Glyph on rows 2..=8, spacing row 9 in page 1
        assert_eq!([sim.byte(0, 0), sim.byte(1, 0), sim.byte(3, 0)], [0xFF, 0x07, 0x03]);
        assert_eq!([sim.byte(0, 1), sim.byte(1, 1), sim.byte(3, 1)], [0xFD, 0xFD, 0xFC]);
    }

    #[test]
    fn test_whole_page_font_has_no_spacing_row() {
        let mut display = test_display();
        display.fill_screen(Color::Set).unwrap();
        display.set_font(font_5x8());
        display.draw_char(0, 0, b'!', Color::Set, Background::Solid).unwrap();
        assert!((0..6).all(|x| display.transport().byte(x, 1) == 0xFF));
    }

    #[test]
    fn test_missing_glyph_draws_nothing() {
        let mut display = test_display();
        display.set_font(font_5x8());
        display.emit(b'~').unwrap();
        assert!(display.transport().events.is_empty());
        assert_eq!(display.cursor(), (6, 0));
    }

    #[test]
    fn test_fmt_write() {
        let mut display = test_display();
        display.set_font(font_5x8());
        write!(display, "{}", "!\n!").unwrap();
        assert_eq!(display.cursor(), (6, 8));
        assert_eq!(display.transport().byte(2, 1), 0x5F);
    }

    #[test]
    fn test_emit_reports_bus_failure() {
        let mut display = test_display();
        display.set_font(font_5x8());
        display.transport_mut().busy = true;
        assert!(display.emit(b'!').is_err());
        assert_eq!(display.cursor(), (0, 0));
        assert!(write!(display, "!").is_err());
    }
}
