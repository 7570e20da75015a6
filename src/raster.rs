//! Shape rasterizer
//!
//! Breaks pixels, rectangles and page-format bitmaps into runs of column
//! writes, one read-modify-write bracket per destination page.
//!
//! A source row-block (8 rows) that does not start on a page boundary is
//! spliced across two pages:
//!
//! ```text
//!  y = 3, source column 0xA5
//!
//!  page 0   bits 3..=7  <- 0xA5 << 3  (mask 0xF8)
//!  page 1   bits 0..=2  <- 0xA5 >> 5  (mask 0x07)
//! ```

use core::iter;

use crate::color::{Background, Color};
use crate::display::{Display, DisplayResult};
use crate::interface::Transport;

/// How a source byte lines up with one destination page
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Shift {
    /// Source row 0 lands on bit `n` of the page
    Left(u8),
    /// Source row `n` lands on bit 0 of the page
    Right(u8),
}

impl Shift {
    pub(crate) fn apply(self, byte: u8) -> u8 {
        match self {
            Self::Left(n) => byte << n,
            Self::Right(n) => byte >> n,
        }
    }
}

/// Destination pages of a row-block starting at surface row `row`
///
/// Yields the page holding `row`, and when `row` is not page aligned, the
/// page below it for the spilled bits.
pub(crate) fn splice(row: u8) -> impl Iterator<Item = (u8, Shift)> {
    let page = row >> 3;
    let diff = row & 7;
    let spill = (diff != 0).then_some((page + 1, Shift::Right(8 - diff)));
    iter::once((page, Shift::Left(diff))).chain(spill)
}

/// `(page, mask)` runs covering `height` rows from `top`
///
/// `height` must be non-zero. A rectangle inside one page is a single run.
/// Otherwise the last page comes first, then the first page, then the full
/// pages in between.
pub(crate) fn rect_runs(top: u8, height: u8) -> impl Iterator<Item = (u8, u8)> {
    let bottom = top + (height - 1);
    let first = top >> 3;
    let last = bottom >> 3;
    let mask_start = 0xFF_u8 << (top & 7);
    let mask_end = 0xFF_u8 >> (7 - (bottom & 7));

    let single = (first == last).then_some((first, mask_start & mask_end));
    let edges = (first != last)
        .then_some([(last, mask_end), (first, mask_start)])
        .into_iter()
        .flatten();
    let interior = (first + 1..last).map(|page| (page, 0xFF));
    single.into_iter().chain(edges).chain(interior)
}

/// Rows of `block` that belong to a shape `height` rows tall
pub(crate) fn block_mask(height: u8, block: u8) -> u8 {
    let rows = height.saturating_sub(block << 3).min(8);
    if rows == 0 { 0 } else { 0xFF >> (8 - rows) }
}

/// Placement and paint of a page-format image
#[derive(Clone, Copy, Debug)]
pub(crate) struct Stamp {
    pub x: u8,
    pub y: u8,
    pub width: u8,
    pub height: u8,
    pub color: Color,
    pub background: Background,
}

impl<T> Display<T>
where
    T: Transport,
{
    /// Set or clear one pixel
    ///
    /// Coordinates outside the panel are ignored without touching the bus.
    pub fn set_pixel(&mut self, x: u8, y: u8, color: Color) -> DisplayResult<T> {
        if !self.config.dimensions.contains(x, y) {
            return Ok(());
        }
        let bit = 1 << (y & 7);
        self.with_rmw(x, y >> 3, |d| {
            d.write_column(bit, color, Background::Transparent, bit)
        })
    }

    /// Fill a rectangle, clipped to the panel
    pub fn fill_rect(
        &mut self,
        left: u8,
        top: u8,
        width: u8,
        height: u8,
        color: Color,
    ) -> DisplayResult<T> {
        let dims = self.config.dimensions;
        if width == 0 || height == 0 || !dims.contains(left, top) {
            log::trace!("sh1106: fill_rect at ({left}, {top}) is off screen");
            return Ok(());
        }
        let width = width.min(dims.width - left);
        let height = height.min(dims.height - top);

        for (page, mask) in rect_runs(top, height) {
            self.with_rmw(left, page, |d| {
                for _ in 0..width {
                    d.write_column(mask, color, Background::Transparent, mask)?;
                }
                Ok(())
            })?;
        }
        Ok(())
    }

    /// Draw a page-format bitmap `w` x `h` pixels at `(x, y)`
    ///
    /// Byte `j * w + i` holds column `i` of row-block `j`, bit 0 on top.
    /// Bytes missing from `bitmap` read as zero.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_bitmap(
        &mut self,
        x: u8,
        y: u8,
        bitmap: &[u8],
        w: u8,
        h: u8,
        color: Color,
        background: Background,
    ) -> DisplayResult<T> {
        let stamp = Stamp {
            x,
            y,
            width: w,
            height: h,
            color,
            background,
        };
        let stride = usize::from(w);
        self.blit(stamp, |column, block| {
            bitmap
                .get(usize::from(block) * stride + usize::from(column))
                .copied()
                .unwrap_or(0)
        })
    }

    /// Splice an image into display RAM
    ///
    /// `source(column, block)` returns the source byte for one column of one
    /// row-block.
    pub(crate) fn blit<F>(&mut self, stamp: Stamp, source: F) -> DisplayResult<T>
    where
        F: Fn(u8, u8) -> u8,
    {
        let dims = self.config.dimensions;
        if stamp.width == 0 || stamp.height == 0 || !dims.contains(stamp.x, stamp.y) {
            log::trace!("sh1106: image at ({}, {}) is off screen", stamp.x, stamp.y);
            return Ok(());
        }
        let columns = stamp.width.min(dims.width - stamp.x);
        if columns < stamp.width {
            log::trace!(
                "sh1106: image at ({}, {}) clipped to {columns} columns",
                stamp.x,
                stamp.y
            );
        }

        let pages = dims.pages();
        for block in 0..stamp.height.div_ceil(8) {
            let Some(row) = stamp.y.checked_add(block << 3) else {
                break;
            };
            let valid = block_mask(stamp.height, block);
            for (page, shift) in splice(row) {
                let mask = shift.apply(valid);
                if page >= pages || mask == 0 {
                    continue;
                }
                self.with_rmw(stamp.x, page, |d| {
                    for column in 0..columns {
                        let data = shift.apply(source(column, block) & valid);
                        d.write_column(data, stamp.color, stamp.background, mask)?;
                    }
                    Ok(())
                })?;
            }
        }
        Ok(())
    }
}
