//! Graphics support via embedded-graphics
//!
//! [`Display`] implements [`DrawTarget`] directly. There is no buffer to
//! flush: every pixel and every filled rectangle goes straight to display
//! RAM through read-modify-write, so shapes become visible as they are drawn.
//!
//! Filled rectangles are routed to [`Display::fill_rect`], which touches each
//! RAM byte once instead of once per pixel.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle, Rectangle},
//! };
//! use sh1106_rmw::{Builder, Color, Display, Transport};
//! # use core::convert::Infallible;
//! # struct MockBus;
//! # impl Transport for MockBus {
//! #     type Error = Infallible;
//! #     fn start(&mut self, _header: u8) -> Result<(), Self::Error> { Ok(()) }
//! #     fn repeated_start(&mut self, _header: u8) -> Result<(), Self::Error> { Ok(()) }
//! #     fn stop(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn write(&mut self, _byte: u8) -> Result<(), Self::Error> { Ok(()) }
//! #     fn read(&mut self, _last: bool) -> Result<u8, Self::Error> { Ok(0) }
//! # }
//! # let config = match Builder::new().build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! let mut display = Display::new(MockBus, config);
//! let _ = display.initialize();
//! let _ = display.fill_screen(Color::Clear);
//!
//! let _ = Rectangle::new(Point::new(10, 10), Size::new(50, 30))
//!     .into_styled(PrimitiveStyle::with_fill(Color::Set))
//!     .draw(&mut display);
//!
//! let _ = Circle::new(Point::new(80, 16), 32)
//!     .into_styled(PrimitiveStyle::with_stroke(Color::Set, 1))
//!     .draw(&mut display);
//! ```

use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{Dimensions, OriginDimensions, Point, Size},
    prelude::Pixel,
    primitives::Rectangle,
};

use crate::color::Color;
use crate::display::Display;
use crate::error::Error;
use crate::interface::Transport;

impl<T> OriginDimensions for Display<T>
where
    T: Transport,
{
    fn size(&self) -> Size {
        let dims = self.dimensions();
        Size::new(u32::from(dims.width), u32::from(dims.height))
    }
}

impl<T> DrawTarget for Display<T>
where
    T: Transport,
{
    type Color = Color;
    type Error = Error<T>;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            let (Ok(x), Ok(y)) = (u8::try_from(x), u8::try_from(y)) else {
                continue;
            };
            self.set_pixel(x, y, color)?;
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let (Ok(x), Ok(y), Ok(width), Ok(height)) = (
            u8::try_from(area.top_left.x),
            u8::try_from(area.top_left.y),
            u8::try_from(area.size.width),
            u8::try_from(area.size.height),
        ) else {
            return Ok(());
        };
        self.fill_rect(x, y, width, height, color)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_screen(color)
    }
}
