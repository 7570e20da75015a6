//! Core display operations

use crate::bus::Bus;
use crate::color::Color;
use crate::command::{Command, init_sequence};
use crate::config::{Config, Dimensions};
use crate::cursor::AddressCursor;
use crate::error::Error;
use crate::interface::{Direction, Transport};
use crate::text::TextState;

pub(crate) type DisplayResult<T> = core::result::Result<(), Error<T>>;

/// Columns sent per data transfer when filling the screen
const FILL_CHUNK: usize = 16;

/// Core display driver for SH1106
///
/// Holds everything the driver mirrors about the hardware: the bus
/// transaction state, the controller's write pointer and the text cursor.
/// There is no framebuffer; every drawing call goes straight to display RAM.
pub struct Display<T>
where
    T: Transport,
{
    /// Bus transaction manager
    pub(crate) bus: Bus<T>,
    /// Display configuration
    pub(crate) config: Config,
    /// Controller write pointer cache
    pub(crate) cursor: AddressCursor,
    /// Text renderer state
    pub(crate) text: TextState,
}

impl<T> Display<T>
where
    T: Transport,
{
    /// Create a new Display instance
    ///
    /// Nothing is sent until [`initialize`](Self::initialize).
    pub fn new(transport: T, config: Config) -> Self {
        Self {
            bus: Bus::new(transport, config.address),
            config,
            cursor: AddressCursor::new(),
            text: TextState::default(),
        }
    }

    /// Send the power-up command sequence in one transaction
    pub fn initialize(&mut self) -> DisplayResult<T> {
        log::debug!(
            "sh1106: initializing {}x{} at {:#04x}",
            self.config.dimensions.width,
            self.config.dimensions.height,
            self.config.address
        );
        self.cursor.invalidate();
        self.bus.open(Direction::Write, true)?;
        let result = init_sequence(&self.config)
            .into_iter()
            .try_for_each(|command| self.bus.command(command));
        let closed = self.bus.close();
        result.and(closed)
    }

    /// Fill the whole display RAM with one color
    ///
    /// Streams plain data instead of read-modify-write, so this is much
    /// faster than `fill_rect` over the full screen.
    pub fn fill_screen(&mut self, color: Color) -> DisplayResult<T> {
        log::debug!("sh1106: fill screen {color:?}");
        let chunk = [match color {
            Color::Set => 0xFF,
            Color::Clear => 0x00,
        }; FILL_CHUNK];
        let width = usize::from(self.config.dimensions.width);

        self.bus.open(Direction::Write, true)?;
        let mut result = Ok(());
        for page in 0..self.config.dimensions.pages() {
            result = self.fill_page(page, &chunk, width);
            if result.is_err() {
                break;
            }
        }
        // Data writes advanced the column behind the cache's back
        self.cursor.invalidate();
        let closed = self.bus.close();
        result.and(closed)
    }

    fn fill_page(&mut self, page: u8, chunk: &[u8; FILL_CHUNK], width: usize) -> DisplayResult<T> {
        self.cursor.invalidate();
        self.move_to(0, page << 3)?;
        let mut remaining = width;
        while remaining > 0 {
            let count = remaining.min(FILL_CHUNK);
            self.bus.data(&chunk[..count])?;
            remaining -= count;
        }
        Ok(())
    }

    /// Turn every pixel off
    pub fn clear(&mut self) -> DisplayResult<T> {
        self.fill_screen(Color::Clear)
    }

    /// Switch the panel on or off; RAM contents are kept
    pub fn set_display_on(&mut self, on: bool) -> DisplayResult<T> {
        self.single_command(Command::DisplayOn(on))
    }

    /// Set the contrast
    pub fn set_contrast(&mut self, contrast: u8) -> DisplayResult<T> {
        self.single_command(Command::Contrast(contrast))?;
        self.config.contrast = contrast;
        Ok(())
    }

    /// Show RAM inverted (set bits dark) or normal
    pub fn set_inverted(&mut self, inverted: bool) -> DisplayResult<T> {
        self.single_command(Command::Invert(inverted))?;
        self.config.inverted = inverted;
        Ok(())
    }

    fn single_command(&mut self, command: Command) -> DisplayResult<T> {
        self.bus.open(Direction::Write, true)?;
        let result = self.bus.command(command);
        let closed = self.bus.close();
        result.and(closed)
    }

    /// Point the controller's write pointer at visible column `x`, row `y`
    ///
    /// Must run inside an open write transaction. Nothing is sent when the
    /// pointer is already on that column and page.
    pub(crate) fn move_to(&mut self, x: u8, y: u8) -> DisplayResult<T> {
        if let Some(commands) = self.cursor.reposition(x, y, self.config.column_offset) {
            for command in commands {
                self.bus.command(command)?;
            }
        }
        Ok(())
    }

    /// Get the visible dimensions
    pub fn dimensions(&self) -> &Dimensions {
        &self.config.dimensions
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Cached `(x, page)` of the controller's write pointer
    #[cfg(test)]
    pub(crate) fn address(&self) -> Option<(u8, u8)> {
        self.cursor.position()
    }

    /// Access the transport
    pub fn transport(&self) -> &T {
        self.bus.transport()
    }

    /// Access the transport mutably
    pub fn transport_mut(&mut self) -> &mut T {
        self.bus.transport_mut()
    }

    /// Give back the transport
    pub fn release(self) -> T {
        self.bus.release()
    }
}
