//! Column compositor and the read-modify-write bracket
//!
//! Every drawing primitive ends up here. Inside a bracket the controller
//! leaves the column address alone on reads and advances it on writes, so
//! each column costs one read (after a dummy read) and one write:
//!
//! ```text
//! S 0x78 | move_to | 0x80 0xE0 | 0xC0
//!   Sr 0x79 | dummy | b (NACK)        <- per column
//!   Sr 0x78 | 0x40 b'                 <-
//! Sr 0x78 | 0x80 0xEE | P
//! ```
//!
//! `0xEE` puts the column back where it was at `0xE0`, so the address cursor
//! cache stays valid across a bracket.

use crate::color::{Background, Color};
use crate::command::{CONTROL_DATA_SINGLE, Command};
use crate::display::{Display, DisplayResult};
use crate::interface::{Direction, Transport};

/// Merge `data` into the RAM byte `current`
///
/// With a [`Background::Solid`] policy the bits in `mask` are first painted
/// with the opposite of `color`, then the set bits of `data` with `color`.
/// With [`Background::Transparent`] only the set bits of `data` change.
pub fn composite(current: u8, data: u8, color: Color, background: Background, mask: u8) -> u8 {
    let base = match background {
        Background::Transparent => current,
        Background::Solid => color.inverse().merge(current, mask),
    };
    color.merge(base, data)
}

impl<T> Display<T>
where
    T: Transport,
{
    /// Open a fresh transaction, position the pointer and enter RMW mode
    ///
    /// On failure the bus is closed before the error is returned. Once
    /// `0xE0` may have reached the controller, RMW mode is ended first.
    pub(crate) fn start_rmw(&mut self, x: u8, page: u8) -> DisplayResult<T> {
        self.bus.open(Direction::Write, true)?;
        if let Err(e) = self.move_to(x, page << 3) {
            self.cursor.invalidate();
            let _ = self.bus.close();
            return Err(e);
        }
        let entered = self
            .bus
            .command(Command::ReadModifyWriteStart)
            .and_then(|()| self.bus.write(CONTROL_DATA_SINGLE));
        if entered.is_err() {
            self.abort_rmw();
        }
        entered
    }

    /// Leave RMW mode and end the transaction
    pub(crate) fn stop_rmw(&mut self) -> DisplayResult<T> {
        let ended = self.bus.command(Command::ReadModifyWriteEnd);
        let closed = self.bus.close();
        ended.and(closed)
    }

    /// Tear a bracket down after an error
    ///
    /// The controller's column may no longer match the cache, so the next
    /// bracket repositions. `0xEE` only goes out while the bus is still held.
    fn abort_rmw(&mut self) {
        self.cursor.invalidate();
        if self.bus.is_open() {
            let _ = self.stop_rmw();
        }
    }

    /// Read, merge and write back the byte under the pointer
    ///
    /// Only valid inside a bracket. No bounds checks.
    pub(crate) fn write_column(
        &mut self,
        data: u8,
        color: Color,
        background: Background,
        mask: u8,
    ) -> DisplayResult<T> {
        self.bus.open(Direction::Read, false)?;
        self.bus.read(false)?;
        let current = self.bus.read(true)?;
        let merged = composite(current, data, color, background, mask);
        self.bus.data(&[merged])
    }

    /// Run `f` inside a bracket at column `x` of `page`
    ///
    /// The bracket is closed on every exit path. If `f` failed because the
    /// bus was lost, nothing more is sent. Any failure drops the cached
    /// pointer position.
    pub(crate) fn with_rmw<F>(&mut self, x: u8, page: u8, f: F) -> DisplayResult<T>
    where
        F: FnOnce(&mut Self) -> DisplayResult<T>,
    {
        self.start_rmw(x, page)?;
        if let Err(e) = f(self) {
            self.abort_rmw();
            return Err(e);
        }
        let stopped = self.stop_rmw();
        if stopped.is_err() {
            self.cursor.invalidate();
        }
        stopped
    }
}
