//! Address cursor cache
//!
//! Remembers where the controller's page/column write pointer was last put so
//! repeated draws at the same spot skip the three positioning commands.

use crate::command::Command;

/// Last page/column position sent to the controller
///
/// `None` means unknown: the next reposition always emits commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AddressCursor {
    position: Option<(u8, u8)>,
}

impl AddressCursor {
    /// A cursor with no known position
    pub const fn new() -> Self {
        Self { position: None }
    }

    /// Cached `(x, page)` position, in visible columns
    pub fn position(&self) -> Option<(u8, u8)> {
        self.position
    }

    /// Forget the cached position
    ///
    /// Needed after anything that advances the column outside a
    /// read-modify-write bracket.
    pub fn invalidate(&mut self) {
        self.position = None;
    }

    /// Commands that move the write pointer to visible column `x`, row `y`
    ///
    /// Returns `None` when the pointer is already on that column and page.
    /// The cache is updated as soon as the commands are produced, whether or
    /// not they reach the controller.
    pub fn reposition(&mut self, x: u8, y: u8, column_offset: u8) -> Option<[Command; 3]> {
        let page = y >> 3;
        if self.position == Some((x, page)) {
            return None;
        }
        self.position = Some((x, page));

        let column = x.wrapping_add(column_offset);
        Some([
            Command::PageAddress(page),
            Command::ColumnLow(column),
            Command::ColumnHigh(column),
        ])
    }
}
