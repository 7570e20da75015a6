//! Bus transaction manager
//!
//! [`Bus`] owns the [`Transport`] and remembers whether a transaction is
//! open. Continuing an open transaction costs a repeated start; only a
//! caller that asks for a fresh transaction pays for a stop and a start.
//!
//! ```text
//!            open(dir, force_new = true)        close()
//!  Closed ─────────────────────────────▶ Open ─────────▶ Closed
//!     │                                  ▲  │
//!     │ open(dir, false): start          │  │ open(dir, false): repeated start
//!     └──────────────────────────────────┘  └──────────────▶ Open
//! ```

use crate::command::{CONTROL_COMMAND, CONTROL_DATA, Command};
use crate::error::Error;
use crate::interface::{Direction, Transport};

type BusResult<T, R> = core::result::Result<R, Error<T>>;

/// Transaction state around a [`Transport`]
#[derive(Debug)]
pub struct Bus<T: Transport> {
    /// Underlying bus primitives
    transport: T,
    /// 7-bit device address
    address: u8,
    /// Whether a start has been issued without a matching stop
    open: bool,
}

impl<T: Transport> Bus<T> {
    /// Wrap a transport talking to the device at `address`
    pub fn new(transport: T, address: u8) -> Self {
        Self {
            transport,
            address,
            open: false,
        }
    }

    /// Whether a transaction is currently open
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Begin (or continue) a transaction in `direction`
    ///
    /// An open transaction is continued with a repeated start unless
    /// `force_new` is set, in which case it is stopped first.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the bus could not be acquired. Nothing
    /// more is sent and the bus is left closed; the caller decides whether to
    /// retry.
    pub fn open(&mut self, direction: Direction, force_new: bool) -> BusResult<T, ()> {
        let header = direction.header(self.address);
        let result = if self.open && !force_new {
            self.transport.repeated_start(header)
        } else {
            self.close()?;
            self.transport.start(header)
        };

        match result {
            Ok(()) => {
                self.open = true;
                Ok(())
            }
            Err(e) => {
                log::warn!("sh1106: bus not acquired ({direction:?}): {e:?}");
                self.open = false;
                Err(Error::Transport(e))
            }
        }
    }

    /// End the current transaction with a stop condition
    ///
    /// Closing a bus that is not open does nothing.
    pub fn close(&mut self) -> BusResult<T, ()> {
        if !self.open {
            return Ok(());
        }
        self.open = false;
        self.transport.stop().map_err(Error::Transport)
    }

    /// Send one raw byte in the open transaction
    pub fn write(&mut self, byte: u8) -> BusResult<T, ()> {
        self.transport.write(byte).map_err(Error::Transport)
    }

    /// Receive one raw byte in the open transaction
    pub fn read(&mut self, last: bool) -> BusResult<T, u8> {
        self.transport.read(last).map_err(Error::Transport)
    }

    /// Send a command, continuing the current write transaction
    ///
    /// Each encoded byte goes out behind its own [`CONTROL_COMMAND`] byte.
    pub fn command(&mut self, command: Command) -> BusResult<T, ()> {
        self.open(Direction::Write, false)?;
        for &byte in command.encode().as_bytes() {
            self.write(CONTROL_COMMAND)?;
            self.write(byte)?;
        }
        Ok(())
    }

    /// Send display RAM data, continuing the current write transaction
    pub fn data(&mut self, bytes: &[u8]) -> BusResult<T, ()> {
        self.open(Direction::Write, false)?;
        self.write(CONTROL_DATA)?;
        for &byte in bytes {
            self.write(byte)?;
        }
        Ok(())
    }

    /// Access the transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Access the transport mutably
    ///
    /// Bytes sent behind the manager's back are not tracked.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give back the transport
    pub fn release(self) -> T {
        self.transport
    }
}
