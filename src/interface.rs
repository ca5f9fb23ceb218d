//! Hardware interface abstraction
//!
//! This module provides the [`BusInterface`] trait and the [`Interface`] struct
//! for exchanging frames with the board over I2C.
//!
//! ## Hardware Requirements
//!
//! The board needs only an I2C bus (SDA + SCL). Pin and clock selection
//! belong to the HAL that produces the [`I2c`] instance; the board is known to
//! work at the 100 kHz standard-mode clock.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::i2c::{I2c, Operation};
//! use projecta::{BusInterface, Interface};
//! # use core::convert::Infallible;
//! # struct MockI2c;
//! # impl embedded_hal::i2c::ErrorType for MockI2c { type Error = Infallible; }
//! # impl I2c for MockI2c {
//! #     fn transaction(
//! #         &mut self,
//! #         _address: u8,
//! #         _operations: &mut [Operation<'_>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! let mut interface = Interface::new(MockI2c);
//!
//! // Check that the board answers
//! let _ = interface.probe(projecta::protocol::PERIPHERAL_ADDRESS);
//!
//! // Read the keypad
//! let mut keypad = [0u8; 3];
//! let _ = interface.read_frame(projecta::protocol::PERIPHERAL_ADDRESS, &mut keypad);
//! ```

use core::fmt::Debug;
use embedded_hal::i2c::{Error as _, I2c};

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for the bus transport to the board
///
/// This trait abstracts over different hardware implementations,
/// allowing the [`Display`](crate::display::Display) to work with any
/// transport that can move whole frames.
///
/// ## Implementing
///
/// For most cases, use the provided [`Interface`] struct. Implement this
/// trait on your own type for non-I2C links or for test doubles.
pub trait BusInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Check that a device acknowledges `address`
    ///
    /// # Errors
    ///
    /// Returns an error if the device does not acknowledge.
    fn probe(&mut self, address: u8) -> InterfaceResult<(), Self::Error>;

    /// Write one whole frame to `address` in a single transaction
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails.
    fn write_frame(&mut self, address: u8, frame: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Fill `buffer` from `address` in a single transaction
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails or fewer bytes arrive.
    fn read_frame(&mut self, address: u8, buffer: &mut [u8]) -> InterfaceResult<(), Self::Error>;
}

/// I2C interface implementation
///
/// Implements [`BusInterface`] for any embedded-hal v1.0 [`I2c`] bus.
///
/// ## Type Parameters
///
/// * `I2C` - I2C bus implementing [`I2c`]
pub struct Interface<I2C> {
    /// I2C bus
    i2c: I2C,
}

impl<I2C> Interface<I2C>
where
    I2C: I2c,
{
    /// Create a new Interface
    ///
    /// # Arguments
    ///
    /// * `i2c` - I2C bus (must implement [`I2c`])
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Give back the I2C bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> BusInterface for Interface<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn probe(&mut self, address: u8) -> InterfaceResult<(), Self::Error> {
        // Address-only write: START, address, STOP
        self.i2c.write(address, &[]).inspect_err(|e| {
            log::debug!("Probe of {address:#04x} failed: {:?}", e.kind());
        })
    }

    fn write_frame(&mut self, address: u8, frame: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.i2c.write(address, frame)
    }

    fn read_frame(&mut self, address: u8, buffer: &mut [u8]) -> InterfaceResult<(), Self::Error> {
        self.i2c.read(address, buffer)
    }
}
