//! Projecta Charger Display Driver
//!
//! A driver for the seven-segment display and keypad board of Projecta
//! battery chargers, reached over I2C at address `0x65`.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - Three-digit numbers with unit icons (V, A, W/kW, °C, %, Ah, Wh/kWh, h)
//! - Three-letter labels
//! - Battery type and bar gauge icons, status LED and buzzer
//! - Press/release callbacks for the four keypad buttons
//! - Up to two boards, one per I2C port
//!
//! ## Usage
//!
//! The driver keeps a frame in memory. Setters update the frame; `cycle` polls
//! the keypad and writes the frame, and should run on every iteration of the
//! main loop.
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::i2c::{I2c, Operation};
//! use projecta::{BatteryType, Display, Interface, Led, Registry};
//!
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
//! # let i2c = MockI2c;
//! fn on_charge_rate(pressed: bool) {
//!     let _ = pressed;
//! }
//!
//! let mut registry = Registry::new();
//! let interface = Interface::new(i2c);
//! let mut display = Display::new(interface, Default::default(), registry.next_id());
//!
//! if display.begin().is_err() {
//!     return;
//! }
//! display.on_charge_rate(on_charge_rate);
//!
//! let _ = display.set_voltage(13.6);
//! display.set_battery_type(BatteryType::Agm);
//! let _ = display.set_battery_bar(3);
//! display.set_led(Led::GreenFlashing, true);
//!
//! loop {
//!     display.cycle();
//! #   break;
//! }
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// Keypad decoding and button callbacks
pub mod buttons;
/// Driver configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Outgoing display frame
pub mod frame;
/// Unit, battery type and LED definitions
pub mod indicator;
/// Hardware interface abstraction
pub mod interface;
/// Wire-level constants
pub mod protocol;
/// Instance numbering
pub mod registry;
/// Seven-segment glyph encoding
pub mod segment;

pub use buttons::{Button, ButtonCallback, ButtonEvent, Callbacks, Keypad, TransitionPolicy};
pub use config::{Builder, Config, MAX_POLL_READS};
pub use display::{CycleStats, Display};
pub use error::{BuilderError, Error, ErrorKind, FrameError};
pub use frame::Frame;
pub use indicator::{BatteryType, Led, Unit};
pub use interface::{BusInterface, Interface};
pub use registry::{InstanceId, Registry};
