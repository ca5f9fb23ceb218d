//! Error types for the driver
//!
//! This module defines error types for frame encoding ([`FrameError`]),
//! bus operations ([`Error`]) and configuration building ([`BuilderError`]).
//!
//! ## Error Types
//!
//! - [`FrameError`] - A setter rejected its input or could not show the value
//! - [`Error`] - The board could not be reached or the instance limit was hit
//! - [`BuilderError`] - Errors during configuration construction
//! - [`ErrorKind`] - Payload-free classification of the above, with a text name
//!
//! ## Example
//!
//! ```
//! use projecta::{ErrorKind, Frame, FrameError};
//!
//! let mut frame = Frame::new();
//! let result = frame.set_battery_bar(7);
//! assert!(matches!(result, Err(FrameError::InvalidBatteryBar { bars: 7 })));
//!
//! if let Err(e) = result {
//!     assert_eq!(e.kind(), ErrorKind::InvalidBatteryBar);
//!     assert_eq!(e.kind().as_str(), "invalid battery bar");
//! }
//! ```

use crate::interface::BusInterface;

/// Errors returned by frame setters
///
/// Setters either leave the frame untouched or, for numbers that cannot be
/// shown, write the overflow glyph. See each variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameError {
    /// Number is 1000 or more after unit scaling
    ///
    /// The digits show the overflow glyph; the unit icon is still written.
    NumberTooLarge,
    /// Number is negative or NaN
    ///
    /// The digits show the overflow glyph; the unit icon is still written.
    InvalidNumber,
    /// Text contains a character outside `A-Z`, `a-z` and space
    ///
    /// The frame is left unmodified.
    CharacterInvalid {
        /// First rejected character
        character: char,
    },
    /// Text is not exactly as long as the digit row
    ///
    /// The frame is left unmodified.
    InvalidLength {
        /// Required number of characters
        expected: usize,
        /// Number of characters provided
        provided: usize,
    },
    /// Battery bar count above [`MAX_BATTERY_BARS`](crate::protocol::MAX_BATTERY_BARS)
    InvalidBatteryBar {
        /// Requested bar count
        bars: u8,
    },
    /// Raw value does not name a [`BatteryType`](crate::BatteryType)
    InvalidBatteryType {
        /// Raw value provided
        value: u8,
    },
    /// Raw value does not name an [`Led`](crate::Led)
    InvalidLed {
        /// Raw value provided
        value: u8,
    },
}

impl FrameError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NumberTooLarge => ErrorKind::NumberTooLarge,
            Self::InvalidNumber => ErrorKind::InvalidNumber,
            Self::CharacterInvalid { .. } => ErrorKind::CharacterInvalid,
            Self::InvalidLength { .. } => ErrorKind::InvalidLength,
            Self::InvalidBatteryBar { .. } => ErrorKind::InvalidBatteryBar,
            Self::InvalidBatteryType { .. } => ErrorKind::InvalidBatteryType,
            Self::InvalidLed { .. } => ErrorKind::InvalidLed,
        }
    }
}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NumberTooLarge => write!(f, "Number too large for three digits"),
            Self::InvalidNumber => write!(f, "Number is negative or not a number"),
            Self::CharacterInvalid { character } => {
                write!(f, "Character {character:?} cannot be displayed")
            }
            Self::InvalidLength { expected, provided } => {
                write!(
                    f,
                    "Invalid text length: expected {expected} characters, provided {provided}"
                )
            }
            Self::InvalidBatteryBar { bars } => write!(f, "Invalid battery bar count: {bars}"),
            Self::InvalidBatteryType { value } => write!(f, "Invalid battery type: {value}"),
            Self::InvalidLed { value } => write!(f, "Invalid LED: {value}"),
        }
    }
}

impl core::error::Error for FrameError {}

/// Errors that can occur when talking to the board
///
/// Generic over the interface type to preserve the specific error type.
/// Only [`Display::begin`](crate::Display::begin) returns this; failures
/// inside [`Display::cycle`](crate::Display::cycle) are counted, not returned.
#[derive(Debug)]
pub enum Error<I: BusInterface> {
    /// The board did not acknowledge the probe
    ///
    /// Wraps the underlying error from the [`BusInterface`] implementation.
    Connectivity(I::Error),
    /// The instance was constructed after the port limit was reached
    ///
    /// At most [`MAX_INSTANCES`](crate::protocol::MAX_INSTANCES) boards can be
    /// driven. The bus is not touched.
    InstanceLimitExceeded {
        /// Ordinal assigned to the rejected instance
        id: u8,
    },
}

impl<I: BusInterface> Error<I> {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Connectivity(_) => ErrorKind::Connectivity,
            Self::InstanceLimitExceeded { .. } => ErrorKind::InstanceLimitExceeded,
        }
    }
}

impl<I: BusInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Connectivity(e) => write!(f, "Board not reachable: {e:?}"),
            Self::InstanceLimitExceeded { id } => write!(
                f,
                "Instance {id} exceeds the limit of {} boards",
                crate::protocol::MAX_INSTANCES
            ),
        }
    }
}

impl<I: BusInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Payload-free error classification
///
/// Useful for logging and for matching without caring about the transport
/// error type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::Connectivity`]
    Connectivity,
    /// See [`Error::InstanceLimitExceeded`]
    InstanceLimitExceeded,
    /// See [`FrameError::InvalidBatteryBar`]
    InvalidBatteryBar,
    /// See [`FrameError::InvalidBatteryType`]
    InvalidBatteryType,
    /// See [`FrameError::InvalidLed`]
    InvalidLed,
    /// See [`FrameError::NumberTooLarge`]
    NumberTooLarge,
    /// See [`FrameError::InvalidNumber`]
    InvalidNumber,
    /// See [`FrameError::CharacterInvalid`]
    CharacterInvalid,
    /// See [`FrameError::InvalidLength`]
    InvalidLength,
}

impl ErrorKind {
    /// Short human-readable name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connectivity => "board not reachable",
            Self::InstanceLimitExceeded => "instance limit exceeded",
            Self::InvalidBatteryBar => "invalid battery bar",
            Self::InvalidBatteryType => "invalid battery type",
            Self::InvalidLed => "invalid led",
            Self::NumberTooLarge => "number too large",
            Self::InvalidNumber => "invalid number",
            Self::CharacterInvalid => "character invalid",
            Self::InvalidLength => "invalid text length",
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur when building configuration
#[derive(Debug)]
pub enum BuilderError {
    /// Poll read count outside `1..=MAX_POLL_READS`
    ///
    /// See [`Builder::poll_reads()`](crate::config::Builder::poll_reads).
    InvalidPollReads {
        /// Requested reads per cycle
        reads: u8,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidPollReads { reads } => write!(
                f,
                "Invalid poll reads {reads} (must be 1 to {})",
                crate::config::MAX_POLL_READS
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
