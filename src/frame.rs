//! Outgoing display frame
//!
//! [`Frame`] holds the 10 bytes written to the board every cycle. Each setter
//! touches only the bits it owns and recomputes the checksum as its last
//! step, so the frame is always ready to send.
//!
//! ## Example
//!
//! ```
//! use projecta::{BatteryType, Frame, Led, Unit};
//! use projecta::protocol::{ICON, ICON_VOLTS};
//!
//! let mut frame = Frame::new();
//! frame.set_quantity(Unit::Volts, 13.8)?;
//! frame.set_battery_type(BatteryType::Agm);
//! frame.set_battery_bar(3)?;
//! frame.set_led(Led::SolidGreen, true);
//!
//! assert_eq!(frame.as_bytes()[ICON], ICON_VOLTS);
//! assert!(frame.checksum_valid());
//! # Ok::<(), projecta::FrameError>(())
//! ```

use crate::error::FrameError;
use crate::indicator::{BatteryType, Led, Unit};
use crate::protocol::{
    BATTERY_BAR, BATTERY_BAR_MASK_B4, BATTERY_BAR_MASK_B6, BATTERY_BAR_SEGMENTS, BATTERY_SHARED,
    BATTERY_TYPE, BATTERY_TYPE_MASK_B5, BATTERY_TYPE_MASK_B6, BUZZER, CHECKSUM, DIGIT_LEFT,
    DIGIT_MIDDLE, DIGIT_RIGHT, ICON, LED_BUZZER, LED_MASK, MAX_BATTERY_BARS, OUT_FRAME_LEN,
};
use crate::segment::{self, Digits};

/// Threshold at which watts and watt-hours switch to the kilo icon
const KILO: f32 = 1000.0;

/// Truncated 8-bit sum of `bytes`
///
/// ```
/// assert_eq!(projecta::frame::checksum(&[0xF0, 0x20, 0x01]), 0x11);
/// ```
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |sum, &b| sum.wrapping_add(b))
}

/// Set or clear `mask` in `byte`
fn assign_bits(byte: &mut u8, mask: u8, on: bool) {
    if on {
        *byte |= mask;
    } else {
        *byte &= !mask;
    }
}

/// The 10-byte display frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    bytes: [u8; OUT_FRAME_LEN],
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame {
    /// Create a blank frame
    pub const fn new() -> Self {
        // An all-zero frame already carries a valid checksum
        Self {
            bytes: [0; OUT_FRAME_LEN],
        }
    }

    /// Frame bytes as written to the bus
    pub fn as_bytes(&self) -> &[u8; OUT_FRAME_LEN] {
        &self.bytes
    }

    /// Whether the checksum byte matches the rest of the frame
    pub fn checksum_valid(&self) -> bool {
        self.bytes[CHECKSUM] == checksum(&self.bytes[..CHECKSUM])
    }

    fn update_checksum(&mut self) {
        self.bytes[CHECKSUM] = checksum(&self.bytes[..CHECKSUM]);
    }

    fn write_digits(&mut self, digits: Digits) {
        self.bytes[DIGIT_LEFT] = digits.left;
        self.bytes[DIGIT_MIDDLE] = digits.middle;
        self.bytes[DIGIT_RIGHT] = digits.right;
    }

    /// Blank every icon, digit and LED
    pub fn clear(&mut self) {
        self.bytes = [0; OUT_FRAME_LEN];
        self.update_checksum();
    }

    /// Show a number with its unit icon
    ///
    /// Watts and watt-hours switch to the kilo icon and divide by 1000 from
    /// 1000 upwards.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::NumberTooLarge`] or [`FrameError::InvalidNumber`]
    /// when the value cannot be shown. The digits then show dashes, and the
    /// icon and checksum are still written.
    pub fn set_quantity(&mut self, unit: Unit, value: f32) -> Result<(), FrameError> {
        let (value, icon) = match unit.kilo_icon() {
            Some(kilo_icon) if value >= KILO => (value / KILO, kilo_icon),
            _ => (value, unit.icon()),
        };

        let result = segment::encode_number(value);
        self.write_digits(result.unwrap_or(Digits::OVERFLOW));
        self.bytes[ICON] = icon;
        self.update_checksum();

        result.map(|_| ())
    }

    /// Show a three letter label on the digits
    ///
    /// The unit icon is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::InvalidLength`] or [`FrameError::CharacterInvalid`]
    /// and leaves the frame unmodified.
    pub fn set_letters(&mut self, text: &str) -> Result<(), FrameError> {
        let digits = segment::encode_letters(text)?;
        self.write_digits(digits);
        self.update_checksum();
        Ok(())
    }

    /// Show a battery chemistry icon, replacing any previous one
    ///
    /// The battery bar bit sharing byte 6 is preserved.
    pub fn set_battery_type(&mut self, battery: BatteryType) {
        let (b5, b6) = battery.bits();
        self.bytes[BATTERY_TYPE] = (self.bytes[BATTERY_TYPE] & !BATTERY_TYPE_MASK_B5) | b5;
        self.bytes[BATTERY_SHARED] = (self.bytes[BATTERY_SHARED] & !BATTERY_TYPE_MASK_B6) | b6;
        self.update_checksum();
    }

    /// Show `bars` battery bars (0 turns the gauge off)
    ///
    /// The power supply bit sharing byte 6 is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::InvalidBatteryBar`] for more than four bars and
    /// leaves the frame unmodified.
    pub fn set_battery_bar(&mut self, bars: u8) -> Result<(), FrameError> {
        if bars > MAX_BATTERY_BARS {
            return Err(FrameError::InvalidBatteryBar { bars });
        }

        let segments = BATTERY_BAR_SEGMENTS[bars as usize];
        self.bytes[BATTERY_BAR] = (self.bytes[BATTERY_BAR] & !BATTERY_BAR_MASK_B4) | segments;
        assign_bits(
            &mut self.bytes[BATTERY_SHARED],
            BATTERY_BAR_MASK_B6,
            bars > 0,
        );
        self.update_checksum();
        Ok(())
    }

    /// Turn the buzzer on or off
    pub fn set_buzzer(&mut self, on: bool) {
        assign_bits(&mut self.bytes[LED_BUZZER], BUZZER, on);
        self.update_checksum();
    }

    /// Select an LED pattern
    ///
    /// Any other pattern is switched off first, so at most one is lit.
    /// Passing `on = false` leaves all LEDs off.
    pub fn set_led(&mut self, led: Led, on: bool) {
        self.bytes[LED_BUZZER] &= !LED_MASK;
        assign_bits(&mut self.bytes[LED_BUZZER], led.bit(), on);
        self.update_checksum();
    }
}
