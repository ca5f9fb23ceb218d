//! Icon and LED types
//!
//! This module defines the closed sets of things the board can show besides
//! digits: the unit icon ([`Unit`]), the battery chemistry ([`BatteryType`])
//! and the charge status LED ([`Led`]).
//!
//! Raw integer conversions are provided through [`TryFrom<u8>`] for callers
//! that store these as numbers.
//!
//! ## Example
//!
//! ```
//! use projecta::{BatteryType, Led, Unit};
//!
//! assert_eq!(Unit::Volts.icon(), 0x08);
//! assert_eq!(Unit::Watts.kilo_icon(), Some(0x22));
//! assert_eq!(BatteryType::try_from(3), Ok(BatteryType::Agm));
//! assert!(Led::try_from(5).is_err());
//! ```

use crate::error::FrameError;
use crate::protocol::{
    BATTERY_AGM, BATTERY_CALCIUM, BATTERY_GEL, BATTERY_POWER_SUPPLY, BATTERY_WET, ICON_AMP_HOURS,
    ICON_AMPS, ICON_CELSIUS, ICON_HOURS, ICON_KILOWATT_HOURS, ICON_KILOWATTS, ICON_PERCENT,
    ICON_VOLTS, ICON_WATT_HOURS, ICON_WATTS,
};

/// Unit shown next to the digits
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unit {
    /// Volts
    Volts,
    /// Amps
    Amps,
    /// Watts, switching to kilowatts from 1000 W
    Watts,
    /// Degrees Celsius
    Celsius,
    /// Percent
    Percent,
    /// Amp-hours
    AmpHours,
    /// Watt-hours, switching to kilowatt-hours from 1000 Wh
    WattHours,
    /// Hours
    Hours,
}

impl Unit {
    /// Icon byte for the base unit
    pub fn icon(self) -> u8 {
        match self {
            Self::Volts => ICON_VOLTS,
            Self::Amps => ICON_AMPS,
            Self::Watts => ICON_WATTS,
            Self::Celsius => ICON_CELSIUS,
            Self::Percent => ICON_PERCENT,
            Self::AmpHours => ICON_AMP_HOURS,
            Self::WattHours => ICON_WATT_HOURS,
            Self::Hours => ICON_HOURS,
        }
    }

    /// Icon byte for the kilo unit, if the unit has one
    pub fn kilo_icon(self) -> Option<u8> {
        match self {
            Self::Watts => Some(ICON_KILOWATTS),
            Self::WattHours => Some(ICON_KILOWATT_HOURS),
            _ => None,
        }
    }
}

/// Battery chemistry icon
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum BatteryType {
    /// No icon
    #[default]
    None = 0,
    /// Power supply mode
    PowerSupply = 1,
    /// Gel
    Gel = 2,
    /// Absorbent glass mat
    Agm = 3,
    /// Flooded lead acid
    Wet = 4,
    /// Calcium
    Calcium = 5,
}

impl BatteryType {
    /// Bits to set in frame bytes 5 and 6
    pub fn bits(self) -> (u8, u8) {
        match self {
            Self::None => (0, 0),
            Self::PowerSupply => (0, BATTERY_POWER_SUPPLY),
            Self::Gel => (BATTERY_GEL, 0),
            Self::Agm => (BATTERY_AGM, 0),
            Self::Wet => (BATTERY_WET, 0),
            Self::Calcium => (BATTERY_CALCIUM, 0),
        }
    }
}

impl TryFrom<u8> for BatteryType {
    type Error = FrameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::PowerSupply),
            2 => Ok(Self::Gel),
            3 => Ok(Self::Agm),
            4 => Ok(Self::Wet),
            5 => Ok(Self::Calcium),
            _ => Err(FrameError::InvalidBatteryType { value }),
        }
    }
}

/// Charge status LED pattern
///
/// Only one pattern can be active at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Led {
    /// Alternating green and red
    GreenRedFlashing = 0,
    /// Flashing red
    RedFlashing = 1,
    /// Solid red
    SolidRed = 2,
    /// Flashing green
    GreenFlashing = 3,
    /// Solid green
    SolidGreen = 4,
}

impl Led {
    /// Bit in frame byte 7 that selects this pattern
    pub fn bit(self) -> u8 {
        match self {
            Self::GreenRedFlashing => 1 << 4,
            Self::RedFlashing => 1 << 3,
            Self::SolidRed => 1 << 2,
            Self::GreenFlashing => 1 << 1,
            Self::SolidGreen => 1 << 0,
        }
    }
}

impl TryFrom<u8> for Led {
    type Error = FrameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::GreenRedFlashing),
            1 => Ok(Self::RedFlashing),
            2 => Ok(Self::SolidRed),
            3 => Ok(Self::GreenFlashing),
            4 => Ok(Self::SolidGreen),
            _ => Err(FrameError::InvalidLed { value }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{BATTERY_TYPE_MASK_B5, BATTERY_TYPE_MASK_B6, LED_MASK};

    #[test]
    fn test_battery_type_roundtrips_through_raw_value() {
        for raw in 0..=5u8 {
            let battery = BatteryType::try_from(raw).unwrap();
            assert_eq!(battery as u8, raw);
        }
        assert_eq!(
            BatteryType::try_from(6),
            Err(FrameError::InvalidBatteryType { value: 6 })
        );
    }

    #[test]
    fn test_battery_type_bits_stay_inside_masks() {
        for raw in 0..=5u8 {
            let (b5, b6) = BatteryType::try_from(raw).unwrap().bits();
            assert_eq!(b5 & !BATTERY_TYPE_MASK_B5, 0);
            assert_eq!(b6 & !BATTERY_TYPE_MASK_B6, 0);
        }
    }

    #[test]
    fn test_led_bits_are_distinct_and_inside_mask() {
        let mut seen = 0u8;
        for raw in 0..=4u8 {
            let bit = Led::try_from(raw).unwrap().bit();
            assert_eq!(bit & !LED_MASK, 0);
            assert_eq!(seen & bit, 0);
            seen |= bit;
        }
        assert_eq!(seen, LED_MASK);
        assert_eq!(Led::try_from(5), Err(FrameError::InvalidLed { value: 5 }));
    }

    #[test]
    fn test_kilo_icons() {
        assert_eq!(Unit::WattHours.kilo_icon(), Some(0x32));
        assert_eq!(Unit::Volts.kilo_icon(), None);
        assert_eq!(Unit::Hours.icon(), 0x01);
        assert_eq!(Unit::AmpHours.icon(), 0x11);
    }
}
