//! Wire-level constants for the charger display
//!
//! The display board is an I2C slave at a fixed address. Every exchange is a
//! whole frame: the host writes a 10-byte display frame and reads back a
//! 3-byte keypad frame.
//!
//! ## Outgoing frame layout
//!
//! | Byte | Contents                                            |
//! |------|-----------------------------------------------------|
//! | 0    | Unit icon selector                                  |
//! | 1    | Rightmost digit                                     |
//! | 2    | Middle digit, decimal point in `0x10`               |
//! | 3    | Leftmost digit, decimal point in `0x10`             |
//! | 4    | Battery bar segments (high nibble)                  |
//! | 5    | Battery type icons                                  |
//! | 6    | Battery outline (`0x10`) and power supply (`0x08`)  |
//! | 7    | LED selector (bits 0-4) and buzzer (bit 5)          |
//! | 8    | Reserved, always zero                               |
//! | 9    | Checksum: truncated sum of bytes 0-8                |
//!
//! Bytes 4-6 are shared between the battery bar and the battery type. Each
//! field owns only the bits listed in its mask below, so writing one field
//! never disturbs the other.
//!
//! ## Example
//!
//! ```
//! use projecta::protocol;
//!
//! assert_eq!(protocol::PERIPHERAL_ADDRESS, 0x65);
//! assert_eq!(protocol::BATTERY_BAR_MASK_B6 & protocol::BATTERY_TYPE_MASK_B6, 0);
//! ```

/// 7-bit I2C address of the display board
pub const PERIPHERAL_ADDRESS: u8 = 0x65;

/// Length of the display frame written every cycle
pub const OUT_FRAME_LEN: usize = 10;

/// Length of the keypad frame read back from the board
pub const IN_FRAME_LEN: usize = 3;

/// Maximum number of boards driven at once (one per I2C port)
pub const MAX_INSTANCES: u8 = 2;

/// Default number of keypad reads per cycle
pub const DEFAULT_POLL_READS: u8 = 5;

// Frame byte positions

/// Unit icon byte
pub const ICON: usize = 0;
/// Rightmost digit byte
pub const DIGIT_RIGHT: usize = 1;
/// Middle digit byte
pub const DIGIT_MIDDLE: usize = 2;
/// Leftmost digit byte
pub const DIGIT_LEFT: usize = 3;
/// Battery bar segment byte
pub const BATTERY_BAR: usize = 4;
/// Battery type byte
pub const BATTERY_TYPE: usize = 5;
/// Byte shared by the battery outline and the power supply icon
pub const BATTERY_SHARED: usize = 6;
/// LED and buzzer byte
pub const LED_BUZZER: usize = 7;
/// Reserved byte
pub const RESERVED: usize = 8;
/// Checksum byte
pub const CHECKSUM: usize = 9;

// Digit bytes

/// Decimal point flag, valid on the middle and leftmost digits
pub const DECIMAL_POINT: u8 = 0x10;

/// Glyph written to every digit when a number cannot be shown (a dash)
pub const OVERFLOW_GLYPH: u8 = 0x04;

// Unit icons (byte 0)

/// Volts
pub const ICON_VOLTS: u8 = 0x08;
/// Amps
pub const ICON_AMPS: u8 = 0x80;
/// Watts
pub const ICON_WATTS: u8 = 0x20;
/// Kilowatts
pub const ICON_KILOWATTS: u8 = 0x22;
/// Degrees Celsius
pub const ICON_CELSIUS: u8 = 0x04;
/// Percent
pub const ICON_PERCENT: u8 = 0x40;
/// Amp-hours
pub const ICON_AMP_HOURS: u8 = 0x11;
/// Watt-hours
pub const ICON_WATT_HOURS: u8 = 0x30;
/// Kilowatt-hours
pub const ICON_KILOWATT_HOURS: u8 = 0x32;
/// Hours
pub const ICON_HOURS: u8 = 0x01;

// Battery bar (bytes 4 and 6)

/// Bits of byte 4 owned by the bar segments
pub const BATTERY_BAR_MASK_B4: u8 = 0xF0;
/// Bit of byte 6 owned by the battery outline, lit whenever any bar is shown
pub const BATTERY_BAR_MASK_B6: u8 = 0x10;
/// Segment patterns for 0..=4 bars
pub const BATTERY_BAR_SEGMENTS: [u8; 5] = [0x00, 0x80, 0xC0, 0xE0, 0xF0];
/// Highest bar count the display can show
pub const MAX_BATTERY_BARS: u8 = 4;

// Battery type (bytes 5 and 6)

/// Bits of byte 5 owned by the battery type icons
pub const BATTERY_TYPE_MASK_B5: u8 = 0xCC;
/// Bit of byte 6 owned by the power supply icon
pub const BATTERY_TYPE_MASK_B6: u8 = 0x08;
/// Gel icon (byte 5)
pub const BATTERY_GEL: u8 = 0x40;
/// AGM icon (byte 5)
pub const BATTERY_AGM: u8 = 0x04;
/// Wet icon (byte 5)
pub const BATTERY_WET: u8 = 0x80;
/// Calcium icon (byte 5)
pub const BATTERY_CALCIUM: u8 = 0x08;
/// Power supply icon (byte 6)
pub const BATTERY_POWER_SUPPLY: u8 = 0x08;

// LEDs and buzzer (byte 7)

/// Bits of byte 7 owned by the LED selector
pub const LED_MASK: u8 = 0x1F;
/// Buzzer bit
pub const BUZZER: u8 = 1 << 5;

// Keypad frame (byte 0)

/// Charge rate button bit
pub const BUTTON_CHARGE_RATE: u8 = 0x01;
/// Volt/amp button bit
pub const BUTTON_VOLT_AMP: u8 = 0x02;
/// Battery type button bit
pub const BUTTON_BATTERY_TYPE: u8 = 0x04;
/// Recondition button bit
pub const BUTTON_RECONDITION: u8 = 0x08;
/// All button bits; bits 4-7 carry no buttons
pub const BUTTON_MASK: u8 = 0x0F;
