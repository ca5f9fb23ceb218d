//! Seven-segment glyph encoding
//!
//! The display has three seven-segment digits. Numbers are shown with up to
//! three significant digits and a floating decimal point; text is limited to
//! three characters from `a-z` and space.
//!
//! Both encoders are pure: they return [`Digits`] and leave writing into a
//! frame to [`Frame`](crate::Frame).
//!
//! ## Number bands
//!
//! | Value range    | Scale | Shown as |
//! |----------------|-------|----------|
//! | `0 <= v < 10`  | x100  | `d.dd`   |
//! | `10 <= v < 100`| x10   | `dd.d`   |
//! | `100 <= v < 1000` | x1 | `ddd`    |
//!
//! Scaled values are rounded half away from zero. If rounding carries a value
//! to 1000 inside a band, the next band is used, so `9.996` shows as `10.0`.
//!
//! ## Example
//!
//! ```
//! use projecta::segment;
//!
//! let digits = segment::encode_number(4.2)?;
//! assert_eq!(digits.left, segment::NUMERALS[4] | projecta::protocol::DECIMAL_POINT);
//! assert_eq!(digits.middle, segment::NUMERALS[2]);
//! assert_eq!(digits.right, segment::NUMERALS[0]);
//!
//! let text = segment::encode_letters("End")?;
//! assert_eq!(text.left, segment::glyph('e')?);
//! # Ok::<(), projecta::FrameError>(())
//! ```

use crate::error::FrameError;
use crate::protocol::{DECIMAL_POINT, OVERFLOW_GLYPH};

/// Segment patterns for the numerals 0-9
pub const NUMERALS: [u8; 10] = [0xEB, 0x60, 0xC7, 0xE5, 0x6C, 0xAD, 0xAF, 0xE0, 0xEF, 0xED];

/// Segment patterns for the letters a-z
///
/// Several letters share a pattern with a numeral (`o` and `0`, `s` and `5`)
/// or with each other (`k` and `x`); the display has no way to tell them apart.
pub const LETTERS: [u8; 26] = [
    0xEE, 0x2F, 0x8B, 0x67, 0x8F, 0x8E, 0xED, 0x2E, 0x0A, 0x63, 0x6E, 0x0B, 0xA2, 0x26, 0xEB,
    0xCE, 0xEC, 0x06, 0xAD, 0x0F, 0x6B, 0x23, 0x49, 0x6E, 0x6D, 0xC7,
];

/// Pattern for a space (all segments off)
pub const BLANK: u8 = 0x00;

/// Number of digit positions on the display
pub const DIGIT_COUNT: usize = 3;

/// The three digit bytes of a frame, decimal points included
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Digits {
    /// Leftmost digit (hundreds place, first character)
    pub left: u8,
    /// Middle digit (tens place, second character)
    pub middle: u8,
    /// Rightmost digit (ones place, third character)
    pub right: u8,
}

impl Digits {
    /// Dashes on all three digits, shown when a number cannot be displayed
    pub const OVERFLOW: Self = Self {
        left: OVERFLOW_GLYPH,
        middle: OVERFLOW_GLYPH,
        right: OVERFLOW_GLYPH,
    };
}

/// Where the decimal point sits for a band
#[derive(Clone, Copy, Debug, PartialEq)]
enum DecimalPoint {
    Left,
    Middle,
    None,
}

/// (exclusive upper bound, scale, decimal point) for each band, smallest first
const BANDS: [(f32, f32, DecimalPoint); 3] = [
    (10.0, 100.0, DecimalPoint::Left),
    (100.0, 10.0, DecimalPoint::Middle),
    (1000.0, 1.0, DecimalPoint::None),
];

/// Largest integer that fits on three digits, plus one
const DIGIT_LIMIT: u32 = 1000;

/// Round a non-negative value half away from zero
fn round_half_up(value: f32) -> u32 {
    (value + 0.5) as u32
}

/// Split a value below 1000 into digit glyphs
fn split(scaled: u32, point: DecimalPoint) -> Digits {
    let hundreds = (scaled / 100 % 10) as usize;
    let tens = (scaled / 10 % 10) as usize;
    let ones = (scaled % 10) as usize;

    let mut digits = Digits {
        left: NUMERALS[hundreds],
        middle: NUMERALS[tens],
        right: NUMERALS[ones],
    };
    match point {
        DecimalPoint::Left => digits.left |= DECIMAL_POINT,
        DecimalPoint::Middle => digits.middle |= DECIMAL_POINT,
        DecimalPoint::None => {}
    }
    digits
}

/// Encode a number onto the three digits
///
/// # Errors
///
/// - [`FrameError::InvalidNumber`] if `value` is negative or NaN
/// - [`FrameError::NumberTooLarge`] if `value` rounds to 1000 or more
///
/// In both cases callers are expected to show [`Digits::OVERFLOW`].
pub fn encode_number(value: f32) -> Result<Digits, FrameError> {
    if value.is_nan() || value < 0.0 {
        return Err(FrameError::InvalidNumber);
    }

    for (limit, scale, point) in BANDS {
        if value < limit {
            let scaled = round_half_up(value * scale);
            if scaled < DIGIT_LIMIT {
                return Ok(split(scaled, point));
            }
        }
    }

    Err(FrameError::NumberTooLarge)
}

/// Look up the glyph for a single character
///
/// Upper case letters fold to lower case.
///
/// # Errors
///
/// Returns [`FrameError::CharacterInvalid`] for anything outside `A-Z`,
/// `a-z` and space.
pub fn glyph(character: char) -> Result<u8, FrameError> {
    match character {
        'a'..='z' => Ok(LETTERS[(character as u8 - b'a') as usize]),
        'A'..='Z' => Ok(LETTERS[(character as u8 - b'A') as usize]),
        ' ' => Ok(BLANK),
        _ => Err(FrameError::CharacterInvalid { character }),
    }
}

/// Encode a three character label
///
/// Characters are placed in reading order: the first character on the
/// leftmost digit.
///
/// # Errors
///
/// - [`FrameError::InvalidLength`] unless `text` has exactly three characters
/// - [`FrameError::CharacterInvalid`] for the first unsupported character
pub fn encode_letters(text: &str) -> Result<Digits, FrameError> {
    let provided = text.chars().count();
    if provided != DIGIT_COUNT {
        return Err(FrameError::InvalidLength {
            expected: DIGIT_COUNT,
            provided,
        });
    }

    let mut glyphs = [BLANK; DIGIT_COUNT];
    for (slot, character) in glyphs.iter_mut().zip(text.chars()) {
        *slot = glyph(character)?;
    }

    Ok(Digits {
        left: glyphs[0],
        middle: glyphs[1],
        right: glyphs[2],
    })
}
