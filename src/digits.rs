use std::fmt::Display;

const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];

/// Replaces every ASCII digit with its Persian glyph. Anything else,
/// including digits that are already Persian, passes through untouched.
pub fn to_persian_digits(value: impl Display) -> String {
    value
        .to_string()
        .chars()
        .map(|ch| match ch.to_digit(10) {
            Some(d) => PERSIAN_DIGITS[d as usize],
            None => ch,
        })
        .collect()
}

/// Count as shown on the device screen: at least four digits, zero padded.
pub fn lcd_digits(count: u64) -> String {
    to_persian_digits(format!("{count:04}"))
}
