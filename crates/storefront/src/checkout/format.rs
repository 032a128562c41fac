//! Payment form input formatting.
//!
//! Pure helpers the card form applies on every keystroke. Both accept
//! whatever the previous formatted value plus the new keypress produced, so
//! they must be idempotent and tolerant of their own output.

/// A full card number is 16 digits; formatted with separators that is 19
/// characters, the display cap.
const CARD_NUMBER_MAX_DIGITS: usize = 16;
const CARD_NUMBER_MAX_LEN: usize = 19;

/// Expiry input is month digits plus up to two year digits.
const EXPIRY_MAX_DIGITS: usize = 4;

/// Format a card number for display.
///
/// Keeps only ASCII digits, groups them in fours separated by single
/// spaces, never emits a trailing separator, and caps the result at 19
/// characters (a full 16-digit card).
///
/// # Examples
///
/// ```
/// use cartwheel_storefront::checkout::format_card_number;
///
/// assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
/// assert_eq!(format_card_number("4111-1111 22"), "4111 1111 22");
/// assert_eq!(format_card_number(""), "");
/// ```
#[must_use]
pub fn format_card_number(input: &str) -> String {
    let mut out = String::with_capacity(CARD_NUMBER_MAX_LEN);
    let mut digits = 0usize;
    for digit in input
        .chars()
        .filter(char::is_ascii_digit)
        .take(CARD_NUMBER_MAX_DIGITS)
    {
        if digits > 0 && digits % 4 == 0 {
            out.push(' ');
        }
        out.push(digit);
        digits += 1;
    }
    out
}

/// Format an expiry date for display.
///
/// Keeps only ASCII digits, capped at four. One digit passes through
/// unchanged; from the second digit on, the first two are the month and a
/// slash separates them from up to two year digits. Typing the second month
/// digit therefore makes the slash appear immediately (`"12"` becomes
/// `"12/"`).
///
/// # Examples
///
/// ```
/// use cartwheel_storefront::checkout::format_expiry_date;
///
/// assert_eq!(format_expiry_date("1"), "1");
/// assert_eq!(format_expiry_date("12"), "12/");
/// assert_eq!(format_expiry_date("1225"), "12/25");
/// ```
#[must_use]
pub fn format_expiry_date(input: &str) -> String {
    let digits: String = input
        .chars()
        .filter(char::is_ascii_digit)
        .take(EXPIRY_MAX_DIGITS)
        .collect();
    if digits.len() < 2 {
        return digits;
    }
    let (month, year) = digits.split_at(2);
    format!("{month}/{year}")
}
