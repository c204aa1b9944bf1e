use crate::core::constants::ALPHABET_WIDTH;

/// Offset between the ASCII digit `'0'` and `anchor`.
fn offset(anchor: char) -> u8 {
    anchor as u8 - b'0'
}

/// Re-bases an ASCII decimal digit onto the letter run starting at `anchor`.
///
/// `'0'` maps to `anchor`, `'9'` maps to `anchor + 9`.
///
/// # Example
/// ```
/// use decipin_rs::core::rebase::rebase_digit;
///
/// assert_eq!(rebase_digit(b'0', 'A'), b'A');
/// assert_eq!(rebase_digit(b'9', 'Q'), b'Z');
/// ```
pub fn rebase_digit(digit: u8, anchor: char) -> u8 {
    debug_assert!(digit.is_ascii_digit());
    digit + offset(anchor)
}

/// Inverse of [`rebase_digit`]: maps a letter in the anchor's run back to its digit.
pub fn unrebase_letter(letter: u8, anchor: char) -> u8 {
    debug_assert!(in_range(letter, anchor));
    letter - offset(anchor)
}

/// Returns true when `letter` falls inside the 10-letter run starting at `anchor`.
pub fn in_range(letter: u8, anchor: char) -> bool {
    let start = anchor as u8;
    (start..start + ALPHABET_WIDTH).contains(&letter)
}

/// Last letter of the run starting at `anchor`.
pub fn last_letter(anchor: char) -> char {
    (anchor as u8 + ALPHABET_WIDTH - 1) as char
}
