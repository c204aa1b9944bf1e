use crate::core::constants::{CODE_LENGTH, LENIENT_SEPARATOR};
use crate::core::rebase::last_letter;
use crate::util::error::DeciPinError;
use regex::Regex;

/// The DeciPin grammar compiled into a single regular expression.
///
/// A code is 4 digits, an optional first separator, 2 letters from the high
/// anchor's run, 2 digits, an optional second separator, 2 letters from the
/// low anchor's run and 2 digits. With the default anchors and separators the
/// pattern is:
///
/// ```text
/// ^([0-9]{4})(?:\.)?([A-J]{2})([0-9]{2})(?:/)?([Q-Z]{2})([0-9]{2})$
/// ```
///
/// Matching is done on upper-cased input, so the letter classes only list
/// upper-case letters.
#[derive(Debug, Clone)]
pub struct DeciPinPattern {
    regex: Regex,
}

impl DeciPinPattern {
    /// Compiles the grammar for the given anchors and separators.
    ///
    /// When `lenient` is set, `'-'` is also accepted at either separator position.
    ///
    /// # Example
    /// ```
    /// use decipin_rs::core::pattern::DeciPinPattern;
    ///
    /// # fn main() -> Result<(), decipin_rs::DeciPinError> {
    /// let pattern = DeciPinPattern::new('A', 'Q', ('.', '/'), false)?;
    /// assert!(pattern.is_match("0000.AA00/QQ00"));
    /// assert!(pattern.is_match("0000AA00QQ00"));
    /// assert!(!pattern.is_match("0000-AA00-QQ00"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(
        hi_anchor: char,
        lo_anchor: char,
        separators: (char, char),
        lenient: bool,
    ) -> Result<Self, DeciPinError> {
        let source = format!(
            "^([0-9]{{4}}){}([{}-{}]{{2}})([0-9]{{2}}){}([{}-{}]{{2}})([0-9]{{2}})$",
            separator_group(separators.0, lenient),
            hi_anchor,
            last_letter(hi_anchor),
            separator_group(separators.1, lenient),
            lo_anchor,
            last_letter(lo_anchor),
        );

        let regex = Regex::new(&source).map_err(|e| DeciPinError::InvalidConfig(e.to_string()))?;
        Ok(Self { regex })
    }

    /// The regular expression source.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns true when `code` (already upper-cased) matches the grammar.
    pub fn is_match(&self, code: &str) -> bool {
        self.regex.is_match(code)
    }

    /// Matches `code` (already upper-cased) and returns the 12 significant
    /// characters with separators stripped, or `None` if it does not match.
    pub fn canonical_token(&self, code: &str) -> Option<[u8; CODE_LENGTH]> {
        let caps = self.regex.captures(code)?;

        let mut token = [0u8; CODE_LENGTH];
        let mut pos = 0;
        for group in caps.iter().skip(1) {
            let bytes = group?.as_str().as_bytes();
            token[pos..pos + bytes.len()].copy_from_slice(bytes);
            pos += bytes.len();
        }
        Some(token)
    }
}

fn separator_group(separator: char, lenient: bool) -> String {
    let literal = regex::escape(&separator.to_string());
    if lenient && separator != LENIENT_SEPARATOR {
        let alternate = regex::escape(&LENIENT_SEPARATOR.to_string());
        format!("(?:{}|{})?", literal, alternate)
    } else {
        format!("(?:{})?", literal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict() -> DeciPinPattern {
        DeciPinPattern::new('A', 'Q', ('.', '/'), false).unwrap()
    }

    #[test]
    fn test_accepts_with_and_without_separators() {
        let pattern = strict();
        assert!(pattern.is_match("5302.EI48/QS08"));
        assert!(pattern.is_match("5302EI48QS08"));
        assert!(pattern.is_match("5302.EI48QS08"));
        assert!(pattern.is_match("5302EI48/QS08"));
    }

    #[test]
    fn test_rejects_wrong_length() {
        let pattern = strict();
        assert!(!pattern.is_match("5302.EI48/QS0"));
        assert!(!pattern.is_match("5302.EI48/QS080"));
        assert!(!pattern.is_match(""));
    }

    #[test]
    fn test_rejects_digits_in_letter_positions() {
        let pattern = strict();
        assert!(!pattern.is_match("5302.0048/QS08"));
        assert!(!pattern.is_match("5302.EI48/0008"));
    }

    #[test]
    fn test_rejects_letters_from_other_anchor() {
        let pattern = strict();
        assert!(!pattern.is_match("5302.QS48/QS08"));
        assert!(!pattern.is_match("5302.EI48/EI08"));
        assert!(!pattern.is_match("5302.KK48/QS08"));
    }

    #[test]
    fn test_rejects_lower_case_letters() {
        // The decoder upper-cases before matching.
        assert!(!strict().is_match("5302.ei48/qs08"));
    }

    #[test]
    fn test_separators_fixed_positions() {
        let pattern = strict();
        assert!(!pattern.is_match("5302/EI48.QS08"));
        assert!(!pattern.is_match("530.2EI48/QS08"));
    }

    #[test]
    fn test_lenient_accepts_dash() -> Result<(), DeciPinError> {
        let pattern = DeciPinPattern::new('A', 'Q', ('.', '/'), true)?;
        assert!(pattern.is_match("5302-EI48-QS08"));
        assert!(pattern.is_match("5302.EI48-QS08"));
        assert!(pattern.is_match("5302.EI48/QS08"));
        assert!(!pattern.is_match("5302_EI48/QS08"));
        Ok(())
    }

    #[test]
    fn test_canonical_token_strips_separators() {
        let pattern = strict();
        assert_eq!(
            pattern.canonical_token("5302.EI48/QS08"),
            Some(*b"5302EI48QS08")
        );
        assert_eq!(pattern.canonical_token("5302EI48QS08"), Some(*b"5302EI48QS08"));
        assert_eq!(pattern.canonical_token("nope"), None);
    }

    #[test]
    fn test_custom_anchors() -> Result<(), DeciPinError> {
        let pattern = DeciPinPattern::new('B', 'L', (':', ':'), false)?;
        assert!(pattern.is_match("0000:BB00:LL00"));
        assert!(pattern.is_match("9999:KK99:UU99"));
        assert!(!pattern.is_match("0000:AA00:LL00"));
        Ok(())
    }

    #[test]
    fn test_pattern_source() {
        assert_eq!(
            strict().as_str(),
            r"^([0-9]{4})(?:\.)?([A-J]{2})([0-9]{2})(?:/)?([Q-Z]{2})([0-9]{2})$"
        );
    }
}
