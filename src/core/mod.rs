pub mod constants;
pub mod digits;
pub mod pattern;
pub mod rebase;

pub use constants::{
    CELL_SIZE, CODE_LENGTH, CODE_LENGTH_WITH_SEPARATORS, DECIPIN_BOUNDS, DECIPIN_START_HI,
    DECIPIN_START_LO, DEFAULT_SEPARATOR_HI, DEFAULT_SEPARATOR_LO, HALF_CELL, LENIENT_SEPARATOR,
};
pub use digits::fixed_digits;
pub use pattern::DeciPinPattern;
pub use rebase::{rebase_digit, unrebase_letter};
