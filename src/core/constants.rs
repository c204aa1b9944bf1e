/// Anchor letter for latitude decimal digits 1-2 (digits 0-9 map to A-J)
pub const DECIPIN_START_HI: char = 'A';

/// Anchor letter for latitude decimal digits 3-4 (digits 0-9 map to Q-Z)
pub const DECIPIN_START_LO: char = 'Q';

/// Number of letters in each re-based alphabet, one per decimal digit
pub const ALPHABET_WIDTH: u8 = 10;

/// Default bounds [min_lat, max_lat, min_lon, max_lon]
pub const DECIPIN_BOUNDS: [f64; 4] = [0.0, 99.9999, 0.0, 99.9999];

/// Scale factor to keep four decimal places
pub(crate) const SCALE_FACTOR: f64 = 10000.0;

/// Number of fixed-point digits per axis (2 integer + 4 fractional)
pub const AXIS_DIGITS: usize = 6;

/// Code length without separators
pub const CODE_LENGTH: usize = 12;

/// Code length with both separators
pub const CODE_LENGTH_WITH_SEPARATORS: usize = 14;

/// Separator emitted after the 4th character
pub const DEFAULT_SEPARATOR_HI: char = '.';

/// Separator emitted after the 8th character
pub const DEFAULT_SEPARATOR_LO: char = '/';

/// Extra separator accepted at either position by the lenient grammar
pub const LENIENT_SEPARATOR: char = '-';

/// Edge length of one cell in degrees
pub const CELL_SIZE: f64 = 0.0001;

/// Distance from a cell edge to its center in degrees
pub const HALF_CELL: f64 = 0.00005;

/// Decoded centers are held as integer counts of this many units per degree
pub(crate) const CENTER_UNITS_PER_DEGREE: u32 = 100_000;
