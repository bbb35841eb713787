// The alphanumeric character set as defined in ISO/IEC 18004, table 5.
// The numeric value of a character is its position in this table.
pub const ALPHANUMERIC_CHARS: [char; 45] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', ' ', '$',
    '%', '*', '+', '-', '.', '/', ':',
];

// GS (group separator): replaces '%' in alphanumeric segments when FNC1 is
// in effect, per ISO/IEC 18004 sections 6.4.8.1 and 6.4.8.2.
pub const FNC1_GS: char = '\u{1D}';

// Every segment starts with a 4-bit mode indicator (ISO/IEC 18004, table 2).
pub const MODE_INDICATOR_BITS: usize = 4;

// A structured append header carries a 4-bit sequence indicator, a 4-bit
// total count and an 8-bit parity byte after its mode indicator.
pub const STRUCTURED_APPEND_HEADER_BITS: usize = 16;

pub const MINIMUM_VERSION: u8 = 1;
pub const MAXIMUM_VERSION: u8 = 40;
