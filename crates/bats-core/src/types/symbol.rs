//! Fixed-width symbol field utilities.
//!
//! PITCH symbol fields are right-space-padded ASCII: 6 characters in short
//! trade and add-order records, 8 characters elsewhere. Decoded structs store
//! the trimmed symbol; these helpers centralize the trim and validation.

/// Width of the short symbol field (`P` trades, `A`/`d` add orders).
pub const SYMBOL_SHORT: usize = 6;

/// Width of the long symbol field (all other symbol-bearing records).
pub const SYMBOL_LONG: usize = 8;

/// Trim the right-padding from a fixed-width symbol field.
#[inline]
pub fn trim_symbol(field: &str) -> &str {
    field.trim_end_matches(' ')
}

/// Returns `true` if the field looks like a legal symbol field: ASCII
/// uppercase alphanumerics followed only by space padding.
pub fn is_symbol_field(field: &str) -> bool {
    let trimmed = trim_symbol(field);
    if trimmed.is_empty() {
        return false;
    }
    trimmed.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        && field[trimmed.len()..].bytes().all(|b| b == b' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_padding() {
        assert_eq!(trim_symbol("SPY   "), "SPY");
        assert_eq!(trim_symbol("DIA     "), "DIA");
        assert_eq!(trim_symbol("ABCDEF"), "ABCDEF");
    }

    #[test]
    fn validation() {
        assert!(is_symbol_field("SPY   "));
        assert!(is_symbol_field("BRKB  "));
        assert!(!is_symbol_field("      "));
        assert!(!is_symbol_field("SP Y  "));
        assert!(!is_symbol_field("spy   "));
    }
}
