//! Utilities for Excel-style (A1) cell references and ranges.
//!
//! Used for [`CellAddress`]'s `Display`/`FromStr` and for human-readable
//! selections in logs and CLI output.

use crate::types::{CellAddress, SelectionRange};

/// Convert a 0-based column index to column letters (A, B, ..., Z, AA, AB, ...)
pub fn col_to_letter(col: u32) -> String {
    let mut letters = Vec::new();
    let mut n = u64::from(col) + 1; // 1-based
    while n > 0 {
        n -= 1;
        // n % 26 < 26, always fits in a byte
        letters.push(char::from(b'A' + u8::try_from(n % 26).unwrap_or(0)));
        n /= 26;
    }
    letters.iter().rev().collect()
}

/// Parse a cell reference like "B3" or "$B$3" into a 0-indexed address.
///
/// Letters must precede digits and row numbers are 1-based, so "A0" is
/// rejected. Accepts every reference [`CellAddress`]'s `Display` produces,
/// up to `MWLQKWV4294967296`; returns `None` beyond that.
pub fn parse_cell_ref(cell_ref: &str) -> Option<CellAddress> {
    // 1-based while parsing, so one past u32::MAX must fit
    let mut col: u64 = 0;
    let mut row: u64 = 0;
    let mut saw_col = false;
    let mut saw_row = false;

    for ch in cell_ref.trim().chars() {
        if ch == '$' {
            continue;
        }
        if ch.is_ascii_alphabetic() {
            if saw_row {
                return None;
            }
            let upper = ch.to_ascii_uppercase();
            col = col
                .checked_mul(26)?
                .checked_add(u64::from(upper) - u64::from('A') + 1)?;
            saw_col = true;
        } else if let Some(digit) = ch.to_digit(10) {
            row = row.checked_mul(10)?.checked_add(u64::from(digit))?;
            saw_row = true;
        } else {
            return None;
        }
    }

    if !saw_col || !saw_row || row == 0 {
        return None;
    }

    Some(CellAddress::new(
        u32::try_from(row - 1).ok()?,
        u32::try_from(col - 1).ok()?,
    ))
}

/// Parse a range like "A1:C4" (or a single "B2") into a selection anchored
/// at the first reference.
pub fn parse_cell_range(range: &str) -> Option<SelectionRange> {
    if let Some((start, end)) = range.split_once(':') {
        Some(SelectionRange::new(
            parse_cell_ref(start)?,
            parse_cell_ref(end)?,
        ))
    } else {
        Some(SelectionRange::single(parse_cell_ref(range)?))
    }
}

/// Format a selection as "A1:C4", or "B2" for a single cell.
///
/// Anchor comes first, so a reversed drag formats as e.g. "C4:A1".
pub fn format_range(range: &SelectionRange) -> String {
    if range.anchor == range.focus {
        range.anchor.to_string()
    } else {
        format!("{}:{}", range.anchor, range.focus)
    }
}
