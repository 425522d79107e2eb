//! Exact output sizing for the formatter and an upper bound for the parser.
//!
//! Both the encoder and the decoder allocate their output exactly once
//! before touching a single byte; these functions provide the sizes. All
//! quantities are UTF-8 byte lengths.

use crate::format::BytesFormat;
use crate::types::{Error, Result};

/// Longest supported formatted output, in bytes.
pub const MAX_FORMATTED_LEN: u64 = i32::MAX as u64;

/// Exact length of the formatted form of `num_bytes` bytes (`num_bytes >= 1`).
///
/// Fails with [`Error::CapacityExceeded`] when the result does not fit
/// [`MAX_FORMATTED_LEN`] or the 64-bit accumulator.
pub fn formatted_len(num_bytes: usize, format: &BytesFormat) -> Result<usize> {
    debug_assert!(num_bytes >= 1);
    let n = num_bytes as u64;
    let bpl = format.bytes_per_line as u64;
    let bpg = format.bytes_per_group as u64;
    let gs = format.group_separator.len() as u64;
    let bs = format.byte_separator.len() as u64;
    let per_byte = format.byte_prefix.len() as u64 + 2 + format.byte_suffix.len() as u64;

    let line_seps = (n - 1) / bpl;
    let group_seps_per_line = (bpl - 1) / bpg;
    let bytes_in_last_line = match n % bpl {
        0 => bpl,
        rem => rem,
    };
    let group_seps_in_last_line = (bytes_in_last_line - 1) / bpg;
    // separator counts are bounded by n - 1, only the char totals can overflow
    let group_seps = line_seps * group_seps_per_line + group_seps_in_last_line;
    let byte_seps = n - 1 - line_seps - group_seps;

    let total = group_seps
        .checked_mul(gs)
        .and_then(|t| t.checked_add(line_seps))
        .and_then(|t| byte_seps.checked_mul(bs).and_then(|b| t.checked_add(b)))
        .and_then(|t| n.checked_mul(per_byte).and_then(|b| t.checked_add(b)))
        .ok_or(Error::CapacityExceeded)?;
    if total > MAX_FORMATTED_LEN {
        return Err(Error::CapacityExceeded);
    }
    Ok(total as usize)
}

/// Upper bound on the number of bytes a `string_len`-byte input can decode
/// to (`string_len >= 1`).
///
/// Peels whole lines (assuming a one-byte line separator, which maximizes
/// the bound), then whole groups, then whole bytes, then allows one spare
/// byte for any dangling tail. Dangling input is not an error here; the
/// decoder reports it with a precise message.
pub fn parsed_max_len(string_len: usize, format: &BytesFormat) -> usize {
    debug_assert!(string_len >= 1);
    let bpl = format.bytes_per_line as i128;
    let bpg = format.bytes_per_group as i128;
    let gs = format.group_separator.len() as i128;
    let bs = format.byte_separator.len() as i128;
    let per_byte = format.byte_prefix.len() as i128 + 2 + format.byte_suffix.len() as i128;

    let chars_per_group = chars_per_set(per_byte, bpg, bs);
    let chars_per_line = if bpl <= bpg {
        chars_per_set(per_byte, bpl, bs)
    } else {
        let groups_per_line = bpl / bpg;
        let mut chars = chars_per_set(chars_per_group, groups_per_line, gs);
        let bytes_in_last_group = bpl % bpg;
        if bytes_in_last_group != 0 {
            chars = chars
                .saturating_add(gs)
                .saturating_add(chars_per_set(per_byte, bytes_in_last_group, bs));
        }
        chars
    };

    let mut remaining = string_len as i128;
    let whole_lines = whole_elements(remaining, chars_per_line, 1);
    remaining -= whole_lines.saturating_mul(chars_per_line.saturating_add(1));
    let whole_groups = whole_elements(remaining, chars_per_group, gs);
    remaining -= whole_groups.saturating_mul(chars_per_group.saturating_add(gs));
    let whole_bytes = whole_elements(remaining, per_byte, bs);
    remaining -= whole_bytes.saturating_mul(per_byte.saturating_add(bs));
    let spare = i128::from(remaining > 0);

    (whole_lines.saturating_mul(bpl) + whole_groups.saturating_mul(bpg) + whole_bytes + spare)
        as usize
}

// Length of `elements` elements of `chars_per_element` bytes joined by a
// `sep`-byte separator. Saturates instead of overflowing on unbounded
// element counts.
fn chars_per_set(chars_per_element: i128, elements: i128, sep: i128) -> i128 {
    chars_per_element
        .saturating_mul(elements)
        .saturating_add(sep.saturating_mul(elements - 1))
}

// How many whole `chars_per_element`-byte elements joined by `sep`-byte
// separators fit in `available` bytes.
fn whole_elements(available: i128, chars_per_element: i128, sep: i128) -> i128 {
    if available <= 0 {
        return 0;
    }
    (available + sep) / (chars_per_element + sep)
}
