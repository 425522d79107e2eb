//! Configurable hexadecimal codec.
//!
//! Converts between byte sequences (or fixed-width integers) and their
//! hexadecimal text form under a caller-supplied [`HexFormat`]: per-byte
//! prefixes and suffixes, byte and group separators, line wrapping, case
//! selection, and leading-zero handling for numbers.
//!
//! Formatting allocates its output exactly once from a precomputed length.
//! Parsing is case-insensitive for digits and configured literals, accepts
//! CRLF, LF, and CR line breaks, and reports failures with the byte index
//! and the offending input.
//!
//! ```
//! use hexfmt::HexFormat;
//!
//! let format = HexFormat::builder()
//!     .bytes_per_group(1)
//!     .group_separator(".")
//!     .build();
//! let text = hexfmt::encode(&[0xd9, 0x6e, 0x99, 0x4a], &format).unwrap();
//! assert_eq!(text, "d9.6e.99.4a");
//! assert_eq!(hexfmt::decode(&text, &format).unwrap(), [0xd9, 0x6e, 0x99, 0x4a]);
//! ```

#![no_std]

extern crate alloc;

pub mod decode;
pub mod digits;
pub mod encode;
pub mod format;
pub mod num;
pub mod size;
pub mod types;

pub use decode::{decode, decode_range};
pub use encode::{encode, encode_range};
pub use format::{BytesFormat, HexFormat, HexFormatBuilder, NumberFormat, UNBOUNDED};
pub use num::*;
pub use types::{Error, Result};
