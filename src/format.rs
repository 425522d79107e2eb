//! Formatting configuration values.
//!
//! A [`HexFormat`] is a plain immutable value: construct it once (directly,
//! via [`HexFormat::builder`], or by deserializing), then share it by
//! reference. The codec never mutates a format.

use alloc::string::String;

use serde::{Deserialize, Serialize};

/// Sentinel for "no line wrapping" / "no grouping".
pub const UNBOUNDED: usize = usize::MAX;

/// Governs how byte sequences are formatted and parsed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BytesFormat {
    /// After this many bytes a line break is emitted/expected.
    pub bytes_per_line: usize,
    /// Within a line, after this many bytes a group separator is
    /// emitted/expected.
    pub bytes_per_group: usize,
    /// Text between groups on one line.
    pub group_separator: String,
    /// Text between bytes within one group.
    pub byte_separator: String,
    /// Text before each byte's two hex digits.
    pub byte_prefix: String,
    /// Text after each byte's two hex digits.
    pub byte_suffix: String,
}

impl Default for BytesFormat {
    fn default() -> Self {
        BytesFormat {
            bytes_per_line: UNBOUNDED,
            bytes_per_group: UNBOUNDED,
            group_separator: String::from("  "),
            byte_separator: String::new(),
            byte_prefix: String::new(),
            byte_suffix: String::new(),
        }
    }
}

impl BytesFormat {
    /// True when line wrapping or grouping is configured.
    pub(crate) fn has_breaks(&self) -> bool {
        self.bytes_per_line != UNBOUNDED || self.bytes_per_group != UNBOUNDED
    }
}

/// Governs how fixed-width integers are formatted and parsed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    /// Text emitted/required before the hex digits.
    pub prefix: String,
    /// Text emitted/required after the hex digits.
    pub suffix: String,
    /// Strip leading zero nibbles on format; parsing is unaffected.
    pub remove_leading_zeros: bool,
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat {
            prefix: String::new(),
            suffix: String::new(),
            remove_leading_zeros: false,
        }
    }
}

impl NumberFormat {
    pub(crate) fn is_digits_only(&self) -> bool {
        self.prefix.is_empty() && self.suffix.is_empty()
    }
}

/// The complete codec configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HexFormat {
    /// Select the uppercase digit alphabet when formatting. Parsing
    /// ignores case either way.
    pub upper_case: bool,
    pub bytes: BytesFormat,
    pub number: NumberFormat,
}

impl HexFormat {
    /// All defaults except the uppercase digit alphabet.
    pub fn uppercase() -> Self {
        HexFormat {
            upper_case: true,
            ..HexFormat::default()
        }
    }

    pub fn builder() -> HexFormatBuilder {
        HexFormatBuilder {
            format: HexFormat::default(),
        }
    }
}

/// Fluent builder yielding a frozen [`HexFormat`].
///
/// Count setters reject zero, and literal setters reject strings containing
/// `'\r'` or `'\n'` (a line break inside a literal would make parsing
/// ambiguous). Both are construction-time programmer errors and panic.
#[derive(Clone, Debug)]
pub struct HexFormatBuilder {
    format: HexFormat,
}

impl HexFormatBuilder {
    pub fn upper_case(mut self, upper: bool) -> Self {
        self.format.upper_case = upper;
        self
    }

    pub fn bytes_per_line(mut self, count: usize) -> Self {
        assert!(count >= 1, "bytes_per_line must be at least 1");
        self.format.bytes.bytes_per_line = count;
        self
    }

    pub fn bytes_per_group(mut self, count: usize) -> Self {
        assert!(count >= 1, "bytes_per_group must be at least 1");
        self.format.bytes.bytes_per_group = count;
        self
    }

    pub fn group_separator(mut self, separator: impl Into<String>) -> Self {
        self.format.bytes.group_separator = checked_literal(separator.into(), "group_separator");
        self
    }

    pub fn byte_separator(mut self, separator: impl Into<String>) -> Self {
        self.format.bytes.byte_separator = checked_literal(separator.into(), "byte_separator");
        self
    }

    pub fn byte_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.format.bytes.byte_prefix = checked_literal(prefix.into(), "byte_prefix");
        self
    }

    pub fn byte_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.format.bytes.byte_suffix = checked_literal(suffix.into(), "byte_suffix");
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.format.number.prefix = checked_literal(prefix.into(), "prefix");
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.format.number.suffix = checked_literal(suffix.into(), "suffix");
        self
    }

    pub fn remove_leading_zeros(mut self, remove: bool) -> Self {
        self.format.number.remove_leading_zeros = remove;
        self
    }

    pub fn build(self) -> HexFormat {
        self.format
    }
}

fn checked_literal(value: String, field: &str) -> String {
    assert!(
        !value.contains('\n') && !value.contains('\r'),
        "{field} must not contain line separators"
    );
    value
}
