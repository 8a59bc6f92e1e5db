// crates/byte_order_marker/src/lib.rs

//! Byte-order marker descriptors and the ordered tables used to recognise
//! them at the very start of a file.
//!
//! Detection only ever looks at the first [`DETECTION_WINDOW`] bytes and the
//! first entry of a table whose prefix matches wins.

use std::fmt;

/// Number of leading bytes inspected when looking for a marker.
pub const DETECTION_WINDOW: usize = 5;

/// Encoding family announced by a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingFamily {
    Utf8,
    Utf16,
    Utf32,
}

impl EncodingFamily {
    /// Lower-case name used in report lines, e.g. `utf-16`.
    pub const fn name(self) -> &'static str {
        match self {
            EncodingFamily::Utf8 => "utf-8",
            EncodingFamily::Utf16 => "utf-16",
            EncodingFamily::Utf32 => "utf-32",
        }
    }
}

impl fmt::Display for EncodingFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single entry of a marker table: the prefix that identifies the marker
/// and how many leading bytes to drop once it is found.
///
/// `strip_len` is usually the prefix length, but the legacy table carries
/// entries where it is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    prefix: &'static [u8],
    strip_len: usize,
    family: EncodingFamily,
}

impl Marker {
    pub const fn new(prefix: &'static [u8], strip_len: usize, family: EncodingFamily) -> Self {
        Self {
            prefix,
            strip_len,
            family,
        }
    }

    pub const fn prefix(&self) -> &'static [u8] {
        self.prefix
    }

    /// Number of leading bytes removed from a file carrying this marker.
    pub const fn strip_len(&self) -> usize {
        self.strip_len
    }

    pub const fn family(&self) -> EncodingFamily {
        self.family
    }

    /// Returns true if `bytes` starts with this marker's prefix.
    pub fn matches(&self, bytes: &[u8]) -> bool {
        bytes.starts_with(self.prefix)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} byte-order marker", self.family)
    }
}

/// UTF-8 marker `EF BB BF`.
pub const UTF8: Marker = Marker::new(&[0xEF, 0xBB, 0xBF], 3, EncodingFamily::Utf8);
/// UTF-16 big endian marker `FE FF`.
pub const UTF16_BE: Marker = Marker::new(&[0xFE, 0xFF], 2, EncodingFamily::Utf16);
/// UTF-16 little endian marker `FF FE`.
pub const UTF16_LE: Marker = Marker::new(&[0xFF, 0xFE], 2, EncodingFamily::Utf16);
/// UTF-32 little endian marker `FF FE 00 00`.
pub const UTF32_LE: Marker = Marker::new(&[0xFF, 0xFE, 0x00, 0x00], 4, EncodingFamily::Utf32);
/// UTF-32 big endian marker `00 00 FE FF`.
pub const UTF32_BE: Marker = Marker::new(&[0x00, 0x00, 0xFE, 0xFF], 4, EncodingFamily::Utf32);

// Legacy UTF-32 variants. Neither is a real UTF-32 marker and both drop five
// bytes; the first one can never match because UTF16_BE precedes it.
const LEGACY_UTF32_FE_FF: Marker = Marker::new(&[0xFE, 0xFF, 0x00, 0x00], 5, EncodingFamily::Utf32);
const LEGACY_UTF32_00_00: Marker = Marker::new(&[0x00, 0x00, 0xFF, 0xFE], 5, EncodingFamily::Utf32);

// UTF-32 LE must be tried before UTF-16 LE, otherwise `FF FE` shadows it.
const STANDARD_MARKERS: &[Marker] = &[UTF8, UTF32_LE, UTF32_BE, UTF16_BE, UTF16_LE];

const LEGACY_MARKERS: &[Marker] = &[
    UTF8,
    UTF16_BE,
    UTF16_LE,
    LEGACY_UTF32_FE_FF,
    LEGACY_UTF32_00_00,
];

/// An ordered, first-match-wins list of markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerTable {
    markers: &'static [Marker],
}

impl MarkerTable {
    /// Conventional markers: UTF-8, UTF-32 (LE/BE) and UTF-16 (BE/LE).
    pub const fn standard() -> Self {
        Self {
            markers: STANDARD_MARKERS,
        }
    }

    /// The table of the older remove-byte-order-marker hook, kept for
    /// bit-exact behaviour: UTF-8, UTF-16 and two five-byte UTF-32 variants.
    pub const fn legacy() -> Self {
        Self {
            markers: LEGACY_MARKERS,
        }
    }

    pub fn markers(&self) -> &'static [Marker] {
        self.markers
    }

    /// Returns the first marker whose prefix matches the start of `bytes`.
    ///
    /// Only the first [`DETECTION_WINDOW`] bytes are considered, so callers
    /// may pass a whole buffer.
    pub fn detect(&self, bytes: &[u8]) -> Option<&'static Marker> {
        let window = &bytes[..bytes.len().min(DETECTION_WINDOW)];
        self.markers.iter().find(|marker| marker.matches(window))
    }
}

impl Default for MarkerTable {
    fn default() -> Self {
        Self::standard()
    }
}
