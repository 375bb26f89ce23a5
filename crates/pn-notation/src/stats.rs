//! Size statistics for notation strings
//!
//! Used as a hint when rendering a share link as a QR code.

use crate::codec::well_segment;
use crate::escape::WELL_SEPARATOR;
use serde::Serialize;

/// Character-count breakpoints and the QR version that fits under each
const QR_CAPACITY: [(usize, u8); 9] = [
    (25, 1),
    (47, 2),
    (77, 3),
    (114, 4),
    (154, 5),
    (195, 6),
    (367, 8),
    (652, 11),
    (1273, 17),
];

/// QR version assumed once the largest breakpoint is exceeded
const QR_FALLBACK_VERSION: u8 = 25;

/// Size summary of a notation string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotationStats {
    /// Length in UTF-16 code units, as a browser reports string length
    pub char_count: usize,
    /// Number of `*`-separated segments in the well data (not validated)
    pub well_count: usize,
    /// Rough QR code version needed to hold the string
    pub estimated_qr_version: u8,
}

/// Compute [`NotationStats`] for a notation string
///
/// Works on any string; malformed input simply yields small counts.
#[must_use]
pub fn notation_stats(notation: &str) -> NotationStats {
    let char_count = notation.encode_utf16().count();

    let well_data = well_segment(notation);
    let well_count = if well_data.is_empty() {
        0
    } else {
        well_data.split(WELL_SEPARATOR).count()
    };

    NotationStats {
        char_count,
        well_count,
        estimated_qr_version: estimate_qr_version(char_count),
    }
}

fn estimate_qr_version(char_count: usize) -> u8 {
    QR_CAPACITY
        .iter()
        .find(|(limit, _)| char_count <= *limit)
        .map_or(QR_FALLBACK_VERSION, |(_, version)| *version)
}
