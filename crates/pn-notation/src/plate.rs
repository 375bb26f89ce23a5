//! Plate geometry and well addressing
//!
//! Provides [`PlateType`], the closed set of supported plate formats, and
//! [`WellId`], the row-letter + column-number well address with the
//! ordering used by the notation encoder.

use crate::error::PlateTypeError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Supported plate formats, named by their total well count
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PlateType {
    /// 6 wells (2 x 3)
    Wells6,
    /// 12 wells (3 x 4)
    Wells12,
    /// 24 wells (4 x 6)
    Wells24,
    /// 48 wells (6 x 8)
    Wells48,
    /// 96 wells (8 x 12)
    Wells96,
    /// 384 wells (16 x 24)
    Wells384,
}

impl PlateType {
    /// Every supported plate type, smallest first
    pub const ALL: [PlateType; 6] = [
        PlateType::Wells6,
        PlateType::Wells12,
        PlateType::Wells24,
        PlateType::Wells48,
        PlateType::Wells96,
        PlateType::Wells384,
    ];

    /// Total number of wells
    #[inline]
    #[must_use]
    pub const fn well_count(self) -> u32 {
        match self {
            Self::Wells6 => 6,
            Self::Wells12 => 12,
            Self::Wells24 => 24,
            Self::Wells48 => 48,
            Self::Wells96 => 96,
            Self::Wells384 => 384,
        }
    }

    /// Number of rows (lettered from `A`)
    #[inline]
    #[must_use]
    pub const fn rows(self) -> u32 {
        match self {
            Self::Wells6 => 2,
            Self::Wells12 => 3,
            Self::Wells24 => 4,
            Self::Wells48 => 6,
            Self::Wells96 => 8,
            Self::Wells384 => 16,
        }
    }

    /// Number of columns (numbered from 1)
    #[inline]
    #[must_use]
    pub const fn columns(self) -> u32 {
        self.well_count() / self.rows()
    }

    /// Check whether a well id addresses a well on this plate
    #[must_use]
    pub fn contains(self, well: &WellId) -> bool {
        match (well.row_index(), well.column()) {
            (Some(row), Some(col)) => row < self.rows() && col <= self.columns(),
            _ => false,
        }
    }

    /// All well ids of this plate in notation order (row by row)
    pub fn well_ids(self) -> impl Iterator<Item = WellId> {
        let cols = self.columns();
        (0..self.rows()).flat_map(move |row| {
            (0..cols).filter_map(move |col| WellId::from_position(row, col))
        })
    }
}

impl From<PlateType> for u32 {
    fn from(plate: PlateType) -> Self {
        plate.well_count()
    }
}

impl TryFrom<u32> for PlateType {
    type Error = PlateTypeError;

    fn try_from(count: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|p| p.well_count() == count)
            .ok_or(PlateTypeError::UnsupportedCount(count))
    }
}

impl FromStr for PlateType {
    type Err = PlateTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PlateTypeError::NotANumber(s.to_string()));
        }
        let count: u32 = s
            .parse()
            .map_err(|_| PlateTypeError::NotANumber(s.to_string()))?;
        Self::try_from(count)
    }
}

impl Display for PlateType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.well_count())
    }
}

/// Well address such as `A1` or `P24`
///
/// The codec treats the id as an opaque string. Ordering follows the
/// notation's canonical well order: first character, then the decimal column
/// parsed from the leading digits after it, then the raw text as a final
/// tie-break so that the order is total.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WellId(String);

impl WellId {
    /// Create from any string
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build the id for a 0-based row/column position
    ///
    /// Returns `None` when the row is past `Z`.
    #[must_use]
    pub fn from_position(row: u32, col: u32) -> Option<Self> {
        let letter = u8::try_from(row).ok().filter(|r| *r < 26)?;
        Some(Self(format!("{}{}", char::from(b'A' + letter), col + 1)))
    }

    /// Raw id text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 0-based row index for an uppercase `A`-`Z` row letter
    #[must_use]
    pub fn row_index(&self) -> Option<u32> {
        match self.0.as_bytes().first() {
            Some(b @ b'A'..=b'Z') => Some(u32::from(b - b'A')),
            _ => None,
        }
    }

    /// 1-based column number when everything after the row letter is digits
    #[must_use]
    pub fn column(&self) -> Option<u32> {
        let rest = self.rest();
        if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        rest.parse().ok().filter(|c| *c >= 1)
    }

    fn rest(&self) -> &str {
        let mut chars = self.0.chars();
        chars.next();
        chars.as_str()
    }

    fn row_key(&self) -> Option<char> {
        self.0.chars().next()
    }

    /// Column parsed from the leading digits only (`A12x` sorts as column 12)
    fn column_key(&self) -> Option<u64> {
        let rest = self.rest();
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        rest[..end].parse().ok()
    }
}

impl Ord for WellId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row_key()
            .cmp(&other.row_key())
            .then_with(|| self.column_key().cmp(&other.column_key()))
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for WellId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for WellId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WellId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for WellId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for WellId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// All wells in the rectangle spanned by two corners, row by row
///
/// Corners may be given in any order. Returns `None` if either id is not a
/// letter + column address.
#[must_use]
pub fn wells_in_range(start: &WellId, end: &WellId) -> Option<Vec<WellId>> {
    let (r1, c1) = (start.row_index()?, start.column()?);
    let (r2, c2) = (end.row_index()?, end.column()?);

    let rows = r1.min(r2)..=r1.max(r2);
    let cols = c1.min(c2)..=c1.max(c2);

    Some(
        rows.flat_map(|row| {
            cols.clone()
                .filter_map(move |col| WellId::from_position(row, col - 1))
        })
        .collect(),
    )
}
