//! In-memory plate layouts
//!
//! [`PlateGrid`] is the sparse layout the codec encodes; [`DecodedNotation`]
//! is what the decoder hands back.

use crate::codec;
use crate::plate::{PlateType, WellId};
use crate::well::WellRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sparse plate layout: plate type plus the wells that hold something
///
/// Wells are kept in notation order. A missing key is an empty well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateGrid {
    /// Plate format
    pub plate_type: PlateType,
    /// Occupied wells
    #[serde(default)]
    pub wells: BTreeMap<WellId, WellRecord>,
}

impl PlateGrid {
    /// Create an empty grid
    #[inline]
    #[must_use]
    pub fn new(plate_type: PlateType) -> Self {
        Self {
            plate_type,
            wells: BTreeMap::new(),
        }
    }

    /// Set a well, returning the grid for chaining
    #[inline]
    #[must_use]
    pub fn with_well(mut self, id: impl Into<WellId>, record: WellRecord) -> Self {
        self.wells.insert(id.into(), record);
        self
    }

    /// Set a well, returning the previous record
    pub fn set(&mut self, id: impl Into<WellId>, record: WellRecord) -> Option<WellRecord> {
        self.wells.insert(id.into(), record)
    }

    /// Look up a well
    #[inline]
    #[must_use]
    pub fn get(&self, id: &WellId) -> Option<&WellRecord> {
        self.wells.get(id)
    }

    /// Drop records that carry no data
    pub fn prune_empty(&mut self) {
        self.wells.retain(|_, record| !record.is_empty());
    }

    /// Wells whose id falls outside the plate's rows and columns
    pub fn out_of_bounds(&self) -> impl Iterator<Item = &WellId> {
        self.wells
            .keys()
            .filter(move |id| !self.plate_type.contains(id))
    }

    /// Encode as a notation string
    #[must_use]
    pub fn to_notation(&self) -> String {
        codec::encode(self.plate_type, &self.wells)
    }
}

/// Result of decoding a notation string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedNotation {
    /// Format version found in the prefix
    pub version: u32,
    /// Plate format
    pub plate_type: PlateType,
    /// Decoded wells
    pub wells: BTreeMap<WellId, WellRecord>,
}

impl DecodedNotation {
    /// Drop the version and keep the layout
    #[inline]
    #[must_use]
    pub fn into_grid(self) -> PlateGrid {
        PlateGrid {
            plate_type: self.plate_type,
            wells: self.wells,
        }
    }
}

impl From<DecodedNotation> for PlateGrid {
    fn from(decoded: DecodedNotation) -> Self {
        decoded.into_grid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_builder_and_lookup() {
        let grid = PlateGrid::new(PlateType::Wells96)
            .with_well("B2", WellRecord::new().with_compound("X"))
            .with_well("A1", WellRecord::new().with_compound("Y"));

        assert_eq!(grid.wells.len(), 2);
        assert_eq!(
            grid.get(&"A1".into()).and_then(|w| w.compound.as_deref()),
            Some("Y")
        );
        // BTreeMap keeps notation order
        let first = grid.wells.keys().next().map(WellId::as_str);
        assert_eq!(first, Some("A1"));
    }

    #[test]
    fn prune_removes_empty_records() {
        let mut grid = PlateGrid::new(PlateType::Wells6)
            .with_well("A1", WellRecord::new())
            .with_well("A2", WellRecord::new().with_replicate(1));
        grid.prune_empty();
        assert_eq!(grid.wells.len(), 1);
        assert!(grid.get(&"A2".into()).is_some());
    }

    #[test]
    fn out_of_bounds_wells() {
        let grid = PlateGrid::new(PlateType::Wells6)
            .with_well("A1", WellRecord::new().with_compound("X"))
            .with_well("C1", WellRecord::new().with_compound("X"))
            .with_well("A4", WellRecord::new().with_compound("X"));
        let outside: Vec<_> = grid.out_of_bounds().map(WellId::as_str).collect();
        assert_eq!(outside, vec!["A4", "C1"]);
    }

    #[test]
    fn grid_json_shape() {
        let grid = PlateGrid::new(PlateType::Wells24)
            .with_well("A1", WellRecord::new().with_cell_type("HeLa"));
        let json = serde_json::to_value(&grid).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"plateType": 24, "wells": {"A1": {"cellType": "HeLa"}}})
        );
    }
}
