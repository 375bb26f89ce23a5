//! Plate Notation encoder and decoder
//!
//! # Format
//!
//! ```text
//! PN:v<version>/<plateType>/<wellId>:<field>-<field>...*<wellId>:...
//! ```
//!
//! Fields are `cellType`, `compound`, `concentration`, `concentrationUnits`,
//! `replicate`, in that order. Trailing empty fields are dropped; leading and
//! interior ones stay as empty strings so positions keep their meaning.
//! Wells are emitted in [`WellId`] order and wells without data are skipped.
//!
//! Example: `PN:v1/96/A1:CT1-CompA-10-uM-1*A2:CT1-CompA-5-uM-1`

use crate::error::{NotationError, NotationResult};
use crate::escape::{escape_field, split_fields, FIELD_SEPARATOR, WELL_SEPARATOR};
use crate::grid::DecodedNotation;
use crate::plate::{PlateType, WellId};
use crate::well::WellRecord;
use std::collections::BTreeMap;

/// Literal prefix in front of the version number
pub const PREFIX: &str = "PN:v";

/// Format version written by [`encode`]
pub const CURRENT_VERSION: u32 = 1;

const SEGMENT_SEPARATOR: char = '/';
const ID_SEPARATOR: char = ':';

/// Encode a plate layout as a notation string
///
/// Output depends only on the content of `wells`, never on iteration order.
/// Records with no non-blank field are omitted.
pub fn encode<'a, I>(plate_type: PlateType, wells: I) -> String
where
    I: IntoIterator<Item = (&'a WellId, &'a WellRecord)>,
{
    let mut entries: Vec<(&WellId, &WellRecord)> = wells.into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut notation =
        format!("{PREFIX}{CURRENT_VERSION}{SEGMENT_SEPARATOR}{plate_type}{SEGMENT_SEPARATOR}");
    let mut first = true;
    for (id, record) in entries {
        let Some(fields) = encode_fields(record) else {
            continue;
        };
        if !first {
            notation.push(WELL_SEPARATOR);
        }
        first = false;
        notation.push_str(id.as_str());
        notation.push(ID_SEPARATOR);
        notation.push_str(&fields);
    }
    notation
}

/// Escaped field list for one well, or `None` when the well has no data
fn encode_fields(record: &WellRecord) -> Option<String> {
    let fields = record.notation_fields();
    let used = fields.iter().rposition(|f| !f.is_empty())? + 1;

    let mut body = String::new();
    for (i, field) in fields[..used].iter().enumerate() {
        if i > 0 {
            body.push(FIELD_SEPARATOR);
        }
        body.push_str(&escape_field(field));
    }
    Some(body)
}

/// Decode a notation string
///
/// Returns `None` for anything that does not follow the format. See
/// [`try_decode`] for the reason.
#[must_use]
pub fn decode(notation: &str) -> Option<DecodedNotation> {
    match try_decode(notation) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            tracing::debug!("Rejected plate notation: {}", e);
            None
        }
    }
}

/// Decode a notation string, reporting why it was rejected
///
/// One malformed well entry rejects the whole notation. Blank entries
/// (such as after a trailing `*`) are skipped, and entries whose fields are
/// all empty are dropped.
///
/// # Errors
/// - `NotationError::MissingPrefix` if the string does not start with `PN:v`
/// - `NotationError::InvalidVersion` if the version is not an integer ≥ 1
/// - `NotationError::MissingSegment` if there is no plate type segment
/// - `NotationError::UnsupportedPlateType` for well counts outside the set
/// - `NotationError::MalformedEntry` if a well entry has no `:`
pub fn try_decode(notation: &str) -> NotationResult<DecodedNotation> {
    let rest = notation
        .strip_prefix(PREFIX)
        .ok_or(NotationError::MissingPrefix)?;

    // Field text never escapes `/`, so everything after the second
    // separator belongs to the well data.
    let mut segments = rest.splitn(3, SEGMENT_SEPARATOR);
    let version = parse_version(segments.next().unwrap_or_default())?;
    let plate_type: PlateType = segments
        .next()
        .ok_or(NotationError::MissingSegment)?
        .parse()?;
    let well_data = segments.next().unwrap_or_default();

    let mut wells = BTreeMap::new();
    for entry in well_data.split(WELL_SEPARATOR) {
        if entry.trim().is_empty() {
            continue;
        }
        let (id, record) = decode_well(entry)?;
        if record.is_empty() {
            continue;
        }
        wells.insert(id, record);
    }

    Ok(DecodedNotation {
        version,
        plate_type,
        wells,
    })
}

fn parse_version(raw: &str) -> NotationResult<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NotationError::InvalidVersion(raw.to_string()));
    }
    raw.parse::<u32>()
        .ok()
        .filter(|v| *v >= 1)
        .ok_or_else(|| NotationError::InvalidVersion(raw.to_string()))
}

fn decode_well(entry: &str) -> NotationResult<(WellId, WellRecord)> {
    let (id, data) = entry
        .split_once(ID_SEPARATOR)
        .ok_or_else(|| NotationError::MalformedEntry(entry.to_string()))?;
    let record = WellRecord::from_notation_fields(split_fields(data));
    Ok((WellId::from(id), record))
}

/// Well-entries segment of a notation (everything after the plate type)
pub(crate) fn well_segment(notation: &str) -> &str {
    notation.splitn(3, SEGMENT_SEPARATOR).nth(2).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn compound_a() -> WellRecord {
        WellRecord::new()
            .with_compound("CompoundA")
            .with_concentration("10", "uM")
            .with_replicate(1)
    }

    #[test]
    fn encode_single_well_keeps_leading_empty_field() {
        let wells = BTreeMap::from([(WellId::from("A1"), compound_a())]);
        assert_eq!(
            encode(PlateType::Wells96, &wells),
            "PN:v1/96/A1:-CompoundA-10-uM-1"
        );
    }

    #[test]
    fn encode_drops_trailing_empty_fields() {
        let wells = BTreeMap::from([(WellId::from("B3"), WellRecord::new().with_cell_type("HeLa"))]);
        assert_eq!(encode(PlateType::Wells24, &wells), "PN:v1/24/B3:HeLa");
    }

    #[test]
    fn encode_keeps_interior_empty_fields() {
        let record = WellRecord {
            cell_type: Some("HeLa".into()),
            replicate: Some(2),
            ..WellRecord::default()
        };
        let wells = BTreeMap::from([(WellId::from("A1"), record)]);
        assert_eq!(encode(PlateType::Wells6, &wells), "PN:v1/6/A1:HeLa----2");
    }

    #[test]
    fn encode_empty_grid_has_trailing_slash() {
        let wells: BTreeMap<WellId, WellRecord> = BTreeMap::new();
        assert_eq!(encode(PlateType::Wells384, &wells), "PN:v1/384/");
    }

    #[test]
    fn encode_skips_empty_wells() {
        let wells = BTreeMap::from([
            (WellId::from("A1"), WellRecord::new()),
            (
                WellId::from("A2"),
                WellRecord {
                    compound: Some("  ".into()),
                    ..WellRecord::default()
                },
            ),
            (WellId::from("A3"), WellRecord::new().with_compound("X")),
        ]);
        assert_eq!(encode(PlateType::Wells96, &wells), "PN:v1/96/A3:-X");
    }

    #[test]
    fn encode_sorts_numerically_by_column() {
        let wells: HashMap<WellId, WellRecord> = ["A10", "B1", "A2"]
            .into_iter()
            .map(|id| (WellId::from(id), WellRecord::new().with_cell_type(id)))
            .collect();
        assert_eq!(
            encode(PlateType::Wells96, &wells),
            "PN:v1/96/A2:A2*A10:A10*B1:B1"
        );
    }

    #[test]
    fn encode_escapes_fields() {
        let wells = BTreeMap::from([(WellId::from("A1"), WellRecord::new().with_compound("A-B*C~D"))]);
        assert_eq!(encode(PlateType::Wells96, &wells), "PN:v1/96/A1:-A~dB~aC~~D");
    }

    #[test]
    fn decode_end_to_end_example() {
        let decoded = decode("PN:v1/96/A1:-CompoundA-10-uM-1").unwrap();
        assert_eq!(decoded.version, 1);
        assert_eq!(decoded.plate_type, PlateType::Wells96);
        assert_eq!(decoded.wells.len(), 1);
        assert_eq!(decoded.wells[&WellId::from("A1")], compound_a());
        assert_eq!(decoded.wells[&WellId::from("A1")].cell_type, None);
    }

    #[test]
    fn decode_empty_well_data() {
        let decoded = decode("PN:v1/96/").unwrap();
        assert!(decoded.wells.is_empty());

        // Missing third segment is also an empty plate
        let decoded = decode("PN:v1/12").unwrap();
        assert_eq!(decoded.plate_type, PlateType::Wells12);
        assert!(decoded.wells.is_empty());
    }

    #[test]
    fn decode_accepts_later_versions() {
        let decoded = decode("PN:v3/6/A1:x").unwrap();
        assert_eq!(decoded.version, 3);
    }

    #[test]
    fn decode_rejections() {
        assert_eq!(try_decode("garbage"), Err(NotationError::MissingPrefix));
        assert!(matches!(
            try_decode("PN:v1/7/A1:x"),
            Err(NotationError::UnsupportedPlateType(_))
        ));
        assert!(matches!(
            try_decode("PN:v0/96/"),
            Err(NotationError::InvalidVersion(_))
        ));
        assert!(matches!(
            try_decode("PN:vX/96/"),
            Err(NotationError::InvalidVersion(_))
        ));
        assert!(matches!(
            try_decode("PN:v1"),
            Err(NotationError::MissingSegment)
        ));
        assert!(matches!(
            try_decode("pn:v1/96/"),
            Err(NotationError::MissingPrefix)
        ));
    }

    #[test]
    fn decode_malformed_entry_fails_whole_notation() {
        assert_eq!(
            try_decode("PN:v1/96/A1:x*B2y*C3:z"),
            Err(NotationError::MalformedEntry("B2y".to_string()))
        );
        assert!(decode("PN:v1/96/A1:x*B2y").is_none());
    }

    #[test]
    fn decode_skips_blank_entries() {
        let decoded = decode("PN:v1/96/A1:x**B2:y*").unwrap();
        assert_eq!(decoded.wells.len(), 2);
    }

    #[test]
    fn decode_drops_all_empty_entries() {
        let decoded = decode("PN:v1/96/A1:*A2:---").unwrap();
        assert!(decoded.wells.is_empty());
    }

    #[test]
    fn decode_slash_in_field_text() {
        let wells = BTreeMap::from([(WellId::from("A1"), WellRecord::new().with_concentration("1/2", "v/v"))]);
        let notation = encode(PlateType::Wells96, &wells);
        assert_eq!(decode(&notation).unwrap().wells, wells);
    }

    #[test]
    fn decode_later_duplicate_wins() {
        let decoded = decode("PN:v1/96/A1:first*A1:second").unwrap();
        assert_eq!(
            decoded.wells[&WellId::from("A1")].cell_type.as_deref(),
            Some("second")
        );
    }

    #[test]
    fn well_segment_extraction() {
        assert_eq!(well_segment("PN:v1/96/A1:x*B2:y"), "A1:x*B2:y");
        assert_eq!(well_segment("PN:v1/96/"), "");
        assert_eq!(well_segment("garbage"), "");
    }
}
