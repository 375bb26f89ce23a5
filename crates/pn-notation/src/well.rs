//! Well contents
//!
//! A [`WellRecord`] describes what is in one well. Every field is optional;
//! a record with nothing in it is treated as an empty well.

use serde::{Deserialize, Serialize};

/// Contents of a single well
///
/// Serializes with the camelCase keys used by plate JSON documents,
/// omitting absent fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WellRecord {
    /// Cell line or cell type seeded in the well
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_type: Option<String>,

    /// Compound applied to the well
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compound: Option<String>,

    /// Concentration, kept exactly as entered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concentration: Option<String>,

    /// Unit for `concentration` (e.g. `uM`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concentration_units: Option<String>,

    /// Replicate number, 1-based
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicate: Option<u32>,
}

impl WellRecord {
    /// Create an empty record
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With cell type
    #[inline]
    #[must_use]
    pub fn with_cell_type(mut self, cell_type: impl Into<String>) -> Self {
        self.cell_type = Some(cell_type.into());
        self
    }

    /// With compound
    #[inline]
    #[must_use]
    pub fn with_compound(mut self, compound: impl Into<String>) -> Self {
        self.compound = Some(compound.into());
        self
    }

    /// With concentration and its unit
    #[inline]
    #[must_use]
    pub fn with_concentration(
        mut self,
        concentration: impl Into<String>,
        units: impl Into<String>,
    ) -> Self {
        self.concentration = Some(concentration.into());
        self.concentration_units = Some(units.into());
        self
    }

    /// With replicate number
    #[inline]
    #[must_use]
    pub fn with_replicate(mut self, replicate: u32) -> Self {
        self.replicate = Some(replicate);
        self
    }

    /// True when no field carries a non-blank value
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text_fields().iter().all(|f| present(*f).is_none()) && self.replicate.is_none()
    }

    /// Field values in notation order; blank text counts as absent
    pub(crate) fn notation_fields(&self) -> [String; 5] {
        let [cell_type, compound, concentration, units] = self.text_fields();
        [
            present(cell_type).unwrap_or_default().to_string(),
            present(compound).unwrap_or_default().to_string(),
            present(concentration).unwrap_or_default().to_string(),
            present(units).unwrap_or_default().to_string(),
            self.replicate.map(|r| r.to_string()).unwrap_or_default(),
        ]
    }

    /// Rebuild a record from decoded fields, dropping empty ones
    ///
    /// Fields past the fifth are ignored. A replicate that does not start
    /// with a decimal number is dropped.
    pub(crate) fn from_notation_fields(fields: Vec<String>) -> Self {
        let mut fields = fields.into_iter().map(|f| Some(f).filter(|s| !s.is_empty()));
        let mut next = || fields.next().flatten();

        Self {
            cell_type: next(),
            compound: next(),
            concentration: next(),
            concentration_units: next(),
            replicate: next().as_deref().and_then(leading_u32),
        }
    }

    /// Check the record for values a plate editor would reject
    ///
    /// Returns one message per problem; an empty list means the record is
    /// acceptable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if let Some(conc) = present(self.concentration.as_deref()) {
            if leading_float(conc).is_none() {
                problems.push("Concentration must be a valid number".to_string());
            }
        }

        if self.replicate == Some(0) {
            problems.push("Replicate number must be 1 or greater".to_string());
        }

        problems
    }

    fn text_fields(&self) -> [Option<&str>; 4] {
        [
            self.cell_type.as_deref(),
            self.compound.as_deref(),
            self.concentration.as_deref(),
            self.concentration_units.as_deref(),
        ]
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn leading_u32(s: &str) -> Option<u32> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}

/// Parse the longest float-looking prefix (`"10 uM"` → 10.0)
fn leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, c) in s.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            '0'..='9' => seen_digit = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }
    if !seen_digit {
        return None;
    }
    s[..end].parse().ok()
}
