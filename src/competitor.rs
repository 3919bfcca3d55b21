//! Competitor record and the sail-number sort key.

use serde::Serialize;

/// A single entry from the Sailwave competitor list.
///
/// Immutable once constructed; the fields mirror Sailwave's `comp*` columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Competitor {
    /// Helm name as entered in Sailwave.
    pub helm_name: String,
    /// Boat class or name.
    pub boat: String,
    /// Sail number, usually numeric but occasionally alphanumeric ("B302").
    pub sail_no: String,
    /// Alternate sail number, often empty.
    pub alt_sail_no: String,
}

impl Competitor {
    pub fn new(
        helm_name: impl Into<String>,
        boat: impl Into<String>,
        sail_no: impl Into<String>,
        alt_sail_no: impl Into<String>,
    ) -> Self {
        Self {
            helm_name: helm_name.into(),
            boat: boat.into(),
            sail_no: sail_no.into(),
            alt_sail_no: alt_sail_no.into(),
        }
    }

    /// Sort key for this competitor, see [`sail_number_key`].
    pub fn sort_key(&self) -> String {
        sail_number_key(&self.sail_no)
    }
}

/// Normalized sort key for a sail-number string.
///
/// Numeric sail numbers are zero-padded to 10 digits so that "841" sorts
/// before "1841"; anything that fails the integer parse keeps its original
/// string as the key ("B302").
///
/// Note the ordering between the two groups is purely lexical: padded
/// numeric keys land before alphabetic ones only because a leading '0'
/// compares below letters, not because of any numbers-first policy. Sheets
/// have been printed in this order for years, so the quirk is preserved.
pub fn sail_number_key(sail_no: &str) -> String {
    match sail_no.trim().parse::<i64>() {
        Ok(n) => format!("{n:010}"),
        Err(_) => sail_no.to_string(),
    }
}
