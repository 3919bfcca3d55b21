//! Reshaping of the live Sailwave competitor reply.
//!
//! A running Sailwave answers the roster request with one long string of
//! CSV lines, each `"field","value","id","extra"`. The flat triples are
//! pivoted on competitor id to recover one record per competitor, which is
//! then grouped by fleet exactly like the XML path.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::competitor::Competitor;
use crate::roster::FleetRoster;

/// Pivot a raw Sailwave reply into a fleet-keyed roster.
///
/// Competitor ids are visited in ascending lexical order, so fleet insertion
/// order is deterministic for a given reply. Rows with an empty id (summary
/// rows such as `comptotal`) are skipped. When a field repeats for the same
/// id the last value wins. Fields a competitor never reports come out as
/// empty strings.
pub fn parse_reply(data: &str) -> FleetRoster {
    // cells[id][field] = value
    let mut cells: BTreeMap<&str, HashMap<&str, &str>> = BTreeMap::new();

    for line in data.lines() {
        let Some((field, value, id)) = split_row(line) else { continue };
        if id.is_empty() {
            continue;
        }
        cells.entry(id).or_default().insert(field, value);
    }

    let mut roster = FleetRoster::new();
    for (&id, fields) in &cells {
        let get = |name: &str| fields.get(name).copied().unwrap_or("");
        let fleet = get("compfleet");
        let competitor = Competitor::new(
            get("comphelmname"),
            get("compboat"),
            get("compsailno"),
            get("compaltsailno"),
        );
        debug!(id, fleet, sail_no = %competitor.sail_no, "pivoted live competitor row");
        roster.add(fleet, competitor);
    }
    roster
}

/// Split one reply line into (field, value, id).
///
/// Lines are quoted CSV with four columns; the outer quotes are stripped and
/// the remainder split on the `","` separators. Short rows pad with empty
/// strings, blank lines yield `None`.
fn split_row(line: &str) -> Option<(&str, &str, &str)> {
    let mut chars = line.chars();
    chars.next()?;
    chars.next_back()?;
    let inner = chars.as_str();

    let mut columns = inner.split("\",\"");
    let field = columns.next().unwrap_or("");
    let value = columns.next().unwrap_or("");
    let id = columns.next().unwrap_or("");
    Some((field, value, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pivots_triples_into_competitors() {
        let data = "\"comphelmname\",\"Ann\",\"5\",\"\"\n\
                    \"compboat\",\"Laser\",\"5\",\"\"\n\
                    \"compsailno\",\"841\",\"5\",\"\"\n\
                    \"compaltsailno\",\"\",\"5\",\"\"\n\
                    \"compfleet\",\"Laser\",\"5\",\"\"\n\
                    \"comphelmname\",\"Bob\",\"7\",\"\"\n\
                    \"compsailno\",\"9\",\"7\",\"\"\n\
                    \"compfleet\",\"Laser\",\"7\",\"\"\n";
        let roster = parse_reply(data);
        assert_eq!(roster.fleet_count(), 1);
        let laser = roster.fleet("Laser").unwrap();
        assert_eq!(laser.len(), 2);
        assert_eq!(laser[0].helm_name, "Ann");
        assert_eq!(laser[0].sail_no, "841");
        // Bob never reported a boat; the cell pads to empty.
        assert_eq!(laser[1].boat, "");
    }

    #[test]
    fn competitor_order_follows_lexical_id_order() {
        let data = "\"compfleet\",\"Laser\",\"9\",\"\"\n\
                    \"comphelmname\",\"Late\",\"9\",\"\"\n\
                    \"compfleet\",\"Laser\",\"10\",\"\"\n\
                    \"comphelmname\",\"Early\",\"10\",\"\"\n";
        let roster = parse_reply(data);
        let helms: Vec<&str> =
            roster.fleet("Laser").unwrap().iter().map(|c| c.helm_name.as_str()).collect();
        // Lexical id order: "10" before "9".
        assert_eq!(helms, vec!["Early", "Late"]);
    }

    #[test]
    fn rows_without_an_id_are_skipped() {
        let data = "\"comptotal\",\"2\",\"\",\"\"\n\
                    \"compfleet\",\"Laser\",\"5\",\"\"\n";
        let roster = parse_reply(data);
        assert_eq!(roster.competitor_count(), 1);
        assert!(roster.fleet("").is_none());
    }

    #[test]
    fn blank_and_degenerate_lines_are_ignored() {
        let roster = parse_reply("\n\"\n\"comptotal\",\"0\",\"\",\"\"\n");
        assert!(roster.is_empty());
    }

    #[test]
    fn repeated_field_keeps_last_value() {
        let data = "\"compfleet\",\"Laser\",\"5\",\"\"\n\
                    \"compsailno\",\"1\",\"5\",\"\"\n\
                    \"compsailno\",\"2\",\"5\",\"\"\n";
        let roster = parse_reply(data);
        assert_eq!(roster.fleet("Laser").unwrap()[0].sail_no, "2");
    }
}
