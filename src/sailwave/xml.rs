//! Roster extraction from a Sailwave XML export.

use std::path::Path;

use tracing::debug;

use crate::competitor::Competitor;
use crate::error::{Result, SheetError};
use crate::roster::FleetRoster;

/// Element names a `<competitor>` record must carry.
const REQUIRED_FIELDS: [&str; 5] =
    ["compboat", "compsailno", "compaltsailno", "compfleet", "comphelmname"];

/// Read and parse a Sailwave XML export into a fleet-keyed roster.
pub fn parse_roster_file(path: &Path) -> Result<FleetRoster> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| SheetError::file_error(path.to_path_buf(), e))?;
    parse_roster(&text)
}

/// Parse Sailwave XML text into a fleet-keyed roster.
///
/// The document must contain a `competitors` element (either as the root or
/// as a direct child of it) with `competitor` children; each child must
/// carry all of the `comp*` elements this tool prints. A missing element is
/// fatal. Present-but-empty elements yield empty strings.
pub fn parse_roster(xml: &str) -> Result<FleetRoster> {
    let doc = roxmltree::Document::parse(xml)
        .map_err(|e| SheetError::parse_error("Sailwave XML", e.to_string()))?;

    let root = doc.root_element();
    let container = if root.has_tag_name("competitors") {
        root
    } else {
        root.children()
            .find(|n| n.has_tag_name("competitors"))
            .ok_or_else(|| {
                SheetError::parse_error("Sailwave XML", "no <competitors> element found")
            })?
    };

    let mut roster = FleetRoster::new();
    for (index, node) in container.children().filter(|n| n.has_tag_name("competitor")).enumerate() {
        let context = format!("competitor {}", index + 1);
        let mut fields = [""; 5];
        for (slot, tag) in fields.iter_mut().zip(REQUIRED_FIELDS) {
            let element = node
                .children()
                .find(|n| n.has_tag_name(tag))
                .ok_or_else(|| {
                    SheetError::parse_error(&context, format!("missing <{tag}> element"))
                })?;
            *slot = element.text().unwrap_or("").trim();
        }
        let [boat, sail_no, alt_sail_no, fleet, helm_name] = fields;
        roster.add(fleet, Competitor::new(helm_name, boat, sail_no, alt_sail_no));
    }

    debug!(
        fleets = roster.fleet_count(),
        competitors = roster.competitor_count(),
        "parsed Sailwave XML roster"
    );
    Ok(roster)
}
