//! Scoring-sheet rendering and per-fleet output files.

use std::path::{Path, PathBuf};

use tera::{Context, Tera};
use tracing::info;

use crate::competitor::Competitor;
use crate::error::{Result, SheetError};
use crate::roster::FleetRoster;

/// Embedded sheet template; the binary carries it so sheets render anywhere.
const TEMPLATE_NAME: &str = "scoring_sheet.html";
const TEMPLATE_SOURCE: &str = include_str!("../templates/scoring_sheet.html.tera");

/// Render one fleet's scoring sheet to an HTML string.
///
/// Pure: competitors are emitted in the order given, so callers sort first.
pub fn render_sheet(racetitle: &str, fleet: &str, competitors: &[Competitor]) -> Result<String> {
    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, TEMPLATE_SOURCE)?;

    let mut context = Context::new();
    context.insert("racetitle", racetitle);
    context.insert("fleet", fleet);
    context.insert("competitors", competitors);

    Ok(tera.render(TEMPLATE_NAME, &context)?)
}

/// Sort every fleet by sail number, render it, and write `<fleet>.html`
/// into `out_dir`. Returns the written paths in fleet order.
pub fn write_sheets(
    mut roster: FleetRoster,
    racetitle: &str,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    roster.sort_by_sail_number();

    let mut written = Vec::with_capacity(roster.fleet_count());
    for (fleet, competitors) in roster.iter() {
        let html = render_sheet(racetitle, fleet, competitors)?;
        let path = out_dir.join(format!("{fleet}.html"));
        std::fs::write(&path, html).map_err(|e| SheetError::file_error(path.clone(), e))?;
        info!(fleet, path = %path.display(), competitors = competitors.len(), "wrote scoring sheet");
        written.push(path);
    }
    Ok(written)
}
