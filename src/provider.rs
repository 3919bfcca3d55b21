//! Roster source trait.
//!
//! Both modes of the tool sit behind this seam: the static XML export and
//! the live Sailwave handshake. Everything downstream (sorting, rendering,
//! file output) only ever sees a [`FleetRoster`](crate::roster::FleetRoster).

use tracing::debug;

use crate::error::Result;
use crate::roster::FleetRoster;

/// A source of the competitor roster.
///
/// The contract is deliberately narrow: `start` acquires whatever the
/// source needs (no-op for files, launch/attach for live Sailwave),
/// `roster` produces the fleet-keyed roster, `close` releases the source.
/// `close` must be safe to call whether or not `roster` succeeded.
pub trait RosterSource {
    /// Acquire the source.
    fn start(&mut self) -> Result<()>;

    /// Produce the fleet-keyed roster.
    fn roster(&mut self) -> Result<FleetRoster>;

    /// Release the source. Infallible by design; failures to tidy up an
    /// external app are logged, not propagated.
    fn close(&mut self);
}

/// Drive a source through its full start/roster/close lifecycle.
///
/// `close` runs even when `roster` fails, so a timed-out live session still
/// tears down the Sailwave connection before the error surfaces.
pub fn collect_roster(source: &mut dyn RosterSource) -> Result<FleetRoster> {
    source.start()?;
    let result = source.roster();
    source.close();
    let roster = result?;
    debug!(
        fleets = roster.fleet_count(),
        competitors = roster.competitor_count(),
        "collected roster"
    );
    Ok(roster)
}
