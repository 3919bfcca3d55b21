//! Roster source backed by a running Sailwave instance.
//!
//! On Windows this drives the WM_COPYDATA handshake in
//! [`crate::windows::Connection`]; elsewhere the source exists but fails
//! with an unsupported-platform error so the CLI surface stays uniform.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, SheetError};
use crate::provider::RosterSource;
use crate::roster::FleetRoster;
use crate::sailwave::version::VersionGate;

#[cfg(windows)]
use crate::sailwave::reply;
#[cfg(windows)]
use crate::windows::Connection;

/// Interval between reply polls. 90 polls at this rate gives the
/// historical ~9 second default budget.
pub(crate) const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Live roster source: launches or attaches to Sailwave, requests the
/// competitor list over WM_COPYDATA, and closes the instance afterwards
/// (only if this tool launched it).
pub struct SailwaveSource {
    #[cfg_attr(not(windows), allow(dead_code))]
    path: PathBuf,
    #[cfg_attr(not(windows), allow(dead_code))]
    attach_running: bool,
    #[cfg_attr(not(windows), allow(dead_code))]
    max_attempts: u32,
    gate: VersionGate,
    #[cfg(windows)]
    connection: Option<Connection>,
}

impl SailwaveSource {
    /// `path` is the `.blw` file Sailwave should have open. `attach_running`
    /// permits reusing an instance that already has the file open. `timeout`
    /// bounds the reply wait. `gate` is the injectable version check; use
    /// [`crate::sailwave::version::registry_gate`] for the real thing.
    pub fn new(
        path: impl Into<PathBuf>,
        attach_running: bool,
        timeout: Duration,
        gate: VersionGate,
    ) -> Self {
        Self {
            path: path.into(),
            attach_running,
            max_attempts: attempts_for(timeout),
            gate,
            #[cfg(windows)]
            connection: None,
        }
    }
}

#[cfg(windows)]
impl RosterSource for SailwaveSource {
    fn start(&mut self) -> Result<()> {
        (self.gate)().map_err(SheetError::version_check_failed)?;
        let connection = Connection::open(&self.path, self.attach_running)?;
        self.connection = Some(connection);
        Ok(())
    }

    fn roster(&mut self) -> Result<FleetRoster> {
        let connection = self
            .connection
            .as_mut()
            .ok_or_else(|| SheetError::connection_failed("Sailwave session not started"))?;
        let raw = connection.request_roster(self.max_attempts, POLL_INTERVAL)?;
        Ok(reply::parse_reply(&raw))
    }

    fn close(&mut self) {
        if let Some(mut connection) = self.connection.take() {
            connection.close();
        }
    }
}

#[cfg(not(windows))]
impl RosterSource for SailwaveSource {
    fn start(&mut self) -> Result<()> {
        (self.gate)().map_err(SheetError::version_check_failed)?;
        Err(SheetError::unsupported_platform("Live Sailwave access", "Windows"))
    }

    fn roster(&mut self) -> Result<FleetRoster> {
        Err(SheetError::unsupported_platform("Live Sailwave access", "Windows"))
    }

    fn close(&mut self) {}
}

/// Poll budget for a reply timeout: one attempt per poll interval,
/// never fewer than one.
fn attempts_for(timeout: Duration) -> u32 {
    (timeout.as_millis() / POLL_INTERVAL.as_millis()).max(1) as u32
}

/// Run `poll` up to `attempts` times, sleeping `interval` between misses.
///
/// Returns the first value produced, or the timeout error once the budget
/// is exhausted.
#[cfg_attr(not(windows), allow(dead_code))]
pub(crate) fn poll_until<T>(
    attempts: u32,
    interval: Duration,
    mut poll: impl FnMut() -> Option<T>,
) -> Result<T> {
    for _ in 0..attempts {
        if let Some(value) = poll() {
            return Ok(value);
        }
        std::thread::sleep(interval);
    }
    Err(SheetError::Timeout { duration: interval * attempts })
}
