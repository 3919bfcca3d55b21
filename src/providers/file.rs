//! Roster source backed by a Sailwave XML export.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::provider::RosterSource;
use crate::roster::FleetRoster;
use crate::sailwave::xml;

/// Reads the roster from a static XML export on disk.
pub struct XmlFileSource {
    path: PathBuf,
}

impl XmlFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl RosterSource for XmlFileSource {
    fn start(&mut self) -> Result<()> {
        debug!(path = %self.path.display(), "using Sailwave XML export");
        Ok(())
    }

    fn roster(&mut self) -> Result<FleetRoster> {
        xml::parse_roster_file(&self.path)
    }

    fn close(&mut self) {}
}
