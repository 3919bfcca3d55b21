//! Printable per-fleet regatta scoring sheets from Sailwave data.
//!
//! Two sources converge on the same pipeline: a Sailwave XML export read
//! from disk, or the competitor list requested live from a running Sailwave
//! instance over WM_COPYDATA (Windows only). Either way the roster is
//! grouped by fleet, each fleet is sorted by a normalized sail-number key,
//! and one self-contained HTML sheet is written per fleet.
//!
//! # Example (XML export)
//!
//! ```rust,no_run
//! use scoresheet::{collect_roster, write_sheets, XmlFileSource};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut source = XmlFileSource::new("regatta.xml");
//!     let roster = collect_roster(&mut source)?;
//!     for path in write_sheets(roster, "AYC Spring 2026", Path::new("."))? {
//!         println!("Wrote {}", path.display());
//!     }
//!     Ok(())
//! }
//! ```

pub mod competitor;
mod error;
pub mod provider;
pub mod providers;
pub mod render;
pub mod roster;
pub mod sailwave;

// Platform-specific modules
#[cfg(windows)]
pub mod windows;

pub use competitor::{Competitor, sail_number_key};
pub use error::{Result, SheetError};
pub use provider::{RosterSource, collect_roster};
pub use providers::{SailwaveSource, XmlFileSource};
pub use render::{render_sheet, write_sheets};
pub use roster::FleetRoster;
