//! Sailwave data extraction.
//!
//! Two sources produce the same [`FleetRoster`](crate::roster::FleetRoster):
//! the XML export written by File/Save as XML (`xml`), and the WM_COPYDATA
//! reply from a running Sailwave instance (`reply`). `version` holds the
//! minimum-version gate the live path checks before talking to the app.

pub mod reply;
pub mod version;
pub mod xml;
