//! Live Sailwave access over window messaging.
//!
//! Sailwave 2.28.11+ exposes its competitor list through a WM_COPYDATA
//! request/reply exchange: we create a message-only listener window, tell
//! Sailwave its handle, and poll for the reply. This is platform-specific
//! glue, not a portable protocol; everything above it talks through
//! [`crate::provider::RosterSource`].

mod connection;

pub use connection::Connection;
