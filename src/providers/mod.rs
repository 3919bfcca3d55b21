//! Roster source implementations.

pub mod file;
pub mod live;

pub use file::XmlFileSource;
pub use live::SailwaveSource;
