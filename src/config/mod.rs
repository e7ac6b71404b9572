//! JSON configuration of the bundled tools.
pub mod replay;
