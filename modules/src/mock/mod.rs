//! In-memory host chain for testing the interchain queries handlers.

pub mod context;
pub mod header;
