//! ICS 02: Client definitions the engine consumes. The light client itself lives on the host
//! chain; this module only names the operations invoked on it.

pub mod context;
pub mod error;
pub mod height;
