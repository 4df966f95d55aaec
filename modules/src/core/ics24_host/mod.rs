//! ICS 24: Host defines the identifiers a host chain hands out for its light clients and
//! connections.

pub mod error;
pub mod identifier;
pub mod validate;
