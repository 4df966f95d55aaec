//! The protocol building blocks the interchain queries engine relies on: heights and the
//! light client gateway, connection ends, Merkle commitments and host identifiers.

pub mod ics02_client;
pub mod ics03_connection;
pub mod ics23_commitment;
pub mod ics24_host;
