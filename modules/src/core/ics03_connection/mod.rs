//! ICS 03: Connection ends bind a local light client to a remote chain. Registered queries
//! name a connection; the engine resolves it to the client that verifies their proofs.

pub mod connection;
pub mod context;
pub mod error;
