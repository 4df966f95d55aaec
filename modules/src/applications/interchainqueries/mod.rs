//! Interchain queries: contracts register KV or TX queries against a remote chain, relayers
//! answer them with proofs, and this module verifies those answers before storing them or
//! handing them to the owning contract.

pub mod context;
pub mod error;
pub mod handler;
pub mod msgs;
pub mod query;
pub mod result;
pub mod store;
pub mod verify;
