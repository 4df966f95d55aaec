//! ICS 07: Tendermint Client. Header decoding and the simple Merkle proofs Tendermint blocks
//! commit their transactions and execution results with.

pub mod error;
pub mod header;
pub mod proof;
