//! Verification of relayer-submitted headers and proofs.

pub mod header;
pub mod storage;
pub mod transaction;
