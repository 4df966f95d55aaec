//! ICS 23: Vector commitments. Roots, paths and the ICS23 proofs that tie a key/value pair (or
//! its absence) to a consensus state root.

pub mod commitment;
pub mod error;
pub mod merkle;
pub mod specs;
