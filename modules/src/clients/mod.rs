//! Implementations of client verification algorithms for specific types of chains.

pub mod ics07_tendermint;
