//! Host chain applications built on top of the core building blocks.

pub mod interchainqueries;
