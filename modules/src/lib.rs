#![no_std]
#![allow(clippy::large_enum_variant)]
#![deny(
    warnings,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    rust_2018_idioms
)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![forbid(unsafe_code)]

//! This library implements the verification side of Interchain Queries (ICQ): a chain accepts
//! claims about the state or transaction history of a remote chain, submitted by untrusted
//! relayers, only after checking them against a light client it already tracks.
//!
//! The layout of this crate mirrors the classification of the [Interchain
//! Standards][ics-standards]:
//!
//! `Core` holds the protocol building blocks the engine relies on: heights and the light
//! client gateway (ICS 02), connection ends (ICS 03), Merkle commitments and ICS23 proofs
//! (ICS 23) and host identifiers (ICS 24).
//!
//! `Clients` holds the Tendermint specific pieces: header decoding and the simple Merkle
//! proofs that commit to block transactions and their results.
//!
//! `Applications` holds the interchain queries module itself: registered queries, the
//! result store, the header, storage and transaction verifiers and the handlers that
//! compose them.
//!
//! [ics-standards]: https://github.com/cosmos/ibc#interchain-standards

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod prelude;

pub mod applications;
pub mod clients;
pub mod config;
pub mod core;
pub mod handler;
pub mod keys;
pub mod signer;

/// Re-export of ICS 002 Height domain type
pub type Height = core::ics02_client::height::Height;

#[cfg(any(test, feature = "mocks"))]
pub mod test_utils;

#[cfg(any(test, feature = "mocks"))]
pub mod mock; // Context mock, the light client gateway and callback sink: for testing all handlers.
