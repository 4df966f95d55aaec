//! icq-proto gives the developer access to the interchain queries proto-defined structs.

#![no_std]
#![deny(warnings, trivial_casts, trivial_numeric_casts, unused_import_braces)]
#![allow(clippy::large_enum_variant)]
#![forbid(unsafe_code)]
#![doc(html_root_url = "https://docs.rs/icq-proto/0.1.0")]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub use ibc_proto::google;

pub mod neutron {
    pub mod interchainqueries {
        include!("prost/neutron.interchainqueries.rs");
    }
}
