use core::cmp::Ordering;
use core::fmt::{Display, Error as FmtError, Formatter};

use ibc_proto::ibc::core::client::v1::Height as RawHeight;
use serde::{Deserialize, Serialize};
use tendermint::block::Height as BlockHeight;

use crate::prelude::*;

/// Height of a remote chain, qualified by the revision (chain upgrade epoch) it belongs to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Height {
    /// Previously known as "epoch"
    pub revision_number: u64,

    /// The height of a block
    pub revision_height: u64,
}

impl Height {
    pub fn new(revision_number: u64, revision_height: u64) -> Self {
        Self {
            revision_number,
            revision_height,
        }
    }

    pub fn zero() -> Height {
        Self {
            revision_number: 0,
            revision_height: 0,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.revision_height == 0
    }

    /// `None` when the revision height would overflow.
    pub fn checked_add(&self, delta: u64) -> Option<Height> {
        Some(Height {
            revision_number: self.revision_number,
            revision_height: self.revision_height.checked_add(delta)?,
        })
    }

    pub fn increment(&self) -> Option<Height> {
        self.checked_add(1)
    }

    /// Height of a Tendermint block header within the given revision.
    pub fn from_block_height(revision_number: u64, height: BlockHeight) -> Height {
        Self::new(revision_number, height.value())
    }
}

impl PartialOrd for Height {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Height {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.revision_number < other.revision_number {
            Ordering::Less
        } else if self.revision_number > other.revision_number {
            Ordering::Greater
        } else if self.revision_height < other.revision_height {
            Ordering::Less
        } else if self.revision_height > other.revision_height {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

impl From<RawHeight> for Height {
    fn from(raw: RawHeight) -> Self {
        Height {
            revision_number: raw.revision_number,
            revision_height: raw.revision_height,
        }
    }
}

impl From<Height> for RawHeight {
    fn from(ics_height: Height) -> Self {
        RawHeight {
            revision_number: ics_height.revision_number,
            revision_height: ics_height.revision_height,
        }
    }
}

impl Display for Height {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}-{}", self.revision_number, self.revision_height)
    }
}
