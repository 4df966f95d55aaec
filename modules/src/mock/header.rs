//! Tendermint headers for tests, generated with `tendermint-testgen`.

use tendermint::block::Id as BlockId;
use tendermint::Hash;
use tendermint_testgen::light_block::TmLightBlock;
use tendermint_testgen::{Generator, LightBlock as TestgenLightBlock};

use crate::clients::ics07_tendermint::header::Header;
use crate::Height;

/// A light block at `height` signed by the default testgen validators.
pub fn test_light_block(height: u64) -> TmLightBlock {
    TestgenLightBlock::new_default(height)
        .generate()
        .expect("testgen light block")
}

/// A header at `height` of revision 0, trusting the block right below it.
pub fn test_header(height: u64) -> Header {
    Header::from(test_light_block(height))
}

/// Two adjacent headers, `height` and `height + 1`, linked by block hash.
pub fn chained_headers(height: u64) -> (Header, Header) {
    chained_headers_with(height, None, None)
}

/// Like `chained_headers`, with the transactions root of the first header and the results root
/// of the second one replaced. The link between the two is computed after the replacement.
pub fn chained_headers_with(
    height: u64,
    data_hash: Option<Hash>,
    last_results_hash: Option<Hash>,
) -> (Header, Header) {
    let mut header = test_header(height);
    let mut next = test_header(height + 1);

    if data_hash.is_some() {
        header.signed_header.header.data_hash = data_hash;
    }
    if last_results_hash.is_some() {
        next.signed_header.header.last_results_hash = last_results_hash;
    }

    next.signed_header.header.last_block_id = Some(BlockId {
        hash: header.hash(),
        part_set_header: Default::default(),
    });

    (header, next)
}

impl From<TmLightBlock> for Header {
    fn from(light_block: TmLightBlock) -> Self {
        let height = light_block.signed_header.header.height.value();
        Header {
            signed_header: light_block.signed_header,
            validator_set: light_block.validators.clone(),
            trusted_height: Height::new(0, height.saturating_sub(1)),
            trusted_validator_set: light_block.validators,
        }
    }
}
