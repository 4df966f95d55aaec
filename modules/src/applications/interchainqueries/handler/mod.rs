//! Handlers of the interchain queries module.

pub mod process_block;
pub mod submit_query_result;
