//! Messages handled by the interchain queries module.

pub mod submit_query_result;
