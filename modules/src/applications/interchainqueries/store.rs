//! Persistence of registered queries, their results and the submitted transaction markers on
//! top of the host's `KvStore`.

use icq_proto::neutron::interchainqueries::{
    QueryResult, RegisteredQuery as RawRegisteredQuery,
};
use prost::Message;
use tracing::debug;

use crate::applications::interchainqueries::context::KvStore;
use crate::applications::interchainqueries::error::Error;
use crate::applications::interchainqueries::query::RegisteredQuery;
use crate::applications::interchainqueries::result::strip_proofs;
use crate::keys;
use crate::prelude::*;
use crate::Height;

/// Typed access to the interchain queries state. Implemented for every `KvStore`.
pub trait QueryStore: KvStore {
    fn last_registered_query_id(&self) -> u64 {
        let key = keys::last_registered_query_id_key();
        match self.get(&key) {
            None => 0,
            Some(bytes) => match <[u8; 8]>::try_from(bytes.as_slice()) {
                Ok(id) => u64::from_be_bytes(id),
                Err(_) => panic!(
                    "corrupted last registered query id under key {:?}: expected 8 bytes, got {}",
                    key,
                    bytes.len()
                ),
            },
        }
    }

    /// Bumps the query id counter and returns the new id. Ids start at 1.
    fn next_query_id(&mut self) -> u64 {
        let id = self.last_registered_query_id() + 1;
        self.set(
            keys::last_registered_query_id_key(),
            id.to_be_bytes().to_vec(),
        );
        id
    }

    fn save_query(&mut self, query: RegisteredQuery) {
        let id = query.id;
        self.set(
            keys::registered_query_key(id),
            RawRegisteredQuery::from(query).encode_to_vec(),
        );
    }

    fn get_query_by_id(&self, query_id: u64) -> Result<RegisteredQuery, Error> {
        let bytes = self
            .get(&keys::registered_query_key(query_id))
            .ok_or_else(|| Error::invalid_query_id(query_id))?;

        match RawRegisteredQuery::decode(bytes.as_slice()) {
            Ok(raw) => raw.try_into(),
            Err(e) => panic!(
                "corrupted registered query under key {:?}: {}",
                keys::registered_query_key(query_id),
                e
            ),
        }
    }

    /// Drops the query and its last KV result. Transaction markers are left to be pruned
    /// separately.
    fn remove_query(&mut self, query_id: u64) {
        self.delete(&keys::registered_query_key(query_id));
        self.delete(&keys::registered_query_result_key(query_id));
    }

    fn save_query_result(&mut self, query_id: u64, result: &QueryResult) {
        self.set(
            keys::registered_query_result_key(query_id),
            result.encode_to_vec(),
        );
    }

    fn get_query_result_by_id(&self, query_id: u64) -> Result<QueryResult, Error> {
        let bytes = self
            .get(&keys::registered_query_result_key(query_id))
            .ok_or_else(|| Error::no_query_result(query_id))?;

        match QueryResult::decode(bytes.as_slice()) {
            Ok(result) => Ok(result),
            Err(e) => panic!(
                "corrupted query result under key {:?}: {}",
                keys::registered_query_result_key(query_id),
                e
            ),
        }
    }

    /// Advances both last-submitted heights of the query and stores a verified KV result
    /// without its proofs. Nothing is written when the remote height does not advance.
    fn save_kv_query_result(
        &mut self,
        query_id: u64,
        result: &QueryResult,
        local_height: u64,
    ) -> Result<(), Error> {
        self.update_last_remote_height(query_id, Height::new(result.revision, result.height))?;
        self.update_last_local_height(query_id, local_height)?;
        self.save_query_result(query_id, &strip_proofs(result));
        Ok(())
    }

    /// Records `height` as the last remote height of the query. Heights must strictly increase.
    fn update_last_remote_height(&mut self, query_id: u64, height: Height) -> Result<(), Error> {
        let mut query = self.get_query_by_id(query_id)?;
        if query.last_submitted_result_remote_height >= height {
            return Err(Error::invalid_height(format!(
                "can't save query result for height {}: result height can't be less or equal then last submitted query result height {}",
                height, query.last_submitted_result_remote_height
            )));
        }

        query.last_submitted_result_remote_height = height;
        debug!(query_id, %height, "updated last remote height");
        self.save_query(query);
        Ok(())
    }

    fn update_last_local_height(&mut self, query_id: u64, height: u64) -> Result<(), Error> {
        let mut query = self.get_query_by_id(query_id)?;
        query.last_submitted_result_local_height = height;
        debug!(query_id, height, "updated last local height");
        self.save_query(query);
        Ok(())
    }

    fn is_tx_submitted(&self, query_id: u64, tx_hash: &[u8]) -> bool {
        self.has(&keys::submitted_tx_key(query_id, tx_hash))
    }

    fn save_submitted_tx(&mut self, query_id: u64, tx_hash: &[u8]) {
        self.set(keys::submitted_tx_key(query_id, tx_hash), Vec::new());
    }
}

impl<T: KvStore + ?Sized> QueryStore for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applications::interchainqueries::error::ErrorDetail;
    use crate::applications::interchainqueries::query::QueryType;
    use crate::applications::interchainqueries::result::StorageValue;
    use crate::mock::context::MockContext;
    use crate::test_utils::get_dummy_raw_registered_query;
    use tendermint_proto::crypto::ProofOps;
    use test_log::test;

    fn register(ctx: &mut MockContext, query_type: QueryType) -> u64 {
        let id = ctx.next_query_id();
        let raw = get_dummy_raw_registered_query(id, query_type);
        ctx.save_query(raw.try_into().unwrap());
        id
    }

    #[test]
    fn query_ids_are_sequential() {
        let mut ctx = MockContext::default();
        assert_eq!(ctx.last_registered_query_id(), 0);
        assert_eq!(ctx.next_query_id(), 1);
        assert_eq!(ctx.next_query_id(), 2);
        assert_eq!(ctx.last_registered_query_id(), 2);
    }

    #[test]
    #[should_panic(expected = "corrupted last registered query id")]
    fn corrupted_query_id_counter_panics() {
        let mut ctx = MockContext::default();
        assert_eq!(ctx.next_query_id(), 1);

        ctx.set(keys::last_registered_query_id_key(), vec![1, 2, 3]);
        let _ = ctx.next_query_id();
    }

    #[test]
    fn unknown_query() {
        let ctx = MockContext::default();

        let err = ctx.get_query_by_id(42).unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::InvalidQueryId(_)));

        let err = ctx.get_query_result_by_id(42).unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::NoQueryResult(_)));
    }

    #[test]
    fn remote_height_must_increase() {
        let mut ctx = MockContext::default();
        let id = register(&mut ctx, QueryType::Kv);

        ctx.update_last_remote_height(id, Height::new(0, 10)).unwrap();

        for height in [Height::new(0, 10), Height::new(0, 9)] {
            let err = ctx.update_last_remote_height(id, height).unwrap_err();
            assert!(matches!(err.detail(), ErrorDetail::InvalidHeight(_)));
        }

        ctx.update_last_remote_height(id, Height::new(1, 1)).unwrap();
        assert_eq!(
            ctx.get_query_by_id(id)
                .unwrap()
                .last_submitted_result_remote_height,
            Height::new(1, 1)
        );
    }

    #[test]
    fn kv_result_is_saved_without_proofs() {
        let mut ctx = MockContext::default();
        let id = register(&mut ctx, QueryType::Kv);

        let result = QueryResult {
            kv_results: vec![StorageValue {
                storage_prefix: "bank".to_string(),
                key: b"k".to_vec(),
                value: b"v".to_vec(),
                proof: Some(ProofOps::default()),
            }],
            block: None,
            height: 5,
            revision: 0,
            allow_kv_callbacks: false,
        };
        ctx.save_kv_query_result(id, &result, 17).unwrap();

        let saved = ctx.get_query_result_by_id(id).unwrap();
        assert!(saved.kv_results[0].proof.is_none());
        assert_eq!(saved.kv_results[0].value, b"v".to_vec());

        let query = ctx.get_query_by_id(id).unwrap();
        assert_eq!(query.last_submitted_result_remote_height, Height::new(0, 5));
        assert_eq!(query.last_submitted_result_local_height, 17);

        ctx.remove_query(id);
        assert!(ctx.get_query_by_id(id).is_err());
        assert!(ctx.get_query_result_by_id(id).is_err());
    }

    #[test]
    fn stale_kv_result_is_not_saved() {
        let mut ctx = MockContext::default();
        let id = register(&mut ctx, QueryType::Kv);
        ctx.update_last_remote_height(id, Height::new(0, 5)).unwrap();

        let result = QueryResult {
            height: 5,
            ..Default::default()
        };
        let err = ctx.save_kv_query_result(id, &result, 17).unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::InvalidHeight(_)));

        assert!(ctx.get_query_result_by_id(id).is_err());
        assert_eq!(
            ctx.get_query_by_id(id)
                .unwrap()
                .last_submitted_result_local_height,
            0
        );
    }

    #[test]
    #[should_panic(expected = "corrupted query result")]
    fn corrupted_result_panics() {
        let mut ctx = MockContext::default();
        ctx.set(keys::registered_query_result_key(3), vec![0xff; 4]);
        let _ = ctx.get_query_result_by_id(3);
    }

    #[test]
    fn submitted_tx_markers_are_per_query() {
        let mut ctx = MockContext::default();
        let hash = [7u8; 32];

        assert!(!ctx.is_tx_submitted(1, &hash));
        ctx.save_submitted_tx(1, &hash);
        assert!(ctx.is_tx_submitted(1, &hash));
        assert!(!ctx.is_tx_submitted(2, &hash));
    }
}
