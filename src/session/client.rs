use super::types::{QueryRequest, StoreResponse};
use crate::error::AutoQueryError;

/// Transport used by a session to query the store
///
/// Implementations own the wire protocol. A session issues one request at a
/// time and waits for its response before sending the next.
pub trait StoreClient {
    fn get_from_store(&mut self, request: &QueryRequest) -> Result<StoreResponse, AutoQueryError>;
}

impl<C: StoreClient + ?Sized> StoreClient for Box<C> {
    fn get_from_store(&mut self, request: &QueryRequest) -> Result<StoreResponse, AutoQueryError> {
        (**self).get_from_store(request)
    }
}
