//! JSON-over-HTTP node query client.

use async_trait::async_trait;
use corelib::{NodeInfo, NodeQuery, QueryError};
use std::time::Duration;
use tracing::trace;

/// Bound on one snapshot query. The binary RPC variant of the observed
/// protocol used the same ten-second ceiling.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(10);

const NODE_INFO_PATH: &str = "/get_node_info";

/// One-shot HTTP client for the node query interface.
///
/// Sends exactly one request per call and never retries; retry policy
/// lives in the ring walker. Cheap to clone (shares the connection pool).
#[derive(Clone, Debug)]
pub struct HttpNodeClient {
    inner: reqwest::Client,
    timeout: Duration,
}

impl HttpNodeClient {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let inner = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { inner, timeout })
    }

    pub fn with_default_timeout() -> reqwest::Result<Self> {
        Self::new(DEFAULT_QUERY_TIMEOUT)
    }

    /// GET `http://{address}{path}` with query-string parameters,
    /// decoding the body as raw JSON. Parameters are percent-encoded by
    /// reqwest; callers never build query strings by hand.
    pub(crate) async fn get_json(
        &self,
        address: &str,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, QueryError> {
        let url = format!("http://{address}{path}");
        trace!(%url, "get");
        let response = self
            .inner
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|err| self.classify(err))?
            .error_for_status()
            .map_err(|err| QueryError::Malformed(err.to_string()))?;
        response
            .json::<serde_json::Value>()
            .await
            .map_err(|err| self.classify(err))
    }

    fn classify(&self, err: reqwest::Error) -> QueryError {
        if err.is_timeout() {
            QueryError::Timeout(self.timeout)
        } else if err.is_decode() {
            QueryError::Malformed(err.to_string())
        } else {
            // connect errors, refused ports, dead hosts
            QueryError::Unreachable(err.to_string())
        }
    }
}

#[async_trait]
impl NodeQuery for HttpNodeClient {
    async fn query(&self, address: &str) -> Result<NodeInfo, QueryError> {
        let url = format!("http://{address}{NODE_INFO_PATH}");
        trace!(%url, "snapshot query");
        let response = self
            .inner
            .get(&url)
            .send()
            .await
            .map_err(|err| self.classify(err))?
            .error_for_status()
            .map_err(|err| QueryError::Malformed(err.to_string()))?;
        // Schema-typed decode: any missing or mismatched field fails
        // closed as Malformed.
        response
            .json::<NodeInfo>()
            .await
            .map_err(|err| self.classify(err))
    }
}
