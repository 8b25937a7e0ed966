//! Fetch client with dependency tagging.

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

use crate::dependency::DependencyTag;
use crate::outcome::FetchOutcome;
use crate::request::{Method, MultipartForm, RequestBuilder};
use crate::timeout::FetchPolicy;
use crate::transport::{ReqwestTransport, Transport};
use crate::{FetchError, Response};

/// Fetch client with per-dependency timeout and retry.
///
/// Cloning is cheap; clones share the transport.
#[derive(Clone)]
pub struct FetchClient {
    transport: Arc<dyn Transport>,
    default_headers: HashMap<String, String>,
    policies: HashMap<DependencyTag, FetchPolicy>,
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("default_headers", &self.default_headers)
            .field("policies", &self.policies)
            .finish_non_exhaustive()
    }
}

impl FetchClient {
    /// Create a client over the given transport, with tag default policies.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let policies = DependencyTag::ALL
            .iter()
            .map(|tag| (*tag, FetchPolicy::from_tag(*tag)))
            .collect();
        Self {
            transport,
            default_headers: HashMap::new(),
            policies,
        }
    }

    /// Create a client backed by `reqwest`.
    pub fn reqwest() -> Result<Self, FetchError> {
        let connect = FetchPolicy::default().timeout.connect;
        Ok(Self::new(Arc::new(ReqwestTransport::new(connect)?)))
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Override the policy for one dependency.
    pub fn with_policy(mut self, tag: DependencyTag, policy: FetchPolicy) -> Self {
        self.policies.insert(tag, policy);
        self
    }

    /// Rewrite every dependency's policy.
    pub fn map_policies(mut self, mut f: impl FnMut(DependencyTag, &mut FetchPolicy)) -> Self {
        for (tag, policy) in self.policies.iter_mut() {
            f(*tag, policy);
        }
        self
    }

    /// The policy applied to requests tagged with `tag`.
    pub fn policy(&self, tag: DependencyTag) -> FetchPolicy {
        self.policies
            .get(&tag)
            .cloned()
            .unwrap_or_else(|| FetchPolicy::from_tag(tag))
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>, tag: DependencyTag) -> ClientRequestBuilder {
        self.request(Method::Get, url, tag)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>, tag: DependencyTag) -> ClientRequestBuilder {
        self.request(Method::Post, url, tag)
    }

    /// Create a request with a custom method.
    pub fn request(
        &self,
        method: Method,
        url: impl Into<String>,
        tag: DependencyTag,
    ) -> ClientRequestBuilder {
        let mut builder = RequestBuilder::new(method, url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            transport: Arc::clone(&self.transport),
            policy: self.policy(tag),
            tag,
            builder,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    transport: Arc<dyn Transport>,
    policy: FetchPolicy,
    tag: DependencyTag,
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize + ?Sized>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Set a multipart form body.
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.builder = self.builder.multipart(form);
        self
    }

    /// Override the policy for this request only.
    pub fn policy(mut self, policy: FetchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Send the request and return the response, whatever its status.
    ///
    /// Each attempt is bounded by the policy's total timeout. Only idempotent
    /// methods are retried.
    pub async fn send(self) -> Result<Response, FetchError> {
        let request = self.builder.build();
        let retry = &self.policy.retry;
        let mut attempt = 0u32;

        loop {
            let started = Instant::now();
            let result = match tokio::time::timeout(
                self.policy.timeout.total,
                self.transport.execute(request.clone()),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => Err(FetchError::Timeout),
            };

            let Some(delay) = retry.next_delay(request.method, &result, attempt) else {
                match &result {
                    Ok(resp) => debug!(
                        dependency = %self.tag,
                        method = request.method.as_str(),
                        url = %request.url,
                        status = resp.status,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "fetch complete"
                    ),
                    Err(e) => debug!(
                        dependency = %self.tag,
                        method = request.method.as_str(),
                        url = %request.url,
                        error = %e,
                        "fetch failed"
                    ),
                }
                return result;
            };

            warn!(
                dependency = %self.tag,
                url = %request.url,
                attempt = attempt + 1,
                delay_ms = delay.as_millis() as u64,
                "retrying fetch"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    /// Send, require a 2xx status, and decode the JSON body.
    pub async fn send_json<T: DeserializeOwned>(self) -> Result<T, FetchError> {
        self.send().await?.error_for_status()?.json()
    }

    /// Send and classify the result as loaded, empty or failed.
    pub async fn fetch_outcome<T: DeserializeOwned>(self) -> FetchOutcome<T> {
        let result = match self.send().await.and_then(Response::error_for_status) {
            Ok(resp) => resp.json_opt(),
            Err(e) => Err(e),
        };
        FetchOutcome::from_result(result)
    }
}
