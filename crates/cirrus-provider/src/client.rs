//! Provider gateway trait and HTTP client.
//!
//! This module provides the [`ComputeProvider`] trait the lifecycle
//! controller consumes, and [`HttpComputeProvider`], the client for the
//! provider's REST API. The trait exists so tests can substitute an
//! in-memory provider without any process-wide state.

use std::time::Duration;

use async_trait::async_trait;
use cirrus_core::InstanceId;
use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};
use crate::types::{CallerIdentity, InstanceRecord, Reservation};

/// The boundary through which cirrus talks to the remote compute provider.
///
/// Every call is a point-in-time read or a fire-and-forget mutation; the
/// provider remains the single source of truth for instance state.
#[async_trait]
pub trait ComputeProvider: Send + Sync {
    /// Describe a single instance.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Api` with code `InstanceNotFound` when the
    /// id does not exist, any other `Api` code the provider reports, or
    /// `Transport`/`Decode` when no usable answer was produced.
    async fn describe_instance(&self, instance_id: &InstanceId) -> Result<InstanceRecord>;

    /// Describe every instance, grouped in the provider's reservations.
    ///
    /// The returned sequence is fully materialized; if the provider API
    /// ever paginates, the pages are joined here, behind this boundary.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider call fails.
    async fn describe_all_instances(&self) -> Result<Vec<Reservation>>;

    /// Issue a stop for the instance. Does not wait for completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider rejects the call.
    async fn stop_instance(&self, instance_id: &InstanceId) -> Result<()>;

    /// Issue a start for the instance. Does not wait for completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider rejects the call.
    async fn start_instance(&self, instance_id: &InstanceId) -> Result<()>;

    /// Resolve the identity behind our credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected or the call fails.
    async fn caller_identity(&self) -> Result<CallerIdentity>;

    /// The provider region this gateway is bound to.
    fn region(&self) -> &str;
}

/// Configuration for the HTTP provider client.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the provider API (e.g. `"https://compute.example.com"`).
    pub base_url: String,

    /// Region the client operates in. Informational, attached to listings.
    #[serde(default = "ProviderConfig::default_region")]
    pub region: String,

    /// Bearer token attached to every request, if set.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Overall request timeout in seconds.
    #[serde(default = "ProviderConfig::default_timeout")]
    pub timeout_seconds: u64,

    /// Connect timeout in seconds.
    #[serde(default = "ProviderConfig::default_connect_timeout")]
    pub connect_timeout_seconds: u64,
}

impl ProviderConfig {
    /// Create a config for the given base URL with defaults elsewhere.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            region: Self::default_region(),
            api_token: None,
            timeout_seconds: Self::default_timeout(),
            connect_timeout_seconds: Self::default_connect_timeout(),
        }
    }

    fn default_region() -> String {
        "us-east-1".to_string()
    }

    const fn default_timeout() -> u64 {
        30
    }

    const fn default_connect_timeout() -> u64 {
        5
    }
}

/// Error payload returned by the provider on non-2xx responses.
#[derive(Debug, Deserialize, Serialize)]
struct WireError {
    code: String,
    message: String,
}

/// Body of the bulk describe response.
#[derive(Debug, Deserialize)]
struct DescribeAllResponse {
    reservations: Vec<Reservation>,
}

/// HTTP client for the provider's REST API.
///
/// # Endpoints
///
/// - `GET  /v1/instances` - bulk describe, reservations included
/// - `GET  /v1/instances/{id}` - describe one instance
/// - `POST /v1/instances/{id}/stop` - request a stop
/// - `POST /v1/instances/{id}/start` - request a start
/// - `GET  /v1/identity` - resolve caller identity
#[derive(Debug, Clone)]
pub struct HttpComputeProvider {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl HttpComputeProvider {
    /// Create a new provider client.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created (should never happen
    /// with default TLS).
    #[must_use]
    pub fn new(config: ProviderConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .build()
            .expect("failed to create HTTP client");

        Self { client, config }
    }

    /// Create a provider client with a pre-built reqwest client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: ProviderConfig) -> Self {
        Self { client, config }
    }

    /// Base URL of the provider API.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.client.get(format!("{}{path}", self.config.base_url)))
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.client.post(format!("{}{path}", self.config.base_url)))
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Turn a non-2xx response into a `ProviderError`, keeping the
    /// provider's code verbatim when the body decodes.
    async fn error_from_response(
        response: reqwest::Response,
        instance_id: Option<&InstanceId>,
    ) -> ProviderError {
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            if let Some(id) = instance_id {
                return ProviderError::api(
                    "InvalidInstanceID.NotFound",
                    format!("instance {id} not found"),
                );
            }
        }

        match response.json::<WireError>().await {
            Ok(wire) => ProviderError::api(&wire.code, wire.message),
            Err(_) => ProviderError::api(
                &format!("Http{}", status.as_u16()),
                format!("provider returned status {status}"),
            ),
        }
    }

    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
        instance_id: Option<&InstanceId>,
    ) -> Result<reqwest::Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::error_from_response(response, instance_id).await)
        }
    }
}

#[async_trait]
impl ComputeProvider for HttpComputeProvider {
    async fn describe_instance(&self, instance_id: &InstanceId) -> Result<InstanceRecord> {
        let response = self
            .send(
                self.get(&format!("/v1/instances/{instance_id}")),
                Some(instance_id),
            )
            .await?;

        response
            .json::<InstanceRecord>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }

    async fn describe_all_instances(&self) -> Result<Vec<Reservation>> {
        let response = self.send(self.get("/v1/instances"), None).await?;

        let body = response
            .json::<DescribeAllResponse>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        Ok(body.reservations)
    }

    async fn stop_instance(&self, instance_id: &InstanceId) -> Result<()> {
        self.send(
            self.post(&format!("/v1/instances/{instance_id}/stop")),
            Some(instance_id),
        )
        .await?;

        tracing::debug!(instance_id = %instance_id, "stop submitted to provider");
        Ok(())
    }

    async fn start_instance(&self, instance_id: &InstanceId) -> Result<()> {
        self.send(
            self.post(&format!("/v1/instances/{instance_id}/start")),
            Some(instance_id),
        )
        .await?;

        tracing::debug!(instance_id = %instance_id, "start submitted to provider");
        Ok(())
    }

    async fn caller_identity(&self) -> Result<CallerIdentity> {
        let response = self.send(self.get("/v1/identity"), None).await?;

        response
            .json::<CallerIdentity>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }

    fn region(&self) -> &str {
        &self.config.region
    }
}
