// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Upstream swarm service relay
//!
//! Every operation forwards one JSON body to one configured upstream endpoint
//! and hands back the upstream's JSON body untouched. There are no retries
//! and no idempotency keys: a repeated create produces a repeated swarm.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Relays swarm mutations to the upstream service

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::domain::interface_config::UpstreamConfig;
use crate::domain::swarm::SwarmId;

/// Why a route failed. None of this detail reaches the caller of the HTTP
/// route; it is logged and replaced by the generic server error.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Rejected client payload: {0}")]
    InvalidPayload(String),

    #[error("Upstream endpoint for {0} is not configured")]
    NotConfigured(&'static str),

    #[error("Upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Upstream responded {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Upstream returned malformed JSON: {0}")]
    Decode(#[source] reqwest::Error),
}

#[async_trait]
pub trait SwarmBackend: Send + Sync {
    async fn create_swarm(&self, new_swarm_name: &str) -> Result<Value, ProxyError>;
    async fn delete_swarm(&self, swarm_id: &SwarmId) -> Result<Value, ProxyError>;
    async fn start_swarm(&self, swarm_id: &SwarmId, goal: &str) -> Result<Value, ProxyError>;
    async fn get_swarm(&self, swarm_id: &SwarmId) -> Result<Value, ProxyError>;
}

/// [`SwarmBackend`] speaking JSON over HTTP to the configured endpoints.
#[derive(Debug, Clone)]
pub struct HttpSwarmBackend {
    client: Client,
    upstream: UpstreamConfig,
    delete_method: Method,
}

impl HttpSwarmBackend {
    pub fn new(upstream: UpstreamConfig) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = upstream.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        let delete_method = match upstream.delete_method.to_ascii_uppercase().as_str() {
            "DELETE" => Method::DELETE,
            "POST" => Method::POST,
            other => anyhow::bail!("Unsupported upstream delete method: {}", other),
        };

        Ok(Self {
            client,
            upstream,
            delete_method,
        })
    }

    async fn relay(
        &self,
        operation: &'static str,
        method: Method,
        url: Option<&str>,
        body: Value,
    ) -> Result<Value, ProxyError> {
        let url = url.ok_or(ProxyError::NotConfigured(operation))?;
        debug!("Relaying {} to {} {}", operation, method, url);

        let response = self.client.request(method, url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            // Prefer the upstream's own `error` field when it sends one
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|payload| payload.get("error").and_then(Value::as_str).map(str::to_owned))
                .unwrap_or_else(|| format!("Request failed with status: {}", status.as_u16()));
            return Err(ProxyError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<Value>().await.map_err(ProxyError::Decode)
    }
}

#[async_trait]
impl SwarmBackend for HttpSwarmBackend {
    async fn create_swarm(&self, new_swarm_name: &str) -> Result<Value, ProxyError> {
        self.relay(
            "create_swarm",
            Method::POST,
            self.upstream.create_swarm_url.as_deref(),
            json!({ "new_swarm_name": new_swarm_name }),
        )
        .await
    }

    async fn delete_swarm(&self, swarm_id: &SwarmId) -> Result<Value, ProxyError> {
        self.relay(
            "delete_swarm",
            self.delete_method.clone(),
            self.upstream.delete_swarm_url.as_deref(),
            json!({ "swarm_id": swarm_id }),
        )
        .await
    }

    async fn start_swarm(&self, swarm_id: &SwarmId, goal: &str) -> Result<Value, ProxyError> {
        self.relay(
            "start_swarm",
            Method::POST,
            self.upstream.start_swarm_url.as_deref(),
            json!({ "swarm_id": swarm_id, "goal": goal }),
        )
        .await
    }

    async fn get_swarm(&self, swarm_id: &SwarmId) -> Result<Value, ProxyError> {
        self.relay(
            "get_swarm",
            Method::POST,
            self.upstream.get_swarm_url.as_deref(),
            json!({ "swarm_id": swarm_id }),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn upstream_at(base: &str) -> UpstreamConfig {
        UpstreamConfig {
            create_swarm_url: Some(format!("{}/spawn/create_swarm", base)),
            delete_swarm_url: Some(format!("{}/spawn/delete_swarm", base)),
            delete_method: "DELETE".to_string(),
            start_swarm_url: Some(format!("{}/spawn/start_swarm", base)),
            get_swarm_url: None,
            timeout_secs: Some(5),
        }
    }

    #[tokio::test]
    async fn test_create_forwards_snake_case_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/spawn/create_swarm")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({ "new_swarm_name": "alpha" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"swarm_id":"s1"}"#)
            .create_async()
            .await;

        let backend = HttpSwarmBackend::new(upstream_at(&server.url())).unwrap();
        let body = backend.create_swarm("alpha").await.unwrap();

        assert_eq!(body, json!({ "swarm_id": "s1" }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_uses_configured_method() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/spawn/delete_swarm")
            .match_body(Matcher::Json(json!({ "swarm_id": "s1" })))
            .with_status(200)
            .with_body(r#"{"user_swarms":{"swarm_ids":[],"swarm_names":{}}}"#)
            .create_async()
            .await;

        let backend = HttpSwarmBackend::new(upstream_at(&server.url())).unwrap();
        backend.delete_swarm(&"s1".into()).await.unwrap();
        mock.assert_async().await;

        let mut config = upstream_at(&server.url());
        config.delete_method = "POST".to_string();
        let post_mock = server
            .mock("POST", "/spawn/delete_swarm")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;
        HttpSwarmBackend::new(config)
            .unwrap()
            .delete_swarm(&"s1".into())
            .await
            .unwrap();
        post_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_upstream_error_field_is_captured() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/spawn/start_swarm")
            .with_status(403)
            .with_body(r#"{"error":"User is not part of the swarm"}"#)
            .create_async()
            .await;

        let backend = HttpSwarmBackend::new(upstream_at(&server.url())).unwrap();
        match backend.start_swarm(&"s9".into(), "goal").await {
            Err(ProxyError::Upstream { status, message }) => {
                assert_eq!(status, 403);
                assert_eq!(message, "User is not part of the swarm");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upstream_error_without_payload() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/spawn/create_swarm")
            .with_status(502)
            .with_body("bad gateway")
            .create_async()
            .await;

        let backend = HttpSwarmBackend::new(upstream_at(&server.url())).unwrap();
        match backend.create_swarm("alpha").await {
            Err(ProxyError::Upstream { status, message }) => {
                assert_eq!(status, 502);
                assert_eq!(message, "Request failed with status: 502");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/spawn/create_swarm")
            .with_status(200)
            .with_body("<html>")
            .create_async()
            .await;

        let backend = HttpSwarmBackend::new(upstream_at(&server.url())).unwrap();
        assert!(matches!(
            backend.create_swarm("alpha").await,
            Err(ProxyError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_unconfigured_endpoint() {
        let backend = HttpSwarmBackend::new(upstream_at("http://127.0.0.1:9")).unwrap();
        assert!(matches!(
            backend.get_swarm(&"s1".into()).await,
            Err(ProxyError::NotConfigured("get_swarm"))
        ));
    }

    #[test]
    fn test_rejects_unknown_delete_method() {
        let mut config = upstream_at("http://127.0.0.1:9");
        config.delete_method = "PATCH".to_string();
        assert!(HttpSwarmBackend::new(config).is_err());
    }
}
