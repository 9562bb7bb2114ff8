// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use thiserror::Error;

use swarm_core::domain::swarm::{
    CreateSwarmRequest, CreateSwarmResponse, DeleteSwarmRequest, DeleteSwarmResponse,
    GetSwarmRequest, StartSwarmRequest, SwarmId, SwarmInfo,
};

/// The mutation a failed request belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Delete,
    Start,
    Load,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Operation::Create => "Creating",
            Operation::Delete => "Deleting",
            Operation::Start => "Starting",
            Operation::Load => "Loading",
        };
        f.write_str(verb)
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request to swarm interface failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The BFF answered with a non-success status. It never says why.
    #[error("{operation} swarm failed due to server error")]
    ServerError { operation: Operation, status: u16 },

    #[error("Malformed response from swarm interface: {source}")]
    Decode {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },
}

/// Client for the swarm interface backend-for-frontend.
#[derive(Debug, Clone)]
pub struct SwarmInterfaceClient {
    base_url: String,
    client: Client,
}

impl SwarmInterfaceClient {
    /// Create a new client. `base_url` is the BFF origin, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn create_swarm(&self, new_swarm_name: &str) -> Result<CreateSwarmResponse, ClientError> {
        let body = CreateSwarmRequest {
            new_swarm_name: new_swarm_name.to_string(),
        };
        self.post(Operation::Create, "/api/spawn/createSwarm", &body).await
    }

    pub async fn delete_swarm(&self, swarm_id: &SwarmId) -> Result<DeleteSwarmResponse, ClientError> {
        let body = DeleteSwarmRequest {
            swarm_id: swarm_id.clone(),
        };
        self.post(Operation::Delete, "/api/spawn/deleteSwarm", &body).await
    }

    /// Start a swarm working towards `goal`. The upstream answers with an
    /// empty object, which is returned as-is.
    pub async fn start_swarm(
        &self,
        swarm_id: &SwarmId,
        goal: &str,
    ) -> Result<serde_json::Value, ClientError> {
        let body = StartSwarmRequest {
            swarm_id: swarm_id.clone(),
            goal: goal.to_string(),
        };
        self.post(Operation::Start, "/api/spawn/startSwarm", &body).await
    }

    pub async fn get_swarm(&self, swarm_id: &SwarmId) -> Result<SwarmInfo, ClientError> {
        let body = GetSwarmRequest {
            swarm_id: swarm_id.clone(),
        };
        self.post(Operation::Load, "/api/spawn/getSwarm", &body).await
    }

    async fn post<B, R>(&self, operation: Operation, path: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.post(&url).json(body).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::ServerError {
                operation,
                status: response.status().as_u16(),
            });
        }

        response
            .json()
            .await
            .map_err(|source| ClientError::Decode { operation, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_message_names_the_operation() {
        let err = ClientError::ServerError {
            operation: Operation::Delete,
            status: 500,
        };
        assert_eq!(err.to_string(), "Deleting swarm failed due to server error");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = SwarmInterfaceClient::new("http://127.0.0.1:3000/");
        assert_eq!(client.base_url(), "http://127.0.0.1:3000");
    }

    #[tokio::test]
    async fn test_get_swarm_decodes_info() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/spawn/getSwarm")
            .match_body(mockito::Matcher::Json(serde_json::json!({ "swarmId": "s1" })))
            .with_status(200)
            .with_body(
                r#"{"name":"alpha","goal":"","spawned":false,"swarm_users":["u1"],"swarm_id":"s1"}"#,
            )
            .create_async()
            .await;

        let client = SwarmInterfaceClient::new(server.url());
        let info = client.get_swarm(&"s1".into()).await.unwrap();
        assert_eq!(info.name, "alpha");
        assert_eq!(info.swarm_users, vec!["u1".to_string()]);
    }

    #[tokio::test]
    async fn test_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/spawn/deleteSwarm")
            .with_status(200)
            .with_body(r#"{"unexpected":true}"#)
            .create_async()
            .await;

        let client = SwarmInterfaceClient::new(server.url());
        assert!(matches!(
            client.delete_swarm(&"s1".into()).await,
            Err(ClientError::Decode { operation: Operation::Delete, .. })
        ));
    }
}
