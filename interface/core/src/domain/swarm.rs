// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Swarm Domain Types
//!
//! - [`SwarmId`] — opaque identifier owned by the upstream swarm service.
//! - [`UserSwarms`] — the per-user listing returned by every mutation.
//! - [`SwarmInfo`] — a single swarm record.
//!
//! The route payload types at the bottom of this module describe the JSON
//! exchanged between clients and the backend-for-frontend. Client-facing
//! fields use camelCase, except `swarm_id` on delete, which clients have
//! always sent in snake_case.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Opaque swarm identifier. The empty identifier means "no swarm".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SwarmId(pub String);

impl SwarmId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The "none selected" identifier.
    pub fn none() -> Self {
        Self(String::new())
    }

    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SwarmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SwarmId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SwarmId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Swarm identifier to display name. Order carries no meaning.
pub type SwarmNames = HashMap<SwarmId, String>;

/// The swarms a user belongs to, as reported by the upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSwarms {
    #[serde(default)]
    pub swarm_ids: Vec<SwarmId>,
    #[serde(default)]
    pub swarm_names: SwarmNames,
}

impl UserSwarms {
    pub fn contains(&self, swarm_id: &SwarmId) -> bool {
        self.swarm_ids.contains(swarm_id)
    }

    pub fn name_of(&self, swarm_id: &SwarmId) -> Option<&str> {
        self.swarm_names.get(swarm_id).map(String::as_str)
    }
}

/// A swarm record as the upstream stores it.
///
/// Every field defaults, so the empty record the upstream returns for an
/// unknown id decodes to [`SwarmInfo::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwarmInfo {
    #[serde(default)]
    pub swarm_id: SwarmId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub spawned: bool,
    #[serde(default)]
    pub swarm_users: Vec<String>,
}

impl SwarmInfo {
    /// True for the record the upstream returns for an unknown id. The id
    /// itself is not considered.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.goal.is_empty() && !self.spawned && self.swarm_users.is_empty()
    }
}

// === Client → BFF payloads ===

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSwarmRequest {
    #[serde(default)]
    pub new_swarm_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteSwarmRequest {
    #[serde(default)]
    pub swarm_id: SwarmId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSwarmRequest {
    #[serde(default)]
    pub swarm_id: SwarmId,
    #[serde(default)]
    pub goal: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSwarmRequest {
    #[serde(default)]
    pub swarm_id: SwarmId,
}

// === BFF → client success bodies ===

/// Body returned after a create: the new swarm record plus the refreshed
/// listing. The listing is absent when the upstream only echoes the id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSwarmResponse {
    #[serde(flatten)]
    pub info: SwarmInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_swarms: Option<UserSwarms>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteSwarmResponse {
    pub user_swarms: UserSwarms,
}
