// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Swarm Interface Rust SDK
//!
//! Talks to the swarm interface backend-for-frontend and keeps a local
//! [`Store`](swarm_core::Store) in step with what it reports.

pub mod client;
pub mod actions;

pub use actions::SwarmActions;
pub use client::{ClientError, Operation, SwarmInterfaceClient};
