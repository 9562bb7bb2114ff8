// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod backend;

pub use backend::{HttpSwarmBackend, ProxyError, SwarmBackend};
