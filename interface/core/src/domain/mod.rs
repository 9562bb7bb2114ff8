// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Domain Layer
//!
//! Pure types with no network I/O.
//!
//! | Module | Key Types |
//! |--------|-----------|
//! | [`swarm`] | `SwarmId`, `UserSwarms`, `SwarmInfo`, route payloads |
//! | [`state`] | `UiState`, `Action`, `Store` |
//! | [`interface_config`] | `InterfaceConfigManifest` |

pub mod swarm;
pub mod state;
pub mod interface_config;

pub use swarm::*;
pub use state::*;
