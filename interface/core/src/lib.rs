// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # `swarm-core` — Swarm Interface Core
//!
//! Shared building blocks for the swarm interface backend-for-frontend and its
//! clients.
//!
//! | Module | Layer | Contents |
//! |--------|-------|----------|
//! | [`domain`] | Domain | `SwarmId`, `UserSwarms`, `SwarmInfo`, the UI store, configuration |
//! | [`application`] | Application | `SwarmBackend` relay trait and its HTTP implementation |
//! | [`presentation`] | Presentation | Axum router exposing the `/api/spawn/*` routes |

pub mod domain;
pub mod application;
pub mod presentation;

pub use domain::*;
