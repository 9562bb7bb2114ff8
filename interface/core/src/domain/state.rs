// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # UI State Store
//!
//! Client-side cache of what the upstream last reported. The state is split
//! into two slices:
//!
//! - `user` — the user's swarm listing and the current selection.
//! - `swarm` — the swarm record currently loaded.
//!
//! All mutation goes through [`reduce`], a pure function from prior state and
//! an [`Action`] to the next state. A [`Store`] owns one state value and is
//! handed explicitly to whoever needs to dispatch; there is no global store.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::swarm::{SwarmId, SwarmInfo, SwarmNames, UserSwarms};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSlice {
    #[serde(default)]
    pub swarm_ids: Vec<SwarmId>,
    #[serde(default)]
    pub swarm_names: SwarmNames,
    /// Empty when nothing is selected.
    #[serde(default)]
    pub current_swarm: SwarmId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwarmSlice {
    #[serde(default)]
    pub info: SwarmInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    #[serde(default)]
    pub user: UserSlice,
    #[serde(default)]
    pub swarm: SwarmSlice,
}

impl UiState {
    /// Display name of the current selection, if any.
    pub fn current_swarm_name(&self) -> Option<&str> {
        if self.user.current_swarm.is_none() {
            return None;
        }
        self.user
            .swarm_names
            .get(&self.user.current_swarm)
            .map(String::as_str)
    }

    pub fn knows_swarm(&self, swarm_id: &SwarmId) -> bool {
        self.user.swarm_ids.contains(swarm_id)
    }
}

/// State transitions understood by [`reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace the listing wholesale.
    SetUserSwarms(UserSwarms),
    /// Select a swarm; [`SwarmId::none`] clears the selection.
    SetCurrentSwarm(SwarmId),
    /// Replace the loaded swarm record.
    SetSwarm(SwarmInfo),
}

pub fn reduce(state: &UiState, action: Action) -> UiState {
    let mut next = state.clone();
    match action {
        Action::SetUserSwarms(listing) => {
            next.user.swarm_ids = listing.swarm_ids;
            next.user.swarm_names = listing.swarm_names;
        }
        Action::SetCurrentSwarm(swarm_id) => {
            next.user.current_swarm = swarm_id;
        }
        Action::SetSwarm(info) => {
            next.swarm.info = info;
        }
    }
    next
}

/// Single-writer holder of a [`UiState`].
#[derive(Debug, Clone, Default)]
pub struct Store {
    state: UiState,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: UiState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!(?action, "Dispatching UI action");
        self.state = reduce(&self.state, action);
    }

    /// Load a persisted store. A missing file yields the default state.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No state file at {:?}, starting empty", path);
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read state file {:?}", path))?;
        let state = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse state file {:?}", path))?;
        Ok(Self { state })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {:?}", parent))?;
            }
        }
        let json = serde_json::to_string_pretty(&self.state)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write state file {:?}", path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(entries: &[(&str, &str)]) -> UserSwarms {
        UserSwarms {
            swarm_ids: entries.iter().map(|(id, _)| SwarmId::new(*id)).collect(),
            swarm_names: entries
                .iter()
                .map(|(id, name)| (SwarmId::new(*id), name.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_set_user_swarms_replaces_wholesale() {
        let mut store = Store::new();
        store.dispatch(Action::SetUserSwarms(listing(&[("s1", "alpha"), ("s2", "beta")])));
        store.dispatch(Action::SetUserSwarms(listing(&[("s3", "gamma")])));

        let user = &store.state().user;
        assert_eq!(user.swarm_ids, vec![SwarmId::new("s3")]);
        assert_eq!(user.swarm_names.len(), 1);
        assert_eq!(user.swarm_names.get(&"s3".into()).map(String::as_str), Some("gamma"));
    }

    #[test]
    fn test_reduce_leaves_prior_state_untouched() {
        let prior = UiState::default();
        let next = reduce(&prior, Action::SetCurrentSwarm("s1".into()));
        assert!(prior.user.current_swarm.is_none());
        assert_eq!(next.user.current_swarm, SwarmId::new("s1"));
    }

    #[test]
    fn test_listing_update_keeps_selection() {
        let mut store = Store::new();
        store.dispatch(Action::SetCurrentSwarm("s1".into()));
        store.dispatch(Action::SetUserSwarms(listing(&[("s1", "alpha")])));
        assert_eq!(store.state().current_swarm_name(), Some("alpha"));

        store.dispatch(Action::SetCurrentSwarm(SwarmId::none()));
        assert_eq!(store.state().current_swarm_name(), None);
    }

    #[test]
    fn test_set_swarm() {
        let mut store = Store::new();
        let info = SwarmInfo {
            swarm_id: "s1".into(),
            name: "alpha".to_string(),
            ..Default::default()
        };
        store.dispatch(Action::SetSwarm(info.clone()));
        assert_eq!(store.state().swarm.info, info);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::load(dir.path().join("state.json")).unwrap();
        assert_eq!(store.state(), &UiState::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let mut store = Store::new();
        store.dispatch(Action::SetUserSwarms(listing(&[("s2", "beta")])));
        store.dispatch(Action::SetCurrentSwarm("s2".into()));
        store.save(&path).unwrap();

        let loaded = Store::load(&path).unwrap();
        assert_eq!(loaded.state(), store.state());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(Store::load(&path).is_err());
    }
}
