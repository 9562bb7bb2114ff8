// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Swarm actions
//!
//! Each action makes one call to the backend-for-frontend and, only once the
//! server has confirmed, dispatches the matching updates into the caller's
//! [`Store`]. A failed call is logged and returned with the store untouched.

use tracing::{error, warn};

use swarm_core::domain::state::{Action, Store};
use swarm_core::domain::swarm::{SwarmId, SwarmInfo, UserSwarms};

use crate::client::{ClientError, SwarmInterfaceClient};

pub struct SwarmActions {
    client: SwarmInterfaceClient,
}

impl SwarmActions {
    pub fn new(client: SwarmInterfaceClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &SwarmInterfaceClient {
        &self.client
    }

    /// Delete a swarm, then replace the listing and clear the selection.
    ///
    /// The selection is cleared even when the deleted swarm was not the one
    /// selected.
    pub async fn handle_delete_swarm(
        &self,
        store: &mut Store,
        swarm_id: &SwarmId,
    ) -> Result<(), ClientError> {
        match self.client.delete_swarm(swarm_id).await {
            Ok(data) => {
                apply_listing(store, data.user_swarms);
                store.dispatch(Action::SetCurrentSwarm(SwarmId::none()));
                Ok(())
            }
            Err(e) => {
                error!("Error deleting swarm: {}", e);
                Err(e)
            }
        }
    }

    /// Create a swarm and select it. Returns the new identifier.
    ///
    /// A response without an identifier still refreshes the listing but
    /// leaves the selection and the loaded swarm as they were.
    pub async fn handle_create_swarm(
        &self,
        store: &mut Store,
        new_swarm_name: &str,
    ) -> Result<SwarmId, ClientError> {
        match self.client.create_swarm(new_swarm_name).await {
            Ok(data) => {
                if let Some(listing) = data.user_swarms {
                    apply_listing(store, listing);
                }
                let swarm_id = data.info.swarm_id.clone();
                if swarm_id.is_none() {
                    warn!("Created swarm '{}' came back without an id", new_swarm_name);
                    return Ok(swarm_id);
                }
                store.dispatch(Action::SetSwarm(data.info));
                store.dispatch(Action::SetCurrentSwarm(swarm_id.clone()));
                Ok(swarm_id)
            }
            Err(e) => {
                error!("Error creating swarm: {}", e);
                Err(e)
            }
        }
    }

    /// Start a swarm. When it is the loaded swarm, the loaded record is marked
    /// spawned with the new goal.
    pub async fn handle_start_swarm(
        &self,
        store: &mut Store,
        swarm_id: &SwarmId,
        goal: &str,
    ) -> Result<(), ClientError> {
        if let Err(e) = self.client.start_swarm(swarm_id, goal).await {
            error!("Error starting swarm: {}", e);
            return Err(e);
        }

        let loaded = &store.state().swarm.info;
        if &loaded.swarm_id == swarm_id {
            let info = SwarmInfo {
                spawned: true,
                goal: goal.to_string(),
                ..loaded.clone()
            };
            store.dispatch(Action::SetSwarm(info));
        }
        Ok(())
    }

    /// Load a swarm record and select it.
    ///
    /// Stored records do not carry their own id, so the requested id is
    /// filled in before the record is kept.
    pub async fn handle_load_swarm(
        &self,
        store: &mut Store,
        swarm_id: &SwarmId,
    ) -> Result<SwarmInfo, ClientError> {
        match self.client.get_swarm(swarm_id).await {
            Ok(mut info) => {
                if info.swarm_id.is_none() && !info.is_empty() {
                    info.swarm_id = swarm_id.clone();
                }
                store.dispatch(Action::SetSwarm(info.clone()));
                store.dispatch(Action::SetCurrentSwarm(swarm_id.clone()));
                Ok(info)
            }
            Err(e) => {
                error!("Error loading swarm: {}", e);
                Err(e)
            }
        }
    }
}

fn apply_listing(store: &mut Store, listing: UserSwarms) {
    store.dispatch(Action::SetUserSwarms(listing));
}
