// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Swarm commands
//!
//! Commands: create, delete, start, show, list
//!
//! Every command talks to a running backend-for-frontend and keeps the local
//! UI state file in step with its answers.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;
use tracing::debug;

use swarm_core::domain::interface_config::InterfaceConfigManifest;
use swarm_core::domain::state::{Store, UiState};
use swarm_core::domain::swarm::{SwarmId, SwarmInfo};
use swarm_sdk::{SwarmActions, SwarmInterfaceClient};

#[derive(Subcommand)]
pub enum SwarmCommand {
    /// Create a swarm and select it
    Create {
        /// Display name of the new swarm
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Delete a swarm (clears the current selection)
    Delete {
        #[arg(value_name = "SWARM_ID")]
        swarm_id: String,
    },

    /// Start a swarm working towards a goal
    Start {
        #[arg(value_name = "SWARM_ID")]
        swarm_id: String,

        #[arg(value_name = "GOAL")]
        goal: String,
    },

    /// Load a swarm and select it (default: the current selection)
    Show {
        #[arg(value_name = "SWARM_ID")]
        swarm_id: Option<String>,
    },

    /// List known swarms from the local state
    List,
}

pub async fn handle_command(
    command: SwarmCommand,
    config_path: Option<PathBuf>,
    url: Option<String>,
) -> Result<()> {
    let config = InterfaceConfigManifest::load_or_default(config_path)
        .context("Failed to load configuration")?;

    let base_url = url.unwrap_or_else(|| config.spec.client.base_url.clone());
    let state_path = config.state_file_path();
    debug!("Using swarm interface at {} with state {:?}", base_url, state_path);

    let mut store = Store::load(&state_path)?;
    let actions = SwarmActions::new(SwarmInterfaceClient::new(base_url));

    let mutated = run(command, &actions, &mut store).await?;
    if mutated {
        store.save(&state_path)?;
    }
    Ok(())
}

/// Execute one command against `store`. Returns whether the store may have
/// changed.
pub async fn run(command: SwarmCommand, actions: &SwarmActions, store: &mut Store) -> Result<bool> {
    match command {
        SwarmCommand::Create { name } => {
            let swarm_id = actions.handle_create_swarm(store, &name).await?;
            if swarm_id.is_none() {
                println!(
                    "{}",
                    format!("Swarm '{}' created but the server returned no id", name).yellow()
                );
                return Ok(true);
            }
            println!(
                "{}",
                format!("✓ Swarm '{}' created: {}", name, swarm_id).green()
            );
            Ok(true)
        }
        SwarmCommand::Delete { swarm_id } => {
            let swarm_id = SwarmId::new(swarm_id);
            actions.handle_delete_swarm(store, &swarm_id).await?;
            println!("{}", format!("✓ Swarm {} deleted", swarm_id).green());
            print_listing(store.state());
            Ok(true)
        }
        SwarmCommand::Start { swarm_id, goal } => {
            let swarm_id = SwarmId::new(swarm_id);
            actions.handle_start_swarm(store, &swarm_id, &goal).await?;
            println!("{}", format!("✓ Swarm {} started", swarm_id).green());
            Ok(true)
        }
        SwarmCommand::Show { swarm_id } => {
            let swarm_id = match swarm_id {
                Some(id) => SwarmId::new(id),
                None => store.state().user.current_swarm.clone(),
            };
            if swarm_id.is_none() {
                println!("{}", "No swarm selected".yellow());
                return Ok(false);
            }
            let info = actions.handle_load_swarm(store, &swarm_id).await?;
            print_swarm(&info);
            Ok(true)
        }
        SwarmCommand::List => {
            print_listing(store.state());
            Ok(false)
        }
    }
}

fn print_listing(state: &UiState) {
    let user = &state.user;
    if user.swarm_ids.is_empty() {
        println!("{}", "No swarms found".yellow());
        return;
    }

    println!("{} swarms:", user.swarm_ids.len());
    println!("  {:<38} {}", "ID", "NAME");
    for swarm_id in &user.swarm_ids {
        let name = user.swarm_names.get(swarm_id).map(String::as_str).unwrap_or("");
        if swarm_id == &user.current_swarm {
            println!("* {:<38} {}", swarm_id.as_str().bold(), name.bold());
        } else {
            println!("  {:<38} {}", swarm_id, name);
        }
    }
}

fn print_swarm(info: &SwarmInfo) {
    if info.is_empty() {
        println!("{}", "Swarm not found".yellow());
        return;
    }
    println!("{} {}", "Swarm:".bold(), info.name);
    println!("  ID: {}", info.swarm_id);
    println!(
        "  Status: {}",
        if info.spawned {
            "spawned".green()
        } else {
            "idle".dimmed()
        }
    );
    if !info.goal.is_empty() {
        println!("  Goal: {}", info.goal);
    }
    if !info.swarm_users.is_empty() {
        println!("  Users: {}", info.swarm_users.join(", "));
    }
}
