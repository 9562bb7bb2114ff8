// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Interface Configuration Types
//
// Defines the configuration schema for the swarm interface, including:
// - Kubernetes-style manifest format (apiVersion/kind/metadata/spec)
// - Listen address of the backend-for-frontend
// - Upstream swarm service endpoints
// - Client defaults (BFF base URL, state file)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const API_VERSION: &str = "swarm-interface/v1";
pub const KIND: &str = "InterfaceConfig";
pub const CONFIG_PATH_ENV: &str = "SWARM_INTERFACE_CONFIG_PATH";

/// Top-level Kubernetes-style interface configuration manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceConfigManifest {
    /// API version (must be "swarm-interface/v1")
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Resource kind (must be "InterfaceConfig")
    pub kind: String,

    pub metadata: ManifestMetadata,

    pub spec: InterfaceConfigSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestMetadata {
    /// Human-readable deployment name
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterfaceConfigSpec {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Endpoints of the upstream swarm service.
///
/// An endpoint left unset disables the matching route: requests to it fail
/// with the generic server error. Omitting the whole `upstream` section
/// instead gives every endpoint its localhost default; once the section is
/// present, only the URLs it lists are enabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default)]
    pub create_swarm_url: Option<String>,

    #[serde(default)]
    pub delete_swarm_url: Option<String>,

    /// HTTP method sent to `delete_swarm_url` ("DELETE" or "POST")
    #[serde(default = "default_delete_method")]
    pub delete_method: String,

    #[serde(default)]
    pub start_swarm_url: Option<String>,

    #[serde(default)]
    pub get_swarm_url: Option<String>,

    /// Per-request timeout. Unset means no timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Where clients reach the backend-for-frontend
    #[serde(default = "default_client_base_url")]
    pub base_url: String,

    /// Persisted UI state (default: ~/.swarm-interface/state.json)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_file: Option<PathBuf>,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_delete_method() -> String {
    "DELETE".to_string()
}

fn default_client_base_url() -> String {
    format!("http://{}:{}", default_bind_address(), default_port())
}

fn default_upstream_url(route: &str) -> Option<String> {
    Some(format!("http://localhost:5000/spawn/{}", route))
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            create_swarm_url: default_upstream_url("create_swarm"),
            delete_swarm_url: default_upstream_url("delete_swarm"),
            delete_method: default_delete_method(),
            start_swarm_url: default_upstream_url("start_swarm"),
            get_swarm_url: default_upstream_url("get_swarm"),
            timeout_secs: None,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_client_base_url(),
            state_file: None,
        }
    }
}

impl Default for InterfaceConfigManifest {
    fn default() -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: ManifestMetadata {
                name: "swarm-interface".to_string(),
                version: None,
                labels: None,
            },
            spec: InterfaceConfigSpec::default(),
        }
    }
}

impl InterfaceConfigManifest {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn to_yaml_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Discover configuration file using precedence order
    /// 1. SWARM_INTERFACE_CONFIG_PATH environment variable
    /// 2. ./swarm-interface.yaml (working directory)
    /// 3. ~/.swarm-interface/config.yaml (user home)
    /// 4. /etc/swarm-interface/config.yaml (system, Unix)
    pub fn discover_config() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from("./swarm-interface.yaml");
        if cwd.exists() {
            return Some(cwd);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".swarm-interface").join("config.yaml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        #[cfg(unix)]
        {
            let system_config = PathBuf::from("/etc/swarm-interface/config.yaml");
            if system_config.exists() {
                return Some(system_config);
            }
        }

        None
    }

    /// Load configuration with discovery, fallback to default
    pub fn load_or_default(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        // Explicit CLI path must exist and parse
        if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(&path).map_err(|e| {
                anyhow::anyhow!("Failed to load config at {:?}: {}", path, e)
            })?;
            config.apply_env_overrides();
            return Ok(config);
        }

        if let Some(config_path) = Self::discover_config() {
            tracing::info!("Loading configuration from discovered path: {:?}", config_path);
            let mut config = Self::from_yaml_file(config_path)?;
            config.apply_env_overrides();
            Ok(config)
        } else {
            tracing::warn!("No configuration file found in standard locations. Using defaults.");
            let mut config = Self::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    /// Apply environment variable overrides to the upstream endpoints
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let upstream = &mut self.spec.upstream;
        let targets: [(&str, &mut Option<String>); 4] = [
            ("SWARM_CREATE_URL", &mut upstream.create_swarm_url),
            ("SWARM_DELETE_URL", &mut upstream.delete_swarm_url),
            ("SWARM_START_URL", &mut upstream.start_swarm_url),
            ("SWARM_GET_URL", &mut upstream.get_swarm_url),
        ];
        for (key, slot) in targets {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                tracing::info!("Environment override: {}={}", key, value);
                *slot = Some(value);
            }
        }
    }

    /// Resolved location of the persisted UI state
    pub fn state_file_path(&self) -> PathBuf {
        if let Some(path) = &self.spec.client.state_file {
            return path.clone();
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".swarm-interface")
            .join("state.json")
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_version != API_VERSION {
            anyhow::bail!(
                "Invalid apiVersion: '{}'. Must be '{}'",
                self.api_version,
                API_VERSION
            );
        }

        if self.kind != KIND {
            anyhow::bail!("Invalid kind: '{}'. Must be '{}'", self.kind, KIND);
        }

        if self.metadata.name.is_empty() {
            anyhow::bail!("metadata.name cannot be empty");
        }

        if self.spec.server.bind_address.is_empty() {
            anyhow::bail!("spec.server.bind_address cannot be empty");
        }

        let upstream = &self.spec.upstream;
        for (field, value) in [
            ("create_swarm_url", &upstream.create_swarm_url),
            ("delete_swarm_url", &upstream.delete_swarm_url),
            ("start_swarm_url", &upstream.start_swarm_url),
            ("get_swarm_url", &upstream.get_swarm_url),
        ] {
            if let Some(raw) = value {
                validate_http_url(raw)
                    .map_err(|e| anyhow::anyhow!("spec.upstream.{}: {}", field, e))?;
            }
        }

        match upstream.delete_method.to_ascii_uppercase().as_str() {
            "DELETE" | "POST" => {}
            other => anyhow::bail!(
                "spec.upstream.delete_method must be DELETE or POST, got '{}'",
                other
            ),
        }

        if upstream.timeout_secs == Some(0) {
            anyhow::bail!("spec.upstream.timeout_secs must be greater than zero");
        }

        validate_http_url(&self.spec.client.base_url)
            .map_err(|e| anyhow::anyhow!("spec.client.base_url: {}", e))?;

        Ok(())
    }
}

fn validate_http_url(raw: &str) -> anyhow::Result<()> {
    let parsed = url::Url::parse(raw).map_err(|e| anyhow::anyhow!("invalid URL '{}': {}", raw, e))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => anyhow::bail!("unsupported scheme '{}' in '{}'", scheme, raw),
    }
}
