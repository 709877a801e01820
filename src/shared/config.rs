use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub network: NetworkConfig,
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub database_url: String,
    pub max_connections: u32,
    /// Well-known key the serialized action collection is stored under.
    pub storage_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub base_url: String,
    pub request_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    pub auto_sync: bool,
    pub sync_interval: u64,
    pub max_retries: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                database_url: "sqlite:data/mandi.db".to_string(),
                max_connections: 5,
                storage_key: "offline_action_queue".to_string(),
            },
            network: NetworkConfig {
                base_url: "https://api.mandi.example".to_string(),
                request_timeout: 30,
            },
            sync: SyncConfig {
                auto_sync: false,
                sync_interval: 300, // 5 minutes
                max_retries: 3,
            },
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("MANDI_DATABASE_URL") {
            if !v.trim().is_empty() {
                cfg.storage.database_url = v;
            }
        }
        if let Ok(v) = std::env::var("MANDI_API_BASE_URL") {
            if !v.trim().is_empty() {
                cfg.network.base_url = v;
            }
        }
        if let Ok(v) = std::env::var("MANDI_REQUEST_TIMEOUT") {
            if let Some(value) = parse_u64(&v) {
                cfg.network.request_timeout = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("MANDI_AUTO_SYNC") {
            cfg.sync.auto_sync = parse_bool(&v, cfg.sync.auto_sync);
        }
        if let Ok(v) = std::env::var("MANDI_SYNC_INTERVAL") {
            if let Some(value) = parse_u64(&v) {
                cfg.sync.sync_interval = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("MANDI_MAX_RETRIES") {
            if let Some(value) = parse_u32(&v) {
                cfg.sync.max_retries = value.max(1);
            }
        }

        cfg
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.storage.max_connections == 0 {
            return Err("Storage max_connections must be greater than 0".to_string());
        }
        if self.storage.storage_key.trim().is_empty() {
            return Err("Storage storage_key must not be empty".to_string());
        }
        if self.network.request_timeout == 0 {
            return Err("Network request_timeout must be greater than 0".to_string());
        }
        if self.sync.max_retries == 0 {
            return Err("Sync max_retries must be greater than 0".to_string());
        }
        if self.sync.auto_sync && self.sync.sync_interval == 0 {
            return Err("Sync sync_interval must be greater than 0".to_string());
        }
        Ok(())
    }
}

fn parse_bool(s: &str, default: bool) -> bool {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

fn parse_u64(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}

fn parse_u32(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok()
}
