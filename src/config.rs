// src/config.rs
use std::env;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the REST backend, e.g. "https://api.example.com/api".
    pub api_base_url: String,
    /// Address the portal server listens on.
    pub listen_addr: String,
    /// Path to the static city/district/ward tree asset.
    pub address_tree_path: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let api_base_url = env::var("SHOP_API_BASE_URL")
            .map_err(|_| "SHOP_API_BASE_URL environment variable not set".to_string())?;

        let listen_addr =
            env::var("SHOP_LISTEN_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

        let address_tree_path = env::var("SHOP_ADDRESS_TREE")
            .unwrap_or_else(|_| "static/address_tree.json".to_string());

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            listen_addr,
            address_tree_path,
        })
    }
}
