use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

/// Runtime configuration for the timesheet server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Browser origin allowed to call the API. `None` allows any origin.
    pub allowed_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".parse().unwrap(),
            allowed_origin: None,
        }
    }
}
