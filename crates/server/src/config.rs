use std::env;
use std::time::Duration;

use uci_engine::SearchLimits;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub stockfish_path: String,
    pub engine_nodes: u32,
    pub engine_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            stockfish_path: env::var("STOCKFISH_PATH")
                .unwrap_or_else(|_| "/usr/local/bin/stockfish".to_string()),
            engine_nodes: env::var("ENGINE_NODES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100_000),
            engine_timeout_secs: env::var("ENGINE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    pub fn search_limits(&self) -> SearchLimits {
        SearchLimits {
            nodes: self.engine_nodes,
            timeout: Duration::from_secs(self.engine_timeout_secs),
        }
    }
}
