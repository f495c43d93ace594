use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};

pub const ESPN_SOCCER_BASE_URL: &str = "https://site.api.espn.com/apis/v2/sports/soccer";
pub const DEFAULT_SEASON: &str = "2024-2025";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Standings are fetched from `{espn_base_url}/{provider_code}/standings`.
    pub espn_base_url: String,
    pub refresh_interval: Duration,
    pub season: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");

        let bind_addr = env::var("PUAN_BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse::<SocketAddr>()
            .context("PUAN_BIND_ADDR must be host:port")?;
        let espn_base_url = env::var("ESPN_BASE_URL")
            .ok()
            .map(|val| val.trim().trim_end_matches('/').to_string())
            .filter(|val| !val.is_empty())
            .unwrap_or_else(|| ESPN_SOCCER_BASE_URL.to_string());
        let refresh_secs = env::var("REFRESH_SECS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(300)
            .max(10);
        let season = env::var("SEASON_LABEL")
            .ok()
            .filter(|val| !val.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SEASON.to_string());

        Ok(Self {
            bind_addr,
            espn_base_url,
            refresh_interval: Duration::from_secs(refresh_secs),
            season,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            espn_base_url: ESPN_SOCCER_BASE_URL.to_string(),
            refresh_interval: Duration::from_secs(300),
            season: DEFAULT_SEASON.to_string(),
        }
    }
}
