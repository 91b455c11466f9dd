// Application configuration.
// Reads listen address, upstream endpoints, and file paths from environment
// variables with sensible defaults; there are no CLI flags.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;

use crate::error::{CovidError, Result};

/// How often live statistics are re-fetched from the upstream APIs.
pub const STATS_TTL: Duration = Duration::from_secs(300);

/// How often the boundary document is re-read from disk.
pub const BOUNDARY_TTL: Duration = Duration::from_secs(1800);

const DEFAULT_ADDR: &str = "127.0.0.1:8050";
const DEFAULT_CANADA_URL: &str = "https://covid-api.com/api/reports?iso=CAN";
const DEFAULT_WORLD_URL: &str = "https://disease.sh/v2/countries?yesterday=true";
const DEFAULT_GEOJSON: &str = "canada.geojson";

/// Runtime configuration for the dashboard server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub addr: SocketAddr,
    /// Country-report endpoint (per-province rows for Canada).
    pub canada_url: String,
    /// Global statistics endpoint (one row per country).
    pub world_url: String,
    /// Path to the Canada boundary GeoJSON file.
    pub geojson_path: PathBuf,
    /// Directory holding cached API responses and the boundary document.
    pub cache_dir: PathBuf,
}

impl Config {
    /// Load configuration from `COVIDMAP_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let addr = get("COVIDMAP_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = addr
            .parse()
            .map_err(|_| CovidError::Config(format!("invalid listen address: {}", addr)))?;

        let cache_dir = get("COVIDMAP_CACHE_DIR")
            .map(PathBuf::from)
            .or_else(default_cache_dir)
            .unwrap_or_else(|| PathBuf::from("cache"));

        Ok(Self {
            addr,
            canada_url: get("COVIDMAP_CANADA_URL").unwrap_or_else(|| DEFAULT_CANADA_URL.to_string()),
            world_url: get("COVIDMAP_WORLD_URL").unwrap_or_else(|| DEFAULT_WORLD_URL.to_string()),
            geojson_path: get("COVIDMAP_GEOJSON")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_GEOJSON)),
            cache_dir,
        })
    }
}

/// Platform cache directory (~/.cache/covidmap on Linux).
fn default_cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "covidmap").map(|dirs| dirs.cache_dir().to_path_buf())
}
