use std::env;
use std::net::SocketAddr;

use crate::attributes::MappingPolicy;
use crate::cloud::CloudOptions;
use crate::error::{ProfileError, Result};

pub const ADDR_VAR: &str = "PROFILE_CLOUD_ADDR";
pub const WIDTH_VAR: &str = "PROFILE_CLOUD_WIDTH";
pub const HEIGHT_VAR: &str = "PROFILE_CLOUD_HEIGHT";
pub const SEED_VAR: &str = "PROFILE_CLOUD_SEED";
pub const MAPPING_VAR: &str = "PROFILE_CLOUD_MAPPING";
pub const UPLOAD_LIMIT_VAR: &str = "PROFILE_CLOUD_UPLOAD_LIMIT";

/// Largest accepted upload body, in bytes
pub const DEFAULT_UPLOAD_LIMIT: usize = 2 * 1024 * 1024;

/// Settings shared by the web server and the command line renderer
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Address the web server listens on
    pub addr: SocketAddr,

    /// Width of each cloud canvas; 0 falls back to 300
    pub cloud_width: u32,

    /// Height of each cloud canvas; 0 falls back to 300
    pub cloud_height: u32,

    pub mapping: MappingPolicy,

    /// Largest accepted upload body in bytes
    pub upload_limit: usize,

    pub cloud: CloudOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cloud_width: 500,
            cloud_height: 300,
            mapping: MappingPolicy::Strict,
            upload_limit: DEFAULT_UPLOAD_LIMIT,
            cloud: CloudOptions::default(),
        }
    }
}

impl AppConfig {
    /// Defaults overridden by any `PROFILE_CLOUD_*` variables that are set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`AppConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup(ADDR_VAR) {
            config.addr = addr.parse().map_err(|_| {
                ProfileError::Config(format!("{} is not a socket address", ADDR_VAR))
            })?;
        }
        if let Some(width) = lookup(WIDTH_VAR) {
            config.cloud_width = parse_number(WIDTH_VAR, &width)?;
        }
        if let Some(height) = lookup(HEIGHT_VAR) {
            config.cloud_height = parse_number(HEIGHT_VAR, &height)?;
        }
        if let Some(seed) = lookup(SEED_VAR) {
            config.cloud.seed = parse_number(SEED_VAR, &seed)?;
        }
        if let Some(mapping) = lookup(MAPPING_VAR) {
            config.mapping = mapping.parse()?;
        }
        if let Some(limit) = lookup(UPLOAD_LIMIT_VAR) {
            config.upload_limit = parse_number(UPLOAD_LIMIT_VAR, &limit)?;
        }

        Ok(config)
    }

    pub fn cloud_size(&self) -> (u32, u32) {
        (self.cloud_width, self.cloud_height)
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ProfileError::Config(format!("{} must be a number, got {:?}", name, value)))
}
