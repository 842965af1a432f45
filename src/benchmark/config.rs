/*!
 * Benchmark Configuration
 *
 * Runtime configuration for a comparison run, read from ALLOCBENCH_*
 * environment variables
 */

use crate::core::errors::{BenchError, BenchResult};
use crate::core::limits::{
    DEFAULT_ALLOCATIONS, DEFAULT_CSV_PATH, DEFAULT_MAX_REQUEST, DEFAULT_MIN_REQUEST,
    DEFAULT_POOL_SIZE,
};
use crate::core::types::Size;
use std::path::PathBuf;
use std::str::FromStr;

pub const ENV_POOL_SIZE: &str = "ALLOCBENCH_POOL_SIZE";
pub const ENV_ALLOCATIONS: &str = "ALLOCBENCH_ALLOCATIONS";
pub const ENV_MIN_SIZE: &str = "ALLOCBENCH_MIN_SIZE";
pub const ENV_MAX_SIZE: &str = "ALLOCBENCH_MAX_SIZE";
pub const ENV_SEED: &str = "ALLOCBENCH_SEED";
pub const ENV_CSV: &str = "ALLOCBENCH_CSV";
pub const ENV_JSON: &str = "ALLOCBENCH_JSON";

/// Comparison run configuration
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    /// Pool bytes handed to each engine
    pub pool_size: Size,
    /// Number of allocation requests
    pub allocations: usize,
    /// Smallest request size (inclusive)
    pub min_request: Size,
    /// Largest request size (exclusive)
    pub max_request: Size,
    /// Fixed seed for a reproducible size sequence
    pub seed: Option<u64>,
    /// CSV output path
    pub csv_path: PathBuf,
    /// Print results as JSON instead of the console report
    pub json_output: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            allocations: DEFAULT_ALLOCATIONS,
            min_request: DEFAULT_MIN_REQUEST,
            max_request: DEFAULT_MAX_REQUEST,
            seed: None,
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            json_output: false,
        }
    }
}

impl BenchConfig {
    /// Defaults overridden by any ALLOCBENCH_* variables that are set
    pub fn from_env() -> BenchResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with an injectable variable source
    pub fn from_lookup<F>(lookup: F) -> BenchResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = parse_var(&lookup, ENV_POOL_SIZE)? {
            config.pool_size = value;
        }
        if let Some(value) = parse_var(&lookup, ENV_ALLOCATIONS)? {
            config.allocations = value;
        }
        if let Some(value) = parse_var(&lookup, ENV_MIN_SIZE)? {
            config.min_request = value;
        }
        if let Some(value) = parse_var(&lookup, ENV_MAX_SIZE)? {
            config.max_request = value;
        }
        config.seed = parse_var(&lookup, ENV_SEED)?;
        if let Some(path) = lookup(ENV_CSV).filter(|v| !v.trim().is_empty()) {
            config.csv_path = PathBuf::from(path);
        }
        config.json_output = lookup(ENV_JSON)
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        config.validate()?;
        Ok(config)
    }

    pub fn with_pool_size(mut self, pool_size: Size) -> Self {
        self.pool_size = pool_size;
        self
    }

    pub fn with_allocations(mut self, allocations: usize) -> Self {
        self.allocations = allocations;
        self
    }

    pub fn with_request_range(mut self, min_request: Size, max_request: Size) -> Self {
        self.min_request = min_request;
        self.max_request = max_request;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_csv_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.csv_path = path.into();
        self
    }

    pub fn validate(&self) -> BenchResult<()> {
        if self.pool_size == 0 {
            return Err(BenchError::Config(format!("{} must be positive", ENV_POOL_SIZE)));
        }
        if self.allocations == 0 {
            return Err(BenchError::Config(format!("{} must be positive", ENV_ALLOCATIONS)));
        }
        if self.min_request == 0 {
            return Err(BenchError::Config(format!("{} must be positive", ENV_MIN_SIZE)));
        }
        if self.min_request >= self.max_request {
            return Err(BenchError::Config(format!(
                "request range is empty: {}={} must be below {}={}",
                ENV_MIN_SIZE, self.min_request, ENV_MAX_SIZE, self.max_request
            )));
        }
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> BenchResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| BenchError::Config(format!("invalid {}={:?}: {}", key, raw, e))),
    }
}
