//! Centralized configuration management with TOML support.
//!
//! Provides structured configs for the row-parallel kernel and the
//! benchmark driver with load/save capabilities.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{FhtError, Result};

/// Element types with a prebuilt kernel in the CLI and benchmark driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    F32,
    #[default]
    F64,
    I32,
    I64,
}

impl ElementType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::I32 => "i32",
            Self::I64 => "i64",
        }
    }

    /// Size of one element in bytes.
    pub fn size_bytes(&self) -> usize {
        match self {
            Self::F32 | Self::I32 => 4,
            Self::F64 | Self::I64 => 8,
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementType {
    type Err = FhtError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "f32" | "float" => Ok(Self::F32),
            "f64" | "double" => Ok(Self::F64),
            "i32" | "int" => Ok(Self::I32),
            "i64" | "long" => Ok(Self::I64),
            other => Err(FhtError::InvalidConfig(format!(
                "unknown element type '{}' (expected f32, f64, i32 or i64)",
                other
            ))),
        }
    }
}

/// Row-parallel kernel configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Worker threads for the row driver (0 = rayon global pool).
    pub num_threads: usize,
    /// Row counts below this run sequentially on the calling thread.
    pub parallel_threshold_rows: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            num_threads: 0,
            parallel_threshold_rows: 4,
        }
    }
}

impl KernelConfig {
    /// Single-worker configuration, mostly useful for reference runs.
    pub fn sequential() -> Self {
        Self {
            num_threads: 1,
            ..Self::default()
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.num_threads > 4096 {
            return Err(FhtError::InvalidConfig(format!(
                "num_threads must be <= 4096, got {}",
                self.num_threads
            )));
        }
        Ok(())
    }
}

const MAX_BENCH_ITERATIONS: usize = 1_000_000;

/// Benchmark driver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Number of rows in the generated matrix.
    pub row_count: usize,
    /// Length of every row (power of two).
    pub row_length: usize,
    /// Timed iterations.
    pub iterations: usize,
    /// Element type to instantiate the kernel for.
    pub element_type: ElementType,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            row_count: 1024,
            row_length: 1024,
            iterations: 20,
            element_type: ElementType::F64,
        }
    }
}

impl BenchConfig {
    /// Validate benchmark configuration.
    pub fn validate(&self) -> Result<()> {
        if self.row_count == 0 {
            return Err(FhtError::InvalidConfig("row_count must be > 0".into()));
        }
        if !self.row_length.is_power_of_two() {
            return Err(FhtError::InvalidConfig(format!(
                "row_length must be a power of two, got {}",
                self.row_length
            )));
        }
        if self.iterations == 0 || self.iterations > MAX_BENCH_ITERATIONS {
            return Err(FhtError::InvalidConfig(format!(
                "iterations must be in 1..={}, got {}",
                MAX_BENCH_ITERATIONS, self.iterations
            )));
        }
        self.total_elements()?;
        Ok(())
    }

    /// Elements in the generated matrix.
    pub fn total_elements(&self) -> Result<usize> {
        self.row_count.checked_mul(self.row_length).ok_or_else(|| {
            FhtError::InvalidConfig(format!(
                "row_count * row_length overflows ({} x {})",
                self.row_count, self.row_length
            ))
        })
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Kernel dispatch settings.
    pub kernel: KernelConfig,
    /// Benchmark settings.
    pub bench: BenchConfig,
    /// Logging level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            kernel: KernelConfig::default(),
            bench: BenchConfig::default(),
            log_level: "info".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            FhtError::Other(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        tracing::info!(path = %path.as_ref().display(), "Loaded configuration");
        Ok(config)
    }

    /// Serialize to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| FhtError::Other(format!("Failed to serialize config: {}", e)))
    }

    /// Save configuration to TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.validate()?;
        let content = self.to_toml()?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Validate all sub-configs.
    pub fn validate(&self) -> Result<()> {
        self.kernel.validate()?;
        self.bench.validate()?;
        if !matches!(
            self.log_level.as_str(),
            "trace" | "debug" | "info" | "warn" | "error"
        ) {
            return Err(FhtError::InvalidConfig(format!(
                "log_level must be one of trace, debug, info, warn, error; got '{}'",
                self.log_level
            )));
        }
        Ok(())
    }
}
