use std::thread;

use log::warn;

use crate::error::{FiniteDiffError, Result};

/// Environment variable overriding the number of workers of the batch driver.
pub const NUM_THREADS_ENV: &str = "FINITEDIFF_NUM_THREADS";

/// Degree of parallelism of [crate::interpolate_batch].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    workers: usize,
}

impl DriverConfig {
    /// # Errors
    /// [FiniteDiffError::InvalidWorkerCount] when `workers` is zero.
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(FiniteDiffError::InvalidWorkerCount("worker count must be positive".to_string()));
        }
        Ok(DriverConfig { workers })
    }

    /// Runs every target on the calling thread.
    pub fn sequential() -> Self {
        DriverConfig { workers: 1 }
    }

    /// Reads the worker count from [NUM_THREADS_ENV], falling back to [DriverConfig::default]
    /// when the variable is unset or empty.
    ///
    /// # Errors
    /// [FiniteDiffError::InvalidWorkerCount] when the variable holds anything other than a
    /// positive integer.
    pub fn from_env() -> Result<Self> {
        let raw = std::env::var(NUM_THREADS_ENV).ok();
        let workers = Self::parse_workers(raw.as_deref())?;
        Ok(DriverConfig { workers })
    }

    /// Worker count described by an optional textual override.
    ///
    /// # Example
    /// ```
    /// use finitediff::DriverConfig;
    ///
    /// assert_eq!(4, DriverConfig::parse_workers(Some("4")).unwrap());
    /// assert!(DriverConfig::parse_workers(Some("four")).is_err());
    /// assert!(DriverConfig::parse_workers(None).unwrap() >= 1);
    /// ```
    pub fn parse_workers(raw: Option<&str>) -> Result<usize> {
        let raw = match raw.map(str::trim) {
            None | Some("") => return Ok(available_workers()),
            Some(raw) => raw,
        };
        match raw.parse::<usize>() {
            Ok(0) => Err(FiniteDiffError::InvalidWorkerCount(format!(
                "{}={} must be positive",
                NUM_THREADS_ENV, raw
            ))),
            Ok(workers) => Ok(workers),
            Err(err) => Err(FiniteDiffError::InvalidWorkerCount(format!(
                "{}={}: {}",
                NUM_THREADS_ENV, raw, err
            ))),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl Default for DriverConfig {
    /// One worker per available hardware thread.
    fn default() -> Self {
        DriverConfig { workers: available_workers() }
    }
}

fn available_workers() -> usize {
    match thread::available_parallelism() {
        Ok(count) => count.get(),
        Err(err) => {
            warn!("could not detect available parallelism ({}), using a single worker", err);
            1
        }
    }
}
