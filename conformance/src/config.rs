//! Run configuration
//!
//! All cryptographic inputs are fixed. The only thing read from the
//! environment is the log filter.

use std::env;

use mcapi_params::harness::{CODEC_BUFFER_SIZE, DATA_SIZE, KEY_CAPACITY};

use crate::checks::CheckGroup;
use crate::error::SetupError;

/// Environment variable consulted first for the log filter
pub const LOG_ENV: &str = "MCAPI_LOG";

/// Filter used when neither `MCAPI_LOG` nor `RUST_LOG` is set
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Parameters of one conformance run
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Length of the counting data vector
    pub data_size: usize,
    /// HMAC key text
    pub key: String,
    /// Size of the key allocation
    pub key_capacity: usize,
    /// Size of each compression and decompression buffer
    pub buffer_capacity: usize,
    /// Checks to run, in order
    pub checks: Vec<CheckGroup>,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            data_size: DATA_SIZE,
            key: "Jefe".to_string(),
            key_capacity: KEY_CAPACITY,
            buffer_capacity: CODEC_BUFFER_SIZE,
            checks: CheckGroup::ALL.to_vec(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

// Builder methods for tests and embedding
impl HarnessConfig {
    pub fn with_data_size(mut self, size: usize) -> Self {
        self.data_size = size;
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_key_capacity(mut self, capacity: usize) -> Self {
        self.key_capacity = capacity;
        self
    }

    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    pub fn with_checks(mut self, checks: impl IntoIterator<Item = CheckGroup>) -> Self {
        self.checks = checks.into_iter().collect();
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }
}

impl HarnessConfig {
    /// Defaults, with the log filter taken from `MCAPI_LOG` or `RUST_LOG`
    pub fn from_env() -> Self {
        let filter = env::var(LOG_ENV)
            .or_else(|_| env::var("RUST_LOG"))
            .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());
        Self::default().with_log_filter(filter)
    }

    /// Reject settings that could not produce a meaningful run
    pub fn validate(&self, text_len: usize) -> Result<(), SetupError> {
        if self.data_size == 0 {
            return Err(SetupError::Config("data size must be non-zero"));
        }
        if self.key.len() > self.key_capacity {
            return Err(SetupError::Config("key does not fit its buffer"));
        }
        if self.buffer_capacity < text_len {
            return Err(SetupError::Config("codec buffers are smaller than the text"));
        }
        Ok(())
    }
}
