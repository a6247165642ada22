//! Loader configuration

use serde::{Deserialize, Serialize};

/// Default upper bound for a single profile document (1 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

/// Settings for [`ProfileLoader`](crate::ProfileLoader).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Documents larger than this many bytes are rejected before parsing
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
        }
    }
}
