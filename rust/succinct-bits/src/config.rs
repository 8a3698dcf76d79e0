//! Popcount table construction settings.

use serde::{Deserialize, Serialize};
use succinct_common::{Result, verify_arg};

use crate::popcount_table::MAX_PATTERN_WIDTH;

/// Default width of the patterns indexed by a popcount table.
pub const DEFAULT_PATTERN_WIDTH: usize = 8;

/// Default upper bound on the pattern width. A table of width `w` holds `2^w`
/// entries of `w` bits, so 24 bits already costs 48 MiB.
pub const DEFAULT_MAX_PATTERN_WIDTH: usize = 24;

/// Configuration for popcount table construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopcountTableConfig {
    /// Bit width of the indexed patterns.
    pub pattern_width: usize,
    /// Largest pattern width this configuration accepts.
    pub max_pattern_width: usize,
}

impl Default for PopcountTableConfig {
    fn default() -> Self {
        Self {
            pattern_width: DEFAULT_PATTERN_WIDTH,
            max_pattern_width: DEFAULT_MAX_PATTERN_WIDTH,
        }
    }
}

impl PopcountTableConfig {
    /// Default configuration with the given pattern width.
    pub fn with_pattern_width(pattern_width: usize) -> Self {
        Self {
            pattern_width,
            ..Default::default()
        }
    }

    /// Validates the configuration and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        verify_arg!(
            max_pattern_width,
            (1..=MAX_PATTERN_WIDTH).contains(&self.max_pattern_width)
        );
        verify_arg!(
            pattern_width,
            (1..=self.max_pattern_width).contains(&self.pattern_width)
        );
        Ok(())
    }
}
