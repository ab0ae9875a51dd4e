//! Coordinator settings.

use serde::{Deserialize, Serialize};

/// Side length of every maze axis, in cells.
pub const DEFAULT_BLOCK_SIZE: usize = 9;

/// Members per session. A session with `n` members plays in `n + 1`
/// dimensions, so this also bounds maze size.
pub const DEFAULT_MAX_MEMBERS: usize = 4;

/// Configuration for a [`Coordinator`](crate::Coordinator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Side length passed to the maze engine.
    pub block_size: usize,
    /// Joins beyond this many members are refused.
    pub max_members: usize,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            max_members: DEFAULT_MAX_MEMBERS,
        }
    }
}
