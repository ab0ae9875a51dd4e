//! Error types for maze construction.

/// Errors that can occur while building a maze.
#[derive(Debug, thiserror::Error)]
pub enum MazeError {
    /// A maze needs at least two axes to project onto.
    #[error("a maze needs at least 2 dimensions, got {0}")]
    TooFewDimensions(usize),

    /// The side length leaves no room between the outer walls.
    #[error("block size {0} is too small (minimum 3)")]
    BlockTooSmall(usize),

    /// `side^dimensions` cells would not fit in memory.
    #[error("a {side}^{dimensions} maze exceeds the limit of {limit} cells")]
    TooLarge {
        side: usize,
        dimensions: usize,
        limit: usize,
    },
}
