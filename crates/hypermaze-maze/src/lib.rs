//! N-dimensional mazes for Hypermaze.
//!
//! The coordinator never looks inside a maze. It asks a [`MazeEngine`] to
//! build one with a given number of axes, keeps the returned
//! [`MazeGame`], and later asks the engine for 2D slices through the
//! current position. [`CarvedMazeEngine`] is the engine the server ships
//! with; tests plug in their own.
//!
//! # Key types
//!
//! - [`MazeEngine`]: build + project, the only contract the coordinator uses
//! - [`MazeGame`]: a built maze plus the shared position and the goal
//! - [`HyperGrid`]: dense open/wall storage for any number of axes
//! - [`CarvedMazeEngine`]: randomized depth-first carving over a `HyperGrid`

mod carve;
mod error;
mod grid;

pub use carve::CarvedMazeEngine;
pub use error::MazeError;
pub use grid::{HyperGrid, MAX_CELLS};

use hypermaze_protocol::Projection;

/// A built maze and the state a session plays on it.
#[derive(Debug, Clone)]
pub struct MazeGame<M> {
    /// Engine-specific maze structure.
    pub maze: M,
    /// Side length along every axis.
    pub block_size: usize,
    /// Number of axes. `position` and `goal` have exactly this many entries.
    pub dimensions: usize,
    /// The position every member shares.
    pub position: Vec<i64>,
    /// Where the position has to end up.
    pub goal: Vec<i64>,
}

/// Builds mazes and slices them.
///
/// Associated type `Maze` lets each engine keep whatever structure it
/// likes; the coordinator just stores it and hands it back to
/// [`project`](Self::project).
pub trait MazeEngine: Send + Sync + 'static {
    /// The engine's maze structure.
    type Maze: Send + Sync + 'static;

    /// Builds a maze with `dimensions` axes and side `block_size`, along
    /// with a start position and a goal.
    ///
    /// # Errors
    /// Returns a [`MazeError`] if the requested shape can't be built.
    fn build(
        &self,
        block_size: usize,
        dimensions: usize,
    ) -> Result<MazeGame<Self::Maze>, MazeError>;

    /// Returns the 2D slice through `position` spanned by axes `dim_x` and
    /// `dim_y`. All other coordinates stay fixed at `position`'s values.
    fn project(
        &self,
        maze: &Self::Maze,
        position: &[i64],
        dim_x: usize,
        dim_y: usize,
    ) -> Projection;
}
