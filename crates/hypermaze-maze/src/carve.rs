//! The default engine: randomized depth-first carving.
//!
//! Rooms sit at odd coordinates on every axis (`1, 3, …, side-2`), walls
//! in between. Starting at the all-ones corner, the carver walks to a
//! random unvisited neighbouring room along any axis, knocking out the
//! wall it passes through, and backtracks when stuck. The result is a
//! perfect maze: exactly one path between any two rooms, so the goal in
//! the opposite corner is always reachable.

use hypermaze_protocol::Projection;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{HyperGrid, MazeEngine, MazeError, MazeGame};

/// Builds perfect mazes by randomized depth-first search.
#[derive(Debug, Clone, Default)]
pub struct CarvedMazeEngine {
    seed: Option<u64>,
}

impl CarvedMazeEngine {
    /// An engine that carves a different maze every time.
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// An engine that carves the same maze for the same shape every time.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::rng().random()),
        }
    }
}

/// Rounds even sizes up so rooms and walls alternate cleanly.
fn normalize_side(block_size: usize) -> Result<usize, MazeError> {
    if block_size < 3 {
        return Err(MazeError::BlockTooSmall(block_size));
    }
    Ok(block_size | 1)
}

fn carve(grid: &mut HyperGrid, rng: &mut StdRng) {
    let last_room = grid.side() as i64 - 2;
    let start = vec![1i64; grid.dimensions()];
    grid.carve(&start);
    let mut stack = vec![start];

    while let Some(current) = stack.last().cloned() {
        let mut unvisited = Vec::new();
        for axis in 0..grid.dimensions() {
            for step in [-2i64, 2] {
                let target = current[axis] + step;
                if target < 1 || target > last_room {
                    continue;
                }
                let mut next = current.clone();
                next[axis] = target;
                if !grid.is_open(&next) {
                    unvisited.push((axis, next));
                }
            }
        }

        if unvisited.is_empty() {
            stack.pop();
            continue;
        }

        let (axis, next) = unvisited.swap_remove(rng.random_range(0..unvisited.len()));
        let mut wall = current;
        wall[axis] = (wall[axis] + next[axis]) / 2;
        grid.carve(&wall);
        grid.carve(&next);
        stack.push(next);
    }
}

impl MazeEngine for CarvedMazeEngine {
    type Maze = HyperGrid;

    fn build(
        &self,
        block_size: usize,
        dimensions: usize,
    ) -> Result<MazeGame<HyperGrid>, MazeError> {
        if dimensions < 2 {
            return Err(MazeError::TooFewDimensions(dimensions));
        }
        let side = normalize_side(block_size)?;
        let mut grid = HyperGrid::new(side, dimensions)?;
        carve(&mut grid, &mut self.rng());

        tracing::debug!(
            side,
            dimensions,
            open = grid.open_count(),
            "maze carved"
        );

        Ok(MazeGame {
            maze: grid,
            block_size: side,
            dimensions,
            position: vec![1; dimensions],
            goal: vec![side as i64 - 2; dimensions],
        })
    }

    fn project(
        &self,
        maze: &HyperGrid,
        position: &[i64],
        dim_x: usize,
        dim_y: usize,
    ) -> Projection {
        let d = maze.dimensions();
        if dim_x >= d || dim_y >= d || dim_x == dim_y || position.len() != d {
            return Projection::default();
        }

        let side = maze.side();
        let mut probe = position.to_vec();
        let mut cells = Vec::with_capacity(side);
        for a in 0..side as i64 {
            probe[dim_x] = a;
            let mut row = Vec::with_capacity(side);
            for b in 0..side as i64 {
                probe[dim_y] = b;
                row.push(if maze.is_open(&probe) {
                    Projection::OPEN
                } else {
                    Projection::WALL
                });
            }
            cells.push(row);
        }
        Projection::new(cells)
    }
}
