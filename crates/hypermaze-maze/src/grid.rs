//! Dense storage for an N-dimensional grid of open cells and walls.

use crate::MazeError;

/// Upper bound on `side^dimensions`. A 9-wide maze fits in up to 7
/// dimensions.
pub const MAX_CELLS: usize = 1 << 23;

/// An N-dimensional cube of cells, each either open or wall.
///
/// Cells are stored in a flat `Vec<bool>` with axis 0 varying fastest.
/// Every cell starts as a wall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyperGrid {
    side: usize,
    dimensions: usize,
    open: Vec<bool>,
}

impl HyperGrid {
    /// Creates an all-wall grid.
    ///
    /// # Errors
    /// Returns [`MazeError::TooLarge`] if `side^dimensions` exceeds
    /// [`MAX_CELLS`].
    pub fn new(side: usize, dimensions: usize) -> Result<Self, MazeError> {
        let too_large = MazeError::TooLarge {
            side,
            dimensions,
            limit: MAX_CELLS,
        };
        let cells = u32::try_from(dimensions)
            .ok()
            .and_then(|d| side.checked_pow(d))
            .filter(|n| *n <= MAX_CELLS)
            .ok_or(too_large)?;
        Ok(Self {
            side,
            dimensions,
            open: vec![false; cells],
        })
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Flat index of `coords`, or `None` if any coordinate is outside the
    /// grid or the arity is wrong.
    pub fn index(&self, coords: &[i64]) -> Option<usize> {
        if coords.len() != self.dimensions {
            return None;
        }
        let mut index = 0usize;
        let mut stride = 1usize;
        for &c in coords {
            let c = usize::try_from(c).ok().filter(|c| *c < self.side)?;
            index += c * stride;
            stride *= self.side;
        }
        Some(index)
    }

    /// `true` if `coords` is inside the grid and open. Anything outside
    /// reads as wall.
    pub fn is_open(&self, coords: &[i64]) -> bool {
        self.index(coords).is_some_and(|i| self.open[i])
    }

    /// Opens the cell at `coords`. Out-of-range coordinates are ignored.
    pub fn carve(&mut self, coords: &[i64]) {
        if let Some(i) = self.index(coords) {
            self.open[i] = true;
        }
    }

    /// Number of open cells.
    pub fn open_count(&self) -> usize {
        self.open.iter().filter(|o| **o).count()
    }
}
