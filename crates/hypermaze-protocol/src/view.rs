//! The per-member view of a running maze game.
//!
//! Every member of a session sees the same shared position vector, but
//! through their own pair of axes. A [`GameView`] is what one member's
//! client needs to draw its 2D slice: the slice itself, where the player
//! and goal sit inside it, and the full N-dimensional vectors for the HUD.

use serde::{Deserialize, Serialize};

/// A 2D slice of the maze, ready for a client renderer.
///
/// `cells[a][b]` is the cell at offset `a` along the member's first axis
/// and `b` along the second. [`Projection::OPEN`] cells can be walked,
/// [`Projection::WALL`] cells cannot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Projection {
    pub cells: Vec<Vec<u8>>,
}

impl Projection {
    /// Marker for a walkable cell.
    pub const OPEN: u8 = 0;
    /// Marker for a wall.
    pub const WALL: u8 = 1;

    /// Wraps a grid of cell markers.
    pub fn new(cells: Vec<Vec<u8>>) -> Self {
        Self { cells }
    }

    /// Returns the marker at `(a, b)`, or `None` outside the slice.
    pub fn get(&self, a: usize, b: usize) -> Option<u8> {
        self.cells.get(a).and_then(|row| row.get(b)).copied()
    }
}

/// Where the goal lies relative to a member's slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalView {
    /// The goal's coordinates along the member's two axes.
    pub position: [i64; 2],
    /// `true` when the goal sits on the slice currently being shown.
    #[serde(rename = "same_proj", alias = "sameProjection")]
    pub same_projection: bool,
}

/// The full N-dimensional vectors, shown to every member as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallView {
    pub player: Vec<i64>,
    pub goal: Vec<i64>,
}

/// Everything one member's client needs to render the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    /// Side length of the maze along every axis.
    pub blocks: usize,
    /// Number of dimensions in the maze.
    pub dimensions: usize,
    /// The slice through the current position along this member's axes.
    pub map: Projection,
    /// The shared position, reduced to this member's two axes.
    pub position: [i64; 2],
    pub goal: GoalView,
    pub overall: OverallView,
    /// The member's axes: `[dimX, dimY]`.
    pub coordinates: [usize; 2],
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_view() -> GameView {
        GameView {
            blocks: 9,
            dimensions: 3,
            map: Projection::new(vec![vec![1, 0], vec![0, 1]]),
            position: [1, 1],
            goal: GoalView {
                position: [7, 7],
                same_projection: false,
            },
            overall: OverallView {
                player: vec![1, 1, 3],
                goal: vec![7, 7, 7],
            },
            coordinates: [0, 1],
        }
    }

    #[test]
    fn test_game_view_json_shape() {
        let json = serde_json::to_value(sample_view()).unwrap();

        assert_eq!(json["blocks"], 9);
        assert_eq!(json["dimensions"], 3);
        assert_eq!(json["map"], serde_json::json!([[1, 0], [0, 1]]));
        assert_eq!(json["position"], serde_json::json!([1, 1]));
        assert_eq!(json["goal"]["position"], serde_json::json!([7, 7]));
        assert_eq!(json["goal"]["same_proj"], false);
        assert_eq!(json["overall"]["player"], serde_json::json!([1, 1, 3]));
        assert_eq!(json["coordinates"], serde_json::json!([0, 1]));
    }

    #[test]
    fn test_projection_get_out_of_range_is_none() {
        let p = Projection::new(vec![vec![Projection::WALL]]);
        assert_eq!(p.get(0, 0), Some(Projection::WALL));
        assert_eq!(p.get(0, 1), None);
        assert_eq!(p.get(3, 0), None);
    }
}
