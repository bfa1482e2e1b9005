//! Occlusion-composited 2D views of a grid.
//!
//! Every view is oriented the way a camera outside the grid would see it:
//! row index grows downwards, column index grows to the right, and
//! `row_axis x col_axis` points towards the camera. Mirror images are only
//! produced on request, by [`View::mirrored`] or a flip in an [`Orientation`].

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Axis;
use crate::grid::{Cell, Grid};

/// One of the 6 signed viewing directions.
///
/// `PlusZ` looks along +z, so the camera sits below index 0 and the voxel
/// nearest index 0 wins. `MinusZ` looks along -z from above the last index.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "+z")]
    PlusZ,
    #[serde(rename = "-z")]
    MinusZ,
    #[serde(rename = "+y")]
    PlusY,
    #[serde(rename = "-y")]
    MinusY,
    #[serde(rename = "+x")]
    PlusX,
    #[serde(rename = "-x")]
    MinusX,
}

impl Direction {
    /// All directions, in the order the solvability check visits them.
    pub const ALL: [Direction; 6] = [
        Direction::PlusZ,
        Direction::MinusZ,
        Direction::PlusY,
        Direction::MinusY,
        Direction::PlusX,
        Direction::MinusX,
    ];

    /// Front-on direction used for puzzle descriptions.
    pub const FRONT: Direction = Direction::PlusY;

    /// Axis collapsed by the projection.
    pub const fn axis(self) -> Axis {
        match self {
            Direction::PlusZ | Direction::MinusZ => Axis::Z,
            Direction::PlusY | Direction::MinusY => Axis::Y,
            Direction::PlusX | Direction::MinusX => Axis::X,
        }
    }

    /// Whether the camera sits on the low-index side of the grid.
    pub const fn is_positive(self) -> bool {
        matches!(self, Direction::PlusZ | Direction::PlusY | Direction::PlusX)
    }

    /// Grid axes along view rows and view columns, respectively.
    ///
    /// The pair is ordered so that `row_axis x col_axis = -axis`, which faces
    /// a camera on the low side. The negative direction reverses the column
    /// axis to face a camera on the high side.
    pub const fn in_plane_axes(self) -> (Axis, Axis) {
        match self.axis() {
            Axis::X => (Axis::Z, Axis::Y),
            Axis::Y => (Axis::X, Axis::Z),
            Axis::Z => (Axis::Y, Axis::X),
        }
    }

    /// Position of this direction in [`Direction::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_positive() { '+' } else { '-' };
        write!(f, "{sign}{}", self.axis())
    }
}

/// In-plane camera roll in quarter turns (counterclockwise).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rotation {
    #[serde(rename = "0")]
    R0,
    #[serde(rename = "90")]
    R90,
    #[serde(rename = "180")]
    R180,
    #[serde(rename = "270")]
    R270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270];

    pub const fn quarter_turns(self) -> usize {
        self as usize
    }

    pub const fn degrees(self) -> u32 {
        90 * self as u32
    }
}

/// A 2D array of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct View {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl View {
    /// Creates an all-empty view.
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    /// Builds a view from rows of cells. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let cols = rows.first().map_or(0, Vec::len);
        debug_assert!(rows.iter().all(|row| row.len() == cols), "ragged view rows");
        Self {
            rows: rows.len(),
            cols,
            cells: rows.into_iter().flatten().collect(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    #[inline]
    fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.cols + col] = cell;
    }

    /// Computes the view of `grid` seen from `direction`.
    ///
    /// Walks the collapsed axis from the far side to the near side and
    /// overwrites on every colored voxel, so the nearest one wins.
    pub fn project(grid: &Grid, direction: Direction) -> Self {
        let side = grid.side();
        let (row_axis, col_axis) = direction.in_plane_axes();
        let depth_axis = direction.axis();
        let mut view = View::empty(side, side);

        for step in 0..side {
            let depth = if direction.is_positive() { side - 1 - step } else { step };
            for row in 0..side {
                for col in 0..side {
                    let mut coord = [0; 3];
                    coord[depth_axis.index()] = depth;
                    coord[row_axis.index()] = row;
                    coord[col_axis.index()] = col;

                    let cell = grid.get(coord[0], coord[1], coord[2]);
                    if cell != Cell::Empty {
                        let view_col = if direction.is_positive() { col } else { side - 1 - col };
                        view.set(row, view_col, cell);
                    }
                }
            }
        }

        view
    }

    /// Rotates the view a quarter turn counterclockwise.
    pub fn rotated_once(&self) -> Self {
        let mut rotated = View::empty(self.cols, self.rows);
        for row in 0..rotated.rows {
            for col in 0..rotated.cols {
                rotated.set(row, col, self.get(col, self.cols - 1 - row));
            }
        }
        rotated
    }

    /// Rotates the view counterclockwise by `rotation`.
    pub fn rotated(&self, rotation: Rotation) -> Self {
        let mut rotated = self.clone();
        for _ in 0..rotation.quarter_turns() {
            rotated = rotated.rotated_once();
        }
        rotated
    }

    /// Reverses the column order (left-right mirror image).
    pub fn mirrored(&self) -> Self {
        let mut mirrored = self.clone();
        for row in 0..self.rows {
            for col in 0..self.cols {
                mirrored.set(row, col, self.get(row, self.cols - 1 - col));
            }
        }
        mirrored
    }

    /// Reverses the row order (top-bottom mirror image).
    pub fn flipped(&self) -> Self {
        let mut flipped = self.clone();
        for row in 0..self.rows {
            for col in 0..self.cols {
                flipped.set(row, col, self.get(self.rows - 1 - row, col));
            }
        }
        flipped
    }

    /// Iterates over rows of cells, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols.max(1))
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            let line: String = row.iter().map(|cell| cell.display_char()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Everything a renderer needs to reproduce a view of a grid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Orientation {
    pub direction: Direction,
    pub rotation: Rotation,
    /// Grid axis to mirror the arrangement along before projecting.
    pub flip: Option<Axis>,
}

impl Orientation {
    /// An unflipped orientation, which is always physically reachable.
    pub const fn proper(direction: Direction, rotation: Rotation) -> Self {
        Self {
            direction,
            rotation,
            flip: None,
        }
    }

    /// Computes the view of `grid` in this orientation.
    ///
    /// A flip along one of the direction's in-plane axes mirrors the view.
    /// A flip along the viewing axis reverses the occlusion order instead.
    pub fn view(&self, grid: &Grid) -> View {
        let grid = match self.flip {
            Some(axis) => Cow::Owned(grid.reflected(axis)),
            None => Cow::Borrowed(grid),
        };
        View::project(&grid, self.direction).rotated(self.rotation)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rot {}", self.direction, self.rotation.degrees())?;
        if let Some(axis) = self.flip {
            write!(f, " flip {axis}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Color, Shape, Streak};

    fn sample_grid() -> Grid {
        let mut grid = Grid::new(Shape::cube(3).unwrap());
        for streak in [
            Streak {
                origin: (0, 0, 0),
                axis: Axis::X,
                length: 3,
                color: Color::Red,
            },
            Streak {
                origin: (2, 1, 0),
                axis: Axis::Z,
                length: 2,
                color: Color::Green,
            },
            Streak {
                origin: (0, 1, 2),
                axis: Axis::Y,
                length: 2,
                color: Color::Blue,
            },
        ] {
            grid.paint(&streak).unwrap();
        }
        grid
    }

    fn cells(rows: &[&str]) -> View {
        View::from_rows(
            rows.iter()
                .map(|row| {
                    row.chars()
                        .map(|ch| match ch {
                            '.' => Cell::Empty,
                            token => Cell::Colored(token.to_string().parse().unwrap()),
                        })
                        .collect()
                })
                .collect(),
        )
    }

    #[test]
    fn test_projection_nearest_voxel_wins() {
        let grid = sample_grid();

        // rows = y, cols = x; z = 0 is nearest
        assert_eq!(View::project(&grid, Direction::PlusZ), cells(&["rrr", "b.g", "b.."]));
        // rows = y, cols = 2 - x; z = 2 is nearest
        assert_eq!(View::project(&grid, Direction::MinusZ), cells(&["rrr", "g.b", "..b"]));
        // rows = x, cols = z; y = 0 is nearest
        assert_eq!(View::project(&grid, Direction::PlusY), cells(&["r.b", "r..", "rg."]));
        // rows = z, cols = y; x = 0 is nearest
        assert_eq!(View::project(&grid, Direction::PlusX), cells(&["rg.", ".g.", ".bb"]));
    }

    #[test]
    fn test_four_quarter_turns_round_trip() {
        let grid = sample_grid();
        for direction in Direction::ALL {
            let base = View::project(&grid, direction);
            let mut view = base.clone();
            for _ in 0..4 {
                view = view.rotated_once();
            }
            assert_eq!(view, base, "{direction} did not survive a full turn");
        }
    }

    #[test]
    fn test_quarter_turn_is_counterclockwise() {
        let view = cells(&["rg", "b."]);
        assert_eq!(view.rotated(Rotation::R90), cells(&["g.", "rb"]));
        assert_eq!(view.rotated(Rotation::R180), cells(&[".b", "gr"]));
    }

    #[test]
    fn test_in_plane_flips_mirror_the_view() {
        let grid = sample_grid();
        for direction in Direction::ALL {
            let base = View::project(&grid, direction);
            let (row_axis, col_axis) = direction.in_plane_axes();

            let flip_cols = Orientation {
                direction,
                rotation: Rotation::R0,
                flip: Some(col_axis),
            };
            let flip_rows = Orientation {
                direction,
                rotation: Rotation::R0,
                flip: Some(row_axis),
            };
            assert_eq!(flip_cols.view(&grid), base.mirrored());
            assert_eq!(flip_rows.view(&grid), base.flipped());
        }
    }

    #[test]
    fn test_two_by_two_boundary() {
        let mut grid = Grid::new(Shape::cube(2).unwrap());
        grid.paint(&Streak {
            origin: (0, 0, 0),
            axis: Axis::Z,
            length: 2,
            color: Color::Red,
        })
        .unwrap();

        for direction in Direction::ALL {
            for rotation in Rotation::ALL {
                let view = Orientation::proper(direction, rotation).view(&grid);
                assert_eq!((view.rows(), view.cols()), (2, 2));
            }
        }
        assert_eq!(View::project(&grid, Direction::PlusZ), cells(&["r.", ".."]));
        assert_eq!(View::project(&grid, Direction::PlusX), cells(&["r.", "r."]));
    }

    #[test]
    fn test_display() {
        assert_eq!(Direction::MinusY.to_string(), "-y");
        let orientation = Orientation {
            direction: Direction::PlusX,
            rotation: Rotation::R270,
            flip: Some(Axis::Z),
        };
        assert_eq!(orientation.to_string(), "+x rot 270 flip z");
        assert_eq!(cells(&["r.", ".g"]).to_string(), "r.\n.g\n");
    }
}
