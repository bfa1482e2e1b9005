//! Grid representation and the streak-painting operation.
//!
//! The grid is a cube of cells stored as a flat array in x-major order:
//! `idx = x * side * side + y * side + z`. Each cell is either empty or holds
//! one palette color.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::{rotate_cell, Axis};

/// A paint color for streaks.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "r")]
    Red,
    #[serde(rename = "g")]
    Green,
    #[serde(rename = "b")]
    Blue,
    #[serde(rename = "y")]
    Yellow,
    #[serde(rename = "m")]
    Magenta,
    #[serde(rename = "c")]
    Cyan,
    #[serde(rename = "o")]
    Orange,
}

impl Color {
    /// All colors, in token order.
    pub const ALL: [Color; 7] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::Magenta,
        Color::Cyan,
        Color::Orange,
    ];

    /// Single-character token used in text output and configuration.
    pub const fn token(self) -> char {
        match self {
            Color::Red => 'r',
            Color::Green => 'g',
            Color::Blue => 'b',
            Color::Yellow => 'y',
            Color::Magenta => 'm',
            Color::Cyan => 'c',
            Color::Orange => 'o',
        }
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::ALL
            .into_iter()
            .find(|color| {
                let mut buf = [0; 4];
                s.eq_ignore_ascii_case(color.token().encode_utf8(&mut buf))
                    || s.eq_ignore_ascii_case(&format!("{color:?}"))
            })
            .ok_or_else(|| ConfigError::UnknownColor(s.to_owned()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Contents of one grid or view cell.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Colored(Color),
}

impl Cell {
    /// Returns the color, or `None` for an empty cell.
    pub const fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Colored(color) => Some(color),
        }
    }

    /// Text character for this cell: the color token, or `.` when empty.
    pub const fn display_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Colored(color) => color.token(),
        }
    }
}

/// Validated grid dimensions: a cube with at least 2 cells per edge.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    side: usize,
}

impl Shape {
    /// Checks an `(nx, ny, nz)` triple.
    pub fn new(nx: usize, ny: usize, nz: usize) -> Result<Self, ConfigError> {
        for n in [nx, ny, nz] {
            if n < 2 {
                return Err(ConfigError::SideTooSmall(n));
            }
        }
        if nx != ny || ny != nz {
            return Err(ConfigError::NotCubic(nx, ny, nz));
        }
        Ok(Self { side: nx })
    }

    /// Shorthand for a cube of the given side.
    pub fn cube(side: usize) -> Result<Self, ConfigError> {
        Self::new(side, side, side)
    }

    /// Number of cells along each axis.
    pub const fn side(self) -> usize {
        self.side
    }

    /// Total number of cells.
    pub const fn volume(self) -> usize {
        self.side * self.side * self.side
    }
}

/// Validated, non-empty list of distinct colors, one streak per entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Palette(Vec<Color>);

impl Palette {
    pub fn new(colors: Vec<Color>) -> Result<Self, ConfigError> {
        if colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        for (i, color) in colors.iter().enumerate() {
            if colors[..i].contains(color) {
                return Err(ConfigError::DuplicateColor(*color));
            }
        }
        Ok(Self(colors))
    }

    /// Parses color tokens such as `["r", "g", "b"]`.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self, ConfigError> {
        let colors = tokens
            .iter()
            .map(|token| token.as_ref().trim().parse())
            .collect::<Result<Vec<Color>, _>>()?;
        Self::new(colors)
    }

    /// Colors in paint order.
    pub fn colors(&self) -> &[Color] {
        &self.0
    }
}

/// A straight run of one color along one axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Streak {
    pub origin: (usize, usize, usize),
    pub axis: Axis,
    pub length: usize,
    pub color: Color,
}

impl Streak {
    /// Returns the coordinates covered by this streak, starting at the origin.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        let (x, y, z) = self.origin;
        (0..self.length).map(move |step| match self.axis {
            Axis::X => (x + step, y, z),
            Axis::Y => (x, y + step, z),
            Axis::Z => (x, y, z + step),
        })
    }

    /// Index one past the last cell along the streak's axis.
    fn end(&self) -> usize {
        let origin = [self.origin.0, self.origin.1, self.origin.2];
        origin[self.axis.index()] + self.length
    }
}

/// A cubic arrangement of colored cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    shape: Shape,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an all-empty grid.
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            cells: vec![Cell::Empty; shape.volume()],
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn side(&self) -> usize {
        self.shape.side()
    }

    /// Converts (x, y, z) coordinates to a linear cell index.
    #[inline(always)]
    fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        let side = self.side();
        x * side * side + y * side + z
    }

    /// Returns the cell at `(x, y, z)`.
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Cell {
        self.cells[self.idx(x, y, z)]
    }

    /// Overwrites the cell at `(x, y, z)`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, cell: Cell) {
        let idx = self.idx(x, y, z);
        self.cells[idx] = cell;
    }

    /// Paints a streak, overwriting whatever it crosses.
    pub fn paint(&mut self, streak: &Streak) -> Result<(), ConfigError> {
        if streak.length < 2 {
            return Err(ConfigError::StreakTooShort(streak.length));
        }
        let (x, y, z) = streak.origin;
        let side = self.side();
        if x >= side || y >= side || z >= side || streak.end() > side {
            return Err(ConfigError::StreakOutOfBounds {
                origin: streak.origin,
                axis: streak.axis,
                length: streak.length,
            });
        }
        for (x, y, z) in streak.cells() {
            self.set(x, y, z, Cell::Colored(streak.color));
        }
        Ok(())
    }

    /// Iterates over every colored cell with its coordinates.
    pub fn colored_cells(&self) -> impl Iterator<Item = ((usize, usize, usize), Color)> + '_ {
        let side = self.side();
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            let coord = (idx / (side * side), (idx / side) % side, idx % side);
            cell.color().map(|color| (coord, color))
        })
    }

    /// Returns `true` if no cell is colored.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| cell == Cell::Empty)
    }

    /// Returns the grid rotated by one of the 24 cube rotations.
    pub fn rotated(&self, rotation: usize) -> Grid {
        let side = self.side();
        let mut rotated = Grid::new(self.shape);
        for ((x, y, z), color) in self.colored_cells() {
            let (rx, ry, rz) = rotate_cell(rotation, (x, y, z), side);
            rotated.set(rx, ry, rz, Cell::Colored(color));
        }
        rotated
    }

    /// Returns the mirror image of the grid through the center plane
    /// perpendicular to `axis`.
    pub fn reflected(&self, axis: Axis) -> Grid {
        let side = self.side();
        let mut reflected = Grid::new(self.shape);
        for ((x, y, z), color) in self.colored_cells() {
            let mut coord = [x, y, z];
            coord[axis.index()] = side - 1 - coord[axis.index()];
            reflected.set(coord[0], coord[1], coord[2], Cell::Colored(color));
        }
        reflected
    }
}

/// Displays `side` z-slices side by side, rows from top (y = side - 1) to
/// bottom (y = 0), x increasing to the right. Empty cells show as `.`.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = self.side();
        // wide enough for the "z=N" header
        let width = side.max(3);

        for z in 0..side {
            if z > 0 {
                write!(f, "  ")?;
            }
            write!(f, "{:<width$}", format!("z={z}"))?;
        }
        writeln!(f)?;

        for y in (0..side).rev() {
            for z in 0..side {
                if z > 0 {
                    write!(f, "  ")?;
                }
                let row: String = (0..side).map(|x| self.get(x, y, z).display_char()).collect();
                write!(f, "{row:<width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
