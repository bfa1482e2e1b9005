//! Streak Cube Puzzle Library
//!
//! Generates "which view is impossible" puzzles: a random arrangement of
//! colored cube streaks, three views it can show under some rotation, and one
//! mirrored view that no rotation can ever produce.

pub mod bank;
pub mod checker;
pub mod config;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod grid;
pub mod persistence;
pub mod puzzle;
pub mod render;
pub mod view;

pub use bank::{Bank, BankBuilder, Question, Tier};
pub use checker::{find_impossible_direction, ReachableSet};
pub use error::{BankError, ConfigError, GenerationError, RenderError};
pub use grid::{Cell, Color, Grid, Palette, Shape, Streak};
pub use puzzle::{assemble, Label, Puzzle, PuzzleOption};
pub use view::{Direction, Orientation, Rotation, View};
