//! Error types for grid construction, puzzle generation and rendering.

use std::path::PathBuf;

use crate::geometry::Axis;
use crate::grid::Color;

/// A shape or palette that can never produce a puzzle.
///
/// These are never retried.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid side length {0} is too small (minimum is 2)")]
    SideTooSmall(usize),
    #[error("grid shape {0}x{1}x{2} is not cubic")]
    NotCubic(usize, usize, usize),
    #[error("palette is empty")]
    EmptyPalette,
    #[error("color {0:?} appears more than once in the palette")]
    DuplicateColor(Color),
    #[error("unknown color token {0:?}")]
    UnknownColor(String),
    #[error("maximum attempt count must be at least 1")]
    ZeroAttempts,
    #[error("streak of length {0} is shorter than 2")]
    StreakTooShort(usize),
    #[error("streak from {origin:?} along {axis} with length {length} leaves the grid")]
    StreakOutOfBounds {
        origin: (usize, usize, usize),
        axis: Axis,
        length: usize,
    },
}

/// Failure to assemble a single puzzle.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no arrangement with an impossible view found after {attempts} attempts")]
    GenerationFailed { attempts: usize },
}

/// Failure of the external renderer to persist an image.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("renderer refused {0}")]
    Refused(String),
}

/// Failure to build a whole question bank.
#[derive(thiserror::Error, Debug)]
pub enum BankError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("question {question}: {source}")]
    Generation {
        question: usize,
        #[source]
        source: GenerationError,
    },
    #[error("question {question}: {source}")]
    Render {
        question: usize,
        #[source]
        source: RenderError,
    },
}
