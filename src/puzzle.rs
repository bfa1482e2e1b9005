//! Assembly of four-option "which view is impossible" puzzles.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::checker::ReachableSet;
use crate::error::{ConfigError, GenerationError};
use crate::generator::random_grid;
use crate::grid::{Grid, Palette, Shape, Streak};
use crate::view::{Direction, Orientation, Rotation, View};

/// Default cap on regenerated arrangements per puzzle.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

/// Number of reachable (wrong) options per puzzle.
pub const NUM_DISTRACTORS: usize = 3;

/// Multiple-choice option label.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    A,
    B,
    C,
    D,
}

impl Label {
    pub const ALL: [Label; 4] = [Label::A, Label::B, Label::C, Label::D];

    pub const fn as_char(self) -> char {
        match self {
            Label::A => 'a',
            Label::B => 'b',
            Label::C => 'c',
            Label::D => 'd',
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One labeled answer choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleOption {
    pub label: Label,
    pub orientation: Orientation,
    pub view: View,
}

/// An accepted puzzle: an arrangement, its description and four options,
/// exactly one of which no rotation can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub grid: Grid,
    /// Streaks in paint order; repainting them reproduces `grid`.
    pub streaks: Vec<Streak>,
    pub description: Orientation,
    pub description_view: View,
    /// Options sorted by label.
    pub options: Vec<PuzzleOption>,
    pub answer: Label,
    /// Direction whose mirror image the answer is based on.
    pub impossible_direction: Direction,
    /// Number of arrangements generated, including the accepted one.
    pub attempts: usize,
}

impl Puzzle {
    /// Returns the option under `label`.
    pub fn option(&self, label: Label) -> Option<&PuzzleOption> {
        self.options.iter().find(|option| option.label == label)
    }

    /// Returns the impossible option.
    pub fn answer_option(&self) -> Option<&PuzzleOption> {
        self.option(self.answer)
    }

    /// Iterates over the three reachable options.
    pub fn distractors(&self) -> impl Iterator<Item = &PuzzleOption> {
        self.options.iter().filter(move |option| option.label != self.answer)
    }
}

/// Generates arrangements until one admits an impossible view, then builds a
/// puzzle from it.
///
/// RNG draws happen in this order: the streaks of each attempt; then, for each
/// of the 3 distractors, its direction, label and rotation; then the answer's
/// flip axis and rotation. Returns [`GenerationError::GenerationFailed`] once
/// `max_attempts` arrangements were rejected.
pub fn assemble<R: Rng + ?Sized>(
    rng: &mut R,
    shape: Shape,
    palette: &Palette,
    max_attempts: usize,
) -> Result<Puzzle, GenerationError> {
    if max_attempts == 0 {
        return Err(ConfigError::ZeroAttempts.into());
    }

    for attempt in 1..=max_attempts {
        let (grid, streaks) = random_grid(rng, shape, palette)?;
        let reachable = ReachableSet::compute(&grid);
        let Some(impossible_direction) = reachable.impossible_direction() else {
            continue;
        };

        let mut directions = Direction::ALL.to_vec();
        let mut labels = Label::ALL.to_vec();
        let mut options = Vec::with_capacity(Label::ALL.len());

        for _ in 0..NUM_DISTRACTORS {
            let direction = directions.remove(rng.random_range(0..directions.len()));
            let label = labels.remove(rng.random_range(0..labels.len()));
            let rotation = Rotation::ALL[rng.random_range(0..Rotation::ALL.len())];
            options.push(PuzzleOption {
                label,
                orientation: Orientation::proper(direction, rotation),
                view: reachable.view(direction, rotation).clone(),
            });
        }

        // never flip along the viewing axis: that reverses depth instead of
        // mirroring, and the result may well be reachable
        let (row_axis, col_axis) = impossible_direction.in_plane_axes();
        let flip = [row_axis, col_axis][rng.random_range(0..2)];
        let rotation = Rotation::ALL[rng.random_range(0..Rotation::ALL.len())];
        let orientation = Orientation {
            direction: impossible_direction,
            rotation,
            flip: Some(flip),
        };
        let answer_view = orientation.view(&grid);

        // guard only: a flipped view of an impossible basis is never reachable
        if reachable.contains(&answer_view) || options.iter().any(|option| option.view == answer_view) {
            continue;
        }

        let answer = labels[0];
        options.push(PuzzleOption {
            label: answer,
            orientation,
            view: answer_view,
        });
        options.sort_by_key(|option| option.label);

        let description = Orientation::proper(Direction::FRONT, Rotation::R0);
        let description_view = reachable.view(Direction::FRONT, Rotation::R0).clone();

        return Ok(Puzzle {
            grid,
            streaks,
            description,
            description_view,
            options,
            answer,
            impossible_direction,
            attempts: attempt,
        });
    }

    Err(GenerationError::GenerationFailed {
        attempts: max_attempts,
    })
}
