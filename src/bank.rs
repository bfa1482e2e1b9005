//! Question banks: several puzzles per difficulty tier, generated from one
//! seeded RNG stream and rendered to images.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

use crate::config::BankConfig;
use crate::error::{BankError, ConfigError, RenderError};
use crate::grid::{Palette, Shape};
use crate::puzzle::{assemble, Label, Puzzle};
use crate::render::{ImageKind, ImageRef, RenderJob, Renderer};

/// One difficulty level: a grid size, a palette and how many puzzles to make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tier {
    pub shape: Shape,
    pub palette: Palette,
    pub count: usize,
}

/// A rendered puzzle, ready for presentation.
#[derive(Debug, Clone)]
pub struct Question {
    /// 1-based index within the bank.
    pub index: usize,
    /// Index of the tier the question belongs to.
    pub tier: usize,
    pub grid_size: usize,
    pub image: ImageRef,
    pub options: BTreeMap<Label, ImageRef>,
    pub answer: Label,
    pub puzzle: Puzzle,
}

/// All questions generated from one seed.
#[derive(Debug, Clone)]
pub struct Bank {
    pub seed: u64,
    pub questions: Vec<Question>,
}

impl Bank {
    /// Correct labels, in question order.
    pub fn answers(&self) -> Vec<Label> {
        self.questions.iter().map(|question| question.answer).collect()
    }
}

/// Builds question banks. Owns the image index counter, which restarts at 1
/// for every bank.
#[derive(Debug, Clone)]
pub struct BankBuilder {
    seed: u64,
    tiers: Vec<Tier>,
    max_attempts: usize,
    next_index: usize,
}

impl BankBuilder {
    pub fn new(seed: u64, tiers: Vec<Tier>, max_attempts: usize) -> Result<Self, ConfigError> {
        if max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        Ok(Self {
            seed,
            tiers,
            max_attempts,
            next_index: 1,
        })
    }

    /// Validates a configuration before any random draw happens.
    pub fn from_config(config: &BankConfig) -> Result<Self, ConfigError> {
        let tiers = config
            .tiers
            .iter()
            .map(|tier| {
                let [nx, ny, nz] = tier.shape;
                Ok(Tier {
                    shape: Shape::new(nx, ny, nz)?,
                    palette: Palette::parse(tier.palette.as_slice())?,
                    count: tier.count,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Self::new(config.seed, tiers, config.max_attempts)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Total number of questions a bank will contain.
    pub fn question_count(&self) -> usize {
        self.tiers.iter().map(|tier| tier.count).sum()
    }

    /// Generates and renders every question, tier by tier.
    ///
    /// Any render failure aborts the whole bank: a question without its
    /// images cannot be presented.
    pub fn build(&mut self, renderer: &mut dyn Renderer) -> Result<Bank, BankError> {
        self.next_index = 1;
        let mut rng = ChaCha12Rng::seed_from_u64(self.seed);
        let mut questions = Vec::with_capacity(self.question_count());

        for (tier_index, tier) in self.tiers.iter().enumerate() {
            for _ in 0..tier.count {
                let index = self.next_index;
                self.next_index += 1;

                let puzzle = assemble(&mut rng, tier.shape, &tier.palette, self.max_attempts)
                    .map_err(|source| {
                        log::error!("question {index}: {source}");
                        BankError::Generation {
                            question: index,
                            source,
                        }
                    })?;
                log::debug!(
                    "question {index}: accepted arrangement after {} attempt(s), impossible direction {}",
                    puzzle.attempts,
                    puzzle.impossible_direction,
                );

                let question = render_question(renderer, index, tier_index, puzzle).map_err(|source| {
                    log::error!("question {index}: {source}");
                    BankError::Render {
                        question: index,
                        source,
                    }
                })?;
                log::info!(
                    "question {index} ({size}x{size}x{size}): answer {answer}",
                    size = question.grid_size,
                    answer = question.answer,
                );
                questions.push(question);
            }
        }

        Ok(Bank {
            seed: self.seed,
            questions,
        })
    }
}

fn render_question(
    renderer: &mut dyn Renderer,
    index: usize,
    tier: usize,
    puzzle: Puzzle,
) -> Result<Question, RenderError> {
    let image = renderer.render(&RenderJob {
        question: index,
        kind: ImageKind::Description,
        grid: &puzzle.grid,
        orientation: puzzle.description,
        view: &puzzle.description_view,
    })?;

    let mut options = BTreeMap::new();
    for option in &puzzle.options {
        let image_ref = renderer.render(&RenderJob {
            question: index,
            kind: ImageKind::Option(option.label),
            grid: &puzzle.grid,
            orientation: option.orientation,
            view: &option.view,
        })?;
        options.insert(option.label, image_ref);
    }

    Ok(Question {
        index,
        tier,
        grid_size: puzzle.grid.side(),
        image,
        options,
        answer: puzzle.answer,
        puzzle,
    })
}
