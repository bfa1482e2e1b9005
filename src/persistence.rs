//! File I/O for saving and loading question banks.
//!
//! Two files are written next to the rendered images:
//! - `bank.json`: the manifest consumed by the presentation layer (image
//!   references, option labels, answers) plus the streaks needed to rebuild
//!   every grid
//! - `bank.txt`: the same bank in human-readable form

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bank::{Bank, Question};
use crate::error::ConfigError;
use crate::generator::paint_all;
use crate::grid::{Grid, Shape, Streak};
use crate::puzzle::Label;
use crate::render::ImageRef;
use crate::view::Direction;

const BANK_JSON: &str = "bank.json";
const BANK_TXT: &str = "bank.txt";

/// Serialized form of a bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub seed: u64,
    pub questions: Vec<QuestionRecord>,
}

/// Serialized form of one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub index: usize,
    pub tier: usize,
    pub grid_size: usize,
    pub image: ImageRef,
    pub options: BTreeMap<Label, ImageRef>,
    pub answer: Label,
    pub impossible_direction: Direction,
    pub streaks: Vec<Streak>,
}

impl QuestionRecord {
    fn new(question: &Question) -> Self {
        Self {
            index: question.index,
            tier: question.tier,
            grid_size: question.grid_size,
            image: question.image.clone(),
            options: question.options.clone(),
            answer: question.answer,
            impossible_direction: question.puzzle.impossible_direction,
            streaks: question.puzzle.streaks.clone(),
        }
    }

    /// Repaints the question's grid from its streaks.
    pub fn grid(&self) -> Result<Grid, ConfigError> {
        paint_all(Shape::cube(self.grid_size)?, &self.streaks)
    }
}

impl From<&Bank> for Manifest {
    fn from(bank: &Bank) -> Self {
        Self {
            seed: bank.seed,
            questions: bank.questions.iter().map(QuestionRecord::new).collect(),
        }
    }
}

/// Saves a bank to both manifest and text files in `dir`.
pub fn save(dir: &Path, bank: &Bank) -> std::io::Result<()> {
    fs::create_dir_all(dir)?;
    save_text(dir, bank)?;
    save_manifest(dir, bank)?;
    Ok(())
}

/// Saves the bank in human-readable text format.
fn save_text(dir: &Path, bank: &Bank) -> std::io::Result<()> {
    let mut file = BufWriter::new(File::create(dir.join(BANK_TXT))?);
    writeln!(file, "Seed {}: {} questions\n", bank.seed, bank.questions.len())?;
    for question in &bank.questions {
        let puzzle = &question.puzzle;
        writeln!(
            file,
            "Question {} (tier {}, {size}x{size}x{size}):",
            question.index,
            question.tier + 1,
            size = question.grid_size,
        )?;
        write!(file, "{}", puzzle.grid)?;
        writeln!(file, "Front view ({}):", puzzle.description)?;
        write!(file, "{}", puzzle.description_view)?;
        for option in &puzzle.options {
            let marker = if option.label == puzzle.answer { "  <- impossible" } else { "" };
            writeln!(file, "{}) {}{marker}", option.label, option.orientation)?;
            write!(file, "{}", option.view)?;
        }
        writeln!(file, "Answer: {}", question.answer)?;
        writeln!(file)?;
    }
    file.flush()
}

/// Saves the JSON manifest.
fn save_manifest(dir: &Path, bank: &Bank) -> std::io::Result<()> {
    let file = BufWriter::new(File::create(dir.join(BANK_JSON))?);
    serde_json::to_writer_pretty(file, &Manifest::from(bank))?;
    Ok(())
}

/// Loads the manifest saved in `dir`.
pub fn load(dir: &Path) -> Option<Manifest> {
    let text = fs::read_to_string(dir.join(BANK_JSON)).ok()?;
    serde_json::from_str(&text).ok()
}

/// Returns the number of saved questions.
pub fn count(dir: &Path) -> Option<usize> {
    load(dir).map(|manifest| manifest.questions.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::BankBuilder;
    use crate::config::BankConfig;
    use crate::render::MemoryRenderer;

    fn bank() -> Bank {
        let config = BankConfig {
            seed: 21,
            ..BankConfig::default()
        };
        BankBuilder::from_config(&config)
            .unwrap()
            .build(&mut MemoryRenderer::default())
            .unwrap()
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let bank = bank();
        save(dir.path(), &bank).unwrap();

        let manifest = load(dir.path()).unwrap();
        assert_eq!(manifest, Manifest::from(&bank));
        assert_eq!(count(dir.path()), Some(9));

        for (record, question) in manifest.questions.iter().zip(&bank.questions) {
            assert_eq!(record.grid().unwrap(), question.puzzle.grid);
            assert_eq!(record.options[&record.answer], question.options[&question.answer]);
        }

        let text = fs::read_to_string(dir.path().join(BANK_TXT)).unwrap();
        assert!(text.starts_with("Seed 21: 9 questions\n"));
        assert_eq!(text.matches("<- impossible").count(), 9);
    }

    #[test]
    fn test_manifest_json_layout() {
        let manifest = Manifest::from(&bank());
        let json = serde_json::to_value(&manifest).unwrap();
        let first = &json["questions"][0];
        assert_eq!(first["image"], "SRQ_1.png");
        assert_eq!(first["options"]["a"], "SRQ_1_a.png");
        assert!(["a", "b", "c", "d"].contains(&first["answer"].as_str().unwrap()));
    }

    #[test]
    fn test_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load(dir.path()), None);
        assert_eq!(count(dir.path()), None);
    }
}
