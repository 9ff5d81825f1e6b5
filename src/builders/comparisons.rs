//! Comparisons: one blank whose answer set may hold several equally idiomatic forms.
//!
//! A list of correct strings is taken at face value as intentionally
//! multi-valid; every member must land on its own index in the blank.

use rand::Rng;

use super::cloze::{blank_from_pool, check_single_marker, cloze_item, explanation_for};
use crate::domain::{AnswerSpec, ExerciseRecord};
use crate::error::UnusableRecord;
use crate::question::Question;

pub fn build<R: Rng + ?Sized>(record: &ExerciseRecord, rng: &mut R) -> Result<Question, UnusableRecord> {
  let item = cloze_item(record)?;
  check_single_marker(record, item)?;

  let (correct, pool) = match &item.answer {
    AnswerSpec::Single { correct, pool } => (vec![correct.clone()], pool.as_slice()),
    AnswerSpec::AnyOf { correct, pool } => (correct.clone(), pool.as_slice()),
    AnswerSpec::PerBlank(specs) if specs.len() == 1 => (vec![specs[0].correct.clone()], specs[0].pool.as_slice()),
    AnswerSpec::PerBlank(specs) => {
      return Err(UnusableRecord::new(format!("{} answer specs for a single-blank comparison", specs.len())))
    }
  };

  let blank = blank_from_pool(rng, &correct, pool)?;
  Question::new(item.prompt.clone(), vec![blank], explanation_for(record))
}
