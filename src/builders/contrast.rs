//! Preposition contrast (por/para, a/en, con/sin, de/sobre), one or more blanks.
//!
//! Blank markers are zipped left to right with the declared (answer, pool)
//! pairs. A count mismatch makes the record unusable; a malformed multi-blank
//! record is never reinterpreted as a single-blank one.

use rand::Rng;

use super::cloze::{blank_from_pool, cloze_item, explanation_for};
use crate::domain::{AnswerSpec, ExerciseRecord};
use crate::error::UnusableRecord;
use crate::question::Question;

pub fn build<R: Rng + ?Sized>(record: &ExerciseRecord, rng: &mut R) -> Result<Question, UnusableRecord> {
  let item = cloze_item(record)?;

  let declared = item.answer.declared_blanks();
  if item.blank_count == 0 || item.blank_count != declared {
    return Err(UnusableRecord::new(format!(
      "prompt has {} blank markers but {} answer specs",
      item.blank_count, declared
    )));
  }

  let specs: Vec<(String, &[String])> = match &item.answer {
    AnswerSpec::Single { correct, pool } => vec![(correct.clone(), pool.as_slice())],
    AnswerSpec::PerBlank(specs) => specs.iter().map(|s| (s.correct.clone(), s.pool.as_slice())).collect(),
    AnswerSpec::AnyOf { .. } => return Err(UnusableRecord::new("several correct answers for one contrast blank")),
  };

  let blanks = specs
    .into_iter()
    .map(|(correct, pool)| blank_from_pool(rng, std::slice::from_ref(&correct), pool))
    .collect::<Result<Vec<_>, _>>()?;

  Question::new(item.prompt.clone(), blanks, explanation_for(record))
}
