//! Single-blank cloze families: prepositions, gustar, future, reflexive,
//! pronouns, context vocabulary, and conjugation prompts.
//!
//! Options always come from the record's own curated pool; nothing is
//! borrowed from sibling records because grammatical fit is context-specific.

use rand::Rng;

use crate::domain::{AnswerSpec, ClozeItem, ExerciseRecord, RecordBody};
use crate::error::UnusableRecord;
use crate::question::{Blank, Question};
use crate::sampling::{pick_distractors, shuffle_into_blank};

/// Allowed size of one declared option pool.
pub const MIN_POOL: usize = 3;
pub const MAX_POOL: usize = 5;

pub fn build<R: Rng + ?Sized>(record: &ExerciseRecord, rng: &mut R) -> Result<Question, UnusableRecord> {
  let item = cloze_item(record)?;
  check_single_marker(record, item)?;

  let (correct, pool) = match &item.answer {
    AnswerSpec::Single { correct, pool } => (vec![correct.clone()], pool.as_slice()),
    AnswerSpec::PerBlank(specs) if specs.len() == 1 => (vec![specs[0].correct.clone()], specs[0].pool.as_slice()),
    AnswerSpec::AnyOf { .. } => return Err(UnusableRecord::new("several correct answers outside comparisons")),
    AnswerSpec::PerBlank(specs) => {
      return Err(UnusableRecord::new(format!("{} answer specs for a single-blank family", specs.len())))
    }
  };

  let blank = blank_from_pool(rng, &correct, pool)?;
  Question::new(item.prompt.clone(), vec![blank], explanation_for(record))
}

pub(crate) fn cloze_item(record: &ExerciseRecord) -> Result<&ClozeItem, UnusableRecord> {
  match &record.body {
    RecordBody::Cloze(item) => Ok(item),
    RecordBody::Vocab(_) => Err(UnusableRecord::new("vocabulary entry in a cloze category")),
  }
}

/// One marker, or none for categories whose prompts are direct questions.
pub(crate) fn check_single_marker(record: &ExerciseRecord, item: &ClozeItem) -> Result<(), UnusableRecord> {
  match item.blank_count {
    1 => Ok(()),
    0 if record.category.allows_unmarked_prompt() => Ok(()),
    n => Err(UnusableRecord::new(format!("prompt has {n} blank markers, expected one"))),
  }
}

/// Validate a declared pool against its answers and turn it into a shuffled blank.
pub(crate) fn blank_from_pool<R: Rng + ?Sized>(
  rng: &mut R,
  correct: &[String],
  pool: &[String],
) -> Result<Blank, UnusableRecord> {
  if !(MIN_POOL..=MAX_POOL).contains(&pool.len()) {
    return Err(UnusableRecord::new(format!("option pool has {} candidates, need {MIN_POOL}-{MAX_POOL}", pool.len())));
  }
  for (i, opt) in pool.iter().enumerate() {
    if pool[..i].contains(opt) {
      return Err(UnusableRecord::new(format!("duplicate option '{opt}' in pool")));
    }
  }
  if let Some(missing) = correct.iter().find(|c| !pool.contains(c)) {
    return Err(UnusableRecord::new(format!("correct answer '{missing}' absent from its option pool")));
  }

  let want = pool.len().saturating_sub(correct.len());
  let distractors = pick_distractors(rng, correct, pool.iter().map(String::as_str), std::iter::empty(), want);
  shuffle_into_blank(rng, correct, distractors)
}

/// Record explanation followed by any translation lines.
pub(crate) fn explanation_for(record: &ExerciseRecord) -> String {
  let mut lines: Vec<String> = Vec::with_capacity(1 + record.translations.len());
  if !record.explanation.is_empty() {
    lines.push(record.explanation.clone());
  }
  lines.extend(record.translations.iter().map(|(label, text)| format!("{label}: {text}")));
  lines.join("\n")
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::Category;
  use crate::store::normalize_entry;
  use rand::{rngs::StdRng, SeedableRng};
  use serde_json::json;

  fn record(category: Category, v: serde_json::Value) -> ExerciseRecord {
    normalize_entry(category, &v).expect("fixture should normalise")
  }

  #[test]
  fn preposition_item_keeps_its_own_pool() {
    let r = record(
      Category::Prepositions,
      json!({"sentence_with_blank": "Voy ___ Madrid mañana.", "correct": "a", "options": ["a", "en", "por", "de"], "explanation": "Dirección: ir a."}),
    );
    for seed in 0..50 {
      let q = build(&r, &mut StdRng::seed_from_u64(seed)).unwrap();
      assert_eq!(q.prompt(), "Voy ___ Madrid mañana.");
      let blank = &q.blanks()[0];
      let mut opts = blank.options().to_vec();
      opts.sort();
      assert_eq!(opts, vec!["a", "de", "en", "por"]);
      assert_eq!(blank.correct_indices().len(), 1);
      assert_eq!(blank.options()[blank.correct_indices()[0]], "a");
      assert_eq!(q.explanation(), "Dirección: ir a.");
    }
  }

  #[test]
  fn translations_are_appended_to_explanation() {
    let r = record(
      Category::ContextVocab,
      json!({
        "sentence_with_blank": "Mañana voy a ____ con mis amigos.",
        "correct": "salir",
        "options": ["salir", "comer", "estudiar", "dormir"],
        "translation_en": "Tomorrow I'm going to go out with my friends.",
        "translation_ru": "Завтра я собираюсь гулять с друзьями.",
        "explanation": "Salir con amigos."
      }),
    );
    let q = build(&r, &mut StdRng::seed_from_u64(3)).unwrap();
    assert_eq!(
      q.explanation(),
      "Salir con amigos.\nEN: Tomorrow I'm going to go out with my friends.\nRU: Завтра я собираюсь гулять с друзьями."
    );
  }

  #[test]
  fn conjugation_prompt_without_marker_is_accepted() {
    let r = record(
      Category::Verbs,
      json!({"question": "Conjuga 'pensar' para 'yo' en presente.", "correct": "pienso", "options": ["pienso", "piensas", "pensé", "pensaba"]}),
    );
    assert!(build(&r, &mut StdRng::seed_from_u64(1)).is_ok());

    let unmarked = record(Category::Gustar, json!({"sentence_with_blank": "A Ana le gusta el cine.", "correct": "gusta", "options": ["gusta", "gustan", "parece"]}));
    assert!(build(&unmarked, &mut StdRng::seed_from_u64(1)).is_err());
  }

  #[test]
  fn invariant_violations_are_unusable() {
    let cases = [
      json!({"sentence_with_blank": "Yo me ____ a las seis.", "correct": "despierto", "options": ["despiertas", "despierta", "despertar"]}),
      json!({"sentence_with_blank": "Yo me ____ a las seis.", "correct": "despierto", "options": ["despierto", "despierta"]}),
      json!({"sentence_with_blank": "Yo me ____ a las seis.", "correct": "despierto", "options": ["despierto", "a", "b", "c", "d", "e"]}),
      json!({"sentence_with_blank": "Yo me ____ a las seis.", "correct": "despierto", "options": ["despierto", "despierta", "despierta"]}),
      json!({"sentence_with_blank": "Yo me ____ a las ____.", "correct": "despierto", "options": ["despierto", "despierta", "despiertas"]}),
    ];
    for case in cases {
      let r = record(Category::Reflexive, case.clone());
      assert!(build(&r, &mut StdRng::seed_from_u64(5)).is_err(), "{case}");
    }
  }
}
