//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Parsing the requested mode (category + vocabulary direction)
//!   - Creating the per-request RNG (seeded when the client asks for it)
//!   - Dispatching to the synthesizer and shaping the public DTO
//!   - Reporting the category inventory

use rand::{rngs::StdRng, SeedableRng};
use tracing::{info, instrument, warn};

use crate::domain::{Category, Direction};
use crate::error::QuestionError;
use crate::protocol::{to_out, CategoriesOut, CategoryCount, QuestionOut};
use crate::state::AppState;

/// Category used when the client does not name one.
pub const DEFAULT_CATEGORY: Category = Category::Vocabulary;

#[instrument(level = "info", skip(state))]
pub fn request_question(
  state: &AppState,
  category: Option<&str>,
  direction: Option<&str>,
  seed: Option<u64>,
) -> Result<QuestionOut, QuestionError> {
  let category = match category {
    Some(raw) => raw.parse::<Category>().map_err(QuestionError::UnsupportedCategory)?,
    None => DEFAULT_CATEGORY,
  };
  // Direction only matters for vocabulary; elsewhere it is ignored.
  let direction = if category == Category::Vocabulary {
    Direction::parse_lenient(direction)
  } else {
    Direction::Mixed
  };

  let mut rng = match seed {
    Some(s) => StdRng::seed_from_u64(s),
    None => StdRng::from_entropy(),
  };

  match state.synth.next_question(category, direction, &mut rng) {
    Ok(q) => {
      let out = to_out(category, &q);
      info!(target: "question", %category, id = %out.id, blanks = out.blanks.len(), seeded = seed.is_some(), "Question served");
      Ok(out)
    }
    Err(e) => {
      warn!(target: "question", %category, error = %e, "Question request failed");
      Err(e)
    }
  }
}

pub fn inventory(state: &AppState) -> CategoriesOut {
  CategoriesOut {
    categories: state
      .synth
      .store()
      .inventory()
      .into_iter()
      .map(|(category, records)| CategoryCount { category, records })
      .collect(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::EngineConfig;
  use crate::store::ItemStore;
  use serde_json::json;

  fn state() -> AppState {
    let store = ItemStore::from_values([
      (
        Category::Vocabulary,
        json!([
          {"es": "perro", "en": "dog", "ru": "собака"},
          {"es": "gato", "en": "cat", "ru": "кошка"},
          {"es": "casa", "en": "house", "ru": "дом"},
          {"es": "libro", "en": "book", "ru": "книга"}
        ]),
      ),
      (
        Category::Future,
        json!([{"sentence_with_blank": "Mañana yo ____ visitar a mis abuelos.", "correct": "voy a", "options": ["voy a", "fui a", "vas a", "iba a"]}]),
      ),
    ]);
    AppState::from_store(store, &EngineConfig::default())
  }

  #[test]
  fn unknown_category_is_unsupported_mode() {
    let err = request_question(&state(), Some("subjunctive"), None, None).unwrap_err();
    assert_eq!(err, QuestionError::UnsupportedCategory("subjunctive".into()));
  }

  #[test]
  fn missing_category_defaults_to_vocabulary() {
    let out = request_question(&state(), None, Some("en-es"), Some(1)).unwrap();
    assert_eq!(out.category, Category::Vocabulary);
    assert_eq!(out.prompt.lines().next(), Some("Translate from English to Spanish:"));
  }

  #[test]
  fn seeded_requests_are_reproducible() {
    let st = state();
    let a = request_question(&st, Some("vocabulary"), Some("mixed"), Some(314)).unwrap();
    let b = request_question(&st, Some("vocabulary"), Some("mixed"), Some(314)).unwrap();
    assert_eq!(a.prompt, b.prompt);
    assert_eq!(a.blanks, b.blanks);
    assert_ne!(a.id, b.id);
  }

  #[test]
  fn unavailable_category_reports_no_content() {
    let err = request_question(&state(), Some("reflexive"), None, None).unwrap_err();
    assert!(matches!(err, QuestionError::NoUsableContent { category: Category::Reflexive, .. }));
  }

  #[test]
  fn inventory_lists_every_category() {
    let inv = inventory(&state());
    assert_eq!(inv.categories.len(), Category::ALL.len());
    let future = inv.categories.iter().find(|c| c.category == Category::Future).unwrap();
    assert_eq!(future.records, 1);
  }
}
