//! Item Store: one immutable collection of `ExerciseRecord`s per category.
//!
//! Category files come from an external content producer and are only
//! semi-trusted. Each file is parsed once at startup; every entry is normalised
//! into the canonical record shape or dropped with a debug log. A missing or
//! malformed file leaves that category empty and never stops the process.
//!
//! Accepted entry shapes:
//!   vocabulary: {"es": .., "en": .., "ru": ..} (es plus at least one gloss)
//!   cloze:      {"sentence_with_blank": .., "correct": str | [str],
//!                "options": [str] | [[str]], "explanation"?, "translation_en"?, "translation_ru"?}
//!   verbs:      cloze fields, with "question" as prompt, or composed from
//!               "infinitive" / "person" / "tense"

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use crate::domain::{
  AnswerSpec, BlankSpec, Category, ClozeItem, ExerciseRecord, RecordBody, VocabEntry,
};
use crate::error::StoreError;
use crate::util::{count_blanks, fill_template, non_empty, trunc_for_log};

const VERB_PROMPT_TEMPLATE: &str = "Conjuga '{infinitive}' para '{person}' en {tense}.";
const DEFAULT_TENSE: &str = "presente";

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
  One(String),
  Many(Vec<String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OptionsShape {
  Flat(Vec<String>),
  Nested(Vec<Vec<String>>),
}

#[derive(Deserialize)]
struct RawVocab {
  #[serde(default)] es: Option<String>,
  #[serde(default)] en: Option<String>,
  #[serde(default)] ru: Option<String>,
}

#[derive(Deserialize)]
struct RawCloze {
  #[serde(default, alias = "sentence", alias = "prompt")]
  sentence_with_blank: Option<String>,
  #[serde(default)] question: Option<String>,
  #[serde(default)] correct: Option<OneOrMany>,
  #[serde(default)] options: Option<OptionsShape>,
  #[serde(default)] explanation: Option<String>,
  #[serde(default)] translation_en: Option<String>,
  #[serde(default)] translation_ru: Option<String>,
  // conjugation prompts
  #[serde(default)] infinitive: Option<String>,
  #[serde(default)] person: Option<String>,
  #[serde(default)] tense: Option<String>,
}

/// Read-only view over every loaded category.
#[derive(Debug, Default)]
pub struct ItemStore {
  collections: HashMap<Category, Vec<ExerciseRecord>>,
}

impl ItemStore {
  /// Load each (category, file) pair once. Categories that fail to load stay empty.
  #[instrument(level = "info", skip_all)]
  pub fn load_all(sources: impl IntoIterator<Item = (Category, PathBuf)>) -> Self {
    let collections: HashMap<_, _> = sources
      .into_iter()
      .map(|(category, path)| (category, load_category(&path, category)))
      .collect();
    let store = Self { collections };
    store.log_inventory();
    store
  }

  /// Build from in-memory JSON values (one array per category).
  #[cfg(test)]
  pub fn from_values(values: impl IntoIterator<Item = (Category, Value)>) -> Self {
    let collections = values
      .into_iter()
      .map(|(category, value)| {
        let records = match value {
          Value::Array(items) => parse_collection(category, items),
          _ => Vec::new(),
        };
        (category, records)
      })
      .collect();
    Self { collections }
  }

  /// Records for `category`; empty when the category is unavailable.
  pub fn records(&self, category: Category) -> &[ExerciseRecord] {
    self.collections.get(&category).map(Vec::as_slice).unwrap_or(&[])
  }

  /// (category, record count) for every known category, in canonical order.
  pub fn inventory(&self) -> Vec<(Category, usize)> {
    Category::ALL.iter().map(|c| (*c, self.records(*c).len())).collect()
  }

  pub fn is_empty(&self) -> bool {
    self.collections.values().all(Vec::is_empty)
  }

  fn log_inventory(&self) {
    for (category, count) in self.inventory() {
      info!(target: "store", %category, records = count, "Startup item inventory");
    }
    if self.is_empty() {
      error!(target: "store", "No category has any usable records; every question request will fail");
    }
  }
}

/// Load one category file. Missing file or non-list content yields an empty sequence.
#[instrument(level = "info", skip_all, fields(%category, path = %path.display()))]
pub fn load_category(path: &Path, category: Category) -> Vec<ExerciseRecord> {
  match read_collection(path) {
    Ok(items) => parse_collection(category, items),
    Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
      warn!(target: "store", %category, path = %path.display(), "Category file not found; category unavailable");
      Vec::new()
    }
    Err(e) => {
      error!(target: "store", %category, path = %path.display(), error = %e, "Failed to load category file; category unavailable");
      Vec::new()
    }
  }
}

fn read_collection(path: &Path) -> Result<Vec<Value>, StoreError> {
  let text = std::fs::read_to_string(path)?;
  match serde_json::from_str::<Value>(&text)? {
    Value::Array(items) => Ok(items),
    _ => Err(StoreError::NotAList),
  }
}

fn parse_collection(category: Category, items: Vec<Value>) -> Vec<ExerciseRecord> {
  let total = items.len();
  let records: Vec<ExerciseRecord> = items
    .into_iter()
    .enumerate()
    .filter_map(|(idx, item)| match normalize_entry(category, &item) {
      Ok(record) => Some(record),
      Err(reason) => {
        debug!(target: "store", %category, idx, %reason, entry = %trunc_for_log(&item.to_string(), 160), "Dropping entry");
        None
      }
    })
    .collect();
  info!(target: "store", %category, kept = records.len(), dropped = total - records.len(), "Category parsed");
  records
}

/// Normalise one raw entry into the canonical record, or say why it was dropped.
pub fn normalize_entry(category: Category, item: &Value) -> Result<ExerciseRecord, String> {
  if !item.is_object() {
    return Err("entry is not a mapping".into());
  }
  match category {
    Category::Vocabulary => normalize_vocab(item),
    _ => normalize_cloze(category, item),
  }
}

fn normalize_vocab(item: &Value) -> Result<ExerciseRecord, String> {
  let raw: RawVocab = serde_json::from_value(item.clone()).map_err(|e| e.to_string())?;
  let entry = VocabEntry {
    es: non_empty(raw.es.as_deref()),
    en: non_empty(raw.en.as_deref()),
    ru: non_empty(raw.ru.as_deref()),
  };
  if entry.es.is_none() {
    return Err("missing source term 'es'".into());
  }
  if entry.en.is_none() && entry.ru.is_none() {
    return Err("no target-language gloss".into());
  }
  Ok(ExerciseRecord {
    category: Category::Vocabulary,
    body: RecordBody::Vocab(entry),
    explanation: String::new(),
    translations: Vec::new(),
  })
}

fn normalize_cloze(category: Category, item: &Value) -> Result<ExerciseRecord, String> {
  let raw: RawCloze = serde_json::from_value(item.clone()).map_err(|e| e.to_string())?;

  let prompt = non_empty(raw.sentence_with_blank.as_deref())
    .or_else(|| non_empty(raw.question.as_deref()))
    .or_else(|| compose_verb_prompt(category, &raw))
    .ok_or("missing prompt")?;
  let correct = raw.correct.ok_or("missing correct answer")?;
  let options = raw.options.ok_or("missing option pool")?;

  let answer = match (correct, options) {
    (OneOrMany::One(c), OptionsShape::Flat(pool)) => AnswerSpec::Single {
      correct: clean_one(&c)?,
      pool: clean_pool(&pool)?,
    },
    (OneOrMany::Many(cs), OptionsShape::Flat(pool)) => {
      let cs = clean_many(&cs)?;
      let pool = clean_pool(&pool)?;
      match cs.len() {
        1 => AnswerSpec::Single { correct: cs.into_iter().next().unwrap_or_default(), pool },
        _ if category.allows_multiple_answers() => AnswerSpec::AnyOf { correct: cs, pool },
        n => return Err(format!("{n} answers declared for a single option pool")),
      }
    }
    (OneOrMany::One(c), OptionsShape::Nested(pools)) if pools.len() == 1 => {
      AnswerSpec::PerBlank(vec![BlankSpec { correct: clean_one(&c)?, pool: clean_pool(&pools[0])? }])
    }
    (OneOrMany::Many(cs), OptionsShape::Nested(pools)) if !cs.is_empty() && cs.len() == pools.len() => {
      let specs = cs
        .iter()
        .zip(pools.iter())
        .map(|(c, pool)| Ok(BlankSpec { correct: clean_one(c)?, pool: clean_pool(pool)? }))
        .collect::<Result<Vec<_>, String>>()?;
      AnswerSpec::PerBlank(specs)
    }
    _ => return Err("answers and option pools do not pair up".into()),
  };

  let translations = [("EN", raw.translation_en), ("RU", raw.translation_ru)]
    .into_iter()
    .filter_map(|(label, text)| non_empty(text.as_deref()).map(|t| (label.to_string(), t)))
    .collect();

  Ok(ExerciseRecord {
    category,
    body: RecordBody::Cloze(ClozeItem { blank_count: count_blanks(&prompt), prompt, answer }),
    explanation: non_empty(raw.explanation.as_deref()).unwrap_or_default(),
    translations,
  })
}

fn compose_verb_prompt(category: Category, raw: &RawCloze) -> Option<String> {
  if category != Category::Verbs {
    return None;
  }
  let infinitive = non_empty(raw.infinitive.as_deref())?;
  let person = non_empty(raw.person.as_deref())?;
  let tense = non_empty(raw.tense.as_deref()).unwrap_or_else(|| DEFAULT_TENSE.to_string());
  Some(fill_template(
    VERB_PROMPT_TEMPLATE,
    &[("infinitive", &infinitive), ("person", &person), ("tense", &tense)],
  ))
}

fn clean_one(s: &str) -> Result<String, String> {
  non_empty(Some(s)).ok_or_else(|| "empty answer string".to_string())
}

fn clean_many(values: &[String]) -> Result<Vec<String>, String> {
  if values.is_empty() {
    return Err("empty answer list".into());
  }
  values.iter().map(|v| clean_one(v)).collect()
}

fn clean_pool(pool: &[String]) -> Result<Vec<String>, String> {
  if pool.is_empty() {
    return Err("empty option pool".into());
  }
  pool
    .iter()
    .map(|o| non_empty(Some(o)).ok_or_else(|| "empty option string".to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn cloze(record: &ExerciseRecord) -> &ClozeItem {
    match &record.body {
      RecordBody::Cloze(c) => c,
      RecordBody::Vocab(_) => panic!("expected cloze record"),
    }
  }

  #[test]
  fn vocab_requires_source_and_one_gloss() {
    assert!(normalize_entry(Category::Vocabulary, &json!({"es": "perro", "en": "dog", "ru": "собака"})).is_ok());
    assert!(normalize_entry(Category::Vocabulary, &json!({"es": "perro", "ru": "собака"})).is_ok());
    assert!(normalize_entry(Category::Vocabulary, &json!({"es": "perro"})).is_err());
    assert!(normalize_entry(Category::Vocabulary, &json!({"en": "dog", "ru": "собака"})).is_err());
    assert!(normalize_entry(Category::Vocabulary, &json!({"es": "  ", "en": "dog"})).is_err());
    assert!(normalize_entry(Category::Vocabulary, &json!(["perro", "dog"])).is_err());
  }

  #[test]
  fn flat_string_answer_becomes_single() {
    let r = normalize_entry(
      Category::Prepositions,
      &json!({
        "sentence_with_blank": "Voy ___ Madrid mañana.",
        "correct": " a ",
        "options": ["a", "en", "por", "de"],
        "explanation": "Dirección.",
        "translation_en": "I'm going to Madrid tomorrow."
      }),
    )
    .unwrap();
    let c = cloze(&r);
    assert_eq!(c.blank_count, 1);
    assert_eq!(c.answer, AnswerSpec::Single { correct: "a".into(), pool: vec!["a".into(), "en".into(), "por".into(), "de".into()] });
    assert_eq!(r.explanation, "Dirección.");
    assert_eq!(r.translations, vec![("EN".to_string(), "I'm going to Madrid tomorrow.".to_string())]);
  }

  #[test]
  fn nested_options_pair_with_answer_list() {
    let r = normalize_entry(
      Category::PrepositionContrast,
      &json!({
        "sentence_with_blank": "Trabajo ____ la escuela ____ dos horas.",
        "correct": ["para", "por"],
        "options": [["para", "por", "con", "sin"], ["por", "para", "en", "sin"]]
      }),
    )
    .unwrap();
    let c = cloze(&r);
    assert_eq!(c.blank_count, 2);
    assert_eq!(c.answer.declared_blanks(), 2);
  }

  #[test]
  fn unpaired_shapes_are_dropped() {
    let cases = [
      json!({"sentence_with_blank": "x ____ y ____", "correct": ["para", "por"], "options": [["para", "por", "con"]]}),
      json!({"sentence_with_blank": "x ____ y", "correct": "para", "options": [["para", "por"], ["por", "en"]]}),
      json!({"sentence_with_blank": "x ____ y ____", "correct": ["para", "por"], "options": ["para", "por", "con"]}),
      json!({"sentence_with_blank": "x ____ y", "options": ["para", "por", "con"]}),
      json!({"sentence_with_blank": "x ____ y", "correct": "para", "options": []}),
      json!({"sentence_with_blank": "x ____ y", "correct": "para"}),
      json!({"correct": "para", "options": ["para", "por", "con"]}),
      json!({"sentence_with_blank": "x ____ y", "correct": 3, "options": ["para", "por", "con"]}),
    ];
    for case in cases {
      assert!(normalize_entry(Category::PrepositionContrast, &case).is_err(), "{case}");
    }
  }

  #[test]
  fn several_answers_only_for_comparisons() {
    let item = json!({
      "sentence_with_blank": "Ana es ____ alta que su hermano.",
      "correct": ["más", "menos"],
      "options": ["más", "menos", "tan", "como"]
    });
    let r = normalize_entry(Category::Comparisons, &item).unwrap();
    assert!(matches!(cloze(&r).answer, AnswerSpec::AnyOf { .. }));
    assert!(normalize_entry(Category::Gustar, &item).is_err());

    let single_in_list = json!({"sentence_with_blank": "A Ana le ____ el cine.", "correct": ["gusta"], "options": ["gusta", "gustan", "parece"]});
    let r = normalize_entry(Category::Gustar, &single_in_list).unwrap();
    assert!(matches!(cloze(&r).answer, AnswerSpec::Single { .. }));
  }

  #[test]
  fn verb_prompt_is_composed_when_question_missing() {
    let r = normalize_entry(
      Category::Verbs,
      &json!({"infinitive": "pensar", "person": "yo", "correct": "pienso", "options": ["pienso", "piensas", "pensé", "pensaba"]}),
    )
    .unwrap();
    let c = cloze(&r);
    assert_eq!(c.prompt, "Conjuga 'pensar' para 'yo' en presente.");
    assert_eq!(c.blank_count, 0);

    let no_prompt = json!({"infinitive": "pensar", "correct": "pienso", "options": ["pienso", "piensas", "pensé"]});
    assert!(normalize_entry(Category::Verbs, &no_prompt).is_err());
    let not_verbs = json!({"infinitive": "pensar", "person": "yo", "correct": "pienso", "options": ["pienso", "piensas", "pensé"]});
    assert!(normalize_entry(Category::Future, &not_verbs).is_err());
  }

  #[test]
  fn non_list_values_give_empty_categories() {
    let store = ItemStore::from_values([
      (Category::Gustar, json!({"not": "a list"})),
      (Category::Future, json!([])),
      (Category::Vocabulary, json!([{"es": "perro", "en": "dog"}, 42, {"es": ""}])),
    ]);
    assert!(store.records(Category::Gustar).is_empty());
    assert!(store.records(Category::Future).is_empty());
    assert!(store.records(Category::Reflexive).is_empty());
    assert_eq!(store.records(Category::Vocabulary).len(), 1);
    assert!(!store.is_empty());
  }

  #[test]
  fn load_tolerates_missing_and_malformed_files() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("vocab.json");
    std::fs::write(&good, r#"[{"es": "perro", "en": "dog", "ru": "собака"}, "junk"]"#).unwrap();
    let broken = dir.path().join("gustar.json");
    std::fs::write(&broken, "{ not json").unwrap();
    let object = dir.path().join("future.json");
    std::fs::write(&object, r#"{"vocab": []}"#).unwrap();

    assert_eq!(load_category(&good, Category::Vocabulary).len(), 1);
    assert!(load_category(&broken, Category::Gustar).is_empty());
    assert!(load_category(&object, Category::Future).is_empty());
    assert!(load_category(&dir.path().join("absent.json"), Category::Pronouns).is_empty());

    let store = ItemStore::load_all([
      (Category::Vocabulary, good),
      (Category::Gustar, broken),
      (Category::Pronouns, dir.path().join("absent.json")),
    ]);
    let inventory = store.inventory();
    assert_eq!(inventory.len(), Category::ALL.len());
    assert_eq!(inventory[0], (Category::Vocabulary, 1));
  }
}
